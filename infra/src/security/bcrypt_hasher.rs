//! Bcrypt implementation of the PasswordHasher trait.

use fs_core::errors::DomainError;
use fs_core::services::auth::PasswordHasher;

/// Password hasher backed by the bcrypt crate
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with the default bcrypt cost
    pub fn new() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Create a hasher with an explicit cost factor
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Password hashing failed: {e}"),
        })
    }

    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(password, password_hash).map_err(|e| DomainError::Internal {
            message: format!("Password verification failed: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Cost 4 is the lowest bcrypt accepts; keeps the tests fast.
    fn test_hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::with_cost(4)
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = test_hasher();
        let hash = hasher.hash("hunter2hunter2").unwrap();

        assert_ne!(hash, "hunter2hunter2");
        assert!(hasher.verify("hunter2hunter2", &hash).unwrap());
        assert!(!hasher.verify("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = test_hasher();
        let first = hasher.hash("same-password").unwrap();
        let second = hasher.hash("same-password").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let hasher = test_hasher();
        assert!(hasher.verify("password", "not-a-bcrypt-hash").is_err());
    }
}
