//! Password hashing seam.

use crate::errors::DomainError;

/// Trait for password hashing and verification.
///
/// The production implementation wraps a vetted memory-hard/cost-based
/// primitive (bcrypt in the infrastructure layer); the domain never invents
/// its own scheme and never sees plaintext beyond these two calls.
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verify a plaintext password against a stored hash
    fn verify(&self, password: &str, password_hash: &str) -> Result<bool, DomainError>;
}
