//! User repository trait defining the interface for account persistence.
//!
//! Besides account CRUD this trait carries the refresh-store contract: the
//! two refresh fields on the user row are written either unconditionally
//! (login issues a fresh credential regardless of what was stored) or through
//! a compare-and-swap keyed on the previously stored value (rotation). The
//! conditional write is what keeps refresh rotation at-most-once per stored
//! value under concurrent requests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given ID
    /// * `Err(DomainError)` - Storage error
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by their email address (login key)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate email/username)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user
    ///
    /// # Returns
    /// * `Ok(true)` - User was deleted
    /// * `Ok(false)` - User not found
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Overwrite the stored refresh token unconditionally.
    ///
    /// Used on login: a fresh issuance always replaces whatever was stored.
    ///
    /// # Returns
    /// * `Ok(true)` - Fields written
    /// * `Ok(false)` - User not found
    async fn store_refresh_token(
        &self,
        id: Uuid,
        value: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Replace the stored refresh token only if it still equals
    /// `current_value` (atomic conditional update).
    ///
    /// The write must be a single compare-and-swap at the storage layer: of
    /// two concurrent rotations presenting the same value, exactly one may
    /// observe `Ok(true)`.
    ///
    /// # Returns
    /// * `Ok(true)` - This caller won the rotation
    /// * `Ok(false)` - Conflict: the stored value no longer matches (or the
    ///   user is gone)
    async fn rotate_refresh_token(
        &self,
        id: Uuid,
        current_value: &str,
        new_value: &str,
        new_expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Clear both refresh fields (logout, password change/reset).
    ///
    /// # Returns
    /// * `Ok(true)` - Fields cleared (also when already empty)
    /// * `Ok(false)` - User not found
    async fn clear_refresh_token(&self, id: Uuid) -> Result<bool, DomainError>;
}
