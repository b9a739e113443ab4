//! Email delivery seam used by the authentication flows.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainError;

/// Trait for sending account-related email.
///
/// Implementations live in the infrastructure layer; the domain only cares
/// that a confirmation or reset link reaches the address. Token values must
/// never appear in error messages.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send an email confirmation link to a freshly registered user
    async fn send_confirmation_email(
        &self,
        email: &str,
        user_id: Uuid,
        token: &str,
    ) -> Result<(), DomainError>;

    /// Send a password reset link
    async fn send_password_reset_email(&self, email: &str, token: &str)
        -> Result<(), DomainError>;
}
