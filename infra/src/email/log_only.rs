//! Log-only email sender for development environments.
//!
//! Writes the would-be message to the log instead of delivering it, so the
//! confirmation and reset flows can be exercised without an SMTP relay.

use async_trait::async_trait;
use uuid::Uuid;

use fs_core::errors::DomainError;
use fs_core::services::email::EmailSender;

/// Email sender that logs instead of delivering
pub struct LogOnlyEmailSender;

#[async_trait]
impl EmailSender for LogOnlyEmailSender {
    async fn send_confirmation_email(
        &self,
        email: &str,
        user_id: Uuid,
        token: &str,
    ) -> Result<(), DomainError> {
        tracing::info!(%email, %user_id, %token, "email confirmation (log only)");
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        email: &str,
        token: &str,
    ) -> Result<(), DomainError> {
        tracing::info!(%email, %token, "password reset (log only)");
        Ok(())
    }
}
