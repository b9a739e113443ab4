//! SMTP implementation of the EmailSender trait using lettre.

use async_trait::async_trait;
use lettre::{
    message::header::ContentType,
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use uuid::Uuid;

use fs_core::errors::DomainError;
use fs_core::services::email::EmailSender;
use fs_shared::config::EmailConfig;

/// SMTP email sender backed by lettre's async transport
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    base_url: String,
}

impl SmtpEmailSender {
    /// Create a new SMTP sender from configuration
    pub fn new(config: &EmailConfig) -> Result<Self, DomainError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| DomainError::Internal {
                message: format!("Invalid SMTP relay configuration: {e}"),
            })?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from_address: config.from_address.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn send(&self, to: &str, subject: &str, body: String) -> Result<(), DomainError> {
        let message = Message::builder()
            .from(self.from_address.parse().map_err(|e| DomainError::Internal {
                message: format!("Invalid from address: {e}"),
            })?)
            .to(to.parse().map_err(|e| DomainError::Internal {
                message: format!("Invalid recipient address: {e}"),
            })?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to build email: {e}"),
            })?;

        // Error text stays generic; link tokens must not end up in logs.
        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to send email: {e}"),
            })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_confirmation_email(
        &self,
        email: &str,
        user_id: Uuid,
        token: &str,
    ) -> Result<(), DomainError> {
        let link = format!(
            "{}/confirm-email?userId={}&token={}",
            self.base_url, user_id, token
        );
        let body = format!(
            "Welcome to FriendShare!\n\n\
             Please confirm your email address by opening the link below:\n\n\
             {link}\n\n\
             If you did not create this account, you can ignore this message.\n"
        );

        self.send(email, "Confirm your FriendShare account", body)
            .await?;

        tracing::info!(%user_id, "confirmation email sent");
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        email: &str,
        token: &str,
    ) -> Result<(), DomainError> {
        let link = format!(
            "{}/reset-password?email={}&token={}",
            self.base_url, email, token
        );
        let body = format!(
            "A password reset was requested for your FriendShare account.\n\n\
             Open the link below to choose a new password:\n\n\
             {link}\n\n\
             If you did not request this, you can ignore this message.\n"
        );

        self.send(email, "Reset your FriendShare password", body)
            .await?;

        tracing::info!("password reset email sent");
        Ok(())
    }
}
