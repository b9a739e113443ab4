//! Error type definitions for authentication and token management.
//!
//! All failures cross the service boundary as tagged values; nothing in the
//! token lifecycle panics or throws past it. The login path deliberately
//! reuses one message for unknown-email and wrong-password so responses do
//! not reveal which accounts exist.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password; one message for both cases
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account has been deactivated")]
    AccountDeactivated,

    #[error("Email address has not been confirmed")]
    EmailNotConfirmed,

    #[error("Account is temporarily locked")]
    AccountLocked,

    #[error("An account with this email already exists")]
    UserAlreadyExists,

    #[error("This username is already taken")]
    UsernameTaken,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid email confirmation token")]
    InvalidConfirmationToken,

    #[error("Invalid or expired password reset token")]
    InvalidResetToken,
}

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Bad signature, wrong algorithm, wrong issuer/audience or malformed
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Token expired")]
    TokenExpired,

    /// Refresh value mismatch, missing, or past its stored expiry
    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("Missing required claim: {claim}")]
    MissingClaim { claim: String },

    #[error("Token generation failed")]
    TokenGenerationFailed,

    /// Signing secret shorter than the required minimum; fatal at startup
    #[error("Signing secret must be at least {minimum} bytes")]
    WeakSecret { minimum: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        // The same text must serve unknown-email and wrong-password denials.
        let message = AuthError::InvalidCredentials.to_string();
        assert!(!message.to_lowercase().contains("exist"));
        assert!(!message.to_lowercase().contains("unknown"));
    }

    #[test]
    fn test_weak_secret_message() {
        let error = TokenError::WeakSecret { minimum: 32 };
        assert!(error.to_string().contains("32"));
    }
}
