//! Request and response DTOs for the authentication endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::user::UserDto;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 100))]
    pub password: String,
    #[validate(must_match = "password")]
    pub confirm_password: String,
    #[validate(length(max = 50))]
    pub first_name: Option<String>,
    #[validate(length(max = 50))]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    /// The expired (or expiring) access token
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmEmailRequest {
    pub user_id: Uuid,
    #[validate(length(min = 1))]
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub token: String,
    #[validate(length(min = 8, max = 100))]
    pub new_password: String,
    #[validate(must_match = "new_password")]
    pub confirm_password: String,
}

/// Response body shared by login, refresh and the message-only auth flows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponseDto {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDto>,
}

impl From<fs_core::domain::value_objects::AuthResponse> for AuthResponseDto {
    fn from(response: fs_core::domain::value_objects::AuthResponse) -> Self {
        Self {
            success: response.success,
            message: response.message,
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: response.expires_at,
            user: response.user.map(UserDto::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterRequest {
        RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
            first_name: None,
            last_name: None,
        }
    }

    #[test]
    fn test_register_request_valid() {
        assert!(valid_register().validate().is_ok());
    }

    #[test]
    fn test_register_request_password_mismatch() {
        let request = RegisterRequest {
            confirm_password: "different123".to_string(),
            ..valid_register()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_short_password() {
        let request = RegisterRequest {
            password: "short".to_string(),
            confirm_password: "short".to_string(),
            ..valid_register()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_register_request_bad_email() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid_register()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_login_request_validation() {
        let request = LoginRequest {
            email: "alice@example.com".to_string(),
            password: "x".to_string(),
        };
        assert!(request.validate().is_ok());

        let bad = LoginRequest {
            email: "nope".to_string(),
            password: "x".to_string(),
        };
        assert!(bad.validate().is_err());
    }
}
