//! Authentication response value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::value_objects::user_profile::UserProfile;

/// Result envelope returned by the authentication operations.
///
/// Successful login and refresh carry a token pair plus the user profile;
/// operations such as registration or password reset report success with a
/// message only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Whether the operation succeeded
    pub success: bool,

    /// Human-readable outcome message
    pub message: String,

    /// JWT access token (login/refresh only)
    pub access_token: Option<String>,

    /// Opaque refresh token (login/refresh only)
    pub refresh_token: Option<String>,

    /// Access token expiry (login/refresh only)
    pub expires_at: Option<DateTime<Utc>>,

    /// Profile of the authenticated user
    pub user: Option<UserProfile>,
}

impl AuthResponse {
    /// Creates a successful response without tokens
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            access_token: None,
            refresh_token: None,
            expires_at: None,
            user: None,
        }
    }

    /// Creates a successful response carrying a token pair and profile
    pub fn with_tokens(message: impl Into<String>, pair: TokenPair, user: UserProfile) -> Self {
        Self {
            success: true,
            message: message.into(),
            access_token: Some(pair.access_token),
            refresh_token: Some(pair.refresh_token),
            expires_at: Some(pair.access_expires_at),
            user: Some(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::user::User;
    use chrono::Duration;

    #[test]
    fn test_success_without_tokens() {
        let response = AuthResponse::success("Registration successful.");

        assert!(response.success);
        assert!(response.access_token.is_none());
        assert!(response.refresh_token.is_none());
        assert!(response.user.is_none());
    }

    #[test]
    fn test_success_with_tokens() {
        let user = User::new(
            "alice".to_string(),
            "alice@example.com".to_string(),
            "$2b$04$hash".to_string(),
        );
        let expires_at = Utc::now() + Duration::minutes(15);
        let pair = TokenPair::new("access".to_string(), "refresh".to_string(), expires_at);

        let response =
            AuthResponse::with_tokens("Login successful.", pair, UserProfile::from(&user));

        assert!(response.success);
        assert_eq!(response.access_token.as_deref(), Some("access"));
        assert_eq!(response.refresh_token.as_deref(), Some("refresh"));
        assert_eq!(response.expires_at, Some(expires_at));
        assert_eq!(response.user.unwrap().username, "alice");
    }
}
