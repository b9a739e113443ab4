//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,

    /// Access token expiry time in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token expiry time in days
    pub refresh_token_expiry_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-at-least-32-bytes-long"),
            issuer: String::from("friendshare"),
            audience: String::from("friendshare-api"),
            access_token_expiry_minutes: 15,
            refresh_token_expiry_days: 7,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry_minutes = minutes;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry_days = days;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == JwtConfig::default().secret
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Failed login attempts before the account is locked
    pub max_failed_logins: i32,

    /// Lockout duration in minutes once the limit is reached
    pub lockout_minutes: i64,

    /// Password reset token validity in hours
    pub reset_token_expiry_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            max_failed_logins: 5,
            lockout_minutes: 15,
            reset_token_expiry_hours: 24,
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.jwt.secret);
        let issuer = std::env::var("JWT_ISSUER").unwrap_or(defaults.jwt.issuer);
        let audience = std::env::var("JWT_AUDIENCE").unwrap_or(defaults.jwt.audience);
        let access_token_expiry_minutes = env_i64(
            "JWT_ACCESS_TOKEN_EXPIRY_MINUTES",
            defaults.jwt.access_token_expiry_minutes,
        );
        let refresh_token_expiry_days = env_i64(
            "JWT_REFRESH_TOKEN_EXPIRY_DAYS",
            defaults.jwt.refresh_token_expiry_days,
        );

        Self {
            jwt: JwtConfig {
                secret,
                issuer,
                audience,
                access_token_expiry_minutes,
                refresh_token_expiry_days,
            },
            max_failed_logins: env_i64("AUTH_MAX_FAILED_LOGINS", defaults.max_failed_logins as i64)
                as i32,
            lockout_minutes: env_i64("AUTH_LOCKOUT_MINUTES", defaults.lockout_minutes),
            reset_token_expiry_hours: env_i64(
                "AUTH_RESET_TOKEN_EXPIRY_HOURS",
                defaults.reset_token_expiry_hours,
            ),
        }
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
