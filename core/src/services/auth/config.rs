//! Configuration for the authentication service

use fs_shared::config::AuthConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Failed login attempts before the account is locked
    pub max_failed_logins: i32,
    /// Lockout duration in minutes once the limit is reached
    pub lockout_minutes: i64,
    /// Password reset token validity in hours
    pub reset_token_expiry_hours: i64,
    /// Minimum accepted password length
    pub min_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            max_failed_logins: 5,
            lockout_minutes: 15,
            reset_token_expiry_hours: 24,
            min_password_length: 8,
        }
    }
}

impl From<&AuthConfig> for AuthServiceConfig {
    fn from(config: &AuthConfig) -> Self {
        Self {
            max_failed_logins: config.max_failed_logins,
            lockout_minutes: config.lockout_minutes,
            reset_token_expiry_hours: config.reset_token_expiry_hours,
            ..Default::default()
        }
    }
}
