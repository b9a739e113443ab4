//! Configuration for the token service

use fs_shared::config::JwtConfig;

use crate::errors::TokenError;

/// Minimum length of the HS256 signing secret in bytes
pub const MIN_SECRET_BYTES: usize = 32;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// JWT signing secret
    pub secret: String,
    /// Issuer claim placed in and required from every token
    pub issuer: String,
    /// Audience claim placed in and required from every token
    pub audience: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
}

impl TokenConfig {
    /// Checks the signing secret strength.
    ///
    /// A short secret is a deployment mistake, not a per-request condition;
    /// callers treat this as fatal at startup.
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.secret.len() < MIN_SECRET_BYTES {
            return Err(TokenError::WeakSecret {
                minimum: MIN_SECRET_BYTES,
            });
        }
        Ok(())
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_expiry_minutes: config.access_token_expiry_minutes,
            refresh_token_expiry_days: config.refresh_token_expiry_days,
        }
    }
}
