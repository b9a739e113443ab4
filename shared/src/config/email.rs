//! Email delivery configuration

use serde::{Deserialize, Serialize};

/// SMTP email delivery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP port
    pub smtp_port: u16,

    /// SMTP username
    pub smtp_username: String,

    /// SMTP password
    pub smtp_password: String,

    /// Sender address placed in the From header
    pub from_address: String,

    /// Public base URL used when building confirmation/reset links
    pub base_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::from("localhost"),
            smtp_port: 587,
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: String::from("no-reply@friendshare.app"),
            base_url: String::from("http://localhost:8080"),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host),
            smtp_port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.smtp_port),
            smtp_username: std::env::var("SMTP_USERNAME").unwrap_or(defaults.smtp_username),
            smtp_password: std::env::var("SMTP_PASSWORD").unwrap_or(defaults.smtp_password),
            from_address: std::env::var("EMAIL_FROM_ADDRESS").unwrap_or(defaults.from_address),
            base_url: std::env::var("APP_BASE_URL").unwrap_or(defaults.base_url),
        }
    }
}
