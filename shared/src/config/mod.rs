//! Configuration types for the FriendShare server.
//!
//! Every service receives its configuration as an explicit immutable value
//! built at startup; nothing reads environment variables after that point.

pub mod auth;
pub mod database;
pub mod email;
pub mod server;

pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use server::ServerConfig;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Email delivery configuration
    pub email: EmailConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables.
    ///
    /// Reads a `.env` file first when present so local development does not
    /// need exported variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            email: EmailConfig::from_env(),
        }
    }
}
