//! Shared utilities and common types for the FriendShare server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Input validation helpers (email, username, URLs)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, DatabaseConfig, EmailConfig, JwtConfig, ServerConfig};
pub use utils::validation;
