//! Database module - MySQL implementations using SQLx

pub mod mysql;

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use fs_shared::config::DatabaseConfig;

/// Create a MySQL connection pool from configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .idle_timeout(Duration::from_secs(config.idle_timeout))
        .connect(&config.url)
        .await
}
