//! Database connection pool management

use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use ekyc_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// Create a MySQL connection pool from configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(|e| InfrastructureError::Database(format!("failed to connect: {}", e)))?;

    info!(
        event = "database_pool_created",
        max_connections = config.max_connections,
        "Database connection pool created"
    );

    Ok(pool)
}

/// Create a MySQL connection pool from environment variables
///
/// Loads `.env` if present, then reads `DATABASE_URL` and related settings.
pub async fn create_pool_from_env() -> Result<MySqlPool, InfrastructureError> {
    dotenvy::dotenv().ok();
    create_pool(&DatabaseConfig::from_env()).await
}
