//! Database connection pool management

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    ConnectOptions, MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::log::LevelFilter;

use libris_shared::config::DatabaseConfig;

use crate::InfraError;

/// MySQL connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create a new connection pool from configuration
    pub async fn new(config: DatabaseConfig) -> Result<Self, InfraError> {
        tracing::info!(
            max_connections = config.max_connections,
            "creating database connection pool"
        );

        let connect_options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfraError::Config(format!("invalid database URL: {}", e)))?
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_secs(1));

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await?;

        tracing::info!("database connection pool created");
        Ok(Self { pool })
    }

    /// The underlying SQLx pool, for queries and transactions
    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Verify connectivity with a trivial query
    pub async fn health_check(&self) -> Result<bool, InfraError> {
        let row = sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        let value: i32 = sqlx::Row::try_get(&row, 0).unwrap_or(0);
        Ok(value == 1)
    }

    /// Close all connections; called on shutdown
    pub async fn close(&self) {
        tracing::info!("closing database connection pool");
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pool_creation_with_invalid_url() {
        let config = DatabaseConfig {
            url: "invalid://url".to_string(),
            ..DatabaseConfig::default()
        };

        let result = DatabasePool::new(config).await;
        assert!(result.is_err());
    }
}
