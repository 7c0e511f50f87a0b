//! Connection pool and schema setup
//!
//! The fund store runs on a single `PgPool`. Its schema ships inside the
//! binary as embedded SQLx migrations.

use sqlx::migrate::Migrator;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// Schema migrations embedded from `migrations/`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Pool settings for the fund store
///
/// ```rust
/// use infra_db::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("postgres://localhost/funds")
///     .max_connections(20)
///     .acquire_timeout(Duration::from_secs(5));
/// assert_eq!(config.min_connections, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: String,
    pub max_connections: u32,
    /// Connections kept open while idle
    pub min_connections: u32,
    /// How long a caller waits for a free connection
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Settings for `url` with 2 to 10 connections and a 30 second wait
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }
}

/// Opens the fund store pool
///
/// # Errors
///
/// Returns `DatabaseError::ConnectionFailed` if the first connection
/// cannot be established within the acquire timeout
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        "Opening fund store pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!("Fund store pool ready");
    Ok(pool)
}

/// Applies any pending schema migrations
///
/// # Errors
///
/// Returns `DatabaseError::MigrationFailed` if a migration cannot be applied
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    info!(migrations = MIGRATOR.iter().count(), "Running database migrations");
    MIGRATOR.run(pool).await?;
    info!("Database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::new("postgres://localhost/funds");

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.acquire_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder_overrides() {
        let config = DatabaseConfig::new("postgres://test")
            .max_connections(50)
            .min_connections(10)
            .acquire_timeout(Duration::from_secs(60));

        assert_eq!(config.max_connections, 50);
        assert_eq!(config.min_connections, 10);
        assert_eq!(config.acquire_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_migrations_embedded() {
        assert!(MIGRATOR.iter().any(|m| m.description.contains("create funds")));
    }
}
