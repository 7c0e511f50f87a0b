//! Database Test Utilities
//!
//! Provides helpers for database testing including testcontainer management
//! and connection pooling for integration tests.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

/// Default PostgreSQL image for testing
const POSTGRES_IMAGE: &str = "postgres";
const POSTGRES_TAG: &str = "16-alpine";
const POSTGRES_USER: &str = "test_user";
const POSTGRES_PASSWORD: &str = "test_password";
const POSTGRES_DB: &str = "funds_test";

/// Schema applied to every fresh test database
const FUNDS_SCHEMA: &str = include_str!("../../infra_db/migrations/20241027000001_create_funds.sql");

/// Configuration for test database
#[derive(Debug, Clone)]
pub struct TestDatabaseConfig {
    pub user: String,
    pub password: String,
    pub database: String,
    pub host: String,
    pub port: u16,
}

impl Default for TestDatabaseConfig {
    fn default() -> Self {
        Self {
            user: POSTGRES_USER.to_string(),
            password: POSTGRES_PASSWORD.to_string(),
            database: POSTGRES_DB.to_string(),
            host: "localhost".to_string(),
            port: 5432,
        }
    }
}

impl TestDatabaseConfig {
    /// Creates the database connection URL
    pub fn connection_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.database
        )
    }
}

/// A wrapper around a PostgreSQL test container
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub config: TestDatabaseConfig,
    pub pool: PgPool,
}

impl TestDatabase {
    /// Starts a new PostgreSQL container with the funds schema applied
    ///
    /// # Errors
    ///
    /// Returns an error if the container fails to start or schema fails to initialize
    pub async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let container = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
            .with_exposed_port(5432.tcp())
            .with_wait_for(WaitFor::message_on_stderr(
                "database system is ready to accept connections",
            ))
            .with_env_var("POSTGRES_USER", POSTGRES_USER)
            .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
            .with_env_var("POSTGRES_DB", POSTGRES_DB)
            .start()
            .await?;

        let port = container.get_host_port_ipv4(5432).await?;
        let host = container.get_host().await?.to_string();

        let config = TestDatabaseConfig {
            host,
            port,
            ..TestDatabaseConfig::default()
        };

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&config.connection_url())
            .await?;

        let test_db = Self {
            _container: container,
            config,
            pool,
        };

        test_db.init_schema().await?;

        Ok(test_db)
    }

    async fn init_schema(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::raw_sql(FUNDS_SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Creates an isolated test database for a single test
pub async fn create_isolated_test_database() -> Result<TestDatabase, Box<dyn std::error::Error + Send + Sync>> {
    TestDatabase::new().await
}

/// Declares an ignored-by-default test that runs against its own database
///
/// The second argument names the `&PgPool` binding visible to the body.
#[macro_export]
macro_rules! db_test {
    ($name:ident, $pool:ident, $body:block) => {
        #[tokio::test]
        #[ignore = "requires Docker"]
        async fn $name() {
            let db = $crate::database::create_isolated_test_database()
                .await
                .expect("Failed to create test database");
            let $pool = db.pool();
            $body
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_connection_url() {
        let config = TestDatabaseConfig::default();
        let url = config.connection_url();

        assert!(url.starts_with("postgres://"));
        assert!(url.contains(POSTGRES_USER));
        assert!(url.contains(POSTGRES_DB));
    }

    #[test]
    fn test_schema_creates_funds_table() {
        assert!(FUNDS_SCHEMA.contains("CREATE TABLE IF NOT EXISTS funds"));
        assert!(FUNDS_SCHEMA.contains("fund_id            VARCHAR(50)    PRIMARY KEY"));
    }
}
