//! API configuration

use std::time::Duration;

use serde::Deserialize;

use infra_db::DatabaseConfig;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Maximum connections in the database pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connections the pool keeps open while idle
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a pooled connection
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/funds".to_string(),
            log_level: "info".to_string(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the database pool settings
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.as_str())
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_server_addr() {
        assert_eq!(ApiConfig::default().server_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_pool_settings_default_when_absent() {
        let config: ApiConfig = serde_json::from_value(serde_json::json!({
            "host": "127.0.0.1",
            "port": 3000,
            "database_url": "postgres://db/funds",
            "log_level": "debug"
        }))
        .unwrap();

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.acquire_timeout_secs, 30);
        assert_eq!(config.server_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_database_config_carries_pool_settings() {
        let config = ApiConfig {
            database_url: "postgres://db/funds".to_string(),
            max_connections: 25,
            min_connections: 5,
            acquire_timeout_secs: 3,
            ..ApiConfig::default()
        };

        let database = config.database_config();
        assert_eq!(database.url, "postgres://db/funds");
        assert_eq!(database.max_connections, 25);
        assert_eq!(database.min_connections, 5);
        assert_eq!(database.acquire_timeout, Duration::from_secs(3));
    }
}
