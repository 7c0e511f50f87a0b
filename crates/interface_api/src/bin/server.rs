//! Fund Registry - API Server Binary
//!
//! This binary starts the HTTP API server for the fund registry.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin fund-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 DATABASE_URL=postgres://... cargo run --bin fund-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_MAX_CONNECTIONS` - Database pool size (default: 10)
//! * `API_MIN_CONNECTIONS` - Connections kept open while idle (default: 2)
//! * `API_ACQUIRE_TIMEOUT_SECS` - Wait for a pooled connection (default: 30)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use domain_fund::FundService;
use infra_db::{create_pool, run_migrations, PostgresFundAdapter};
use interface_api::{config::ApiConfig, create_router};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, establishes database connection,
/// and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Fund Registry API Server"
    );

    let pool = create_pool(config.database_config())
        .await
        .context("connecting to the fund database")?;

    run_migrations(&pool)
        .await
        .context("applying database migrations")?;

    let service = FundService::new(Arc::new(PostgresFundAdapter::new(pool)));
    let app = create_router(service);

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .with_context(|| format!("invalid server address {}", config.server_addr()))?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to individual variables and then defaults when the
/// prefixed configuration is incomplete.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| {
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("API_DATABASE_URL"))
                .unwrap_or(defaults.database_url),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
            max_connections: std::env::var("API_MAX_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.max_connections),
            min_connections: std::env::var("API_MIN_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.min_connections),
            acquire_timeout_secs: std::env::var("API_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(defaults.acquire_timeout_secs),
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
