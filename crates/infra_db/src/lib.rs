//! Infrastructure Database Layer
//!
//! This crate provides the PostgreSQL storage for the fund registry
//! using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: [`repositories::FundRepository`]
//! owns the SQL, and [`adapters::PostgresFundAdapter`] implements the
//! domain's `FundPort` on top of it, translating rows and errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{DatabaseConfig, create_pool, run_migrations};
//! use infra_db::adapters::PostgresFundAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/funds")).await?;
//! run_migrations(&pool).await?;
//! let adapter = PostgresFundAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig, MIGRATOR};
pub use error::DatabaseError;
pub use adapters::PostgresFundAdapter;
