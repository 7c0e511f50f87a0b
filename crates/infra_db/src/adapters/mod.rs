//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Architecture
//!
//! Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresFundAdapter;
//! use domain_fund::FundPort;
//!
//! let adapter = PostgresFundAdapter::new(pool);
//! let funds = adapter.list().await?;
//! ```

pub mod fund;

pub use fund::PostgresFundAdapter;
