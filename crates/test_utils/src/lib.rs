//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! fund registry test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built fund payloads and records
//! - `builders`: Builder for fund request payloads
//! - `database`: PostgreSQL test container management
//! - `assertions`: Assertion helpers for API error bodies

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
