//! Repository implementations for domain entities
//!
//! Repositories encapsulate SQL queries and map between database rows
//! and plain row structs. Queries are checked at runtime (`query_as`
//! with `FromRow`), so building the workspace needs no live database.

pub mod fund;

pub use fund::{FundRepository, FundRow};
