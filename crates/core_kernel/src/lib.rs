//! Core Kernel - Foundational abstractions for the fund registry
//!
//! This crate provides the building blocks shared by the domain, database,
//! and HTTP layers:
//! - Port error type used by every storage adapter
//! - Marker and health-check traits for the ports and adapters pattern

pub mod ports;

pub use ports::{PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable};
