//! Fund Registry Domain
//!
//! This crate holds everything about a fund record that does not depend
//! on HTTP or SQL: the record type, its validation rules, the persistence
//! port, and the service that ties validation to storage.
//!
//! # Key Concepts
//!
//! - **Fund**: An investment fund keyed by a client-assigned `fund_id`
//! - **NAV**: Net Asset Value of the fund, a non-negative fixed-point amount
//! - **Performance**: Percentage return, between -100% and 1000%
//!
//! # Decimal Precision
//!
//! Both decimal fields are stored with exactly 2 fractional digits:
//! - NAV: up to 20 digits in total (18 before the decimal point)
//! - Performance: up to 7 digits in total (5 before the decimal point)

pub mod fund;
pub mod validation;
pub mod ports;
pub mod service;
pub mod error;

pub use fund::{Fund, FundId, FUND_ID_MAX_LENGTH, FUND_NAME_MAX_LENGTH, FUND_MANAGER_NAME_MAX_LENGTH};
pub use validation::{DecimalRule, FieldErrors, FundValidator, ValidFund};
pub use ports::FundPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockFundPort;
pub use service::FundService;
pub use error::FundError;
