//! Fund definition
//!
//! This module defines the Fund record and its identifier.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum length of a fund identifier, in characters
pub const FUND_ID_MAX_LENGTH: usize = 50;

/// Maximum length of a fund name, in characters
pub const FUND_NAME_MAX_LENGTH: usize = 255;

/// Maximum length of a fund manager name, in characters
pub const FUND_MANAGER_NAME_MAX_LENGTH: usize = 255;

/// Client-assigned fund identifier, used as the primary key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FundId(String);

impl FundId {
    /// Wraps a raw identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the identifier, returning the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FundId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for FundId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for FundId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An investment fund record
///
/// Decimal fields are carried at exactly two fractional digits and
/// serialize as JSON strings (`"100.00"`); the date serializes as
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fund {
    /// Unique identifier (primary key)
    pub fund_id: FundId,
    /// Full name of the fund
    pub fund_name: String,
    /// Name of the person managing the fund
    pub fund_manager_name: String,
    /// Investment strategy and objectives
    pub fund_description: String,
    /// Current Net Asset Value, never negative
    pub fund_nav: Decimal,
    /// Date the fund was established
    pub date_of_creation: NaiveDate,
    /// Performance as a percentage, between -100 and 1000
    pub fund_performance: Decimal,
}

impl fmt::Display for Fund {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.fund_name, self.fund_id)
    }
}
