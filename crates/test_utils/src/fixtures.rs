//! Pre-built Test Fixtures
//!
//! Provides ready-to-use fund data. These fixtures are consistent and
//! predictable so tests can compare against known values.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use domain_fund::{Fund, FundId, FundValidator, ValidFund};

/// Fixture for fund test data
pub struct FundFixtures;

impl FundFixtures {
    /// Standard request payload for `FUND001`
    pub fn fund_data() -> Value {
        json!({
            "fund_id": "FUND001",
            "fund_name": "Test Fund",
            "fund_manager_name": "John Doe",
            "fund_description": "A test fund for unit testing.",
            "fund_nav": "100.00",
            "date_of_creation": "2023-01-01",
            "fund_performance": "10.00"
        })
    }

    /// Standard payload with a different identifier
    pub fn fund_data_with_id(fund_id: &str) -> Value {
        let mut data = Self::fund_data();
        data["fund_id"] = json!(fund_id);
        data
    }

    /// A fully populated technology fund record
    pub fn tech_fund() -> Fund {
        Fund {
            fund_id: FundId::new("TECH001"),
            fund_name: "Technology Growth Fund".to_string(),
            fund_manager_name: "Jane Smith".to_string(),
            fund_description: "A fund focused on high-growth tech companies".to_string(),
            fund_nav: dec!(1000000.00),
            date_of_creation: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            fund_performance: dec!(15.50),
        }
    }

    /// The standard payload, validated
    pub fn valid_fund(fund_id: &str) -> ValidFund {
        FundValidator::validate(&Self::fund_data_with_id(fund_id))
            .expect("fixture payload must be valid")
    }
}

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    /// An identifier never present in fixtures
    pub fn missing_fund_id() -> FundId {
        FundId::new("FUND999")
    }

    /// An identifier exactly at the length limit
    pub fn longest_fund_id() -> String {
        "F".repeat(domain_fund::FUND_ID_MAX_LENGTH)
    }
}
