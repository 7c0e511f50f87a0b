//! Fund Domain Ports
//!
//! This module defines the persistence interface for fund records,
//! keeping storage swappable behind a trait object.
//!
//! # Architecture
//!
//! - **PostgreSQL Adapter** (`infra_db::adapters::PostgresFundAdapter`): the
//!   production store
//! - **Mock Adapter** ([`mock::MockFundPort`]): an in-memory store for tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_fund::ports::FundPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn FundPort> = Arc::new(PostgresFundAdapter::new(pool));
//! let fund = port.get(&FundId::new("TECH001")).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::fund::{Fund, FundId};
use crate::validation::ValidFund;

/// Keyed storage for fund records
///
/// Implementations must enforce primary-key uniqueness atomically:
/// a concurrent second `insert` for the same `fund_id` fails with
/// `PortError::Conflict`.
#[async_trait]
pub trait FundPort: DomainPort + HealthCheckable {
    /// Inserts a new fund
    ///
    /// # Returns
    ///
    /// The stored record, or `PortError::Conflict` if the key exists
    async fn insert(&self, fund: ValidFund) -> Result<Fund, PortError>;

    /// Retrieves a fund by identifier
    ///
    /// # Returns
    ///
    /// The fund if found, or `PortError::NotFound`
    async fn get(&self, id: &FundId) -> Result<Fund, PortError>;

    /// Lists all funds in ascending `fund_id` order
    async fn list(&self) -> Result<Vec<Fund>, PortError>;

    /// Overwrites every field of the fund keyed by `fund.fund_id()`
    ///
    /// # Returns
    ///
    /// The stored record, or `PortError::NotFound` if no row matched
    async fn update(&self, fund: ValidFund) -> Result<Fund, PortError>;

    /// Removes a fund permanently
    async fn delete(&self, id: &FundId) -> Result<(), PortError>;

    /// Number of stored funds
    async fn count(&self) -> Result<u64, PortError>;
}

/// Mock implementation for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// In-memory mock implementation of FundPort
    #[derive(Debug, Default, Clone)]
    pub struct MockFundPort {
        funds: Arc<RwLock<BTreeMap<FundId, Fund>>>,
        unavailable: Arc<AtomicBool>,
    }

    impl MockFundPort {
        /// Creates a new, empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with funds for testing
        pub async fn with_funds(funds: Vec<ValidFund>) -> Self {
            let port = Self::new();
            {
                let mut stored = port.funds.write().await;
                for fund in funds {
                    let fund = fund.into_inner();
                    stored.insert(fund.fund_id.clone(), fund);
                }
            }
            port
        }

        /// Simulates a storage outage; every operation fails while set
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        fn ensure_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                Err(PortError::connection("mock fund store unavailable"))
            } else {
                Ok(())
            }
        }
    }

    impl DomainPort for MockFundPort {}

    #[async_trait]
    impl HealthCheckable for MockFundPort {
        async fn health_check(&self) -> HealthCheckResult {
            let (status, message) = if self.unavailable.load(Ordering::SeqCst) {
                (AdapterHealth::Unhealthy, "Mock adapter marked unavailable")
            } else {
                (AdapterHealth::Healthy, "Mock adapter always healthy")
            };

            HealthCheckResult {
                adapter_id: "mock-fund-port".to_string(),
                status,
                latency_ms: 0,
                message: Some(message.to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl FundPort for MockFundPort {
        async fn insert(&self, fund: ValidFund) -> Result<Fund, PortError> {
            self.ensure_available()?;
            let fund = fund.into_inner();

            let mut funds = self.funds.write().await;
            if funds.contains_key(&fund.fund_id) {
                return Err(PortError::conflict(format!(
                    "fund_id '{}' already exists",
                    fund.fund_id
                )));
            }
            funds.insert(fund.fund_id.clone(), fund.clone());
            Ok(fund)
        }

        async fn get(&self, id: &FundId) -> Result<Fund, PortError> {
            self.ensure_available()?;
            self.funds
                .read()
                .await
                .get(id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Fund", id))
        }

        async fn list(&self) -> Result<Vec<Fund>, PortError> {
            self.ensure_available()?;
            Ok(self.funds.read().await.values().cloned().collect())
        }

        async fn update(&self, fund: ValidFund) -> Result<Fund, PortError> {
            self.ensure_available()?;
            let fund = fund.into_inner();

            let mut funds = self.funds.write().await;
            match funds.get_mut(&fund.fund_id) {
                Some(stored) => {
                    *stored = fund.clone();
                    Ok(fund)
                }
                None => Err(PortError::not_found("Fund", &fund.fund_id)),
            }
        }

        async fn delete(&self, id: &FundId) -> Result<(), PortError> {
            self.ensure_available()?;
            self.funds
                .write()
                .await
                .remove(id)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found("Fund", id))
        }

        async fn count(&self) -> Result<u64, PortError> {
            self.ensure_available()?;
            Ok(self.funds.read().await.len() as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockFundPort;
    use super::*;
    use crate::validation::FundValidator;
    use serde_json::json;

    fn valid(id: &str) -> ValidFund {
        FundValidator::validate(&json!({
            "fund_id": id,
            "fund_name": "Test Fund",
            "fund_manager_name": "John Doe",
            "fund_description": "A test fund.",
            "fund_nav": "100.00",
            "date_of_creation": "2023-01-01",
            "fund_performance": "10.00"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_mock_insert_conflict() {
        let port = MockFundPort::new();
        port.insert(valid("FUND001")).await.unwrap();

        let err = port.insert(valid("FUND001")).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(port.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_mock_list_sorted_by_id() {
        let port = MockFundPort::with_funds(vec![valid("B"), valid("A"), valid("C")]).await;
        let ids: Vec<_> = port
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.fund_id.into_inner())
            .collect();
        assert_eq!(ids, ["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_mock_missing_keys() {
        let port = MockFundPort::new();
        let id = FundId::new("FUND999");

        assert!(port.get(&id).await.unwrap_err().is_not_found());
        assert!(port.update(valid("FUND999")).await.unwrap_err().is_not_found());
        assert!(port.delete(&id).await.unwrap_err().is_not_found());
        assert_eq!(port.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mock_unavailable() {
        let port = MockFundPort::new();
        port.set_unavailable(true);

        assert!(port.list().await.unwrap_err().is_transient());
        assert!(!port.health_check().await.is_ready());
    }
}
