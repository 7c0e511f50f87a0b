//! Fund registry service
//!
//! Composes [`FundValidator`] with a [`FundPort`] to provide the five
//! record operations. Every call completes or fails on its own; nothing
//! is held between calls.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, instrument, warn};

use core_kernel::{HealthCheckResult, PortError};

use crate::error::FundError;
use crate::fund::{Fund, FundId};
use crate::ports::FundPort;
use crate::validation::FundValidator;

/// Validates candidates and stores funds through a [`FundPort`]
#[derive(Clone)]
pub struct FundService {
    port: Arc<dyn FundPort>,
}

impl FundService {
    /// Creates a new service over the given port
    pub fn new(port: Arc<dyn FundPort>) -> Self {
        Self { port }
    }

    /// Creates a fund from a full candidate payload
    ///
    /// # Errors
    ///
    /// - `FundError::Validation` if any field is invalid
    /// - `FundError::DuplicateKey` if the `fund_id` is already taken
    #[instrument(skip(self, candidate))]
    pub async fn create(&self, candidate: &Value) -> Result<Fund, FundError> {
        let valid = FundValidator::validate(candidate)?;
        let id = valid.fund_id().clone();

        let fund = self.port.insert(valid).await.map_err(|e| match e {
            PortError::Conflict { .. } => FundError::DuplicateKey(id.clone()),
            other => FundError::Storage(other),
        })?;

        info!(fund_id = %fund.fund_id, "Fund created");
        Ok(fund)
    }

    /// Retrieves a fund by identifier
    #[instrument(skip(self), fields(fund_id = %id))]
    pub async fn get(&self, id: &FundId) -> Result<Fund, FundError> {
        self.port.get(id).await.map_err(|e| not_found_or_storage(e, id))
    }

    /// Lists all funds
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Fund>, FundError> {
        Ok(self.port.list().await?)
    }

    /// Replaces every field of an existing fund
    ///
    /// Existence is checked before the payload is validated, so an
    /// unknown id yields `NotFound` even for an invalid payload.
    #[instrument(skip(self, candidate), fields(fund_id = %id))]
    pub async fn update(&self, id: &FundId, candidate: &Value) -> Result<Fund, FundError> {
        self.get(id).await?;

        let valid = FundValidator::validate_replacement(id, candidate)?;
        let fund = self
            .port
            .update(valid)
            .await
            .map_err(|e| not_found_or_storage(e, id))?;

        info!("Fund updated");
        Ok(fund)
    }

    /// Deletes a fund permanently
    #[instrument(skip(self), fields(fund_id = %id))]
    pub async fn delete(&self, id: &FundId) -> Result<(), FundError> {
        self.port
            .delete(id)
            .await
            .map_err(|e| not_found_or_storage(e, id))?;

        info!("Fund deleted");
        Ok(())
    }

    /// Reports the health of the underlying store
    pub async fn health_check(&self) -> HealthCheckResult {
        let result = self.port.health_check().await;
        if !result.is_ready() {
            warn!(adapter = %result.adapter_id, message = ?result.message, "Fund store not ready");
        }
        result
    }
}

fn not_found_or_storage(error: PortError, id: &FundId) -> FundError {
    match error {
        PortError::NotFound { .. } => FundError::NotFound(id.clone()),
        other => FundError::Storage(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MockFundPort;
    use crate::validation::fields;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn candidate() -> Value {
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

    fn service() -> (FundService, MockFundPort) {
        let port = MockFundPort::new();
        (FundService::new(Arc::new(port.clone())), port)
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (service, _) = service();
        let created = service.create(&candidate()).await.unwrap();
        let fetched = service.get(&FundId::new("FUND001")).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.fund_name, "Test Fund");
        assert_eq!(fetched.fund_nav, dec!(100.00));
    }

    #[tokio::test]
    async fn test_duplicate_create() {
        let (service, port) = service();
        service.create(&candidate()).await.unwrap();

        let err = service.create(&candidate()).await.unwrap_err();
        assert!(matches!(err, FundError::DuplicateKey(ref id) if id.as_str() == "FUND001"));
        assert_eq!(port.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invalid_create_stores_nothing() {
        let (service, port) = service();
        let mut payload = candidate();
        payload["fund_nav"] = json!("-10.00");

        let err = service.create(&payload).await.unwrap_err();
        match err {
            FundError::Validation(errors) => assert!(errors.contains(fields::FUND_NAV)),
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert_eq!(port.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_unknown_fund_checked_before_payload() {
        let (service, _) = service();
        let err = service
            .update(&FundId::new("FUND999"), &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, FundError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_then_delete() {
        let (service, port) = service();
        service.create(&candidate()).await.unwrap();
        let id = FundId::new("FUND001");

        let mut payload = candidate();
        payload["fund_name"] = json!("Updated Fund");
        let updated = service.update(&id, &payload).await.unwrap();
        assert_eq!(updated.fund_name, "Updated Fund");
        assert_eq!(service.get(&id).await.unwrap().fund_name, "Updated Fund");

        service.delete(&id).await.unwrap();
        assert!(matches!(service.get(&id).await, Err(FundError::NotFound(_))));
        assert_eq!(port.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_update_leaves_record() {
        let (service, _) = service();
        service.create(&candidate()).await.unwrap();
        let id = FundId::new("FUND001");

        let mut payload = candidate();
        payload["fund_name"] = json!("Changed");
        payload["fund_performance"] = json!("1500.00");
        assert!(service.update(&id, &payload).await.is_err());

        assert_eq!(service.get(&id).await.unwrap().fund_name, "Test Fund");
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let (service, port) = service();
        port.set_unavailable(true);

        let err = service.list().await.unwrap_err();
        assert!(matches!(err, FundError::Storage(_)));
        assert!(!err.is_client_error());
    }

    mod properties {
        use super::*;
        use chrono::{Duration, NaiveDate};
        use proptest::prelude::*;
        use rust_decimal::Decimal;

        fn block_on<F: std::future::Future>(future: F) -> F::Output {
            tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap()
                .block_on(future)
        }

        proptest! {
            #[test]
            fn create_then_get_returns_candidate(
                id in "[A-Z]{2,10}[0-9]{0,6}",
                name in "[A-Za-z0-9]([A-Za-z0-9 &.-]{0,80}[A-Za-z0-9])?",
                manager in "[A-Za-z]([A-Za-z .'-]{0,40}[A-Za-z])?",
                description in "[A-Za-z0-9]([A-Za-z0-9 ,.]{0,200}[A-Za-z0-9.])?",
                nav_cents in 0i64..=999_999_999_999_999,
                performance_cents in -10_000i64..=100_000,
                days in 0i64..73_000,
            ) {
                let expected = Fund {
                    fund_id: FundId::new(id.as_str()),
                    fund_name: name,
                    fund_manager_name: manager,
                    fund_description: description,
                    fund_nav: Decimal::new(nav_cents, 2),
                    date_of_creation: NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + Duration::days(days),
                    fund_performance: Decimal::new(performance_cents, 2),
                };
                let candidate = json!({
                    "fund_id": expected.fund_id.as_str(),
                    "fund_name": expected.fund_name,
                    "fund_manager_name": expected.fund_manager_name,
                    "fund_description": expected.fund_description,
                    "fund_nav": expected.fund_nav.to_string(),
                    "date_of_creation": expected.date_of_creation.format("%Y-%m-%d").to_string(),
                    "fund_performance": expected.fund_performance.to_string(),
                });

                let (created, fetched) = block_on(async {
                    let (service, _) = service();
                    let created = service.create(&candidate).await.unwrap();
                    let fetched = service.get(&expected.fund_id).await.unwrap();
                    (created, fetched)
                });

                prop_assert_eq!(&created, &expected);
                prop_assert_eq!(&fetched, &expected);
                prop_assert_eq!(fetched.fund_nav.scale(), 2);
                prop_assert_eq!(fetched.fund_performance.scale(), 2);
            }
        }
    }
}
