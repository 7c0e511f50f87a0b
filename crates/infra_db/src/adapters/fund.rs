//! PostgreSQL Fund Adapter
//!
//! This module provides the database adapter for the fund domain,
//! implementing the `FundPort` trait using PostgreSQL via the `FundRepository`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresFundAdapter;
//! use domain_fund::FundPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn FundPort> = Arc::new(PostgresFundAdapter::new(pool));
//! let fund = port.get(&FundId::new("TECH001")).await?;
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_fund::{Fund, FundId, FundPort, ValidFund};

use crate::error::db_to_port_error;
use crate::repositories::fund::{FundRepository, FundRow};

const ENTITY: &str = "Fund";

/// PostgreSQL-backed implementation of the FundPort trait
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict`
/// - Other errors -> `PortError::Internal` or `PortError::Connection`
#[derive(Debug, Clone)]
pub struct PostgresFundAdapter {
    repository: FundRepository,
    pool: PgPool,
}

impl PostgresFundAdapter {
    /// Creates a new PostgreSQL fund adapter
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FundRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresFundAdapter {}

#[async_trait]
impl HealthCheckable for PostgresFundAdapter {
    /// Checks database connectivity with a `SELECT 1`
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult {
                adapter_id: "postgres-fund-adapter".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms,
                message: None,
                checked_at: Utc::now(),
            },
            Err(e) => HealthCheckResult {
                adapter_id: "postgres-fund-adapter".to_string(),
                status: AdapterHealth::Unhealthy,
                latency_ms,
                message: Some(format!("Database error: {}", e)),
                checked_at: Utc::now(),
            },
        }
    }
}

#[async_trait]
impl FundPort for PostgresFundAdapter {
    #[instrument(skip(self, fund), fields(fund_id = %fund.fund_id()))]
    async fn insert(&self, fund: ValidFund) -> Result<Fund, PortError> {
        debug!("Inserting fund");
        let row = fund_to_row(fund.into_inner());

        self.repository
            .insert(&row)
            .await
            .map(row_to_fund)
            .map_err(|e| db_to_port_error(e, ENTITY, &row.fund_id))
    }

    #[instrument(skip(self), fields(fund_id = %id))]
    async fn get(&self, id: &FundId) -> Result<Fund, PortError> {
        debug!("Fetching fund by ID");

        self.repository
            .get(id.as_str())
            .await
            .map(row_to_fund)
            .map_err(|e| db_to_port_error(e, ENTITY, id.as_str()))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Fund>, PortError> {
        let rows = self
            .repository
            .list()
            .await
            .map_err(|e| db_to_port_error(e, ENTITY, "*"))?;

        debug!(count = rows.len(), "Listed funds");
        Ok(rows.into_iter().map(row_to_fund).collect())
    }

    #[instrument(skip(self, fund), fields(fund_id = %fund.fund_id()))]
    async fn update(&self, fund: ValidFund) -> Result<Fund, PortError> {
        debug!("Updating fund");
        let row = fund_to_row(fund.into_inner());

        self.repository
            .update(&row)
            .await
            .map(row_to_fund)
            .map_err(|e| db_to_port_error(e, ENTITY, &row.fund_id))
    }

    #[instrument(skip(self), fields(fund_id = %id))]
    async fn delete(&self, id: &FundId) -> Result<(), PortError> {
        self.repository
            .delete(id.as_str())
            .await
            .map_err(|e| db_to_port_error(e, ENTITY, id.as_str()))
    }

    async fn count(&self) -> Result<u64, PortError> {
        let count = self
            .repository
            .count()
            .await
            .map_err(|e| db_to_port_error(e, ENTITY, "*"))?;

        Ok(count.max(0) as u64)
    }
}

fn fund_to_row(fund: Fund) -> FundRow {
    FundRow {
        fund_id: fund.fund_id.into_inner(),
        fund_name: fund.fund_name,
        fund_manager_name: fund.fund_manager_name,
        fund_description: fund.fund_description,
        fund_nav: fund.fund_nav,
        date_of_creation: fund.date_of_creation,
        fund_performance: fund.fund_performance,
    }
}

fn row_to_fund(row: FundRow) -> Fund {
    Fund {
        fund_id: FundId::new(row.fund_id),
        fund_name: row.fund_name,
        fund_manager_name: row.fund_manager_name,
        fund_description: row.fund_description,
        fund_nav: row.fund_nav,
        date_of_creation: row.date_of_creation,
        fund_performance: row.fund_performance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_row_conversion_preserves_fields() {
        let row = FundRow {
            fund_id: "TECH001".to_string(),
            fund_name: "Technology Growth Fund".to_string(),
            fund_manager_name: "Jane Smith".to_string(),
            fund_description: "High-growth tech".to_string(),
            fund_nav: dec!(1000000.00),
            date_of_creation: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            fund_performance: dec!(-15.25),
        };

        let fund = row_to_fund(row.clone());
        assert_eq!(fund.fund_id.as_str(), "TECH001");
        assert_eq!(fund.fund_performance, dec!(-15.25));
        assert_eq!(fund_to_row(fund), row);
    }
}
