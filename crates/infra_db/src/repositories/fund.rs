//! Fund repository implementation
//!
//! This module provides database access for fund records stored in the
//! `funds` table, keyed by `fund_id`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::debug;

use crate::error::DatabaseError;

const FUND_COLUMNS: &str = "fund_id, fund_name, fund_manager_name, fund_description, \
                            fund_nav, date_of_creation, fund_performance";

/// Repository for fund records
#[derive(Debug, Clone)]
pub struct FundRepository {
    pool: PgPool,
}

impl FundRepository {
    /// Creates a new FundRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new fund row
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::DuplicateEntry` if the `fund_id` exists
    pub async fn insert(&self, fund: &FundRow) -> Result<FundRow, DatabaseError> {
        let sql = format!(
            r#"
            INSERT INTO funds ({FUND_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {FUND_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, FundRow>(&sql)
            .bind(&fund.fund_id)
            .bind(&fund.fund_name)
            .bind(&fund.fund_manager_name)
            .bind(&fund.fund_description)
            .bind(fund.fund_nav)
            .bind(fund.date_of_creation)
            .bind(fund.fund_performance)
            .fetch_one(&self.pool)
            .await?;

        debug!(fund_id = %row.fund_id, "Inserted fund row");
        Ok(row)
    }

    /// Retrieves a fund by identifier
    pub async fn get(&self, fund_id: &str) -> Result<FundRow, DatabaseError> {
        let sql = format!("SELECT {FUND_COLUMNS} FROM funds WHERE fund_id = $1");

        sqlx::query_as::<_, FundRow>(&sql)
            .bind(fund_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Fund", fund_id))
    }

    /// Retrieves all funds ordered by identifier
    pub async fn list(&self) -> Result<Vec<FundRow>, DatabaseError> {
        let sql = format!("SELECT {FUND_COLUMNS} FROM funds ORDER BY fund_id");

        let rows = sqlx::query_as::<_, FundRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Overwrites every column of an existing fund in a single statement
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row has this `fund_id`
    pub async fn update(&self, fund: &FundRow) -> Result<FundRow, DatabaseError> {
        let sql = format!(
            r#"
            UPDATE funds
            SET fund_name = $2,
                fund_manager_name = $3,
                fund_description = $4,
                fund_nav = $5,
                date_of_creation = $6,
                fund_performance = $7
            WHERE fund_id = $1
            RETURNING {FUND_COLUMNS}
            "#
        );

        sqlx::query_as::<_, FundRow>(&sql)
            .bind(&fund.fund_id)
            .bind(&fund.fund_name)
            .bind(&fund.fund_manager_name)
            .bind(&fund.fund_description)
            .bind(fund.fund_nav)
            .bind(fund.date_of_creation)
            .bind(fund.fund_performance)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Fund", &fund.fund_id))
    }

    /// Deletes a fund
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no row was removed
    pub async fn delete(&self, fund_id: &str) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM funds WHERE fund_id = $1")
            .bind(fund_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Fund", fund_id));
        }

        debug!(fund_id, "Deleted fund row");
        Ok(())
    }

    /// Counts stored funds
    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM funds")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Database row for fund
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct FundRow {
    pub fund_id: String,
    pub fund_name: String,
    pub fund_manager_name: String,
    pub fund_description: String,
    pub fund_nav: Decimal,
    pub date_of_creation: NaiveDate,
    pub fund_performance: Decimal,
}
