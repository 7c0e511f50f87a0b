//! Database error types
//!
//! This module defines the error types that can occur during database operations,
//! mapping PostgreSQL SQLSTATE codes onto meaningful variants.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Check or not-null constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Fund", "TECH001");
    /// assert!(error.to_string().contains("Fund"));
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    /// Creates a duplicate entry error
    pub fn duplicate(entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        DatabaseError::DuplicateEntry(format!(
            "{} with {} '{}' already exists",
            entity, field, value
        ))
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_) | DatabaseError::ConstraintViolation(_)
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Converts SQLx errors to more specific DatabaseError variants
///
/// The PostgreSQL error code decides the variant; see
/// <https://www.postgresql.org/docs/current/errcodes-appendix.html>.
impl From<&sqlx::Error> for DatabaseError {
    fn from(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => {
                DatabaseError::NotFound("Record not found".to_string())
            }
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DatabaseError::ConnectionFailed(error.to_string())
            }
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                Some("23505") => DatabaseError::DuplicateEntry(db_err.message().to_string()),
                Some("23502") | Some("23514") => {
                    DatabaseError::ConstraintViolation(db_err.message().to_string())
                }
                _ => DatabaseError::QueryFailed(db_err.message().to_string()),
            },
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        DatabaseError::from(&error)
    }
}

impl From<sqlx::migrate::MigrateError> for DatabaseError {
    fn from(error: sqlx::migrate::MigrateError) -> Self {
        DatabaseError::MigrationFailed(error.to_string())
    }
}

/// Translates database errors into port errors
///
/// - `NotFound` -> `PortError::NotFound`
/// - `DuplicateEntry` -> `PortError::Conflict`
/// - `ConstraintViolation` -> `PortError::Validation`
/// - connection problems -> `PortError::Connection`
/// - anything else -> `PortError::Internal`
pub fn db_to_port_error(error: DatabaseError, entity: &str, id: &str) -> PortError {
    match error {
        DatabaseError::NotFound(_) => PortError::not_found(entity, id),
        DatabaseError::DuplicateEntry(message) => PortError::conflict(message),
        DatabaseError::ConstraintViolation(message) => PortError::Validation {
            message,
            field: None,
        },
        e @ (DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted) => {
            PortError::connection(e.to_string())
        }
        e => PortError::internal(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error = DatabaseError::from(sqlx::Error::RowNotFound);
        assert!(error.is_not_found());
    }

    #[test]
    fn test_pool_timeout_is_connection_error() {
        let error = DatabaseError::from(sqlx::Error::PoolTimedOut);
        assert!(error.is_connection_error());
        assert!(db_to_port_error(error, "Fund", "F1").is_transient());
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let error = DatabaseError::duplicate("Fund", "fund_id", "FUND001");
        assert!(error.is_constraint_violation());
        assert!(error.to_string().contains("FUND001"));

        let port_error = db_to_port_error(error, "Fund", "FUND001");
        assert!(port_error.is_conflict());
    }

    #[test]
    fn test_not_found_keeps_identifier() {
        let port_error = db_to_port_error(DatabaseError::not_found("Fund", "X"), "Fund", "X");
        assert!(port_error.is_not_found());
        assert!(port_error.to_string().contains("X"));
    }

    #[test]
    fn test_query_failure_is_internal() {
        let port_error = db_to_port_error(DatabaseError::QueryFailed("syntax".into()), "Fund", "X");
        assert!(matches!(port_error, PortError::Internal { .. }));
    }
}
