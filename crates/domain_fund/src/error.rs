//! Fund domain errors

use thiserror::Error;

use core_kernel::PortError;

use crate::fund::FundId;
use crate::validation::FieldErrors;

/// Errors that can occur in the fund domain
#[derive(Debug, Error)]
pub enum FundError {
    /// One or more fields failed validation
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Fund not found: {0}")]
    NotFound(FundId),

    /// A fund with this identifier already exists
    #[error("Fund already exists: {0}")]
    DuplicateKey(FundId),

    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

impl FundError {
    /// Returns true if this error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        !matches!(self, FundError::Storage(_))
    }
}

impl From<FieldErrors> for FundError {
    fn from(errors: FieldErrors) -> Self {
        FundError::Validation(errors)
    }
}
