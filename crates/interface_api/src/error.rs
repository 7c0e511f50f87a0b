//! API error handling
//!
//! Every failure leaving a handler passes through [`ApiError`], which
//! fixes the status code and body shape for each kind of error.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use domain_fund::validation::{fields, FUND_ID_TAKEN};
use domain_fund::{FieldErrors, FundError};

/// Body of a 404 response
pub const NOT_FOUND_MESSAGE: &str = "Fund not found";

/// Body of a 500 response; the cause is logged, never returned
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Fund not found")]
    NotFound,

    /// Field errors keyed by field name
    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    /// The request body was not parseable JSON
    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    /// The request body was not declared as JSON
    #[error("Unsupported media type \"{0}\"")]
    UnsupportedMediaType(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body for errors that are not tied to a field
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: NOT_FOUND_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, Json(errors)).into_response(),
            ApiError::MalformedBody(detail) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": format!("JSON parse error - {}", detail) })),
            )
                .into_response(),
            ApiError::UnsupportedMediaType(media_type) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                Json(json!({
                    "detail": format!("Unsupported media type \"{}\" in request.", media_type)
                })),
            )
                .into_response(),
            ApiError::Internal(message) => {
                error!(error = %message, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: INTERNAL_ERROR_MESSAGE.to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<FundError> for ApiError {
    fn from(err: FundError) -> Self {
        match err {
            FundError::Validation(errors) => ApiError::Validation(errors),
            FundError::NotFound(_) => ApiError::NotFound,
            FundError::DuplicateKey(_) => {
                ApiError::Validation(FieldErrors::single(fields::FUND_ID, FUND_ID_TAKEN))
            }
            FundError::Storage(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::PortError;
    use domain_fund::FundId;

    #[test]
    fn test_duplicate_key_becomes_fund_id_error() {
        let err = ApiError::from(FundError::DuplicateKey(FundId::new("FUND001")));
        match err {
            ApiError::Validation(errors) => {
                assert_eq!(errors.get(fields::FUND_ID).unwrap(), [FUND_ID_TAKEN]);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::NotFound, StatusCode::NOT_FOUND),
            (
                ApiError::Validation(FieldErrors::single("fund_nav", "bad")),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::MalformedBody("eof".into()), StatusCode::BAD_REQUEST),
            (
                ApiError::UnsupportedMediaType("text/plain".into()),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (ApiError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_storage_error_is_internal() {
        let err = ApiError::from(FundError::Storage(PortError::connection("pool closed")));
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
