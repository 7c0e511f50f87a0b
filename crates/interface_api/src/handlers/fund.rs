//! Fund handlers
//!
//! Request bodies are taken as raw JSON through [`JsonBody`] so that every
//! field problem is reported by the validator rather than by deserialization.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use domain_fund::{Fund, FundId};

use crate::{error::ApiError, extract::JsonBody, AppState};

/// Lists all funds
pub async fn list_funds(State(state): State<AppState>) -> Result<Json<Vec<Fund>>, ApiError> {
    let funds = state.service.list().await?;
    Ok(Json(funds))
}

/// Creates a fund
pub async fn create_fund(
    State(state): State<AppState>,
    JsonBody(candidate): JsonBody,
) -> Result<(StatusCode, Json<Fund>), ApiError> {
    let fund = state.service.create(&candidate).await?;
    Ok((StatusCode::CREATED, Json(fund)))
}

/// Gets a fund by identifier
pub async fn get_fund(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Fund>, ApiError> {
    let fund = state.service.get(&FundId::from(id)).await?;
    Ok(Json(fund))
}

/// Replaces every field of a fund
pub async fn update_fund(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<JsonBody, ApiError>,
) -> Result<Json<Fund>, ApiError> {
    let id = FundId::from(id);
    // An unknown id is a 404 even when the body is unreadable
    let candidate = match body {
        Ok(JsonBody(candidate)) => candidate,
        Err(rejection) => {
            state.service.get(&id).await?;
            return Err(rejection);
        }
    };

    let fund = state.service.update(&id, &candidate).await?;
    Ok(Json(fund))
}

/// Deletes a fund
pub async fn delete_fund(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(&FundId::from(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
