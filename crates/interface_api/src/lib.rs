//! HTTP API Layer
//!
//! This crate provides the REST API for the fund registry using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for funds and health checks
//! - **Extractors**: Untyped JSON bodies with media type checks
//! - **Middleware**: Request ids, tracing, and request logging
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(service);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod handlers;

use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_fund::FundService;

use crate::handlers::{fund, health};
use crate::middleware::request_log_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: FundService,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `service` - Fund service backed by the configured store
///
/// # Returns
///
/// Configured Axum router with all routes and middleware. Every response
/// carries an `x-request-id`, generated when the request has none.
pub fn create_router(service: FundService) -> Router {
    let state = AppState { service };

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let fund_routes = Router::new()
        .route("/funds/", get(fund::list_funds).post(fund::create_fund))
        .route(
            "/funds/:id/",
            get(fund::get_fund)
                .put(fund::update_fund)
                .delete(fund::delete_fund),
        )
        .layer(axum_middleware::from_fn(request_log_middleware));

    Router::new()
        .merge(health_routes)
        .merge(fund_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
