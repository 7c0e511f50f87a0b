//! API middleware

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use chrono::Utc;
use tracing::{info, warn};

/// Request logging middleware
///
/// Logs one line per request with its outcome, duration, and the request
/// id assigned by the outer layers.
pub async fn request_log_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    if status.is_server_error() {
        warn!(
            method = %method,
            uri = %uri,
            request_id = %request_id,
            status = %status.as_u16(),
            duration_ms = duration.num_milliseconds(),
            "API request failed"
        );
    } else {
        info!(
            method = %method,
            uri = %uri,
            request_id = %request_id,
            status = %status.as_u16(),
            duration_ms = duration.num_milliseconds(),
            "API request"
        );
    }

    response
}
