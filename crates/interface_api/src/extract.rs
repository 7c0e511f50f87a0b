//! Request extractors

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::header::CONTENT_TYPE,
    Json,
};
use serde_json::Value;

use crate::error::ApiError;

/// An untyped JSON request body
///
/// A body sent without a JSON content type is refused as an unsupported
/// media type before any parsing happens.
#[derive(Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(JsonRejection::MissingJsonContentType(_)) => {
                Err(ApiError::UnsupportedMediaType(content_type))
            }
            Err(rejection) => Err(rejection.into()),
        }
    }
}
