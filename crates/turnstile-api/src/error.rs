//! HTTP error mapping and the result-absence policy helpers.
//!
//! Absence semantics differ per endpoint: some treat zero rows as a
//! legitimate empty success, others as 404. Handlers make the choice visible
//! at the call site with [`require_found`] / [`require_any`] instead of ad
//! hoc conditionals.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use turnstile_core::CoreError;
use turnstile_graph::GraphError;

/// Error type returned by every handler.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Any store-side failure. Surfaced as an opaque 500; the real error
    /// goes to the log and never into the response body.
    #[error(transparent)]
    Store(#[from] GraphError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::Core(CoreError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Core(CoreError::InvalidRelationshipType(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::Core(CoreError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Core(CoreError::HoursNotSet(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Core(CoreError::OutsideHours(msg)) => (StatusCode::FORBIDDEN, msg.clone()),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "graph store call failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(json!({ "error": detail }))).into_response()
    }
}

/// Absence policy: this operation treats a missing record as 404.
pub fn require_found<T>(value: Option<T>, what: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| CoreError::NotFound(what.to_string()).into())
}

/// Absence policy: this operation treats an empty result set as 404.
pub fn require_any<T>(items: Vec<T>, what: &str) -> Result<Vec<T>, ApiError> {
    if items.is_empty() {
        return Err(CoreError::NotFound(what.to_string()).into());
    }
    Ok(items)
}
