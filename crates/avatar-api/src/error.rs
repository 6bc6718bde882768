//! API error type and [`axum::response::IntoResponse`] implementation.

use avatar_core::Suppressed;
use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  /// No avatar for this request; reported as `404`.
  #[error("{0}")]
  Suppressed(#[from] Suppressed),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Suppressed(_) => StatusCode::NOT_FOUND,
    };
    match &self {
      ApiError::BadRequest(reason) => tracing::warn!(%reason, "rejected avatar request"),
      ApiError::Suppressed(reason) => tracing::debug!(%reason, "no avatar for request"),
    }
    (status, Json(json!({ "error": self.to_string() }))).into_response()
  }
}
