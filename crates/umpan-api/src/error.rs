//! API error type and [`axum::response::IntoResponse`] implementation.

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
  /// The request body could not be decoded at all.
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error(transparent)]
  Core(#[from] umpan_core::Error),
}

impl ApiError {
  fn status_and_message(&self) -> (StatusCode, String) {
    use umpan_core::Error as Core;

    match self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Core(e @ (Core::Validation(_) | Core::EventNotFound(_))) => {
        (StatusCode::BAD_REQUEST, e.to_string())
      }
      ApiError::Core(e @ (Core::Storage { .. } | Core::IdsExhausted(_))) => {
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
      ApiError::Core(Core::Serialization(_)) => {
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = self.status_and_message();
    if status.is_server_error() {
      tracing::error!(error = %self, source = ?std::error::Error::source(&self), "request failed");
    }
    (status, Json(json!({ "message": message }))).into_response()
  }
}
