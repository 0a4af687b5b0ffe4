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
  /// A required body field was absent or empty.
  #[error("{0} is required")]
  MissingField(&'static str),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::MissingField(_) => {
        (StatusCode::BAD_REQUEST, self.to_string())
      }
      ApiError::Store(e) => {
        // Full detail stays server-side; the client gets a generic body.
        tracing::error!(error = %e, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_owned())
      }
    };
    (status, Json(json!({ "message": message }))).into_response()
  }
}

/// Validate a required body field: present and non-blank.
pub(crate) fn require(
  value: Option<String>,
  field: &'static str,
) -> Result<String, ApiError> {
  match value {
    Some(s) if !s.trim().is_empty() => Ok(s),
    _ => Err(ApiError::MissingField(field)),
  }
}
