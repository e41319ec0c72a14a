//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use namecard_core::store::StoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("unsupported media type: {0}")]
  UnsupportedMediaType(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Wrap a record-store failure, surfacing slug collisions as 409.
  pub fn from_store<E: StoreError>(e: E) -> Self {
    if e.is_slug_taken() {
      ApiError::Conflict(e.to_string())
    } else {
      ApiError::Store(Box::new(e))
    }
  }

  /// Wrap an object-store failure.
  pub fn from_objects<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }
}

impl From<namecard_core::Error> for ApiError {
  fn from(e: namecard_core::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl From<namecard_vcard::Error> for ApiError {
  fn from(e: namecard_vcard::Error) -> Self { ApiError::BadRequest(e.to_string()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Conflict(m) => (StatusCode::CONFLICT, m.clone()),
      ApiError::UnsupportedMediaType(m) => {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, m.clone())
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
