//! Error types and axum `IntoResponse` implementation.

use askama::Template;
use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::handlers::profile::NotFoundPage;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,
  /// Unknown slug, or a failed lookup; visitors cannot tell the two apart.
  #[error("not found")]
  NotFound,
  #[error("qr error: {0}")]
  Qr(#[from] namecard_qr::Error),
  #[error("template error: {0}")]
  Template(#[from] askama::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res =
          (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"namecard\""),
        );
        res
      }
      Error::NotFound => match NotFoundPage.render() {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(_) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
      },
      Error::Qr(e) => {
        tracing::warn!(error = %e, "QR artifact unavailable");
        (StatusCode::SERVICE_UNAVAILABLE, "QR code unavailable").into_response()
      }
      Error::Template(e) => {
        tracing::error!(error = %e, "template rendering failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
          .into_response()
      }
    }
  }
}
