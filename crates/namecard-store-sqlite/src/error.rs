//! Error type for `namecard-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Another contact already owns this slug.
  #[error("slug already in use: {0}")]
  SlugTaken(String),
}

impl namecard_core::store::StoreError for Error {
  fn is_slug_taken(&self) -> bool { matches!(self, Self::SlugTaken(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
