//! Error types for `namecard-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("slug is required")]
  MissingSlug,

  #[error("full name is required")]
  MissingFullName,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
