//! Error types for the namecard-vcard codec.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("vCard missing BEGIN/END:VCARD envelope")]
  MissingEnvelope,

  #[error("expected a single vCard, found {0}")]
  MultipleCards(usize),

  #[error("malformed content-line: {0}")]
  MalformedContentLine(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
