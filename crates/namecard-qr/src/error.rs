use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("nothing to encode")]
  EmptyInput,

  #[error("QR encoding failed: {0}")]
  Encode(#[from] qrcode::types::QrError),

  #[error("PNG encoding failed: {0}")]
  Image(#[from] image::ImageError),

  #[error("QR encoding task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
