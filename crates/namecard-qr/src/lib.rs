//! QR code rendering for namecard profile links.
//!
//! A profile URL is encoded at error-correction level M and rasterised to a
//! black-on-white grayscale PNG. Output depends only on the input string and
//! [`QrOptions`], so the same link always yields the same bytes.

pub mod error;

use std::io::Cursor;

use base64::{Engine, engine::general_purpose::STANDARD};
pub use error::{Error, Result};
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Raster geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrOptions {
  /// Quiet zone around the symbol, in modules.
  pub margin: u32,
  /// Pixels per module edge.
  pub scale:  u32,
}

impl Default for QrOptions {
  fn default() -> Self { Self { margin: 1, scale: 6 } }
}

/// Outcome of a page's one-shot QR encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrState {
  /// A `data:image/png;base64,…` URI.
  Ready(String),
  /// Encoding failed; the page shows a placeholder instead.
  Unavailable,
}

impl QrState {
  pub fn data_uri(&self) -> Option<&str> {
    match self {
      Self::Ready(uri) => Some(uri),
      Self::Unavailable => None,
    }
  }
}

// ─── Encoding ────────────────────────────────────────────────────────────────

fn rasterise(code: &QrCode, opts: &QrOptions) -> GrayImage {
  let width = code.width() as u32;
  let side = (width + 2 * opts.margin) * opts.scale;
  let mut img = GrayImage::from_pixel(side, side, LIGHT);

  for (i, color) in code.to_colors().into_iter().enumerate() {
    if color != Color::Dark {
      continue;
    }
    let i = i as u32;
    let x0 = (i % width + opts.margin) * opts.scale;
    let y0 = (i / width + opts.margin) * opts.scale;
    for y in y0..y0 + opts.scale {
      for x in x0..x0 + opts.scale {
        img.put_pixel(x, y, DARK);
      }
    }
  }
  img
}

/// Encode `data` as a PNG image.
pub fn encode_png(data: &str, opts: &QrOptions) -> Result<Vec<u8>> {
  if data.is_empty() {
    return Err(Error::EmptyInput);
  }
  let code = QrCode::with_error_correction_level(data, EcLevel::M)?;

  let mut buf = Vec::new();
  rasterise(&code, opts).write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
  Ok(buf)
}

/// Encode `data` as a PNG and wrap it in a `data:` URI.
pub fn encode_data_uri(data: &str, opts: &QrOptions) -> Result<String> {
  let png = encode_png(data, opts)?;
  Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
}

/// Run [`encode_data_uri`] on the blocking pool. Runs once; never retried.
pub async fn encode_async(data: String, opts: QrOptions) -> Result<String> {
  tokio::task::spawn_blocking(move || encode_data_uri(&data, &opts)).await?
}

/// Run [`encode_png`] on the blocking pool.
pub async fn encode_png_async(data: String, opts: QrOptions) -> Result<Vec<u8>> {
  tokio::task::spawn_blocking(move || encode_png(&data, &opts)).await?
}

/// Encode `data` for a page view, folding any failure into
/// [`QrState::Unavailable`].
pub async fn render(data: String, opts: QrOptions) -> QrState {
  match encode_async(data, opts).await {
    Ok(uri) => QrState::Ready(uri),
    Err(e) => {
      tracing::warn!(error = %e, "QR encoding failed");
      QrState::Unavailable
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const URL: &str = "https://cards.example.com/u/jane";

  #[test]
  fn output_is_a_png() {
    let png = encode_png(URL, &QrOptions::default()).unwrap();
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
  }

  #[test]
  fn identical_input_gives_identical_bytes() {
    let opts = QrOptions::default();
    assert_eq!(encode_png(URL, &opts).unwrap(), encode_png(URL, &opts).unwrap());
  }

  #[test]
  fn different_slugs_differ() {
    let opts = QrOptions::default();
    assert_ne!(
      encode_png(URL, &opts).unwrap(),
      encode_png("https://cards.example.com/u/john", &opts).unwrap()
    );
  }

  #[test]
  fn image_side_follows_margin_and_scale() {
    let code = QrCode::with_error_correction_level(URL, EcLevel::M).unwrap();
    let opts = QrOptions { margin: 1, scale: 6 };
    let img = rasterise(&code, &opts);
    let expected = (code.width() as u32 + 2) * 6;
    assert_eq!(img.dimensions(), (expected, expected));

    // Quiet zone is light, the finder pattern corner is dark.
    assert_eq!(*img.get_pixel(0, 0), LIGHT);
    assert_eq!(*img.get_pixel(6, 6), DARK);
  }

  #[test]
  fn empty_input_is_rejected() {
    assert!(matches!(
      encode_png("", &QrOptions::default()),
      Err(Error::EmptyInput)
    ));
  }

  #[test]
  fn oversized_input_is_an_encode_error() {
    let huge = "x".repeat(4000);
    assert!(matches!(
      encode_png(&huge, &QrOptions::default()),
      Err(Error::Encode(_))
    ));
  }

  #[tokio::test]
  async fn data_uri_prefix() {
    let uri = encode_async(URL.to_string(), QrOptions::default())
      .await
      .unwrap();
    assert!(uri.starts_with("data:image/png;base64,iVBOR"));
  }

  #[tokio::test]
  async fn failure_renders_unavailable() {
    let state = render(String::new(), QrOptions::default()).await;
    assert_eq!(state, QrState::Unavailable);
    assert_eq!(state.data_uri(), None);
  }
}
