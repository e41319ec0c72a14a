//! `GET /u/{slug}/qr.png` — the profile link as a QR image.

use axum::{
  extract::{Path, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use namecard_core::store::ContactStore;
use namecard_qr::QrOptions;

use crate::{
  PageState,
  error::Error,
  etag::{compute_etag, not_modified},
};

pub async fn handler<S: ContactStore>(
  State(state): State<PageState<S>>,
  Path(slug): Path<String>,
  headers: HeaderMap,
) -> Result<Response, Error> {
  let contact = super::lookup(&state, &slug).await?;

  let url = state.config.profile_url(&contact.slug);
  let png = namecard_qr::encode_png_async(url, QrOptions::default()).await?;
  let etag = compute_etag(&png);
  if not_modified(&headers, &etag) {
    return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
  }

  Ok(
    (
      [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (header::ETAG, etag),
      ],
      png,
    )
      .into_response(),
  )
}
