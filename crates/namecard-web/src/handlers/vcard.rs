//! `GET /u/{slug}/contact.vcf` — the vCard download.

use axum::{
  extract::{Path, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use namecard_core::store::ContactStore;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{
  PageState,
  error::Error,
  etag::{compute_etag, not_modified},
};

/// Everything outside the RFC 5987 `attr-char` set.
const NOT_ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'!')
  .remove(b'#')
  .remove(b'$')
  .remove(b'&')
  .remove(b'+')
  .remove(b'-')
  .remove(b'.')
  .remove(b'^')
  .remove(b'_')
  .remove(b'`')
  .remove(b'|')
  .remove(b'~');

/// `attachment` disposition with an ASCII fallback name and the exact UTF-8
/// name in `filename*`.
pub fn content_disposition(file_name: &str) -> String {
  let fallback: String = file_name
    .chars()
    .map(|c| {
      if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' }
    })
    .collect();
  let encoded = utf8_percent_encode(file_name, NOT_ATTR_CHAR);
  format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

pub async fn handler<S: ContactStore>(
  State(state): State<PageState<S>>,
  Path(slug): Path<String>,
  headers: HeaderMap,
) -> Result<Response, Error> {
  let contact = super::lookup(&state, &slug).await?;

  let card = namecard_vcard::serialize(&contact);
  let etag = compute_etag(card.as_bytes());
  if not_modified(&headers, &etag) {
    return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
  }

  let disposition =
    content_disposition(&namecard_vcard::file_name(&contact.full_name));
  Ok(
    (
      [
        (header::CONTENT_TYPE, namecard_vcard::MIME_TYPE.to_string()),
        (header::CONTENT_DISPOSITION, disposition),
        (header::ETAG, etag),
      ],
      card,
    )
      .into_response(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn ascii_name_is_kept() {
    assert_eq!(
      content_disposition("Jane_Doe.vcf"),
      "attachment; filename=\"Jane_Doe.vcf\"; filename*=UTF-8''Jane_Doe.vcf"
    );
  }

  #[test]
  fn non_ascii_name_gets_fallback_and_encoded_form() {
    let value = content_disposition("ภา.vcf");
    assert!(value.starts_with("attachment; filename=\"__.vcf\";"), "{value}");
    assert!(value.ends_with("filename*=UTF-8''%E0%B8%A0%E0%B8%B2.vcf"), "{value}");
  }

  #[test]
  fn encoded_name_escapes_non_attr_chars() {
    let value = content_disposition("A*B (Co)'s.vcf");
    assert!(
      value.ends_with("filename*=UTF-8''A%2AB%20%28Co%29%27s.vcf"),
      "{value}"
    );
  }

  #[test]
  fn encoded_name_keeps_attr_chars() {
    let value = content_disposition("a!#$&+-.^_`|~b.vcf");
    assert!(value.ends_with("filename*=UTF-8''a!#$&+-.^_`|~b.vcf"), "{value}");
  }
}
