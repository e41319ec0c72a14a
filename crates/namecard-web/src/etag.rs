//! Strong ETags for generated artifacts.
//!
//! ETags are SHA-256 hashes over the exact response body, so any change in
//! the contact (or in how it is rendered) yields a new tag.

use axum::http::{HeaderMap, header};
use sha2::{Digest, Sha256};

/// Quoted hex SHA-256 of `body`.
pub fn compute_etag(body: &[u8]) -> String {
  format!("\"{}\"", hex::encode(Sha256::digest(body)))
}

/// `true` if the request's `If-None-Match` already names `etag` (or `*`).
///
/// Weak validators match too, as GET uses the weak comparison.
pub fn not_modified(headers: &HeaderMap, etag: &str) -> bool {
  headers
    .get_all(header::IF_NONE_MATCH)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|v| v.split(','))
    .map(str::trim)
    .any(|tag| tag == "*" || tag.trim_start_matches("W/") == etag)
}
