//! The `ContactStore` and `ObjectStore` traits.
//!
//! Storage backends (e.g. `namecard-store-sqlite`) implement these; the web
//! and API layers depend only on the traits. Handles are constructed once at
//! startup and passed down explicitly.

use std::future::Future;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::contact::{Contact, ContactSummary, NewContact};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`ContactStore::list`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactQuery {
  /// Case-insensitive substring matched against name, slug, company and
  /// position.
  #[serde(rename = "q")]
  pub text:   Option<String>,
  pub limit:  Option<usize>,
  pub offset: Option<usize>,
}

// ─── Record store ────────────────────────────────────────────────────────────

/// Error bound for [`ContactStore`] backends.
///
/// Lets HTTP layers tell a slug collision apart from a backend failure
/// without knowing the concrete store.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  /// `true` if the write failed because another contact owns the slug.
  fn is_slug_taken(&self) -> bool;
}

/// Abstraction over the contact record store.
///
/// Edits are full replaces. All methods return `Send` futures so the trait can
/// be used from axum handlers on a multi-threaded runtime.
pub trait ContactStore: Send + Sync {
  type Error: StoreError;

  /// Persist a new contact. The store assigns `id` and timestamps.
  fn create(
    &self,
    contact: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Retrieve a contact by exact, case-sensitive slug match.
  fn find_by_slug<'a>(
    &'a self,
    slug: &'a str,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + 'a;

  /// List contact summaries, newest first.
  fn list<'a>(
    &'a self,
    query: &'a ContactQuery,
  ) -> impl Future<Output = Result<Vec<ContactSummary>, Self::Error>> + Send + 'a;

  /// Replace every field of an existing contact. Returns `None` if `id` does
  /// not exist.
  fn replace(
    &self,
    id: Uuid,
    contact: NewContact,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Delete a contact. Returns `false` if `id` does not exist.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

// ─── Object store ────────────────────────────────────────────────────────────

/// Abstraction over the blob store holding uploaded avatars.
pub trait ObjectStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Store `body` under `key`, overwriting any existing object.
  fn put(
    &self,
    key: String,
    content_type: String,
    body: Bytes,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The absolute URL under which `key` is publicly readable.
  fn public_url(&self, key: &str) -> String;
}

/// Object key for an uploaded avatar:
/// `{slug or "no-slug"}/{unix millis}_{sanitised file name}`.
pub fn avatar_key(slug: &str, file_name: &str, at: DateTime<Utc>) -> String {
  let folder = if slug.is_empty() { "no-slug" } else { slug };
  format!("{folder}/{}_{}", at.timestamp_millis(), safe_file_name(file_name))
}

/// Replace every run of characters outside `[A-Za-z0-9_.-]` with `_`.
pub fn safe_file_name(name: &str) -> String {
  let mut out = String::with_capacity(name.len());
  let mut in_run = false;
  for c in name.chars() {
    if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
      out.push(c);
      in_run = false;
    } else if !in_run {
      out.push('_');
      in_run = true;
    }
  }
  out
}
