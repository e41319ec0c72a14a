//! Read-only contact access for unauthenticated callers.

use std::sync::Arc;

use crate::{contact::Contact, store::ContactStore};

/// Slug-keyed, read-only view over a [`ContactStore`].
///
/// Public page handlers receive this instead of the store itself, so nothing
/// reachable without authentication can write.
pub struct PublicDirectory<S> {
  store: Arc<S>,
}

impl<S> Clone for PublicDirectory<S> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
    }
  }
}

impl<S: ContactStore> PublicDirectory<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Fetch the published profile for `slug`.
  ///
  /// A store failure is logged and reported as `None`: visitors see the same
  /// not-found page either way.
  pub async fn profile(&self, slug: &str) -> Option<Contact> {
    match self.store.find_by_slug(slug).await {
      Ok(found) => found,
      Err(e) => {
        tracing::warn!(slug, error = %e, "profile lookup failed");
        None
      }
    }
  }
}
