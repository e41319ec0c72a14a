//! JSON REST API for namecard operators.
//!
//! Exposes an axum [`Router`] backed by any [`ContactStore`] and
//! [`ObjectStore`]. Auth, TLS, and transport concerns are the caller's
//! responsibility: mount it only behind an authentication gate.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", namecard_api::api_router(store.clone(), objects.clone()))
//! ```

pub mod contacts;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use namecard_core::store::{ContactStore, ObjectStore};

pub use error::ApiError;

/// Handles shared by every API handler.
pub struct ApiState<S, O> {
  pub store:   Arc<S>,
  pub objects: Arc<O>,
}

impl<S, O> Clone for ApiState<S, O> {
  fn clone(&self) -> Self {
    Self {
      store:   Arc::clone(&self.store),
      objects: Arc::clone(&self.objects),
    }
  }
}

/// Build the API router for `store` and `objects`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, O>(store: Arc<S>, objects: Arc<O>) -> Router<()>
where
  S: ContactStore + 'static,
  O: ObjectStore + 'static,
{
  Router::new()
    .route(
      "/contacts",
      get(contacts::list::<S, O>).post(contacts::create::<S, O>),
    )
    .route("/contacts/import", post(contacts::import::<S, O>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S, O>)
        .put(contacts::replace::<S, O>)
        .delete(contacts::delete_one::<S, O>),
    )
    .route("/contacts/{id}/avatar", put(contacts::upload_avatar::<S, O>))
    .with_state(ApiState { store, objects })
}

// ─── Integration tests ───────────────────────────────────────────────────────
