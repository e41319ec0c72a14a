//! HTTP front end for namecard.
//!
//! Serves the public profile pages and their artifacts, the uploaded
//! avatars, and the admin API behind HTTP Basic auth. Public handlers only
//! ever see a [`PublicDirectory`]; the writable store is handed to the admin
//! API alone.

pub mod auth;
pub mod avatars;
pub mod error;
pub mod etag;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, middleware, routing::get};
use namecard_core::{directory::PublicDirectory, store::ContactStore};
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

use auth::AuthConfig;
use avatars::FsObjectStore;
use handlers::{profile, qr, vcard};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `NAMECARD_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  /// Public origin, e.g. `https://cards.example.com`.
  pub base_url:           String,
  pub store_path:         PathBuf,
  pub avatar_dir:         PathBuf,
  pub auth_username:      String,
  pub auth_password_hash: String,
}

impl ServerConfig {
  /// Canonical public address of a profile: `{base_url}/u/{slug}`.
  pub fn profile_url(&self, slug: &str) -> String {
    format!("{}/u/{slug}", self.base_url.trim_end_matches('/'))
  }

  /// Public URL prefix of the avatar directory.
  pub fn avatar_base_url(&self) -> String {
    format!("{}/avatars", self.base_url.trim_end_matches('/'))
  }
}

// ─── Application state ───────────────────────────────────────────────────────

/// Everything the server is built from. Constructed once in `main`.
pub struct AppState<S> {
  pub store:   Arc<S>,
  pub objects: Arc<FsObjectStore>,
  pub auth:    Arc<AuthConfig>,
  pub config:  Arc<ServerConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:   Arc::clone(&self.store),
      objects: Arc::clone(&self.objects),
      auth:    Arc::clone(&self.auth),
      config:  Arc::clone(&self.config),
    }
  }
}

/// State visible to the public page handlers.
pub struct PageState<S> {
  pub directory: PublicDirectory<S>,
  pub config:    Arc<ServerConfig>,
}

impl<S> Clone for PageState<S> {
  fn clone(&self) -> Self {
    Self {
      directory: self.directory.clone(),
      config:    Arc::clone(&self.config),
    }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the complete axum [`Router`].
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ContactStore + 'static,
{
  let pages = Router::new()
    .route("/u/{slug}", get(profile::handler::<S>))
    .route("/u/{slug}/contact.vcf", get(vcard::handler::<S>))
    .route("/u/{slug}/qr.png", get(qr::handler::<S>))
    .with_state(PageState {
      directory: PublicDirectory::new(Arc::clone(&state.store)),
      config:    Arc::clone(&state.config),
    });

  let api = namecard_api::api_router(state.store, state.objects).layer(
    middleware::from_fn_with_state(state.auth, auth::require_auth),
  );

  Router::new()
    .route("/healthz", get(healthz))
    .merge(pages)
    .nest("/api", api)
    .nest_service("/avatars", ServeDir::new(&state.config.avatar_dir))
    .fallback(not_found)
    .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str { "ok" }

async fn not_found() -> Error { Error::NotFound }

// ─── Integration tests ───────────────────────────────────────────────────────
