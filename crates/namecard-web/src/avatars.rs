//! Filesystem-backed [`ObjectStore`] for uploaded avatars.
//!
//! Objects live under `root/<key>` and are served back by the web server's
//! `/avatars` route.

use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use namecard_core::store::ObjectStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjectError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("invalid object key: {0:?}")]
  InvalidKey(String),
}

pub struct FsObjectStore {
  root:     PathBuf,
  /// Absolute URL prefix under which `root` is published.
  base_url: String,
}

impl FsObjectStore {
  pub fn new(root: impl Into<PathBuf>, base_url: &str) -> Self {
    Self {
      root:     root.into(),
      base_url: base_url.trim_end_matches('/').to_string(),
    }
  }

  /// Resolve `key` below `root`, refusing anything that could escape it.
  fn path_for(&self, key: &str) -> Result<PathBuf, ObjectError> {
    let rel = Path::new(key);
    let plain = !key.is_empty()
      && rel.components().all(|c| matches!(c, Component::Normal(_)));
    if !plain {
      return Err(ObjectError::InvalidKey(key.to_string()));
    }
    Ok(self.root.join(rel))
  }
}

impl ObjectStore for FsObjectStore {
  type Error = ObjectError;

  async fn put(
    &self,
    key: String,
    content_type: String,
    body: Bytes,
  ) -> Result<(), ObjectError> {
    let path = self.path_for(&key)?;
    if let Some(parent) = path.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, &body).await?;
    tracing::debug!(%key, %content_type, bytes = body.len(), "object stored");
    Ok(())
  }

  fn public_url(&self, key: &str) -> String { format!("{}/{key}", self.base_url) }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn temp_root(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("namecard-avatars-{name}-{}", std::process::id()))
  }

  #[tokio::test]
  async fn put_writes_below_root() {
    let root = temp_root("put");
    let store = FsObjectStore::new(&root, "https://cards.example.com/avatars/");

    store
      .put("jane/1_me.png".into(), "image/png".into(), Bytes::from_static(b"png"))
      .await
      .unwrap();

    assert_eq!(std::fs::read(root.join("jane/1_me.png")).unwrap(), b"png");
    assert_eq!(
      store.public_url("jane/1_me.png"),
      "https://cards.example.com/avatars/jane/1_me.png"
    );
    std::fs::remove_dir_all(root).unwrap();
  }

  #[tokio::test]
  async fn traversal_keys_are_rejected() {
    let store = FsObjectStore::new(temp_root("bad"), "http://x");
    for key in ["../etc/passwd", "/abs.png", "a/../../b", ""] {
      let err = store
        .put(key.into(), "image/png".into(), Bytes::new())
        .await
        .unwrap_err();
      assert!(matches!(err, ObjectError::InvalidKey(_)), "{key}");
    }
  }
}
