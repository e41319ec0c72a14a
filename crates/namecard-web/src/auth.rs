//! HTTP Basic-auth gate for the admin API.

use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::{Request, State},
  http::HeaderMap,
  middleware::Next,
  response::Response,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;

use crate::error::Error;

/// Credentials accepted as valid for this server instance.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Verify `Authorization: Basic …` credentials against `config`.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<(), Error> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  if username != config.username {
    return Err(Error::Unauthorized);
  }

  let parsed_hash = PasswordHash::new(&config.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(())
}

/// Middleware rejecting every request that fails [`verify_auth`].
pub async fn require_auth(
  State(config): State<Arc<AuthConfig>>,
  req: Request,
  next: Next,
) -> Result<Response, Error> {
  if let Err(e) = verify_auth(req.headers(), &config) {
    tracing::info!(path = %req.uri().path(), "rejected admin request");
    return Err(e);
  }
  Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
  use argon2::{PasswordHasher, password_hash::SaltString};
  use axum::http::{HeaderValue, header};
  use rand_core::OsRng;

  use super::*;

  fn config(password: &str) -> AuthConfig {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string();
    AuthConfig {
      username:      "admin".to_string(),
      password_hash: hash,
    }
  }

  fn basic(user: &str, pass: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let value = format!("Basic {}", B64.encode(format!("{user}:{pass}")));
    headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
    headers
  }

  #[test]
  fn valid_credentials_pass() {
    let cfg = config("s3cret");
    assert!(verify_auth(&basic("admin", "s3cret"), &cfg).is_ok());
  }

  #[test]
  fn wrong_password_fails() {
    let cfg = config("s3cret");
    assert!(matches!(
      verify_auth(&basic("admin", "nope"), &cfg),
      Err(Error::Unauthorized)
    ));
  }

  #[test]
  fn wrong_user_fails() {
    let cfg = config("s3cret");
    assert!(verify_auth(&basic("root", "s3cret"), &cfg).is_err());
  }

  #[test]
  fn missing_header_fails() {
    let cfg = config("s3cret");
    assert!(verify_auth(&HeaderMap::new(), &cfg).is_err());
  }

  #[test]
  fn password_may_contain_colons() {
    let cfg = config("a:b:c");
    assert!(verify_auth(&basic("admin", "a:b:c"), &cfg).is_ok());
  }
}
