//! The contact record — the only entity in the system.
//!
//! A contact is a flat, self-contained profile addressed publicly by its slug.
//! Writes arrive as a raw [`ContactInput`] and are normalised into a
//! [`NewContact`] before they reach a store; reads never re-normalise.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Slug ────────────────────────────────────────────────────────────────────

/// Normalise a raw slug: trim, lowercase, replace each whitespace run with a
/// single `-`, then drop every character outside `[a-z0-9-_]`.
pub fn normalize_slug(raw: &str) -> String {
  raw
    .to_lowercase()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join("-")
    .chars()
    .filter(|c| {
      c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'
    })
    .collect()
}

// ─── Stored record ───────────────────────────────────────────────────────────

/// A persisted contact profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:         Uuid,
  /// Public addressing key; immutable once shared.
  pub slug:       String,
  pub full_name:  String,
  pub position:   Option<String>,
  pub company:    Option<String>,
  pub phone:      Option<String>,
  pub email:      Option<String>,
  pub website:    Option<String>,
  pub line_id:    Option<String>,
  pub facebook:   Option<String>,
  pub instagram:  Option<String>,
  /// Absolute URL of an uploaded avatar.
  pub avatar_url: Option<String>,
  /// Legacy photo reference; may be a bare storage path.
  pub photo_url:  Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Contact {
  /// Position and company joined by ` • `, or `—` when both are absent.
  pub fn subtitle(&self) -> String {
    let parts: Vec<&str> = [self.position.as_deref(), self.company.as_deref()]
      .into_iter()
      .flatten()
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .collect();

    if parts.is_empty() {
      "—".to_string()
    } else {
      parts.join(" • ")
    }
  }

  /// The image to render for this contact. Only absolute `http(s)` URLs are
  /// trusted; `avatar_url` wins over `photo_url`.
  pub fn photo_src(&self) -> Option<&str> {
    [self.avatar_url.as_deref(), self.photo_url.as_deref()]
      .into_iter()
      .flatten()
      .map(str::trim)
      .find(|s| is_http_url(s))
  }
}

/// `true` if `s` starts with `http://` or `https://`, ignoring ASCII case.
pub fn is_http_url(s: &str) -> bool {
  starts_with_ignore_case(s, "http://") || starts_with_ignore_case(s, "https://")
}

pub(crate) fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
  s.len() >= prefix.len()
    && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// The admin list projection of a [`Contact`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSummary {
  pub id:         Uuid,
  pub slug:       String,
  pub full_name:  String,
  pub position:   Option<String>,
  pub company:    Option<String>,
  pub created_at: DateTime<Utc>,
}

impl From<&Contact> for ContactSummary {
  fn from(c: &Contact) -> Self {
    Self {
      id:         c.id,
      slug:       c.slug.clone(),
      full_name:  c.full_name.clone(),
      position:   c.position.clone(),
      company:    c.company.clone(),
      created_at: c.created_at,
    }
  }
}

// ─── Write payloads ──────────────────────────────────────────────────────────

/// Raw operator input for a create or a full replace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInput {
  pub slug:       String,
  pub full_name:  String,
  pub position:   Option<String>,
  pub company:    Option<String>,
  pub phone:      Option<String>,
  pub email:      Option<String>,
  pub website:    Option<String>,
  pub line_id:    Option<String>,
  pub facebook:   Option<String>,
  pub instagram:  Option<String>,
  pub avatar_url: Option<String>,
  pub photo_url:  Option<String>,
}

/// A validated, normalised write. Input to
/// [`crate::store::ContactStore::create`] and
/// [`crate::store::ContactStore::replace`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
  pub slug:       String,
  pub full_name:  String,
  pub position:   Option<String>,
  pub company:    Option<String>,
  pub phone:      Option<String>,
  pub email:      Option<String>,
  pub website:    Option<String>,
  pub line_id:    Option<String>,
  pub facebook:   Option<String>,
  pub instagram:  Option<String>,
  pub avatar_url: Option<String>,
  pub photo_url:  Option<String>,
}

fn clean(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

impl ContactInput {
  /// Normalise the slug, trim every field, and reject records without a slug
  /// or a name.
  pub fn validate(self) -> Result<NewContact> {
    let slug = normalize_slug(&self.slug);
    if slug.is_empty() {
      return Err(Error::MissingSlug);
    }

    let full_name = self.full_name.trim().to_string();
    if full_name.is_empty() {
      return Err(Error::MissingFullName);
    }

    Ok(NewContact {
      slug,
      full_name,
      position: clean(self.position),
      company: clean(self.company),
      phone: clean(self.phone),
      email: clean(self.email),
      website: clean(self.website),
      line_id: clean(self.line_id),
      facebook: clean(self.facebook),
      instagram: clean(self.instagram),
      avatar_url: clean(self.avatar_url),
      photo_url: clean(self.photo_url),
    })
  }
}

impl From<Contact> for ContactInput {
  fn from(c: Contact) -> Self {
    Self {
      slug:       c.slug,
      full_name:  c.full_name,
      position:   c.position,
      company:    c.company,
      phone:      c.phone,
      email:      c.email,
      website:    c.website,
      line_id:    c.line_id,
      facebook:   c.facebook,
      instagram:  c.instagram,
      avatar_url: c.avatar_url,
      photo_url:  c.photo_url,
    }
  }
}

// ─── Constructors ────────────────────────────────────────────────────────────

impl Contact {
  /// A contact with only a slug and a name; every other field absent.
  pub fn named(slug: &str, full_name: &str) -> Self {
    let at = DateTime::<Utc>::UNIX_EPOCH;
    Self {
      id:         Uuid::nil(),
      slug:       slug.to_string(),
      full_name:  full_name.to_string(),
      position:   None,
      company:    None,
      phone:      None,
      email:      None,
      website:    None,
      line_id:    None,
      facebook:   None,
      instagram:  None,
      avatar_url: None,
      photo_url:  None,
      created_at: at,
      updated_at: at,
    }
  }
}
