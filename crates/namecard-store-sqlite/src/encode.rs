//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings so that text order
//! matches time order. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use namecard_core::contact::{Contact, ContactSummary};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Search ──────────────────────────────────────────────────────────────────

/// `%text%` with LIKE wildcards in `text` escaped by `\`.
pub fn like_pattern(text: &str) -> String {
  let mut out = String::with_capacity(text.len() + 2);
  out.push('%');
  for c in text.chars() {
    if matches!(c, '%' | '_' | '\\') {
      out.push('\\');
    }
    out.push(c);
  }
  out.push('%');
  out
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawContact::from_row`].
pub const CONTACT_COLUMNS: &str = "contact_id, slug, full_name, position, \
  company, phone, email, website, line_id, facebook, instagram, avatar_url, \
  photo_url, created_at, updated_at";

/// Raw strings read directly from a `contacts` row.
pub struct RawContact {
  pub contact_id: String,
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
  pub created_at: String,
  pub updated_at: String,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contact_id: row.get(0)?,
      slug:       row.get(1)?,
      full_name:  row.get(2)?,
      position:   row.get(3)?,
      company:    row.get(4)?,
      phone:      row.get(5)?,
      email:      row.get(6)?,
      website:    row.get(7)?,
      line_id:    row.get(8)?,
      facebook:   row.get(9)?,
      instagram:  row.get(10)?,
      avatar_url: row.get(11)?,
      photo_url:  row.get(12)?,
      created_at: row.get(13)?,
      updated_at: row.get(14)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:         decode_uuid(&self.contact_id)?,
      slug:       self.slug,
      full_name:  self.full_name,
      position:   self.position,
      company:    self.company,
      phone:      self.phone,
      email:      self.email,
      website:    self.website,
      line_id:    self.line_id,
      facebook:   self.facebook,
      instagram:  self.instagram,
      avatar_url: self.avatar_url,
      photo_url:  self.photo_url,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings for the admin list projection.
pub struct RawSummary {
  pub contact_id: String,
  pub slug:       String,
  pub full_name:  String,
  pub position:   Option<String>,
  pub company:    Option<String>,
  pub created_at: String,
}

impl RawSummary {
  pub fn into_summary(self) -> Result<ContactSummary> {
    Ok(ContactSummary {
      id:         decode_uuid(&self.contact_id)?,
      slug:       self.slug,
      full_name:  self.full_name,
      position:   self.position,
      company:    self.company,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("acme"), "%acme%");
    assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
  }

  #[test]
  fn timestamps_are_fixed_width() {
    let a = encode_dt(DateTime::<Utc>::UNIX_EPOCH);
    assert_eq!(a, "1970-01-01T00:00:00.000000Z");
    assert_eq!(decode_dt(&a).unwrap(), DateTime::<Utc>::UNIX_EPOCH);
  }
}
