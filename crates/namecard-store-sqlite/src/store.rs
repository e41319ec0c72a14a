//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use namecard_core::{
  contact::{Contact, ContactSummary, NewContact},
  store::{ContactQuery, ContactStore},
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{
    CONTACT_COLUMNS, RawContact, RawSummary, encode_dt, encode_uuid,
    like_pattern,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A namecard contact store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Map a write failure, turning the `UNIQUE(slug)` violation into
/// [`Error::SlugTaken`].
fn write_error(e: tokio_rusqlite::Error, slug: &str) -> Error {
  match e {
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.code == rusqlite::ErrorCode::ConstraintViolation =>
    {
      Error::SlugTaken(slug.to_string())
    }
    other => Error::Database(other),
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn create(&self, input: NewContact) -> Result<Contact> {
    // Truncated to the stored precision so the returned value equals a re-read.
    let now = Utc::now().trunc_subsecs(6);
    let contact = Contact {
      id:         Uuid::new_v4(),
      slug:       input.slug,
      full_name:  input.full_name,
      position:   input.position,
      company:    input.company,
      phone:      input.phone,
      email:      input.email,
      website:    input.website,
      line_id:    input.line_id,
      facebook:   input.facebook,
      instagram:  input.instagram,
      avatar_url: input.avatar_url,
      photo_url:  input.photo_url,
      created_at: now,
      updated_at: now,
    };

    let row = contact.clone();
    let id_str = encode_uuid(row.id);
    let at_str = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (
             contact_id, slug, full_name, position, company, phone, email,
             website, line_id, facebook, instagram, avatar_url, photo_url,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)",
          rusqlite::params![
            id_str,
            row.slug,
            row.full_name,
            row.position,
            row.company,
            row.phone,
            row.email,
            row.website,
            row.line_id,
            row.facebook,
            row.instagram,
            row.avatar_url,
            row.photo_url,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| write_error(e, &contact.slug))?;

    tracing::debug!(id = %contact.id, slug = %contact.slug, "contact created");
    Ok(contact)
  }

  async fn get(&self, id: Uuid) -> Result<Option<Contact>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CONTACT_COLUMNS} FROM contacts WHERE contact_id = ?1"
              ),
              rusqlite::params![id_str],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn find_by_slug<'a>(&'a self, slug: &'a str) -> Result<Option<Contact>> {
    let slug = slug.to_owned();

    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE slug = ?1"),
              rusqlite::params![slug],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn list<'a>(
    &'a self,
    query: &'a ContactQuery,
  ) -> Result<Vec<ContactSummary>> {
    let pattern = query
      .text
      .as_deref()
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .map(like_pattern);
    // SQLite treats a negative LIMIT as unbounded.
    let limit_val = query.limit.map_or(-1, |l| l as i64);
    let offset_val = query.offset.unwrap_or(0) as i64;

    let raws: Vec<RawSummary> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          r"SELECT contact_id, slug, full_name, position, company, created_at
            FROM contacts
            WHERE ?1 IS NULL
               OR full_name LIKE ?1 ESCAPE '\'
               OR slug      LIKE ?1 ESCAPE '\'
               OR company   LIKE ?1 ESCAPE '\'
               OR position  LIKE ?1 ESCAPE '\'
            ORDER BY created_at DESC, rowid DESC
            LIMIT ?2 OFFSET ?3",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![pattern, limit_val, offset_val], |row| {
            Ok(RawSummary {
              contact_id: row.get(0)?,
              slug:       row.get(1)?,
              full_name:  row.get(2)?,
              position:   row.get(3)?,
              company:    row.get(4)?,
              created_at: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSummary::into_summary).collect()
  }

  async fn replace(&self, id: Uuid, input: NewContact) -> Result<Option<Contact>> {
    let id_str = encode_uuid(id);
    let at_str = encode_dt(Utc::now());
    let slug = input.slug.clone();

    let changed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE contacts SET
             slug = ?2, full_name = ?3, position = ?4, company = ?5,
             phone = ?6, email = ?7, website = ?8, line_id = ?9,
             facebook = ?10, instagram = ?11, avatar_url = ?12,
             photo_url = ?13, updated_at = ?14
           WHERE contact_id = ?1",
          rusqlite::params![
            id_str,
            input.slug,
            input.full_name,
            input.position,
            input.company,
            input.phone,
            input.email,
            input.website,
            input.line_id,
            input.facebook,
            input.instagram,
            input.avatar_url,
            input.photo_url,
            at_str,
          ],
        )?;
        Ok(n)
      })
      .await
      .map_err(|e| write_error(e, &slug))?;

    if changed == 0 {
      return Ok(None);
    }
    tracing::debug!(%id, %slug, "contact replaced");
    self.get(id).await
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM contacts WHERE contact_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(removed > 0)
  }
}
