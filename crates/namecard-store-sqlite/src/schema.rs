//! SQL schema for the namecard SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision for future migrations.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    contact_id  TEXT PRIMARY KEY,
    slug        TEXT NOT NULL,
    full_name   TEXT NOT NULL,
    position    TEXT,
    company     TEXT,
    phone       TEXT,
    email       TEXT,
    website     TEXT,
    line_id     TEXT,
    facebook    TEXT,
    instagram   TEXT,
    avatar_url  TEXT,
    photo_url   TEXT,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC; store-assigned
    updated_at  TEXT NOT NULL,
    UNIQUE (slug)
);

CREATE INDEX IF NOT EXISTS contacts_created_idx ON contacts(created_at);

PRAGMA user_version = 1;
";
