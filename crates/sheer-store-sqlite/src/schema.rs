//! SQL schema for the Sheer SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are never deleted. Only status and notes are ever updated.
CREATE TABLE IF NOT EXISTS contact_submissions (
    id               TEXT PRIMARY KEY,
    created_at       TEXT NOT NULL,   -- RFC 3339 UTC, nanosecond precision; store-assigned
    full_name        TEXT NOT NULL,
    email            TEXT NOT NULL,
    message          TEXT NOT NULL,
    status           TEXT NOT NULL DEFAULT 'new'
                     CHECK (status IN ('new', 'contacted', 'converted', 'archived')),
    notes            TEXT,
    -- Lower-cased copies used by free-text search.
    full_name_folded TEXT NOT NULL,
    email_folded     TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS submissions_created_idx ON contact_submissions(created_at);
CREATE INDEX IF NOT EXISTS submissions_status_idx  ON contact_submissions(status);

PRAGMA user_version = 1;
";
