//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings so that text order
//! equals time order. UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use sheer_core::submission::{Status, Submission};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Status ──────────────────────────────────────────────────────────────────

pub fn encode_status(s: Status) -> &'static str { s.as_str() }

pub fn decode_status(s: &str) -> Result<Status> { Ok(Status::parse(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawSubmission::from_row`].
pub const COLUMNS: &str =
  "id, created_at, full_name, email, message, status, notes";

/// Raw strings read directly from a `contact_submissions` row.
pub struct RawSubmission {
  pub id:         String,
  pub created_at: String,
  pub full_name:  String,
  pub email:      String,
  pub message:    String,
  pub status:     String,
  pub notes:      Option<String>,
}

impl RawSubmission {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      created_at: row.get(1)?,
      full_name:  row.get(2)?,
      email:      row.get(3)?,
      message:    row.get(4)?,
      status:     row.get(5)?,
      notes:      row.get(6)?,
    })
  }

  pub fn into_submission(self) -> Result<Submission> {
    Ok(Submission {
      id:         decode_uuid(&self.id)?,
      created_at: decode_dt(&self.created_at)?,
      full_name:  self.full_name,
      email:      self.email,
      message:    self.message,
      status:     decode_status(&self.status)?,
      notes:      self.notes,
    })
  }
}
