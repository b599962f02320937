//! [`SqliteStore`], the SQLite implementation of [`SubmissionStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use sheer_core::{
  query::{StatusCounts, SubmissionFilter, SubmissionPage, SubmissionQuery, fold_case},
  store::SubmissionStore,
  submission::{NewSubmission, Status, Submission},
};

use crate::{
  Result,
  encode::{
    COLUMNS, RawSubmission, decode_status, encode_dt, encode_status, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A lead store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
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

  /// Open an in-memory store. Used by tests.
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

  /// Run a single-row `UPDATE` and read the row back in the same
  /// transaction. `None` when no row has `id`.
  async fn update_one(
    &self,
    id: Uuid,
    sql: &'static str,
    value: Option<String>,
  ) -> Result<Option<Submission>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSubmission> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(sql, rusqlite::params![id_str, value])?;
        let raw = if changed == 0 {
          None
        } else {
          tx.query_row(
            &format!("SELECT {COLUMNS} FROM contact_submissions WHERE id = ?1"),
            rusqlite::params![id_str],
            RawSubmission::from_row,
          )
          .optional()?
        };
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawSubmission::into_submission).transpose()
  }
}

/// Translate a filter into a `WHERE` clause and its positional parameters.
fn where_clause(filter: &SubmissionFilter) -> (String, Vec<Value>) {
  let mut conds: Vec<&'static str> = Vec::new();
  let mut params: Vec<Value> = Vec::new();

  if let Some(status) = filter.status.status() {
    conds.push("status = ?");
    params.push(Value::Text(encode_status(status).to_owned()));
  }
  // `instr` keeps the match literal; `%` and `_` in the search text mean
  // nothing special.
  if let Some(term) = filter.search_term() {
    conds.push("(instr(full_name_folded, ?) > 0 OR instr(email_folded, ?) > 0)");
    let needle = fold_case(term);
    params.push(Value::Text(needle.clone()));
    params.push(Value::Text(needle));
  }

  let clause = if conds.is_empty() {
    String::new()
  } else {
    format!("WHERE {}", conds.join(" AND "))
  };
  (clause, params)
}

// ─── SubmissionStore impl ────────────────────────────────────────────────────

impl SubmissionStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, input: NewSubmission) -> Result<Submission> {
    input.validate()?;

    let submission = Submission {
      id:         Uuid::new_v4(),
      created_at: Utc::now(),
      full_name:  input.full_name,
      email:      input.email,
      message:    input.message,
      status:     Status::New,
      notes:      None,
    };

    let id_str      = encode_uuid(submission.id);
    let at_str      = encode_dt(submission.created_at);
    let full_name   = submission.full_name.clone();
    let email       = submission.email.clone();
    let message     = submission.message.clone();
    let status_str  = encode_status(submission.status);
    let name_folded = fold_case(&submission.full_name);
    let email_fold  = fold_case(&submission.email);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contact_submissions (
             id, created_at, full_name, email, message, status,
             full_name_folded, email_folded
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            id_str,
            at_str,
            full_name,
            email,
            message,
            status_str,
            name_folded,
            email_fold,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %submission.id, "submission inserted");
    Ok(submission)
  }

  async fn get(&self, id: Uuid) -> Result<Option<Submission>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawSubmission> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {COLUMNS} FROM contact_submissions WHERE id = ?1"),
            rusqlite::params![id_str],
            RawSubmission::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSubmission::into_submission).transpose()
  }

  async fn list(&self, query: &SubmissionQuery) -> Result<SubmissionPage> {
    let (clause, params) = where_clause(&query.filter);
    let limit_val  = i64::from(query.limit());
    let offset_val = i64::try_from(query.offset()).unwrap_or(i64::MAX);

    let (raws, total): (Vec<RawSubmission>, i64) = self
      .conn
      .call(move |conn| {
        // Count and page come from the same snapshot.
        let tx = conn.transaction()?;

        let total: i64 = tx.query_row(
          &format!("SELECT COUNT(*) FROM contact_submissions {clause}"),
          rusqlite::params_from_iter(params.iter()),
          |r| r.get(0),
        )?;

        // `rowid` breaks ties between rows recorded in the same instant so
        // the most recently inserted still comes first.
        let sql = format!(
          "SELECT {COLUMNS}
           FROM contact_submissions
           {clause}
           ORDER BY created_at DESC, rowid DESC
           LIMIT ? OFFSET ?"
        );
        let mut page_params = params;
        page_params.push(Value::Integer(limit_val));
        page_params.push(Value::Integer(offset_val));

        let rows = {
          let mut stmt = tx.prepare(&sql)?;
          stmt
            .query_map(
              rusqlite::params_from_iter(page_params.iter()),
              RawSubmission::from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        tx.commit()?;
        Ok((rows, total))
      })
      .await?;

    let rows = raws
      .into_iter()
      .map(RawSubmission::into_submission)
      .collect::<Result<Vec<_>>>()?;

    Ok(SubmissionPage {
      rows,
      total_count: u64::try_from(total).unwrap_or_default(),
      page: query.page,
      page_size: query.page_size,
    })
  }

  async fn update_status(&self, id: Uuid, status: Status) -> Result<Option<Submission>> {
    self
      .update_one(
        id,
        "UPDATE contact_submissions SET status = ?2 WHERE id = ?1",
        Some(encode_status(status).to_owned()),
      )
      .await
  }

  async fn update_notes(&self, id: Uuid, notes: Option<String>) -> Result<Option<Submission>> {
    self
      .update_one(id, "UPDATE contact_submissions SET notes = ?2 WHERE id = ?1", notes)
      .await
  }

  async fn status_counts(&self) -> Result<StatusCounts> {
    let raw: Vec<(String, i64)> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT status, COUNT(*) FROM contact_submissions GROUP BY status",
        )?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut counts = StatusCounts::default();
    for (status, n) in raw {
      counts.set(decode_status(&status)?, u64::try_from(n).unwrap_or_default());
    }
    Ok(counts)
  }
}
