//! Handlers for `/submissions` endpoints.
//!
//! | Method  | Path | Auth | Notes |
//! |---------|------|------|-------|
//! | `POST`  | `/submissions` | public | Body: [`NewSubmissionBody`]; returns 201 + stored submission |
//! | `GET`   | `/submissions` | admin | `?status=all\|new\|…`, `?search=…`, `?page=N` |
//! | `GET`   | `/submissions/:id` | admin | 404 if not found |
//! | `PATCH` | `/submissions/:id/status` | admin | Body: `{"status":"contacted"}` |
//! | `PATCH` | `/submissions/:id/notes` | admin | Body: `{"notes":"..."}`; blank or null clears |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use sheer_core::{
  query::{StatusFilter, SubmissionFilter, SubmissionPage, SubmissionQuery},
  store::SubmissionStore,
  submission::{NewSubmission, Status, Submission},
};
use uuid::Uuid;

use crate::{
  AppState,
  auth::Authenticated,
  error::ApiError,
  extract::{Body, Params},
};

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /submissions`. Missing fields are treated as
/// empty so they are reported by validation rather than by the JSON parser.
#[derive(Debug, Deserialize)]
pub struct NewSubmissionBody {
  #[serde(default)]
  pub full_name: String,
  #[serde(default)]
  pub email:     String,
  #[serde(default)]
  pub message:   String,
}

/// `POST /submissions`. Unauthenticated; the contact forms post here.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Body(body): Body<NewSubmissionBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubmissionStore + Clone + Send + Sync + 'static,
{
  let input = NewSubmission::new(body.full_name, body.email, body.message)?;
  let submission = state.store.insert(input).await.map_err(ApiError::store)?;
  tracing::info!(id = %submission.id, "new submission received");
  Ok((StatusCode::CREATED, Json(submission)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  /// `all` (default) or one status.
  #[serde(default)]
  pub status: StatusFilter,
  /// Literal, case-insensitive substring of name or email.
  #[serde(default)]
  pub search: String,
  /// Zero-indexed page. Defaults to 0.
  #[serde(default)]
  pub page:   u32,
}

/// `GET /submissions[?status=...][&search=...][&page=...]`
pub async fn list<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Params(params): Params<ListParams>,
) -> Result<Json<SubmissionPage>, ApiError>
where
  S: SubmissionStore + Clone + Send + Sync + 'static,
{
  let query = SubmissionQuery::new(
    SubmissionFilter { status: params.status, search: params.search },
    params.page,
  );
  let page = state.store.list(&query).await.map_err(ApiError::store)?;
  Ok(Json(page))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /submissions/:id`
pub async fn get_one<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Submission>, ApiError>
where
  S: SubmissionStore + Clone + Send + Sync + 'static,
{
  let submission = state
    .store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(submission))
}

// ─── Status ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StatusBody {
  pub status: Status,
}

/// `PATCH /submissions/:id/status`. Returns the updated submission.
pub async fn update_status<S>(
  auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Body(body): Body<StatusBody>,
) -> Result<Json<Submission>, ApiError>
where
  S: SubmissionStore + Clone + Send + Sync + 'static,
{
  let submission = state
    .store
    .update_status(id, body.status)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  tracing::info!(%id, status = %body.status, by = %auth.username, "status updated");
  Ok(Json(submission))
}

// ─── Notes ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NotesBody {
  #[serde(default)]
  pub notes: Option<String>,
}

/// `PATCH /submissions/:id/notes`. Returns the updated submission.
pub async fn update_notes<S>(
  auth: Authenticated,
  State(state): State<AppState<S>>,
  Path(id): Path<Uuid>,
  Body(body): Body<NotesBody>,
) -> Result<Json<Submission>, ApiError>
where
  S: SubmissionStore + Clone + Send + Sync + 'static,
{
  let notes = body.notes.filter(|n| !n.trim().is_empty());
  let submission = state
    .store
    .update_notes(id, notes)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  tracing::info!(%id, by = %auth.username, "notes updated");
  Ok(Json(submission))
}

fn not_found(id: Uuid) -> ApiError {
  ApiError::NotFound(format!("submission {id} not found"))
}
