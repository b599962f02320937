//! Admin-only endpoints that are not tied to a single submission.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/stats` | Count per status across the whole table |
//! | `GET`  | `/session` | Echoes the authenticated username; used as the sign-in check |

use axum::{Json, extract::State};
use serde::Serialize;
use sheer_core::{query::StatusCounts, store::SubmissionStore};

use crate::{AppState, auth::Authenticated, error::ApiError};

/// `GET /stats`
pub async fn stats<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
) -> Result<Json<StatusCounts>, ApiError>
where
  S: SubmissionStore + Clone + Send + Sync + 'static,
{
  let counts = state.store.status_counts().await.map_err(ApiError::store)?;
  Ok(Json(counts))
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
  pub username: String,
}

/// `GET /session`
pub async fn session<S>(auth: Authenticated, State(_): State<AppState<S>>) -> Json<SessionInfo>
where
  S: SubmissionStore + Clone + Send + Sync + 'static,
{
  tracing::debug!(username = %auth.username, "session check");
  Json(SessionInfo { username: auth.username })
}
