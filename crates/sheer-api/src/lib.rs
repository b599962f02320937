//! JSON REST API for Sheer.
//!
//! Exposes an axum [`Router`] backed by any
//! [`sheer_core::store::SubmissionStore`]. The contact-form endpoint is
//! public; everything else sits behind the admin Basic-auth gate in
//! [`auth`]. TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", sheer_api::api_router(state))
//! ```

pub mod admin;
pub mod auth;
pub mod error;
mod extract;
pub mod submissions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch},
};
use sheer_core::store::SubmissionStore;

pub use auth::AuthConfig;
pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub store: Arc<S>,
  pub auth:  Arc<AuthConfig>,
}

impl<S> AppState<S> {
  pub fn new(store: S, auth: AuthConfig) -> Self {
    Self { store: Arc::new(store), auth: Arc::new(auth) }
  }
}

// Manual impl: cloning the state never requires cloning `S` itself.
impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), auth: Arc::clone(&self.auth) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: AppState<S>) -> Router<()>
where
  S: SubmissionStore + Clone + Send + Sync + 'static,
{
  Router::new()
    // Submissions
    .route(
      "/submissions",
      get(submissions::list::<S>).post(submissions::create::<S>),
    )
    .route("/submissions/{id}", get(submissions::get_one::<S>))
    .route("/submissions/{id}/status", patch(submissions::update_status::<S>))
    .route("/submissions/{id}/notes", patch(submissions::update_notes::<S>))
    // Admin
    .route("/stats", get(admin::stats::<S>))
    .route("/session", get(admin::session::<S>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use rand_core::OsRng;
  use serde_json::{Value, json};
  use sheer_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  use super::*;

  const USER: &str = "admin@sheer.test";
  const PASS: &str = "secret";

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let salt  = SaltString::generate(&mut OsRng);
    let hash  = Argon2::default()
      .hash_password(PASS.as_bytes(), &salt)
      .unwrap()
      .to_string();
    AppState::new(store, AuthConfig { username: USER.into(), password_hash: hash })
  }

  fn auth_header() -> String {
    format!("Basic {}", B64.encode(format!("{USER}:{PASS}")))
  }

  async fn send(
    state:  &AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    authed: bool,
    body:   Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if authed {
      builder = builder.header(header::AUTHORIZATION, auth_header());
    }
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };
    api_router(state.clone())
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  async fn submit(state: &AppState<SqliteStore>, name: &str, email: &str) -> Uuid {
    let resp = send(
      state,
      "POST",
      "/submissions",
      false,
      Some(json!({ "full_name": name, "email": email, "message": "Interested" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = json_body(resp).await;
    body["id"].as_str().unwrap().parse().unwrap()
  }

  // ── Public submit ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn submit_is_public_and_returns_new_row() {
    let state = make_state().await;
    let resp  = send(
      &state,
      "POST",
      "/submissions",
      false,
      Some(json!({ "full_name": "Jane Doe", "email": "jane@x.com", "message": "Interested" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = json_body(resp).await;
    assert_eq!(body["status"], "new");
    assert_eq!(body["full_name"], "Jane Doe");
    assert!(body["notes"].is_null());
  }

  #[tokio::test]
  async fn submit_with_blank_field_is_rejected() {
    let state = make_state().await;
    let resp  = send(
      &state,
      "POST",
      "/submissions",
      false,
      Some(json!({ "full_name": "Jane", "email": "   ", "message": "hi" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "email is required");

    let resp = send(
      &state,
      "POST",
      "/submissions",
      false,
      Some(json!({ "email": "jane@x.com", "message": "hi" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Auth gate ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn admin_routes_require_credentials() {
    let state = make_state().await;
    let id    = submit(&state, "Jane", "jane@x.com").await;

    for (method, uri) in [
      ("GET", "/submissions".to_owned()),
      ("GET", format!("/submissions/{id}")),
      ("GET", "/stats".to_owned()),
      ("GET", "/session".to_owned()),
    ] {
      let resp = send(&state, method, &uri, false, None).await;
      assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
      assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
    }

    let resp = send(
      &state,
      "PATCH",
      &format!("/submissions/{id}/status"),
      false,
      Some(json!({ "status": "archived" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let row = state.store.get(id).await.unwrap().unwrap();
    assert_eq!(row.status, sheer_core::submission::Status::New);
  }

  #[tokio::test]
  async fn session_reports_username() {
    let state = make_state().await;
    let resp  = send(&state, "GET", "/session", true, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["username"], USER);
  }

  // ── Listing ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_filters_and_searches() {
    let state = make_state().await;
    let jane  = submit(&state, "Jane Doe", "jane@x.com").await;
    submit(&state, "Bob", "bob@y.com").await;
    submit(&state, "Janet", "janet@z.com").await;

    send(
      &state,
      "PATCH",
      &format!("/submissions/{jane}/status"),
      true,
      Some(json!({ "status": "contacted" })),
    )
    .await;

    let resp = send(&state, "GET", "/submissions", true, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let all = json_body(resp).await;
    assert_eq!(all["total_count"], 3);
    assert_eq!(all["rows"][0]["full_name"], "Janet");

    let resp = send(&state, "GET", "/submissions?status=contacted", true, None).await;
    let contacted = json_body(resp).await;
    assert_eq!(contacted["total_count"], 1);
    assert_eq!(contacted["rows"][0]["id"], jane.to_string());

    let resp = send(&state, "GET", "/submissions?search=JAN&status=new", true, None).await;
    let searched = json_body(resp).await;
    assert_eq!(searched["total_count"], 1);
    assert_eq!(searched["rows"][0]["full_name"], "Janet");
  }

  #[tokio::test]
  async fn list_pages_past_the_end_are_empty() {
    let state = make_state().await;
    for i in 0..12 {
      submit(&state, &format!("Lead {i}"), &format!("l{i}@x.com")).await;
    }

    let resp  = send(&state, "GET", "/submissions?page=1", true, None).await;
    let page1 = json_body(resp).await;
    assert_eq!(page1["rows"].as_array().unwrap().len(), 2);
    assert_eq!(page1["page"], 1);
    assert_eq!(page1["page_size"], 10);

    let resp  = send(&state, "GET", "/submissions?page=5", true, None).await;
    let beyond = json_body(resp).await;
    assert!(beyond["rows"].as_array().unwrap().is_empty());
    assert_eq!(beyond["total_count"], 12);
  }

  #[tokio::test]
  async fn unknown_status_filter_is_rejected() {
    let state = make_state().await;
    let resp  = send(&state, "GET", "/submissions?status=pending", true, None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn malformed_bodies_are_json_400s() {
    let state = make_state().await;
    let id    = submit(&state, "Jane", "jane@x.com").await;

    let resp = send(
      &state,
      "PATCH",
      &format!("/submissions/{id}/status"),
      true,
      Some(json!({ "status": "pending" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());

    let req = Request::builder()
      .method("POST")
      .uri("/submissions")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = api_router(state.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
      resp.headers().get(header::CONTENT_TYPE).unwrap(),
      "application/json"
    );
    assert!(json_body(resp).await["error"].is_string());
  }

  // ── Updates ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn status_update_returns_updated_row() {
    let state = make_state().await;
    let id    = submit(&state, "Jane", "jane@x.com").await;

    let resp = send(
      &state,
      "PATCH",
      &format!("/submissions/{id}/status"),
      true,
      Some(json!({ "status": "converted" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "converted");

    let resp = send(&state, "GET", &format!("/submissions/{id}"), true, None).await;
    assert_eq!(json_body(resp).await["status"], "converted");
  }

  #[tokio::test]
  async fn updates_to_unknown_id_return_404() {
    let state   = make_state().await;
    let missing = Uuid::new_v4();

    let resp = send(
      &state,
      "PATCH",
      &format!("/submissions/{missing}/status"),
      true,
      Some(json!({ "status": "contacted" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(
      &state,
      "PATCH",
      &format!("/submissions/{missing}/notes"),
      true,
      Some(json!({ "notes": "hello" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&state, "GET", &format!("/submissions/{missing}"), true, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn notes_save_and_blank_clears() {
    let state = make_state().await;
    let id    = submit(&state, "Jane", "jane@x.com").await;
    let uri   = format!("/submissions/{id}/notes");

    let resp = send(&state, "PATCH", &uri, true, Some(json!({ "notes": "Call back Friday" }))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["notes"], "Call back Friday");

    let resp = send(&state, "PATCH", &uri, true, Some(json!({ "notes": "  " }))).await;
    assert!(json_body(resp).await["notes"].is_null());

    send(&state, "PATCH", &uri, true, Some(json!({ "notes": "again" }))).await;
    let resp = send(&state, "PATCH", &uri, true, Some(json!({ "notes": null }))).await;
    assert!(json_body(resp).await["notes"].is_null());
  }

  #[tokio::test]
  async fn stats_count_every_status() {
    let state = make_state().await;
    let a     = submit(&state, "A", "a@x.com").await;
    submit(&state, "B", "b@x.com").await;
    send(
      &state,
      "PATCH",
      &format!("/submissions/{a}/status"),
      true,
      Some(json!({ "status": "archived" })),
    )
    .await;

    let resp  = send(&state, "GET", "/stats", true, None).await;
    let stats = json_body(resp).await;
    assert_eq!(stats, json!({ "new": 1, "contacted": 0, "converted": 0, "archived": 1 }));
  }
}
