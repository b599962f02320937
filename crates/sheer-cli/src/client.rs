//! Async HTTP client wrapping the sheer JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use sheer_core::{
  query::{StatusCounts, SubmissionPage, SubmissionQuery},
  submission::{NewSubmission, Status, Submission},
};
use uuid::Uuid;

/// Admin sign-in credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Async HTTP client for the sheer JSON REST API.
///
/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client:      Client,
  base_url:    String,
  credentials: Option<Credentials>,
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

#[derive(Deserialize)]
struct SessionBody {
  username: String,
}

#[derive(Serialize)]
struct StatusBody {
  status: Status,
}

#[derive(Serialize)]
struct NotesBody<'a> {
  notes: Option<&'a str>,
}

impl ApiClient {
  pub fn new(base_url: impl Into<String>) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, base_url: base_url.into(), credentials: None })
  }

  /// A copy of this client that signs every request with `credentials`.
  pub fn with_credentials(&self, credentials: Credentials) -> Self {
    Self { credentials: Some(credentials), ..self.clone() }
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    match &self.credentials {
      Some(c) => req.basic_auth(&c.username, Some(&c.password)),
      None => req,
    }
  }

  // ── Public ────────────────────────────────────────────────────────────────

  /// `POST /api/submissions`
  pub async fn submit(&self, input: &NewSubmission) -> Result<Submission> {
    let resp = self
      .client
      .post(self.url("/submissions"))
      .json(input)
      .send()
      .await
      .context("POST /submissions failed")?;
    check(resp, "POST /submissions")
      .await?
      .json()
      .await
      .context("deserialising submission")
  }

  // ── Admin ─────────────────────────────────────────────────────────────────

  /// `GET /api/session`. Succeeds only for valid credentials.
  pub async fn session(&self) -> Result<String> {
    let resp = self
      .auth(self.client.get(self.url("/session")))
      .send()
      .await
      .context("GET /session failed")?;
    let body: SessionBody = check(resp, "GET /session")
      .await?
      .json()
      .await
      .context("deserialising session")?;
    Ok(body.username)
  }

  /// `GET /api/submissions?status=..&search=..&page=..`
  pub async fn list(&self, query: &SubmissionQuery) -> Result<SubmissionPage> {
    let mut params = vec![
      ("status", query.filter.status.to_string()),
      ("page", query.page.to_string()),
    ];
    if !query.filter.search.is_empty() {
      params.push(("search", query.filter.search.clone()));
    }

    let resp = self
      .auth(self.client.get(self.url("/submissions")))
      .query(&params)
      .send()
      .await
      .context("GET /submissions failed")?;
    check(resp, "GET /submissions")
      .await?
      .json()
      .await
      .context("deserialising submissions")
  }

  /// `PATCH /api/submissions/:id/status`
  pub async fn update_status(&self, id: Uuid, status: Status) -> Result<Submission> {
    let resp = self
      .auth(self.client.patch(self.url(&format!("/submissions/{id}/status"))))
      .json(&StatusBody { status })
      .send()
      .await
      .context("PATCH status failed")?;
    check(resp, "PATCH status")
      .await?
      .json()
      .await
      .context("deserialising submission")
  }

  /// `PATCH /api/submissions/:id/notes`. `None` clears.
  pub async fn update_notes(&self, id: Uuid, notes: Option<&str>) -> Result<Submission> {
    let resp = self
      .auth(self.client.patch(self.url(&format!("/submissions/{id}/notes"))))
      .json(&NotesBody { notes })
      .send()
      .await
      .context("PATCH notes failed")?;
    check(resp, "PATCH notes")
      .await?
      .json()
      .await
      .context("deserialising submission")
  }

  /// `GET /api/stats`
  pub async fn stats(&self) -> Result<StatusCounts> {
    let resp = self
      .auth(self.client.get(self.url("/stats")))
      .send()
      .await
      .context("GET /stats failed")?;
    check(resp, "GET /stats")
      .await?
      .json()
      .await
      .context("deserialising stats")
  }
}

/// Pass successful responses through; turn anything else into an error
/// carrying the server's `{"error": …}` message when there is one.
async fn check(resp: Response, what: &str) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let message = resp
    .json::<ErrorBody>()
    .await
    .map(|b| b.error)
    .unwrap_or_else(|_| status.to_string());
  Err(anyhow!("{what} → {status}: {message}"))
}
