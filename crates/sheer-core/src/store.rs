//! The `SubmissionStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `sheer-store-sqlite`).
//! Higher layers (`sheer-api`, `sheer-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  query::{StatusCounts, SubmissionPage, SubmissionQuery},
  submission::{NewSubmission, Status, Submission},
};

/// Abstraction over the `contact_submissions` table.
///
/// There is no delete. Each write touches exactly one row and is atomic.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait SubmissionStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new submission. The store assigns `id` and `created_at`;
  /// `status` is always [`Status::New`] and `notes` absent.
  fn insert(
    &self,
    input: NewSubmission,
  ) -> impl Future<Output = Result<Submission, Self::Error>> + Send + '_;

  /// Retrieve a submission by id. Returns `None` if not found.
  fn get(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Submission>, Self::Error>> + Send + '_;

  /// One page of the filtered set, newest first, with the filtered count.
  fn list<'a>(
    &'a self,
    query: &'a SubmissionQuery,
  ) -> impl Future<Output = Result<SubmissionPage, Self::Error>> + Send + 'a;

  /// Set the status of one submission. Returns `None` if `id` is unknown.
  fn update_status(
    &self,
    id: Uuid,
    status: Status,
  ) -> impl Future<Output = Result<Option<Submission>, Self::Error>> + Send + '_;

  /// Replace the notes of one submission; `None` clears them. Returns `None`
  /// if `id` is unknown.
  fn update_notes(
    &self,
    id: Uuid,
    notes: Option<String>,
  ) -> impl Future<Output = Result<Option<Submission>, Self::Error>> + Send + '_;

  /// Number of submissions per status across the whole table.
  fn status_counts(
    &self,
  ) -> impl Future<Output = Result<StatusCounts, Self::Error>> + Send + '_;
}
