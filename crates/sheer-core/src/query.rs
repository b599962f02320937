//! Query descriptors and pagination arithmetic for the admin view.
//!
//! A [`SubmissionQuery`] is a pure function of the view's filter and page.
//! Backends translate it into their own query language; [`SubmissionFilter::matches`]
//! is the reference semantics they must agree with.

use std::{fmt, ops::Range, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator as _;

use crate::{
  Error, Result,
  submission::{Status, Submission},
};

/// Rows per page in the admin view.
pub const PAGE_SIZE: u32 = 10;

/// Case folding shared by every search implementation.
pub fn fold_case(s: &str) -> String { s.to_lowercase() }

// ─── StatusFilter ────────────────────────────────────────────────────────────

/// Either every status or exactly one. Wire form is `"all"` or the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
  #[default]
  All,
  Only(Status),
}

impl StatusFilter {
  pub fn matches(self, status: Status) -> bool {
    match self {
      Self::All => true,
      Self::Only(s) => s == status,
    }
  }

  /// The status to restrict to, if any.
  pub fn status(self) -> Option<Status> {
    match self {
      Self::All => None,
      Self::Only(s) => Some(s),
    }
  }

  /// Cycle `all → new → contacted → converted → archived → all`.
  pub fn next(self) -> Self {
    let mut statuses = Status::iter();
    match self {
      Self::All => statuses.next().map_or(Self::All, Self::Only),
      Self::Only(current) => statuses
        .skip_while(|s| *s != current)
        .nth(1)
        .map_or(Self::All, Self::Only),
    }
  }
}

impl fmt::Display for StatusFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::All => f.write_str("all"),
      Self::Only(s) => f.write_str(s.as_str()),
    }
  }
}

impl FromStr for StatusFilter {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    if s == "all" {
      Ok(Self::All)
    } else {
      Status::parse(s).map(Self::Only)
    }
  }
}

impl TryFrom<String> for StatusFilter {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { s.parse() }
}

impl From<StatusFilter> for String {
  fn from(f: StatusFilter) -> Self { f.to_string() }
}

// ─── SubmissionFilter ────────────────────────────────────────────────────────

/// Status restriction AND free-text search over name or email.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionFilter {
  pub status: StatusFilter,
  /// Literal substring, case-insensitive. Empty means no restriction.
  pub search: String,
}

impl SubmissionFilter {
  /// The search string, or `None` when it is empty. No trimming is applied.
  pub fn search_term(&self) -> Option<&str> {
    (!self.search.is_empty()).then_some(self.search.as_str())
  }

  pub fn matches(&self, submission: &Submission) -> bool {
    if !self.status.matches(submission.status) {
      return false;
    }
    match self.search_term() {
      None => true,
      Some(term) => {
        let needle = fold_case(term);
        fold_case(&submission.full_name).contains(&needle)
          || fold_case(&submission.email).contains(&needle)
      }
    }
  }
}

// ─── SubmissionQuery ─────────────────────────────────────────────────────────

/// Parameters for [`crate::store::SubmissionStore::list`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionQuery {
  pub filter:    SubmissionFilter,
  /// Zero-indexed.
  pub page:      u32,
  pub page_size: u32,
}

impl SubmissionQuery {
  /// A query for `page` at the admin view's fixed page size.
  pub fn new(filter: SubmissionFilter, page: u32) -> Self {
    Self { filter, page, page_size: PAGE_SIZE }
  }

  pub fn offset(&self) -> u64 { u64::from(self.page) * u64::from(self.page_size) }

  pub fn limit(&self) -> u32 { self.page_size }

  /// Row positions `[page * size, (page + 1) * size)` of the filtered set.
  pub fn range(&self) -> Range<u64> {
    self.offset()..self.offset() + u64::from(self.page_size)
  }
}

// ─── SubmissionPage ──────────────────────────────────────────────────────────

/// One page of the filtered, newest-first submission set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPage {
  pub rows:        Vec<Submission>,
  /// Size of the whole filtered set, not of the table.
  pub total_count: u64,
  pub page:        u32,
  pub page_size:   u32,
}

impl SubmissionPage {
  /// An empty result for `query`.
  pub fn empty(query: &SubmissionQuery) -> Self {
    Self {
      rows:        Vec::new(),
      total_count: 0,
      page:        query.page,
      page_size:   query.page_size,
    }
  }

  pub fn page_count(&self) -> u64 {
    if self.page_size == 0 {
      return 0;
    }
    self.total_count.div_ceil(u64::from(self.page_size))
  }

  pub fn has_prev(&self) -> bool { self.page > 0 }

  pub fn has_next(&self) -> bool {
    (u64::from(self.page) + 1) * u64::from(self.page_size) < self.total_count
  }

  /// One-based `(first, last)` row numbers for "showing X to Y of Z".
  /// `(0, 0)` when the page is empty.
  pub fn showing(&self) -> (u64, u64) {
    let start = u64::from(self.page) * u64::from(self.page_size);
    if start >= self.total_count {
      return (0, 0);
    }
    let end = (start + u64::from(self.page_size)).min(self.total_count);
    (start + 1, end)
  }
}

// ─── StatusCounts ────────────────────────────────────────────────────────────

/// Number of submissions in each status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
  pub new:       u64,
  pub contacted: u64,
  pub converted: u64,
  pub archived:  u64,
}

impl StatusCounts {
  pub fn get(&self, status: Status) -> u64 {
    match status {
      Status::New => self.new,
      Status::Contacted => self.contacted,
      Status::Converted => self.converted,
      Status::Archived => self.archived,
    }
  }

  pub fn set(&mut self, status: Status, count: u64) {
    match status {
      Status::New => self.new = count,
      Status::Contacted => self.contacted = count,
      Status::Converted => self.converted = count,
      Status::Archived => self.archived = count,
    }
  }

  pub fn total(&self) -> u64 {
    self.new + self.contacted + self.converted + self.archived
  }

  /// Leads nobody has acted on yet.
  pub fn unread(&self) -> u64 { self.new }
}
