//! View-session state for the admin dashboard.
//!
//! [`Dashboard`] owns the filter, page, visible rows, the set of rows with a
//! mutation in flight, and the single row being edited. It performs no I/O:
//! every method that needs the store returns a request value, and the caller
//! feeds the outcome back in.
//!
//! List and stats requests carry a sequence number. Only the response to the
//! most recently issued request is applied; anything older is dropped. The
//! counters survive [`Dashboard::reset`], so an answer issued before a reset
//! can never pass for one issued after it.
//!
//! Mutations are reflected in the rows only after the store confirms them. A
//! confirmed status change that moves a row out of the active filter removes
//! it and asks for the page again.

use std::collections::HashSet;

use uuid::Uuid;

use crate::{
  query::{StatusCounts, StatusFilter, SubmissionFilter, SubmissionPage, SubmissionQuery},
  submission::{Status, Submission},
};

// ─── Requests ────────────────────────────────────────────────────────────────

/// A list query the caller must run, tagged for stale-response discard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
  pub seq:   u64,
  pub query: SubmissionQuery,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
  pub id:     Uuid,
  pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesChange {
  pub id:    Uuid,
  /// `None` clears the notes.
  pub notes: Option<String>,
}

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState {
  /// Nothing requested yet.
  Idle,
  Loading,
  Ready,
  Failed(String),
}

/// The row currently in edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEdit {
  pub id:     Uuid,
  pub text:   String,
  /// A save for this text is awaiting the store.
  pub saving: bool,
  /// Message from the last failed save.
  pub error:  Option<String>,
}

/// Why a row could not enter edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditRefused {
  /// Another row is being edited; save or discard it first.
  OtherRowEditing(Uuid),
  /// The row is not on the current page.
  UnknownRow,
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Dashboard {
  filter:     SubmissionFilter,
  page:       u32,
  current:    SubmissionPage,
  state:      ListState,
  latest_seq: u64,
  stats_seq:  u64,
  in_flight:  HashSet<Uuid>,
  editing:    Option<NoteEdit>,
  stats:      Option<StatusCounts>,
}

impl Default for Dashboard {
  fn default() -> Self { Self::new() }
}

impl Dashboard {
  pub fn new() -> Self {
    let filter = SubmissionFilter::default();
    let current = SubmissionPage::empty(&SubmissionQuery::new(filter.clone(), 0));
    Self {
      filter,
      page: 0,
      current,
      state: ListState::Idle,
      latest_seq: 0,
      stats_seq: 0,
      in_flight: HashSet::new(),
      editing: None,
      stats: None,
    }
  }

  /// Return to the freshly constructed state, keeping the sequence counters
  /// so responses to requests issued before the reset are still dropped.
  pub fn reset(&mut self) {
    let (latest_seq, stats_seq) = (self.latest_seq, self.stats_seq);
    *self = Self { latest_seq, stats_seq, ..Self::new() };
  }

  // ── Accessors ─────────────────────────────────────────────────────────────

  pub fn filter(&self) -> &SubmissionFilter { &self.filter }

  pub fn page(&self) -> u32 { self.page }

  /// The last applied page of results.
  pub fn current(&self) -> &SubmissionPage { &self.current }

  pub fn rows(&self) -> &[Submission] { &self.current.rows }

  pub fn state(&self) -> &ListState { &self.state }

  pub fn is_loading(&self) -> bool { self.state == ListState::Loading }

  pub fn editing(&self) -> Option<&NoteEdit> { self.editing.as_ref() }

  pub fn stats(&self) -> Option<&StatusCounts> { self.stats.as_ref() }

  /// Whether a mutation for `id` is awaiting the store.
  pub fn is_updating(&self, id: Uuid) -> bool { self.in_flight.contains(&id) }

  /// The query the current filter and page describe.
  pub fn query(&self) -> SubmissionQuery {
    SubmissionQuery::new(self.filter.clone(), self.page)
  }

  // ── Listing ───────────────────────────────────────────────────────────────

  /// Issue a fresh list request for the current parameters.
  pub fn refresh(&mut self) -> ListRequest {
    self.latest_seq += 1;
    self.state = ListState::Loading;
    ListRequest { seq: self.latest_seq, query: self.query() }
  }

  /// Change the status filter. Returns to the first page.
  pub fn set_status_filter(&mut self, status: StatusFilter) -> Option<ListRequest> {
    if self.filter.status == status {
      return None;
    }
    self.filter.status = status;
    self.page = 0;
    Some(self.refresh())
  }

  /// Change the search text. Returns to the first page.
  pub fn set_search(&mut self, search: impl Into<String>) -> Option<ListRequest> {
    let search = search.into();
    if self.filter.search == search {
      return None;
    }
    self.filter.search = search;
    self.page = 0;
    Some(self.refresh())
  }

  pub fn set_page(&mut self, page: u32) -> Option<ListRequest> {
    if self.page == page {
      return None;
    }
    self.page = page;
    Some(self.refresh())
  }

  /// Advance one page if the last known count says there is one.
  pub fn next_page(&mut self) -> Option<ListRequest> {
    let page_size = u64::from(self.query().page_size);
    let has_next = (u64::from(self.page) + 1) * page_size < self.current.total_count;
    if has_next { self.set_page(self.page + 1) } else { None }
  }

  pub fn prev_page(&mut self) -> Option<ListRequest> {
    if self.page == 0 { None } else { self.set_page(self.page - 1) }
  }

  /// Apply the outcome of list request `seq`. Returns `false` when the
  /// response is stale and was dropped.
  ///
  /// A failure clears the rows rather than leaving an outdated page visible.
  pub fn apply_list<E: std::fmt::Display>(
    &mut self,
    seq: u64,
    outcome: Result<SubmissionPage, E>,
  ) -> bool {
    if seq != self.latest_seq {
      return false;
    }
    match outcome {
      Ok(page) => {
        self.current = page;
        self.state = ListState::Ready;
      }
      Err(e) => {
        self.current = SubmissionPage::empty(&self.query());
        self.state = ListState::Failed(e.to_string());
      }
    }
    true
  }

  /// Issue a stats request. Returns its sequence number.
  pub fn request_stats(&mut self) -> u64 {
    self.stats_seq += 1;
    self.stats_seq
  }

  /// Apply the counts for stats request `seq`. Returns `false` when a newer
  /// request has been issued since and the counts were dropped.
  pub fn apply_stats(&mut self, seq: u64, stats: StatusCounts) -> bool {
    if seq != self.stats_seq {
      return false;
    }
    self.stats = Some(stats);
    true
  }

  // ── Status ────────────────────────────────────────────────────────────────

  /// Start a status change for a visible row. Refused while another mutation
  /// of the same row is pending; other rows are unaffected.
  pub fn begin_status_change(&mut self, id: Uuid, status: Status) -> Option<StatusChange> {
    if self.in_flight.contains(&id) || self.row(id).is_none() {
      return None;
    }
    self.in_flight.insert(id);
    Some(StatusChange { id, status })
  }

  /// Record the store's answer to a [`StatusChange`]. On success the row is
  /// replaced in place by the confirmed copy; on failure nothing changes.
  ///
  /// When the confirmed row no longer matches the filter it is removed, and
  /// the returned request reloads the page so it fills back up.
  pub fn finish_status_change<E>(
    &mut self,
    id: Uuid,
    outcome: Result<Submission, E>,
  ) -> Option<ListRequest> {
    self.in_flight.remove(&id);
    let updated = outcome.ok()?;
    if self.filter.matches(&updated) {
      self.replace_row(updated);
      return None;
    }
    let before = self.current.rows.len();
    self.current.rows.retain(|s| s.id != id);
    if self.current.rows.len() == before {
      return None;
    }
    if self.editing.as_ref().is_some_and(|e| e.id == id && !e.saving) {
      self.editing = None;
    }
    self.current.total_count = self.current.total_count.saturating_sub(1);
    if self.current.rows.is_empty() && self.page > 0 {
      self.page -= 1;
    }
    Some(self.refresh())
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  /// Enter edit mode for `id`, seeded with its current notes.
  pub fn begin_edit(&mut self, id: Uuid) -> Result<(), EditRefused> {
    if let Some(edit) = &self.editing {
      return if edit.id == id { Ok(()) } else { Err(EditRefused::OtherRowEditing(edit.id)) };
    }
    let text = self.row(id).ok_or(EditRefused::UnknownRow)?.notes.clone().unwrap_or_default();
    self.editing = Some(NoteEdit {
      id,
      text,
      saving: false,
      error: None,
    });
    Ok(())
  }

  /// Mutable access to the draft text, unless a save is pending.
  pub fn edit_text_mut(&mut self) -> Option<&mut String> {
    self.editing.as_mut().filter(|e| !e.saving).map(|e| &mut e.text)
  }

  /// Leave edit mode without saving. Refused while a save is pending.
  pub fn discard_edit(&mut self) -> bool {
    match &self.editing {
      Some(edit) if !edit.saving => {
        self.editing = None;
        true
      }
      _ => false,
    }
  }

  /// Start saving the draft. Blank text clears the notes.
  pub fn begin_save(&mut self) -> Option<NotesChange> {
    let edit = self.editing.as_mut()?;
    if edit.saving || self.in_flight.contains(&edit.id) {
      return None;
    }
    edit.saving = true;
    self.in_flight.insert(edit.id);
    let notes = (!edit.text.trim().is_empty()).then(|| edit.text.clone());
    Some(NotesChange { id: edit.id, notes })
  }

  /// Record the store's answer to a [`NotesChange`]. Success leaves edit
  /// mode and reconciles the row; failure stays in edit mode with the draft
  /// untouched.
  pub fn finish_save<E: std::fmt::Display>(
    &mut self,
    id: Uuid,
    outcome: Result<Submission, E>,
  ) {
    self.in_flight.remove(&id);
    match outcome {
      Ok(updated) => {
        if self.editing.as_ref().is_some_and(|e| e.id == id) {
          self.editing = None;
        }
        self.replace_row(updated);
      }
      Err(e) => {
        if let Some(edit) = self.editing.as_mut().filter(|e| e.id == id) {
          edit.saving = false;
          edit.error = Some(e.to_string());
        }
      }
    }
  }

  // ── Helpers ───────────────────────────────────────────────────────────────

  fn row(&self, id: Uuid) -> Option<&Submission> {
    self.current.rows.iter().find(|s| s.id == id)
  }

  fn replace_row(&mut self, updated: Submission) {
    if let Some(row) = self.current.rows.iter_mut().find(|s| s.id == updated.id) {
      *row = updated;
    }
  }
}
