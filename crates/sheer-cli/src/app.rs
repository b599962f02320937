//! Application state machine and event dispatcher.
//!
//! Store calls never run on the event loop. Each one is spawned as a task
//! that reports back with a [`Msg`]; the loop feeds those into
//! [`App::apply`] between key presses.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sheer_core::{
  dashboard::{Dashboard, EditRefused, ListRequest, ListState, NotesChange, StatusChange},
  query::{StatusCounts, SubmissionPage},
  submission::{Status, Submission},
};
use tokio::sync::{mpsc, watch};
use uuid::Uuid;

use crate::{
  client::Credentials,
  session::{Session, SessionGate},
};

// ─── Messages ─────────────────────────────────────────────────────────────────

/// Completion of a spawned API call.
pub enum Msg {
  SignedIn(anyhow::Result<String>),
  Listed { seq: u64, result: anyhow::Result<SubmissionPage> },
  Stats { seq: u64, result: anyhow::Result<StatusCounts> },
  StatusChanged { id: Uuid, result: anyhow::Result<Submission> },
  NotesSaved { id: Uuid, result: anyhow::Result<Submission> },
}

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  SignIn,
  Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignInField {
  #[default]
  Username,
  Password,
}

/// The sign-in screen's form.
#[derive(Debug, Default)]
pub struct SignInForm {
  pub username: String,
  pub password: String,
  pub field:    SignInField,
  /// A credential check is awaiting the server.
  pub pending:  bool,
  pub error:    Option<String>,
}

impl SignInForm {
  fn focused_mut(&mut self) -> &mut String {
    match self.field {
      SignInField::Username => &mut self.username,
      SignInField::Password => &mut self.password,
    }
  }

  fn toggle_field(&mut self) {
    self.field = match self.field {
      SignInField::Username => SignInField::Password,
      SignInField::Password => SignInField::Username,
    };
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen:     Screen,
  pub sign_in:    SignInForm,
  pub dashboard:  Dashboard,
  /// Cursor position within the visible page.
  pub cursor:     usize,
  /// Whether keystrokes go to the search box.
  pub searching:  bool,
  /// One-line status message shown in the status bar.
  pub status_msg: String,

  gate:          SessionGate,
  session_rx:    watch::Receiver<Option<Session>>,
  authenticated: bool,
  tx:            mpsc::UnboundedSender<Msg>,
}

impl App {
  pub fn new(gate: SessionGate, tx: mpsc::UnboundedSender<Msg>) -> Self {
    let session_rx = gate.subscribe();
    Self {
      screen: Screen::SignIn,
      sign_in: SignInForm::default(),
      dashboard: Dashboard::new(),
      cursor: 0,
      searching: false,
      status_msg: String::new(),
      gate,
      session_rx,
      authenticated: false,
      tx,
    }
  }

  /// Prefill the sign-in form and, when both fields are present, start
  /// signing in straight away.
  pub fn prefill(&mut self, username: String, password: String) {
    let ready = !username.is_empty() && !password.is_empty();
    self.sign_in.username = username;
    self.sign_in.password = password;
    if ready {
      self.submit_sign_in();
    }
  }

  pub fn is_authenticated(&self) -> bool { self.authenticated }

  /// Name of the signed-in admin.
  pub fn username(&self) -> Option<String> { self.gate.current().map(|s| s.username) }

  /// The row under the cursor, if any.
  pub fn cursor_row(&self) -> Option<&Submission> { self.dashboard.rows().get(self.cursor) }

  /// Whether keystrokes go to the notes editor.
  pub fn notes_focused(&self) -> bool {
    self.dashboard.editing().is_some_and(|e| !e.saving)
  }

  // ── Session ───────────────────────────────────────────────────────────────

  /// Pick up session changes published on the gate. Returns `true` when the
  /// screen switched.
  pub fn sync_session(&mut self) -> bool {
    if !self.session_rx.has_changed().unwrap_or(false) {
      return false;
    }
    let authenticated = self.session_rx.borrow_and_update().is_some();
    if authenticated == self.authenticated {
      return false;
    }
    self.authenticated = authenticated;

    self.dashboard.reset();
    self.cursor = 0;
    self.searching = false;
    if authenticated {
      self.screen = Screen::Dashboard;
      self.sign_in.password.clear();
      self.status_msg.clear();
      let req = self.dashboard.refresh();
      self.spawn_list(req);
    } else {
      self.screen = Screen::SignIn;
      self.sign_in.pending = false;
      self.status_msg = "Signed out.".into();
    }
    true
  }

  fn submit_sign_in(&mut self) {
    if self.sign_in.pending {
      return;
    }
    let credentials = Credentials {
      username: self.sign_in.username.trim().to_owned(),
      password: self.sign_in.password.clone(),
    };
    if credentials.username.is_empty() || credentials.password.is_empty() {
      self.sign_in.error = Some("Enter a username and password.".into());
      return;
    }
    self.sign_in.pending = true;
    self.sign_in.error = None;

    let gate = self.gate.clone();
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = gate.sign_in(credentials).await;
      let _ = tx.send(Msg::SignedIn(result));
    });
  }

  // ── Spawned calls ─────────────────────────────────────────────────────────

  fn spawn_list(&self, req: ListRequest) {
    let Some(session) = self.gate.current() else { return };
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = session.client.list(&req.query).await;
      let _ = tx.send(Msg::Listed { seq: req.seq, result });
    });
  }

  fn spawn_stats(&mut self) {
    let Some(session) = self.gate.current() else { return };
    let seq = self.dashboard.request_stats();
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = session.client.stats().await;
      let _ = tx.send(Msg::Stats { seq, result });
    });
  }

  fn spawn_status(&self, change: StatusChange) {
    let Some(session) = self.gate.current() else { return };
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = session.client.update_status(change.id, change.status).await;
      let _ = tx.send(Msg::StatusChanged { id: change.id, result });
    });
  }

  fn spawn_notes(&self, change: NotesChange) {
    let Some(session) = self.gate.current() else { return };
    let tx = self.tx.clone();
    tokio::spawn(async move {
      let result = session.client.update_notes(change.id, change.notes.as_deref()).await;
      let _ = tx.send(Msg::NotesSaved { id: change.id, result });
    });
  }

  fn issue(&mut self, req: Option<ListRequest>) {
    if let Some(req) = req {
      self.cursor = 0;
      self.spawn_list(req);
    }
  }

  // ── Results ───────────────────────────────────────────────────────────────

  /// Fold the result of a spawned call into the state.
  pub fn apply(&mut self, msg: Msg) {
    match msg {
      Msg::SignedIn(result) => {
        self.sign_in.pending = false;
        if let Err(e) = result {
          tracing::warn!(error = %e, "sign-in failed");
          self.sign_in.error = Some("Sign-in failed. Check your credentials.".into());
        }
      }
      Msg::Listed { seq, result } => {
        if let Err(e) = &result {
          tracing::error!(error = %e, seq, "list query failed");
        }
        if !self.dashboard.apply_list(seq, result) {
          tracing::debug!(seq, "dropped stale list response");
          return;
        }
        self.cursor = self.cursor.min(self.dashboard.rows().len().saturating_sub(1));
        if *self.dashboard.state() == ListState::Ready {
          self.spawn_stats();
        }
      }
      Msg::Stats { seq, result } => match result {
        Ok(stats) => {
          if !self.dashboard.apply_stats(seq, stats) {
            tracing::debug!(seq, "dropped stale stats response");
          }
        }
        Err(e) => tracing::error!(error = %e, seq, "stats query failed"),
      },
      Msg::StatusChanged { id, result } => {
        match &result {
          Ok(row) => {
            self.status_msg = format!("{} marked {}.", row.full_name, row.status);
            self.spawn_stats();
          }
          Err(e) => {
            tracing::error!(error = %e, %id, "status update failed");
            self.status_msg = "Status update failed.".into();
          }
        }
        if let Some(req) = self.dashboard.finish_status_change(id, result) {
          // The row left the active filter; reload so the page fills back up.
          self.cursor = self.cursor.min(self.dashboard.rows().len().saturating_sub(1));
          self.spawn_list(req);
        }
      }
      Msg::NotesSaved { id, result } => {
        match &result {
          Ok(_) => self.status_msg = "Notes saved.".into(),
          Err(e) => {
            tracing::error!(error = %e, %id, "notes update failed");
            self.status_msg = "Saving notes failed.".into();
          }
        }
        self.dashboard.finish_save(id, result);
      }
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    match self.screen {
      Screen::SignIn => self.handle_sign_in_key(key),
      Screen::Dashboard if self.notes_focused() => {
        self.handle_notes_key(key);
        true
      }
      Screen::Dashboard if self.searching => {
        self.handle_search_key(key);
        true
      }
      Screen::Dashboard => self.handle_table_key(key),
    }
  }

  fn handle_sign_in_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => return false,
      KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
        self.sign_in.toggle_field();
      }
      KeyCode::Enter => match self.sign_in.field {
        SignInField::Username => self.sign_in.field = SignInField::Password,
        SignInField::Password => self.submit_sign_in(),
      },
      KeyCode::Backspace => {
        self.sign_in.focused_mut().pop();
      }
      KeyCode::Char(c) => self.sign_in.focused_mut().push(c),
      _ => {}
    }
    true
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    let mut search = self.dashboard.filter().search.clone();
    match key.code {
      KeyCode::Enter => {
        self.searching = false;
        return;
      }
      KeyCode::Esc => {
        self.searching = false;
        search.clear();
      }
      KeyCode::Backspace => {
        search.pop();
      }
      KeyCode::Char(c) => search.push(c),
      _ => return,
    }
    // Every keystroke re-queries; older in-flight answers are discarded.
    let req = self.dashboard.set_search(search);
    self.issue(req);
  }

  fn handle_notes_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.dashboard.discard_edit();
        self.status_msg.clear();
      }
      KeyCode::Enter => {
        if let Some(change) = self.dashboard.begin_save() {
          self.status_msg = "Saving notes…".into();
          self.spawn_notes(change);
        }
      }
      KeyCode::Backspace => {
        if let Some(text) = self.dashboard.edit_text_mut() {
          text.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(text) = self.dashboard.edit_text_mut() {
          text.push(c);
        }
      }
      _ => {}
    }
  }

  fn handle_table_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.dashboard.rows().len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }
      KeyCode::Right | KeyCode::Char('n') => {
        let req = self.dashboard.next_page();
        self.issue(req);
      }
      KeyCode::Left | KeyCode::Char('p') => {
        let req = self.dashboard.prev_page();
        self.issue(req);
      }

      // Filtering
      KeyCode::Tab | KeyCode::Char('f') => {
        let next = self.dashboard.filter().status.next();
        let req = self.dashboard.set_status_filter(next);
        self.issue(req);
      }
      KeyCode::Char('/') => self.searching = true,
      KeyCode::Char('r') => {
        let req = self.dashboard.refresh();
        self.spawn_list(req);
      }

      // Mutations
      KeyCode::Char(c @ '1'..='4') => {
        let status = match c {
          '1' => Status::New,
          '2' => Status::Contacted,
          '3' => Status::Converted,
          _ => Status::Archived,
        };
        self.change_status(status);
      }
      KeyCode::Char('e') | KeyCode::Enter => self.edit_notes(),

      KeyCode::Char('L') => self.gate.sign_out(),

      _ => {}
    }
    true
  }

  fn change_status(&mut self, status: Status) {
    let Some(row) = self.cursor_row() else { return };
    let id = row.id;
    if row.status == status {
      return;
    }
    match self.dashboard.begin_status_change(id, status) {
      Some(change) => self.spawn_status(change),
      None => self.status_msg = "That lead is still being updated.".into(),
    }
  }

  fn edit_notes(&mut self) {
    let Some(id) = self.cursor_row().map(|r| r.id) else { return };
    match self.dashboard.begin_edit(id) {
      Ok(()) => self.status_msg.clear(),
      Err(EditRefused::OtherRowEditing(other)) => {
        let name = self
          .dashboard
          .rows()
          .iter()
          .find(|r| r.id == other)
          .map_or("another lead", |r| r.full_name.as_str());
        self.status_msg = format!("Finish editing notes for {name} first.");
      }
      Err(EditRefused::UnknownRow) => {}
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use crossterm::event::{KeyEventKind, KeyEventState};
  use sheer_core::query::{StatusFilter, SubmissionFilter, SubmissionQuery};

  use super::*;
  use crate::client::ApiClient;

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
      code,
      modifiers: KeyModifiers::NONE,
      kind: KeyEventKind::Press,
      state: KeyEventState::NONE,
    }
  }

  fn typed(app: &mut App, text: &str) {
    for c in text.chars() {
      app.handle_key(key(KeyCode::Char(c)));
    }
  }

  fn row(name: &str) -> Submission {
    Submission {
      id:         Uuid::new_v4(),
      created_at: Utc::now(),
      full_name:  name.into(),
      email:      format!("{}@x.com", name.to_lowercase()),
      message:    "hello".into(),
      status:     Status::New,
      notes:      None,
    }
  }

  fn page_of(rows: Vec<Submission>) -> SubmissionPage {
    let total_count = rows.len() as u64;
    SubmissionPage { rows, total_count, page: 0, page_size: 10 }
  }

  /// An app signed in against an address nothing listens on; spawned calls
  /// fail in the background and their messages are never read.
  fn signed_in() -> (App, mpsc::UnboundedReceiver<Msg>) {
    let anon = ApiClient::new("http://127.0.0.1:9").unwrap();
    let gate = SessionGate::new(anon.clone());
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(gate.clone(), tx);
    gate.publish(Some(Session { username: "admin".into(), client: anon }));
    assert!(app.sync_session());
    (app, rx)
  }

  fn loaded(names: &[&str]) -> (App, mpsc::UnboundedReceiver<Msg>) {
    let (mut app, rx) = signed_in();
    let rows = names.iter().map(|n| row(n)).collect();
    app.apply(Msg::Listed { seq: 1, result: Ok(page_of(rows)) });
    (app, rx)
  }

  #[tokio::test]
  async fn signing_in_switches_to_dashboard_and_loads() {
    let (app, _rx) = signed_in();
    assert_eq!(app.screen, Screen::Dashboard);
    assert!(app.is_authenticated());
    assert!(app.dashboard.is_loading());
  }

  #[tokio::test]
  async fn sign_out_returns_to_sign_in() {
    let (mut app, _rx) = loaded(&["Jane"]);
    app.handle_key(key(KeyCode::Char('L')));
    assert!(app.sync_session());
    assert_eq!(app.screen, Screen::SignIn);
    assert!(app.dashboard.rows().is_empty());
  }

  #[tokio::test]
  async fn sign_in_requires_both_fields() {
    let anon = ApiClient::new("http://127.0.0.1:9").unwrap();
    let (tx, _rx) = mpsc::unbounded_channel();
    let mut app = App::new(SessionGate::new(anon), tx);

    typed(&mut app, "admin");
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(app.sign_in.field, SignInField::Password);
    app.handle_key(key(KeyCode::Enter));
    assert!(!app.sign_in.pending);
    assert!(app.sign_in.error.is_some());
    assert_eq!(app.sign_in.username, "admin");
  }

  #[tokio::test]
  async fn typing_a_search_discards_earlier_answers() {
    let (mut app, _rx) = loaded(&["Jane", "Bob"]);
    app.handle_key(key(KeyCode::Char('/')));
    typed(&mut app, "ja");
    assert_eq!(app.dashboard.filter().search, "ja");

    // Answer for "j" (seq 2) arrives after "ja" (seq 3) was issued.
    app.apply(Msg::Listed { seq: 2, result: Ok(page_of(vec![row("Jo"), row("Jay")])) });
    assert_eq!(app.dashboard.rows()[0].full_name, "Jane");
    assert!(app.dashboard.is_loading());

    app.apply(Msg::Listed { seq: 3, result: Ok(page_of(vec![row("Jane")])) });
    assert_eq!(app.dashboard.rows()[0].full_name, "Jane");
    assert!(!app.dashboard.is_loading());
  }

  #[tokio::test]
  async fn answers_from_before_sign_out_are_discarded() {
    let (mut app, _rx) = signed_in();
    app.handle_key(key(KeyCode::Char('/')));
    typed(&mut app, "old");
    app.handle_key(key(KeyCode::Enter));
    let stale_seq = 4;

    app.handle_key(key(KeyCode::Char('L')));
    assert!(app.sync_session());
    app.gate.publish(Some(Session {
      username: "admin".into(),
      client:   ApiClient::new("http://127.0.0.1:9").unwrap(),
    }));
    assert!(app.sync_session());
    assert_eq!(app.dashboard.filter().search, "");

    // The old session's last search answers after the new session's first load.
    app.apply(Msg::Listed { seq: stale_seq, result: Ok(page_of(vec![row("Stale")])) });
    assert!(app.dashboard.rows().is_empty());
    assert!(app.dashboard.is_loading());

    app.apply(Msg::Listed { seq: stale_seq + 1, result: Ok(page_of(vec![row("Fresh")])) });
    assert_eq!(app.dashboard.rows()[0].full_name, "Fresh");
  }

  #[tokio::test]
  async fn older_stats_answer_is_dropped() {
    let (mut app, _rx) = loaded(&["Jane"]);
    // Loading the page issued stats request 1; a status change issues 2.
    let jane = app.dashboard.rows()[0].clone();
    app.handle_key(key(KeyCode::Char('2')));
    let confirmed = Submission { status: Status::Contacted, ..jane.clone() };
    app.apply(Msg::StatusChanged { id: jane.id, result: Ok(confirmed) });

    let fresh = StatusCounts { contacted: 1, ..StatusCounts::default() };
    app.apply(Msg::Stats { seq: 2, result: Ok(fresh) });
    app.apply(Msg::Stats { seq: 1, result: Ok(StatusCounts { new: 1, ..StatusCounts::default() }) });
    assert_eq!(app.dashboard.stats(), Some(&fresh));
  }

  #[tokio::test]
  async fn status_change_out_of_filter_reloads_page() {
    let (mut app, _rx) = signed_in();
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.dashboard.filter().status, StatusFilter::Only(Status::New));
    app.apply(Msg::Listed { seq: 2, result: Ok(page_of(vec![row("Jane"), row("Bob")])) });

    app.handle_key(key(KeyCode::Char('j')));
    let bob = app.dashboard.rows()[1].clone();
    app.handle_key(key(KeyCode::Char('3')));
    let confirmed = Submission { status: Status::Converted, ..bob.clone() };
    app.apply(Msg::StatusChanged { id: bob.id, result: Ok(confirmed) });

    assert_eq!(app.dashboard.rows().len(), 1);
    assert_eq!(app.cursor, 0);
    assert!(app.dashboard.is_loading());
  }

  #[tokio::test]
  async fn cycling_status_filter_resets_page() {
    let (mut app, _rx) = signed_in();
    let rows: Vec<_> = (0..10).map(|i| row(&format!("Lead{i}"))).collect();
    let page = SubmissionPage { total_count: 25, ..page_of(rows) };
    app.apply(Msg::Listed { seq: 1, result: Ok(page) });

    app.handle_key(key(KeyCode::Char('n')));
    assert_eq!(app.dashboard.page(), 1);

    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.dashboard.page(), 0);
    assert_eq!(app.dashboard.filter().status, StatusFilter::Only(Status::New));
    assert_eq!(
      app.dashboard.query(),
      SubmissionQuery::new(
        SubmissionFilter { status: StatusFilter::Only(Status::New), search: String::new() },
        0,
      )
    );
  }

  #[tokio::test]
  async fn list_failure_clears_rows() {
    let (mut app, _rx) = loaded(&["Jane"]);
    app.handle_key(key(KeyCode::Char('r')));
    app.apply(Msg::Listed { seq: 2, result: Err(anyhow::anyhow!("boom")) });
    assert!(app.dashboard.rows().is_empty());
    assert!(matches!(app.dashboard.state(), ListState::Failed(_)));
  }

  #[tokio::test]
  async fn status_change_waits_for_confirmation() {
    let (mut app, _rx) = loaded(&["Jane", "Bob"]);
    let jane = app.dashboard.rows()[0].clone();

    app.handle_key(key(KeyCode::Char('2')));
    assert!(app.dashboard.is_updating(jane.id));
    assert_eq!(app.dashboard.rows()[0].status, Status::New);

    // A second change of the same row is refused while pending.
    app.handle_key(key(KeyCode::Char('3')));
    assert!(app.status_msg.contains("still being updated"));

    let confirmed = Submission { status: Status::Contacted, ..jane.clone() };
    app.apply(Msg::StatusChanged { id: jane.id, result: Ok(confirmed) });
    assert!(!app.dashboard.is_updating(jane.id));
    assert_eq!(app.dashboard.rows()[0].status, Status::Contacted);
  }

  #[tokio::test]
  async fn failed_status_change_leaves_row_untouched() {
    let (mut app, _rx) = loaded(&["Jane"]);
    let id = app.dashboard.rows()[0].id;

    app.handle_key(key(KeyCode::Char('4')));
    app.apply(Msg::StatusChanged { id, result: Err(anyhow::anyhow!("offline")) });
    assert_eq!(app.dashboard.rows()[0].status, Status::New);
    assert!(!app.dashboard.is_updating(id));
  }

  #[tokio::test]
  async fn failed_note_save_keeps_draft() {
    let (mut app, _rx) = loaded(&["Jane"]);
    let id = app.dashboard.rows()[0].id;

    app.handle_key(key(KeyCode::Char('e')));
    assert!(app.notes_focused());
    typed(&mut app, "call back");
    app.handle_key(key(KeyCode::Enter));
    assert!(!app.notes_focused());

    app.apply(Msg::NotesSaved { id, result: Err(anyhow::anyhow!("offline")) });
    let edit = app.dashboard.editing().unwrap();
    assert_eq!(edit.text, "call back");
    assert!(edit.error.is_some());
    assert!(app.notes_focused());
  }

  #[tokio::test]
  async fn second_row_cannot_enter_edit_while_first_is_saving() {
    let (mut app, _rx) = loaded(&["Jane", "Bob"]);
    let jane = app.dashboard.rows()[0].id;

    app.handle_key(key(KeyCode::Char('e')));
    typed(&mut app, "x");
    app.handle_key(key(KeyCode::Enter));

    // Table keys work again while the save is pending.
    app.handle_key(key(KeyCode::Char('j')));
    app.handle_key(key(KeyCode::Char('e')));
    assert_eq!(app.dashboard.editing().map(|e| e.id), Some(jane));
    assert!(app.status_msg.contains("Jane"));
  }

  #[tokio::test]
  async fn escape_discards_edit() {
    let (mut app, _rx) = loaded(&["Jane"]);
    app.handle_key(key(KeyCode::Char('e')));
    typed(&mut app, "draft");
    app.handle_key(key(KeyCode::Esc));
    assert!(app.dashboard.editing().is_none());
    assert!(app.dashboard.rows()[0].notes.is_none());
  }
}
