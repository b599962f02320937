//! TUI rendering. Orchestrates all panes.

pub mod lead_detail;
pub mod lead_table;
pub mod sign_in;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use sheer_core::{dashboard::ListState, query::StatusFilter, submission::Status};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  match app.screen {
    Screen::SignIn => sign_in::draw(f, rows[1], app),
    Screen::Dashboard => draw_dashboard(f, rows[1], app),
  }
  draw_status(f, rows[2], app);
}

/// Colour used for a status everywhere it appears.
pub fn status_color(status: Status) -> Color {
  match status {
    Status::New => Color::Yellow,
    Status::Contacted => Color::Cyan,
    Status::Converted => Color::Green,
    Status::Archived => Color::DarkGray,
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let mut left = vec![Span::styled(
    " sheer leads",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  if let Some(stats) = app.dashboard.stats() {
    left.push(Span::styled(
      format!("  {} total · {} unread", stats.total(), stats.unread()),
      Style::default().fg(Color::Yellow),
    ));
  }

  let right_text = match app.username() {
    Some(user) => format!("{user}  {date} "),
    None => format!("{date} "),
  };
  let left_width: usize = left.iter().map(|s| s.content.chars().count()).sum();
  let pad = usize::from(area.width)
    .saturating_sub(left_width)
    .saturating_sub(right_text.chars().count());

  left.push(Span::raw(" ".repeat(pad)));
  left.push(Span::styled(right_text, Style::default().fg(Color::Gray)));

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(left)), inner);
}

// ─── Dashboard ────────────────────────────────────────────────────────────────

fn draw_dashboard(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Min(0)])
    .split(area);

  draw_filter_bar(f, rows[0], app);

  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
    .split(rows[1]);

  lead_table::draw(f, cols[0], app);
  lead_detail::draw(f, cols[1], app);
}

/// Status tabs on the left, search box on the right.
fn draw_filter_bar(f: &mut Frame, area: Rect, app: &App) {
  let filter = app.dashboard.filter();

  let mut spans = vec![Span::raw(" ")];
  let tabs = std::iter::once(StatusFilter::All).chain(
    [Status::New, Status::Contacted, Status::Converted, Status::Archived]
      .into_iter()
      .map(StatusFilter::Only),
  );
  for tab in tabs {
    let label = format!(" {tab} ");
    let style = if tab == filter.status {
      Style::default()
        .fg(Color::Black)
        .bg(tab.status().map_or(Color::White, status_color))
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::DarkGray)
    };
    spans.push(Span::styled(label, style));
  }

  spans.push(Span::raw("   "));
  let search = if app.searching {
    Span::styled(format!("/{}_", filter.search), Style::default().fg(Color::Yellow))
  } else if filter.search.is_empty() {
    Span::styled("/ to search", Style::default().fg(Color::DarkGray))
  } else {
    Span::styled(format!("/{}", filter.search), Style::default().fg(Color::Yellow))
  };
  spans.push(search);

  f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.screen {
    Screen::SignIn => ("SIGN IN", "Tab switch field  Enter sign in  Esc quit"),
    Screen::Dashboard if app.notes_focused() => ("NOTES", "Type to edit  Enter save  Esc discard"),
    Screen::Dashboard if app.searching => ("SEARCH", "Type to search  Enter done  Esc clear"),
    Screen::Dashboard => (
      "LEADS",
      "↑↓/jk move  ←→ page  Tab filter  / search  1-4 status  e notes  r reload  L sign out  q quit",
    ),
  };

  let status = match app.dashboard.state() {
    ListState::Failed(_) if app.screen == Screen::Dashboard => {
      "Could not load submissions. Press r to retry.".to_owned()
    }
    _ if !app.status_msg.is_empty() => app.status_msg.clone(),
    _ => hints.to_owned(),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::Gray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span])).style(Style::default().bg(Color::Black)),
    area,
  );
}
