//! Lead detail pane (right panel) with the message and notes.

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use super::status_color;
use crate::app::App;

// ─── Public entry ─────────────────────────────────────────────────────────────

/// Render the detail pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(lead) = app.cursor_row() else {
    let block = Block::default()
      .title(" Detail ")
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
      Paragraph::new("Select a lead.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let panes = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(6), Constraint::Length(8)])
    .split(area);

  // ── Message ────────────────────────────────────────────────────────────────

  let block = Block::default()
    .title(format!(" {} ", lead.full_name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let received = lead.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M");
  let label = Style::default().fg(Color::DarkGray);

  let mut lines = vec![
    Line::from(vec![Span::styled("Email     ", label), Span::raw(lead.email.as_str())]),
    Line::from(vec![Span::styled("Received  ", label), Span::raw(received.to_string())]),
    Line::from(vec![
      Span::styled("Status    ", label),
      Span::styled(lead.status.to_string(), Style::default().fg(status_color(lead.status))),
    ]),
    Line::from(""),
  ];
  lines.extend(lead.message.lines().map(|l| Line::from(l.to_owned())));

  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
    panes[0],
  );

  // ── Notes ──────────────────────────────────────────────────────────────────

  let edit = app.dashboard.editing().filter(|e| e.id == lead.id);

  let (title, border) = match edit {
    Some(e) if e.saving => (" Notes · saving… ", Color::DarkGray),
    Some(_) => (" Notes · editing ", Color::Yellow),
    None => (" Notes ", Color::DarkGray),
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border));

  let mut lines: Vec<Line> = Vec::new();
  match edit {
    Some(e) => {
      let cursor = if e.saving { "" } else { "_" };
      lines.push(Line::from(format!("{}{cursor}", e.text)));
      if let Some(err) = &e.error {
        lines.push(Line::from(Span::styled(
          format!("Save failed: {err}"),
          Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )));
      }
    }
    None => match &lead.notes {
      Some(notes) => lines.extend(notes.lines().map(|l| Line::from(l.to_owned()))),
      None => lines.push(Line::from(Span::styled(
        "No notes. Press e to add.",
        Style::default().fg(Color::DarkGray),
      ))),
    },
  }

  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
    panes[1],
  );
}
