//! Lead table (left panel): one page of submissions, newest first.

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};
use sheer_core::dashboard::ListState;

use super::status_color;
use crate::app::App;

/// Render the lead table into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let page = app.dashboard.current();
  let (from, to) = page.showing();
  let title = format!(
    " Leads · showing {from} to {to} of {} · page {}/{} ",
    page.total_count,
    page.page + 1,
    page.page_count().max(1),
  );

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let placeholder = match app.dashboard.state() {
    ListState::Loading if page.rows.is_empty() => Some(("Loading…", Color::DarkGray)),
    ListState::Failed(_) => Some(("Could not load submissions.", Color::Red)),
    ListState::Ready if page.rows.is_empty() => Some(("No submissions found.", Color::DarkGray)),
    _ => None,
  };
  if let Some((text, color)) = placeholder {
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(text, Style::default().fg(color)))),
      inner,
    );
    return;
  }

  let header = Row::new(["Date", "Name", "Email", "Status"])
    .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));

  let rows: Vec<Row> = page
    .rows
    .iter()
    .map(|lead| {
      let date = lead.created_at.with_timezone(&Local).format("%b %d %H:%M").to_string();
      let status = if app.dashboard.is_updating(lead.id) {
        Cell::from(Span::styled("updating…", Style::default().fg(Color::DarkGray)))
      } else {
        Cell::from(Span::styled(
          lead.status.to_string(),
          Style::default().fg(status_color(lead.status)),
        ))
      };
      let name = if lead.notes.is_some() {
        format!("{} ✎", lead.full_name)
      } else {
        lead.full_name.clone()
      };
      Row::new(vec![
        Cell::from(date),
        Cell::from(name),
        Cell::from(lead.email.clone()),
        status,
      ])
    })
    .collect();

  let widths = [
    Constraint::Length(13),
    Constraint::Percentage(35),
    Constraint::Percentage(40),
    Constraint::Length(10),
  ];

  let mut state = TableState::default();
  state.select(Some(app.cursor));

  f.render_stateful_widget(
    Table::new(rows, widths)
      .header(header)
      .row_highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      ),
    inner,
    &mut state,
  );
}
