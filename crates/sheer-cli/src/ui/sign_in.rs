//! Sign-in screen: a centred credentials box.

use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, SignInField};

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let [row] = Layout::vertical([Constraint::Length(9)]).flex(Flex::Center).areas(area);
  let [boxed] = Layout::horizontal([Constraint::Length(48)]).flex(Flex::Center).areas(row);

  let block = Block::default()
    .title(" Admin sign-in ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(boxed);
  f.render_widget(block, boxed);

  let form = &app.sign_in;
  let masked = "•".repeat(form.password.chars().count());

  let mut lines = vec![
    Line::from(""),
    field_line("Username", &form.username, form.field == SignInField::Username),
    field_line("Password", &masked, form.field == SignInField::Password),
    Line::from(""),
  ];

  if form.pending {
    lines.push(Line::from(Span::styled("  Signing in…", Style::default().fg(Color::DarkGray))));
  } else if let Some(err) = &form.error {
    lines.push(Line::from(Span::styled(format!("  {err}"), Style::default().fg(Color::Red))));
  }

  f.render_widget(Paragraph::new(lines), inner);
}

fn field_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
  let label_style = if focused {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let cursor = if focused { "_" } else { "" };
  Line::from(vec![
    Span::styled(format!("  {label:<10}"), label_style),
    Span::raw(format!("{value}{cursor}")),
  ])
}
