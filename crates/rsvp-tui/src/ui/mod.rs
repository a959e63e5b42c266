//! TUI rendering — orchestrates all panes.

pub mod cards;
pub mod tiles;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use rsvp_core::{admin::View, store::SubmissionStore};

use crate::app::App;

/// Card columns for a terminal `width` cells wide.
pub fn columns_for(width: u16) -> usize {
  match width {
    0..80 => 1,
    80..120 => 2,
    _ => 3,
  }
}

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S: SubmissionStore>(f: &mut Frame, app: &App<S>) {
  let area = f.area();

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1),                  // header
      Constraint::Length(tiles::TILE_HEIGHT), // tiles
      Constraint::Min(0),                     // body
      Constraint::Length(1),                  // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  tiles::draw(f, rows[1], app.view.tally());
  draw_body(f, rows[2], app);
  draw_status(f, rows[3], app);

  if let Some(alert) = &app.alert {
    draw_alert(f, area, alert);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " Admin panel · guest responses",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::Gray),
  );

  let left_width = left.width() as u16;
  let right_width = right.width() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<S: SubmissionStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  match app.view.view() {
    View::Loading => draw_notice(
      f,
      area,
      "Loading submissions…",
      "",
      Color::Blue,
    ),
    View::Failed { message } => draw_notice(
      f,
      area,
      "Could not load guest responses",
      message,
      Color::Red,
    ),
    View::Empty => draw_notice(
      f,
      area,
      "No guest responses yet",
      "Responses will appear here as they arrive",
      Color::Gray,
    ),
    View::Populated(submissions) => cards::draw(f, area, app, submissions),
  }
}

fn draw_notice(f: &mut Frame, area: Rect, title: &str, detail: &str, color: Color) {
  let block = Block::default()
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let [middle] = Layout::vertical([Constraint::Length(2)])
    .flex(Flex::Center)
    .areas(inner);

  let text = vec![
    Line::from(Span::styled(
      title.to_string(),
      Style::default().fg(color).add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(
      detail.to_string(),
      Style::default().fg(Color::DarkGray),
    )),
  ];
  f.render_widget(
    Paragraph::new(text)
      .alignment(Alignment::Center)
      .wrap(Wrap { trim: true }),
    middle,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<S: SubmissionStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let (mode_label, hints) = if app.alert.is_some() {
    ("ALERT", "Enter/Esc dismiss")
  } else {
    match app.view.view() {
      View::Loading => ("LOADING", "q quit"),
      View::Failed { .. } => ("FAILED", "q quit"),
      View::Empty => ("EMPTY", "q quit"),
      View::Populated(_) => ("NORMAL", "←↓↑→/hjkl select  d delete  q quit"),
    }
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::Gray),
  );

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Alert ────────────────────────────────────────────────────────────────────

fn draw_alert(f: &mut Frame, area: Rect, message: &str) {
  let [row] = Layout::vertical([Constraint::Length(5)])
    .flex(Flex::Center)
    .areas(area);
  let [popup] = Layout::horizontal([Constraint::Max(48)])
    .flex(Flex::Center)
    .areas(row);

  let block = Block::default()
    .title(" Error ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));

  let text = vec![
    Line::from(message.to_string()),
    Line::from(""),
    Line::from(Span::styled(
      "[Enter] OK",
      Style::default().fg(Color::DarkGray),
    )),
  ];

  f.render_widget(Clear, popup);
  f.render_widget(
    Paragraph::new(text)
      .block(block)
      .alignment(Alignment::Center)
      .wrap(Wrap { trim: true }),
    popup,
  );
}
