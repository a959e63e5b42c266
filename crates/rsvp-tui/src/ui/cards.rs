//! Card grid — one card per submission.

use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use rsvp_core::{store::SubmissionStore, submission::Submission};

use crate::app::App;

const CARD_HEIGHT: u16 = 5;

/// Render `submissions` as a grid of `app.columns` columns, scrolled so the
/// selected card is visible.
pub fn draw<S: SubmissionStore>(
  f: &mut Frame,
  area: Rect,
  app: &App<S>,
  submissions: &[Submission],
) {
  let cols = app.columns.max(1);
  let visible_rows = usize::from(area.height / CARD_HEIGHT).max(1);
  let first_row = (app.cursor / cols).saturating_sub(visible_rows - 1);

  let rows = Layout::vertical(vec![Constraint::Length(CARD_HEIGHT); visible_rows])
    .split(area);

  for (r, row_area) in rows.iter().enumerate() {
    let row = first_row + r;
    let cells = Layout::horizontal(vec![Constraint::Ratio(1, cols as u32); cols])
      .split(*row_area);
    for (c, cell) in cells.iter().enumerate() {
      let index = row * cols + c;
      let Some(submission) = submissions.get(index) else {
        return;
      };
      draw_card(
        f,
        *cell,
        submission,
        index == app.cursor,
        app.view.is_deleting(&submission.id),
      );
    }
  }
}

fn draw_card(
  f: &mut Frame,
  area: Rect,
  submission: &Submission,
  selected: bool,
  deleting: bool,
) {
  let border = if selected {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let title = if deleting {
    format!(" {} (deleting…) ", submission.name)
  } else {
    format!(" {} ", submission.name)
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(border);

  let status_color = if submission.is_attending() {
    Color::Green
  } else {
    Color::Red
  };

  let mut lines = vec![Line::from(vec![
    Span::styled("● ", Style::default().fg(status_color)),
    Span::styled(submission.status_label(), Style::default().fg(status_color)),
  ])];

  if !submission.drinks.is_empty() {
    let mut spans = vec![Span::styled(
      "Drinks: ",
      Style::default().fg(Color::DarkGray),
    )];
    for drink in &submission.drinks {
      spans.push(Span::styled(
        format!("[{drink}]"),
        Style::default().fg(Color::Blue),
      ));
      spans.push(Span::raw(" "));
    }
    lines.push(Line::from(spans));
  }

  f.render_widget(
    Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
    area,
  );
}
