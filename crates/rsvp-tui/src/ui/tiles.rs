//! Summary tiles above the card grid.

use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use rsvp_core::tally::Tally;

pub const TILE_HEIGHT: u16 = 4;

/// Render the three count tiles into `area`.
pub fn draw(f: &mut Frame, area: Rect, tally: Tally) {
  let cols = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

  let tiles = [
    (tally.attending, "Confirmed attendance", Color::Green),
    (tally.not_attending, "Unable to attend", Color::Red),
    (tally.total, "Total responses", Color::Blue),
  ];

  for ((count, label, color), area) in tiles.into_iter().zip(cols.iter()) {
    let block = Block::default()
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let text = vec![
      Line::from(Span::styled(
        count.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
      )),
      Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
    ];
    f.render_widget(
      Paragraph::new(text).block(block).alignment(Alignment::Center),
      *area,
    );
  }
}
