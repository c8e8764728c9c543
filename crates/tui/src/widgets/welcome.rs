//! Welcome screen shown while there are no boards.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::help::centered_rect;

/// Renders the welcome screen centered in `area`.
///
/// # Examples
///
/// ```
/// use orcganizer_tui::widgets::render_welcome;
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let area = Rect::new(0, 0, 80, 24);
/// let mut buf = Buffer::empty(area);
///
/// render_welcome(area, &mut buf);
/// ```
pub fn render_welcome(area: Rect, buf: &mut Buffer) {
    let popup = centered_rect(48, 9, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Welcome to your Quest board",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Gather your tasks and lead them to Done.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::styled(" Begin", Style::default().fg(Color::White)),
        ]),
    ];

    Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .render(popup, buf);
}
