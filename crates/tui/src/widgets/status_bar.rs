//! Status bar rendering widget.
//!
//! This module provides functions for rendering the footer status line
//! with keybinding hints and feedback for the last action.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::state::Mode;

/// A key and what it does.
pub type Hint = (&'static str, &'static str);

/// Returns the keybinding hints that apply in `mode`.
#[must_use]
pub fn mode_hints(mode: &Mode) -> &'static [Hint] {
    match mode {
        Mode::Normal => &[
            ("?", "Help"),
            ("n", "New task"),
            ("Space", "Grab"),
            ("Enter", "Details"),
            ("q", "Quit"),
        ],
        Mode::Drag(_) => &[
            ("←→↑↓", "Move"),
            ("Tab", "Board"),
            ("Enter", "Drop"),
            ("Esc", "Cancel"),
        ],
        Mode::Input(_) => &[("Enter", "Confirm"), ("Esc", "Cancel")],
        Mode::Confirm(_) => &[("y", "Yes"), ("n", "No")],
    }
}

fn hint_spans(hints: &[Hint]) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(Color::Yellow);
    let text_style = Style::default().fg(Color::White);

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (i, (key, action)) in hints.iter().enumerate() {
        let action = if i + 1 < hints.len() {
            format!(" {action}  ")
        } else {
            format!(" {action}")
        };
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(action, text_style));
    }
    spans
}

/// Renders the status bar with keybinding hints.
///
/// # Layout
///
/// ```text
/// ? Help  n New task  Space Grab  Enter Details  q Quit
/// ```
///
/// # Examples
///
/// ```
/// use orcganizer_tui::state::Mode;
/// use orcganizer_tui::widgets::status_bar::{mode_hints, render_status_bar};
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
///
/// render_status_bar(mode_hints(&Mode::Normal), area, &mut buf);
/// ```
pub fn render_status_bar(hints: &[Hint], area: Rect, buf: &mut Buffer) {
    Paragraph::new(Line::from(hint_spans(hints))).render(area, buf);
}

/// Renders a contextual status bar with custom message.
///
/// The message comes first so it survives when the terminal is narrow.
///
/// # Examples
///
/// ```
/// use orcganizer_tui::state::Mode;
/// use orcganizer_tui::widgets::status_bar::{mode_hints, render_status_bar_with_message};
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
///
/// render_status_bar_with_message("Task moved", mode_hints(&Mode::Normal), area, &mut buf);
/// ```
pub fn render_status_bar_with_message(message: &str, hints: &[Hint], area: Rect, buf: &mut Buffer) {
    let mut spans = vec![
        Span::styled(message.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
    ];
    spans.extend(hint_spans(hints));
    Paragraph::new(Line::from(spans)).render(area, buf);
}
