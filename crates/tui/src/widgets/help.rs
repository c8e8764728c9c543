//! Help overlay widget.
//!
//! This module provides the help overlay that displays all available keybindings
//! when the user presses `?`.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

/// The width of the help overlay panel.
const HELP_WIDTH: u16 = 80;

/// The height of the help overlay panel.
const HELP_HEIGHT: u16 = 21;

/// Width of the key part of a help line.
const KEY_WIDTH: usize = 10;

type Section = (&'static str, &'static [(&'static str, &'static str)]);

const NAVIGATION: &[Section] = &[
    (
        "Navigation",
        &[
            ("←→", "Columns"),
            ("↑↓", "Tasks"),
            ("Tab S-Tab", "Boards"),
            ("Enter", "Task details"),
            ("Esc", "Close"),
            ("Click", "Select"),
        ],
    ),
    (
        "Boards",
        &[
            ("N", "Forge board"),
            ("R", "Rename"),
            ("H", "Header color"),
            ("m", "Minimize"),
            ("G", "Drag board"),
            ("D", "Delete"),
        ],
    ),
];

const TASKS: &[Section] = &[(
    "Tasks",
    &[
        ("n", "New task"),
        ("e", "Edit title"),
        ("E", "Edit notes"),
        ("0-5", "Priority"),
        ("t", "Main/Sub quest"),
        ("i", "Cycle icon"),
        ("p", "Reroll pattern"),
        ("z", "Minimize"),
        ("P", "Print"),
        ("Space", "Drag task"),
        ("x", "Delete"),
        ("u", "Undo delete"),
    ],
)];

const COLUMNS: &[Section] = &[
    (
        "Columns",
        &[
            ("c", "Add column"),
            ("r", "Rename"),
            ("C", "Color"),
            ("Z", "Minimize"),
            ("g", "Drag column"),
            ("X", "Delete"),
        ],
    ),
    (
        "Application",
        &[("?", "Toggle help"), ("!", "Reset all"), ("q", "Quit")],
    ),
];

/// Renders a centered help overlay displaying all keybindings.
///
/// The overlay is rendered on top of the existing content, clearing the
/// area behind it first.
///
/// # Layout
///
/// ```text
/// ╭ Help ───────────────────────────────────────────────────────────╮
/// │                                                                 │
/// │  Navigation              Tasks                 Columns          │
/// │  ←→        Columns       n         New task    c         Add... │
/// │  ...                     ...                   ...              │
/// │                                                                 │
/// │  Press any key to close                                         │
/// ╰─────────────────────────────────────────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use ratatui::buffer::Buffer;
/// use ratatui::layout::Rect;
/// use orcganizer_tui::widgets::render_help_overlay;
///
/// let area = Rect::new(0, 0, 100, 30);
/// let mut buf = Buffer::empty(area);
///
/// render_help_overlay(area, &mut buf);
/// ```
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    let popup_area = centered_rect(HELP_WIDTH, HELP_HEIGHT, area);

    // Clear the area behind the popup for a clean look
    Clear.render(popup_area, buf);

    let help_block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightYellow));
    let inner = help_block.inner(popup_area);
    help_block.render(popup_area, buf);

    let [_, body, _, hint] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);
    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(body);

    for (sections, column) in [NAVIGATION, TASKS, COLUMNS].into_iter().zip(columns.iter()) {
        Paragraph::new(build_help_lines(sections)).render(*column, buf);
    }

    Paragraph::new(Line::from(Span::styled(
        "  Press any key to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .render(hint, buf);
}

/// Builds the lines of one column of help content.
fn build_help_lines(sections: &[Section]) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Green);
    let text_style = Style::default().fg(Color::White);

    let mut lines = Vec::new();
    for (i, (title, keys)) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(format!("  {title}"), header_style)));
        for (key, action) in *keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<KEY_WIDTH$}"), key_style),
                Span::styled(*action, text_style),
            ]));
        }
    }
    lines
}

/// Creates a centered rectangle within a given area.
///
/// If the requested dimensions exceed the available area, the rectangle
/// will be clamped to fit.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to available area
    let popup_width = width.min(area.width);
    let popup_height = height.min(area.height);

    // Calculate centered position
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect::new(x, y, popup_width, popup_height)
}
