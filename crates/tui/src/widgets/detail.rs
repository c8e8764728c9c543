//! Card detail screen widget.
//!
//! This module renders the full view of a selected card: its quest kind,
//! priority, icon and header pattern above the scrollable notes.

use orcganizer_protocol::{Card, PatternType};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::card::{card_accent, paint_pattern};

/// Rows above the notes: two metadata lines and the pattern band.
const METADATA_HEIGHT: u16 = 3;

/// Readable width cap for the notes.
const MAX_NOTES_WIDTH: u16 = 100;

/// Renders the card detail panel.
///
/// # Layout
///
/// ```text
/// ╭ 📜 Wire up task dialog ───────────────────────────────╮
/// │Main quest   ★★☆☆☆   in To Do                          │
/// │Icon scroll   Pattern gradient k3j9x0                  │
/// │━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━│
/// │───────────────────────────────────────────────────────│
/// │Connect dialog open state to the column's New Task     │
/// │button.                                                │
/// │───────────────────────────────────────────────────────│
/// │[Esc] Back to board  [↑↓] Scroll  [e] Title  [E] Notes │
/// ╰───────────────────────────────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::{Card, CardDraft};
/// use orcganizer_tui::widgets::render_detail_panel;
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let card = Card::from_draft("t-1", "seed01", CardDraft::titled("Scout the pass"));
/// let area = Rect::new(0, 0, 60, 20);
/// let mut buf = Buffer::empty(area);
///
/// render_detail_panel(&card, "To Do", 0, area, &mut buf);
/// ```
pub fn render_detail_panel(
    card: &Card,
    column_title: &str,
    scroll_offset: u16,
    area: Rect,
    buf: &mut Buffer,
) {
    // Skip rendering if area is too small
    if area.width < 20 || area.height < 10 {
        return;
    }

    let block = Block::default()
        .title(Span::styled(
            format!(" {} {} ", card.icon.glyph(), card.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let inner_area = block.inner(area);
    block.render(area, buf);

    let [metadata, separator, notes, footer_separator, footer] = Layout::vertical([
        Constraint::Length(METADATA_HEIGHT),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner_area);

    render_metadata(card, column_title, metadata, buf);
    render_separator(separator, buf);
    render_notes(card, scroll_offset, notes, buf);
    render_separator(footer_separator, buf);
    render_footer(footer, buf);
}

fn render_metadata(card: &Card, column_title: &str, area: Rect, buf: &mut Buffer) {
    let label_style = Style::default().fg(Color::DarkGray);
    let value_style = Style::default().fg(Color::White);

    let kind = Line::from(vec![
        Span::styled(
            card.task_type.label(),
            Style::default()
                .fg(card_accent(card))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled(card.priority.stars(), Style::default().fg(Color::Yellow)),
        Span::styled("   in ", label_style),
        Span::styled(column_title.to_string(), value_style),
    ]);
    let pattern = match card.pattern_type {
        PatternType::Default => "gradient",
        PatternType::Dither => "dither",
    };
    let looks = Line::from(vec![
        Span::styled("Icon ", label_style),
        Span::styled(card.icon.as_str(), value_style),
        Span::styled("   Pattern ", label_style),
        Span::styled(format!("{pattern} {}", card.pattern_seed), value_style),
    ]);
    Paragraph::new(vec![kind, looks]).render(area, buf);

    if area.height >= METADATA_HEIGHT {
        let band = Rect::new(area.x, area.y + 2, area.width, 1);
        buf.set_string(
            band.x,
            band.y,
            "━".repeat(usize::from(band.width)),
            Style::default().fg(card_accent(card)),
        );
        paint_pattern(card, band, buf);
    }
}

fn render_separator(area: Rect, buf: &mut Buffer) {
    let width = usize::from(area.width);
    let sep = Paragraph::new(Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(Color::DarkGray),
    )));
    sep.render(area, buf);
}

/// Renders the notes with scrolling support.
fn render_notes(card: &Card, scroll_offset: u16, area: Rect, buf: &mut Buffer) {
    let lines: Vec<Line<'static>> = build_notes_lines(card, area.width)
        .into_iter()
        .skip(usize::from(scroll_offset))
        .collect();
    Paragraph::new(lines).render(area, buf);
}

fn render_footer(area: Rect, buf: &mut Buffer) {
    let key = Style::default().fg(Color::Yellow);
    let text = Style::default().fg(Color::DarkGray);
    let footer = Paragraph::new(Line::from(vec![
        Span::styled("[Esc]", key),
        Span::styled(" Back to board  ", text),
        Span::styled("[↑↓]", key),
        Span::styled(" Scroll  ", text),
        Span::styled("[e]", key),
        Span::styled(" Title  ", text),
        Span::styled("[E]", key),
        Span::styled(" Notes", text),
    ]));
    footer.render(area, buf);
}

/// Builds the wrapped notes lines, as displayed.
fn build_notes_lines(card: &Card, width: u16) -> Vec<Line<'static>> {
    if card.notes.trim().is_empty() {
        return vec![Line::from(Span::styled(
            "No notes",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))];
    }
    let width = usize::from(width.min(MAX_NOTES_WIDTH));
    card.notes
        .lines()
        .flat_map(|paragraph| {
            let wrapped = wrap_text(paragraph, width);
            if wrapped.is_empty() {
                vec![String::new()]
            } else {
                wrapped
            }
        })
        .map(Line::from)
        .collect()
}

/// Wraps text at word boundaries, splitting words longer than a line.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_width > 0 && current_width + 1 + word_len <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_len;
            continue;
        }
        if current_width > 0 {
            lines.push(std::mem::take(&mut current_line));
        }
        if word_len > max_width {
            let chars: Vec<char> = word.chars().collect();
            let mut chunks = chars.chunks(max_width).peekable();
            while let Some(chunk) = chunks.next() {
                if chunks.peek().is_some() {
                    lines.push(chunk.iter().collect());
                } else {
                    current_line = chunk.iter().collect();
                    current_width = chunk.len();
                }
            }
        } else {
            current_line = word.to_string();
            current_width = word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Calculates the maximum scroll offset for a card's notes.
///
/// # Arguments
///
/// * `card` - The card to calculate scroll for
/// * `visible_height` - The number of visible lines in the notes area
/// * `width` - The width of the notes area
#[must_use]
pub fn max_scroll_offset(card: &Card, visible_height: u16, width: u16) -> u16 {
    let total = u16::try_from(build_notes_lines(card, width).len()).unwrap_or(u16::MAX);
    total.saturating_sub(visible_height)
}

/// Returns the `(height, width)` of the notes area for a detail panel
/// rendered into `area`, or `None` if the panel would not be drawn.
#[must_use]
pub fn description_area_dimensions(area: Rect) -> Option<(u16, u16)> {
    // Minimum area check (same as render_detail_panel)
    if area.width < 20 || area.height < 10 {
        return None;
    }

    let inner_height = area.height.saturating_sub(2);
    let inner_width = area.width.saturating_sub(2);

    // Metadata, separator, notes, separator, footer.
    let notes_height = inner_height.saturating_sub(METADATA_HEIGHT + 3);
    if notes_height == 0 {
        return None;
    }

    Some((notes_height, inner_width))
}
