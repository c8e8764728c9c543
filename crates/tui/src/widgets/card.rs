//! Card rendering widget.
//!
//! A card shows its icon, quest kind, priority stars, title and the first
//! line of its notes. The top border carries the card's header pattern:
//! a color ramp between the two gradient stops, or the dots of its dither
//! tile.

use orcganizer_protocol::{Card, CardPattern};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

/// How a card is drawn relative to the user's interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    /// Not selected.
    Normal,
    /// The selected card.
    Selected,
    /// Picked up by a drag; drawn dimmed at its old place.
    Lifted,
}

/// Returns the accent color of a card, derived from its header pattern.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::{Card, CardDraft, PatternType};
/// use orcganizer_tui::widgets::card_accent;
/// use ratatui::style::Color;
///
/// let mut card = Card::from_draft("t-1", "seed01", CardDraft::default());
/// assert!(matches!(card_accent(&card), Color::Rgb(..)));
///
/// card.pattern_type = PatternType::Dither;
/// assert_eq!(card_accent(&card), Color::Gray);
/// ```
#[must_use]
pub fn card_accent(card: &Card) -> Color {
    match CardPattern::for_card(card) {
        CardPattern::Gradient(gradient) => {
            let [(r, g, b), _] = gradient.rgb_stops();
            Color::Rgb(r, g, b)
        }
        CardPattern::Dither(_) => Color::Gray,
    }
}

/// Linear interpolation between two RGB colors, `step` of `steps`.
fn blend(from: (u8, u8, u8), to: (u8, u8, u8), step: u16, steps: u16) -> Color {
    let mix = |a: u8, b: u8| {
        let (a, b) = (i32::from(a), i32::from(b));
        let value = a + (b - a) * i32::from(step) / i32::from(steps.max(1));
        u8::try_from(value.clamp(0, 255)).unwrap_or(u8::MAX)
    };
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Paints the card's header pattern over the top border row of `area`.
pub(crate) fn paint_pattern(card: &Card, area: Rect, buf: &mut Buffer) {
    let y = area.y;
    let span = area.width.saturating_sub(1);
    match CardPattern::for_card(card) {
        CardPattern::Gradient(gradient) => {
            let [from, to] = gradient.rgb_stops();
            for dx in 0..area.width {
                if let Some(cell) = buf.cell_mut((area.x + dx, y)) {
                    cell.set_fg(blend(from, to, dx, span));
                }
            }
        }
        CardPattern::Dither(tile) => {
            let glyph = match tile.dot {
                1 => "·",
                2 => "•",
                _ => "●",
            };
            let period = u16::try_from(tile.size / 2).unwrap_or(3).max(2);
            let phase = u16::try_from(tile.jitter + 1).unwrap_or(0);
            // Leave the corners alone.
            for dx in 1..area.width.saturating_sub(1) {
                if (dx + phase) % period == 0 {
                    if let Some(cell) = buf.cell_mut((area.x + dx, y)) {
                        cell.set_symbol(glyph);
                    }
                }
            }
        }
    }
}

/// Renders a card to the buffer.
///
/// Minimized cards take a single row showing the icon and title; other
/// cards use a bordered box.
///
/// # Layout
///
/// ```text
/// ╭━━━━━━━━━━━━━━━━━━━━━━━━╮   <- header pattern
/// │📜 Main quest     ★★☆☆☆│
/// │Wire up task dialog     │
/// │Connect dialog open s...│
/// ╰────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::{Card, CardDraft};
/// use orcganizer_tui::widgets::{CardState, render_card};
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let card = Card::from_draft("t-1", "seed01", CardDraft::titled("Scout the pass"));
/// let area = Rect::new(0, 0, 26, 5);
/// let mut buf = Buffer::empty(area);
///
/// render_card(&card, CardState::Selected, area, &mut buf);
/// ```
pub fn render_card(card: &Card, state: CardState, area: Rect, buf: &mut Buffer) {
    if card.minimized {
        render_minimized(card, state, area, buf);
        return;
    }
    // Skip rendering if area is too small
    if area.width < 6 || area.height < 3 {
        return;
    }

    let accent = card_accent(card);
    let (border_style, border_type, title_style) = match state {
        CardState::Normal => (
            Style::default().fg(accent),
            BorderType::Rounded,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        CardState::Selected => (
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
            BorderType::Thick,
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        ),
        CardState::Lifted => (
            Style::default().fg(Color::DarkGray),
            BorderType::Plain,
            Style::default().fg(Color::DarkGray),
        ),
    };
    let dim = state == CardState::Lifted;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);
    let inner = block.inner(area);
    block.render(area, buf);
    if !dim {
        paint_pattern(card, area, buf);
    }

    let width = usize::from(inner.width);
    let kind = format!("{} {}", card.icon.glyph(), card.task_type.label());
    let star_style = if dim {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let text_style = if dim {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Gray)
    };

    let row = |offset: u16| Rect {
        x: inner.x,
        y: inner.y + offset,
        width: inner.width,
        height: 1,
    };
    if inner.height >= 1 {
        Paragraph::new(Span::styled(truncate_string(&kind, width), text_style))
            .render(row(0), buf);
        if width >= 16 {
            Paragraph::new(Span::styled(card.priority.stars(), star_style))
                .alignment(Alignment::Right)
                .render(row(0), buf);
        }
    }
    if inner.height >= 2 {
        let title = if card.title.is_empty() {
            Span::styled(
                "Untitled task",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            Span::styled(truncate_string(&card.title, width), title_style)
        };
        Paragraph::new(title).render(row(1), buf);
    }
    if inner.height >= 3 {
        let first_line = card.notes.lines().next().unwrap_or_default();
        Paragraph::new(Span::styled(
            truncate_string(first_line, width),
            Style::default().fg(Color::DarkGray),
        ))
        .render(row(2), buf);
    }
}

fn render_minimized(card: &Card, state: CardState, area: Rect, buf: &mut Buffer) {
    if area.width < 4 || area.height == 0 {
        return;
    }
    let style = match state {
        CardState::Normal => Style::default().fg(card_accent(card)),
        CardState::Selected => Style::default()
            .fg(Color::LightCyan)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        CardState::Lifted => Style::default().fg(Color::DarkGray),
    };
    let text = format!("▸ {} {}", card.icon.glyph(), card.title);
    Paragraph::new(Line::from(Span::styled(
        truncate_string(&text, usize::from(area.width)),
        style,
    )))
    .render(Rect { height: 1, ..area }, buf);
}

/// Truncates a string to fit within a given width, adding ellipsis if needed.
pub(crate) fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_width).collect()
    }
}
