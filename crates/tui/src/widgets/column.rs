//! Column rendering widget.
//!
//! A column shows its title and card count in the header, followed by its
//! cards stacked vertically. While a card is dragged, the slot it would
//! land in is marked with a drop line.

use orcganizer_protocol::Column;
use orcganizer_store::{ContainerKey, DragSession, ItemKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::card::{CardState, render_card, truncate_string};
use crate::{
    layout::{card_slots, column_inner},
    palette::parse_hex,
};

/// What a column needs to know about its surroundings to draw itself.
#[derive(Debug, Clone, Copy)]
pub struct ColumnView<'a> {
    /// Id of the board the column belongs to.
    pub board_id: &'a str,
    /// Position of the column within its board.
    pub index: usize,
    /// Whether the column holds the selection.
    pub focused: bool,
    /// Selected card, if the column is focused.
    pub selected_card: Option<usize>,
    /// The active drag, if any.
    pub drag: Option<&'a DragSession>,
}

impl ColumnView<'_> {
    fn container(&self, column: &Column) -> ContainerKey {
        ContainerKey::column(self.board_id, &column.id)
    }

    /// Index of the lifted card, when a card is dragged out of this column.
    fn lifted_card(&self, column: &Column) -> Option<usize> {
        let drag = self.drag?;
        (drag.kind() == ItemKind::Card && drag.source().container == self.container(column))
            .then(|| drag.source().index)
    }

    /// Visual slot of the drop marker, when a card hovers over this column.
    ///
    /// A card dropped below its own position in its own column lands one
    /// slot further down on screen, because it is still drawn at its old
    /// place.
    fn drop_slot(&self, column: &Column) -> Option<usize> {
        let drag = self.drag?;
        let hover = drag.hover()?;
        if drag.kind() != ItemKind::Card || hover.container != self.container(column) {
            return None;
        }
        match self.lifted_card(column) {
            Some(source) if hover.index >= source => Some(hover.index + 1),
            _ => Some(hover.index),
        }
    }

    /// Whether a dragged column hovers over this column's position.
    fn column_hovered(&self) -> bool {
        self.drag.is_some_and(|drag| {
            drag.kind() == ItemKind::Column && drag.hover().is_some_and(|h| h.index == self.index)
        })
    }

    fn column_lifted(&self) -> bool {
        self.drag.is_some_and(|drag| {
            drag.kind() == ItemKind::Column && drag.source().index == self.index
        })
    }
}

/// Renders a single column to the buffer.
///
/// # Layout
///
/// ```text
/// ╭ To Do (2) ─────────────────╮
/// │╭──────────────────────────╮│
/// ││📜 Main quest        ★★☆☆☆││
/// ││Wire up task dialog       ││
/// ││Connect dialog open st... ││
/// │╰──────────────────────────╯│
/// ╰────────────────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::{Card, CardDraft, Column};
/// use orcganizer_tui::widgets::{ColumnView, render_column};
/// use ratatui::{buffer::Buffer, layout::Rect};
/// use std::sync::Arc;
///
/// let mut column = Column::new("todo", "To Do");
/// column.cards.push(Arc::new(Card::from_draft("t-1", "seed", CardDraft::titled("Scout"))));
///
/// let view = ColumnView {
///     board_id: "b-1",
///     index: 0,
///     focused: true,
///     selected_card: Some(0),
///     drag: None,
/// };
/// let area = Rect::new(0, 0, 30, 15);
/// let mut buf = Buffer::empty(area);
///
/// render_column(&column, &view, area, &mut buf);
/// ```
pub fn render_column(column: &Column, view: &ColumnView<'_>, area: Rect, buf: &mut Buffer) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let hovered = view.column_hovered();
    let border_style = if hovered {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if view.column_lifted() {
        Style::default().fg(Color::DarkGray)
    } else if view.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut title_style = match parse_hex(&column.color) {
        Some(color) => Style::default().fg(Color::White).bg(color),
        None if view.focused => Style::default().fg(Color::Cyan),
        None => Style::default().fg(Color::White),
    };
    if view.focused {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }

    let title = if column.minimized {
        format!(" {} ", column.len())
    } else {
        format!(" {} ({}) ", column.title, column.len())
    };
    let max_title = usize::from(area.width.saturating_sub(2));
    let block = Block::default()
        .title(Span::styled(truncate_string(&title, max_title), title_style))
        .borders(Borders::ALL)
        .border_type(if hovered {
            BorderType::Double
        } else {
            BorderType::Rounded
        })
        .border_style(border_style);
    block.render(area, buf);
    let inner = column_inner(area);

    if column.minimized {
        render_minimized_title(column, inner, buf, title_style);
        return;
    }

    let drop_slot = view.drop_slot(column);
    let lifted = view.lifted_card(column);
    let scroll_to = drop_slot.or(view.selected_card);
    let slots = card_slots(column, scroll_to, inner);

    if slots.is_empty() && drop_slot.is_none() {
        render_empty_placeholder(inner, buf);
        return;
    }

    for (idx, slot) in &slots {
        let state = if lifted == Some(*idx) {
            CardState::Lifted
        } else if view.focused && view.drag.is_none() && view.selected_card == Some(*idx) {
            CardState::Selected
        } else {
            CardState::Normal
        };
        render_card(&column.cards[*idx], state, *slot, buf);
    }

    if let Some(slot) = drop_slot {
        let y = slots
            .iter()
            .find(|(idx, _)| *idx == slot)
            .map(|(_, rect)| rect.y)
            .or_else(|| slots.last().map(|(_, rect)| rect.bottom()))
            .unwrap_or(inner.y);
        if y < inner.bottom() {
            render_drop_marker(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}

/// Writes the title of a minimized column down its narrow body.
fn render_minimized_title(column: &Column, inner: Rect, buf: &mut Buffer, style: Style) {
    let lines: Vec<Line<'_>> = column
        .title
        .chars()
        .take(usize::from(inner.height))
        .map(|ch| Line::from(Span::styled(ch.to_string(), style)))
        .collect();
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(inner, buf);
}

fn render_drop_marker(area: Rect, buf: &mut Buffer) {
    let width = usize::from(area.width);
    let label = "▶ drop here ";
    let fill = "─".repeat(width.saturating_sub(label.chars().count()));
    Paragraph::new(Line::from(Span::styled(
        truncate_string(&format!("{label}{fill}"), width),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .render(area, buf);
}

/// Renders a placeholder for empty columns.
fn render_empty_placeholder(area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let placeholder = Paragraph::new(Line::from(Span::styled(
        "No quests",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);

    let y_offset = area.height / 2;
    let centered_area = Rect {
        x: area.x,
        y: area.y + y_offset,
        width: area.width,
        height: 1,
    };

    placeholder.render(centered_area, buf);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use orcganizer_protocol::{Card, CardDraft};
    use orcganizer_store::DropLocation;

    use super::*;
    use crate::test_utils::buffer_to_string;

    fn column(cards: usize) -> Column {
        let mut column = Column::new("todo", "To Do");
        column.cards = (0..cards)
            .map(|i| {
                Arc::new(Card::from_draft(
                    format!("t{i}"),
                    "seed",
                    CardDraft::titled(format!("Quest {i}")),
                ))
            })
            .collect();
        column
    }

    fn view<'a>(drag: Option<&'a DragSession>) -> ColumnView<'a> {
        ColumnView {
            board_id: "b-1",
            index: 0,
            focused: true,
            selected_card: None,
            drag,
        }
    }

    #[test]
    fn header_shows_title_and_count() {
        let area = Rect::new(0, 0, 30, 20);
        let mut buf = Buffer::empty(area);
        render_column(&column(2), &view(None), area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("To Do (2)"));
        assert!(content.contains("Quest 0"));
        assert!(content.contains("Quest 1"));
    }

    #[test]
    fn empty_column_shows_placeholder() {
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        render_column(&column(0), &view(None), area, &mut buf);
        assert!(buffer_to_string(&buf).contains("No quests"));
    }

    #[test]
    fn focused_column_has_cyan_border() {
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        render_column(&column(0), &view(None), area, &mut buf);
        assert_eq!(buf[(0, 5)].fg, Color::Cyan);
    }

    #[test]
    fn colored_title_has_background() {
        let mut column = column(0);
        column.color = "#155e75".to_string();
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        render_column(&column, &view(None), area, &mut buf);
        assert_eq!(buf[(2, 0)].bg, Color::Rgb(0x15, 0x5e, 0x75));
    }

    #[test]
    fn minimized_column_writes_title_downwards() {
        let mut column = column(3);
        column.minimized = true;
        let area = Rect::new(0, 0, 8, 10);
        let mut buf = Buffer::empty(area);
        render_column(&column, &view(None), area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains(" 3 "));
        assert!(!content.contains("Quest"));
        let lines: Vec<&str> = content.lines().collect();
        assert!(lines[1].contains('T'));
        assert!(lines[2].contains('o'));
    }

    #[test]
    fn drop_marker_in_empty_column() {
        let mut drag = DragSession::begin(
            ItemKind::Card,
            DropLocation::new(ContainerKey::column("b-1", "doing"), 0),
        );
        drag.preview(Some(DropLocation::new(ContainerKey::column("b-1", "todo"), 0)));

        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        render_column(&column(0), &view(Some(&drag)), area, &mut buf);

        let content = buffer_to_string(&buf);
        assert!(content.contains("drop here"));
        assert!(!content.contains("No quests"));
        assert_eq!(content.lines().nth(1).map(|l| l.contains("drop here")), Some(true));
    }

    #[test]
    fn drop_marker_skips_lifted_card() {
        // Dragging card 0 down to final index 1 lands below card 1 on screen.
        let mut drag = DragSession::begin(
            ItemKind::Card,
            DropLocation::new(ContainerKey::column("b-1", "todo"), 0),
        );
        drag.preview(Some(DropLocation::new(ContainerKey::column("b-1", "todo"), 1)));

        let v = view(Some(&drag));
        let column = column(3);
        assert_eq!(v.lifted_card(&column), Some(0));
        assert_eq!(v.drop_slot(&column), Some(2));

        let area = Rect::new(0, 0, 30, 20);
        let mut buf = Buffer::empty(area);
        render_column(&column, &v, area, &mut buf);
        let lines: Vec<String> = buffer_to_string(&buf).lines().map(String::from).collect();
        // Border row, then two cards of five rows each.
        assert!(lines[11].contains("drop here"));
    }

    #[test]
    fn drop_marker_above_when_moving_up() {
        let mut drag = DragSession::begin(
            ItemKind::Card,
            DropLocation::new(ContainerKey::column("b-1", "todo"), 2),
        );
        drag.preview(Some(DropLocation::new(ContainerKey::column("b-1", "todo"), 1)));
        assert_eq!(view(Some(&drag)).drop_slot(&column(3)), Some(1));
    }

    #[test]
    fn hovered_column_is_highlighted() {
        let mut drag = DragSession::begin(
            ItemKind::Column,
            DropLocation::new(ContainerKey::Board("b-1".into()), 2),
        );
        drag.preview(Some(DropLocation::new(ContainerKey::Board("b-1".into()), 0)));

        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        render_column(&column(0), &view(Some(&drag)), area, &mut buf);
        assert_eq!(buf[(0, 5)].fg, Color::Yellow);
        assert_eq!(buf[(0, 5)].symbol(), "║");
    }
}
