//! Board rendering widget.
//!
//! This module renders the columns of one board side by side.

use orcganizer_protocol::Board;
use orcganizer_store::{DragSession, ItemKind};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::column::{ColumnView, render_column};
use crate::layout::column_slots;

/// Renders the columns of `board` to the buffer.
///
/// Columns scroll horizontally to keep the selected one in view. While a
/// column is dragged, the row scrolls to its drop target instead.
///
/// # Layout
///
/// ```text
/// ╭ To Do (2) ──────╮╭ Doing (1) ──────╮╭ Done (1) ───────╮
/// │ ...             ││ ...             ││ ...             │
/// ╰─────────────────╯╰─────────────────╯╰─────────────────╯
/// ```
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::Board;
/// use orcganizer_tui::widgets::render_board;
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let board = Board::with_default_columns("b-1", "The Order of Flow");
/// let area = Rect::new(0, 0, 100, 20);
/// let mut buf = Buffer::empty(area);
///
/// render_board(&board, 0, None, None, area, &mut buf);
/// ```
pub fn render_board(
    board: &Board,
    selected_column: usize,
    selected_card: Option<usize>,
    drag: Option<&DragSession>,
    area: Rect,
    buf: &mut Buffer,
) {
    if board.minimized {
        render_placeholder(
            &format!("{} is minimized. Press m to expand it.", board.name),
            area,
            buf,
        );
        return;
    }
    if board.columns.is_empty() {
        render_placeholder("No columns yet. Press c to add one.", area, buf);
        return;
    }

    let scroll_to = drag
        .filter(|d| d.kind() == ItemKind::Column)
        .and_then(DragSession::hover)
        .map_or(selected_column, |hover| hover.index);

    for (idx, slot) in column_slots(board, scroll_to, area) {
        let focused = idx == selected_column;
        let view = ColumnView {
            board_id: &board.id,
            index: idx,
            focused,
            selected_card: if focused { selected_card } else { None },
            drag,
        };
        render_column(&board.columns[idx], &view, slot, buf);
    }
}

fn render_placeholder(text: &str, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let centered = Rect {
        y: area.y + area.height / 2,
        height: area.height - area.height / 2,
        ..area
    };
    Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )))
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .render(centered, buf);
}
