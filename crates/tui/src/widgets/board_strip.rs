//! Board strip widget: one tab per board.

use orcganizer_protocol::BoardTree;
use orcganizer_store::{DragSession, ItemKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Paragraph, Widget},
};

use crate::{
    layout::{board_tab_label, board_tabs},
    palette::parse_hex,
};

/// Renders the tab strip listing every board.
///
/// The shown board is highlighted with its header color. While a board is
/// dragged, the tab at the drop position is marked and the lifted tab is
/// dimmed.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::dummy::sample_tree;
/// use orcganizer_tui::widgets::render_board_strip;
/// use ratatui::{buffer::Buffer, layout::Rect};
///
/// let tree = sample_tree();
/// let area = Rect::new(0, 0, 80, 1);
/// let mut buf = Buffer::empty(area);
///
/// render_board_strip(&tree, 0, None, area, &mut buf);
/// ```
pub fn render_board_strip(
    tree: &BoardTree,
    selected: usize,
    drag: Option<&DragSession>,
    area: Rect,
    buf: &mut Buffer,
) {
    let drag = drag.filter(|d| d.kind() == ItemKind::Board);
    let hover = drag.and_then(DragSession::hover).map(|h| h.index);
    let lifted = drag.map(|d| d.source().index);

    for (idx, slot) in board_tabs(tree, hover.unwrap_or(selected), area) {
        let board = &tree.boards[idx];
        let style = if hover == Some(idx) {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if lifted == Some(idx) {
            Style::default().fg(Color::DarkGray)
        } else if idx == selected {
            Style::default()
                .fg(Color::White)
                .bg(parse_hex(&board.header_color).unwrap_or(Color::Blue))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(parse_hex(&board.header_color).unwrap_or(Color::Gray))
        };
        Paragraph::new(Span::styled(board_tab_label(board), style)).render(slot, buf);

        let separator = slot.right();
        if separator < area.right()
            && let Some(cell) = buf.cell_mut((separator, area.y))
        {
            cell.set_symbol("│").set_fg(Color::DarkGray);
        }
    }
}
