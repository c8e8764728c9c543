//! Centralized layout measurements for the TUI.
//!
//! Rendering and mouse hit-testing both place columns and cards through the
//! functions in this module, so a click always lands on what was drawn.

use orcganizer_protocol::{Board, BoardTree, Card, Column};
use ratatui::{layout::Rect, text::Span};

/// Height of the header bar in rows.
///
/// The header displays the application title and help cue.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the board strip listing every board.
pub const BOARD_STRIP_HEIGHT: u16 = 1;

/// Height of the status line at the bottom of the screen.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of an expanded card: borders plus quest line, title and notes.
pub const CARD_HEIGHT: u16 = 5;

/// Height of a minimized card, which shows only its title.
pub const MINIMIZED_CARD_HEIGHT: u16 = 1;

/// Width of an expanded column.
pub const COLUMN_WIDTH: u16 = 30;

/// Width of a minimized column.
pub const MINIMIZED_COLUMN_WIDTH: u16 = 8;

/// Minimum terminal height for useful rendering.
///
/// Below this height, we display a "terminal too small" message. One
/// expanded card needs its own height plus the column borders, the board
/// strip and the status line.
pub const MIN_HEIGHT: u16 = 10;

/// Minimum terminal height for rendering with header.
///
/// When terminal height is between `MIN_HEIGHT` and `MIN_HEIGHT_WITH_HEADER`,
/// we hide the header to reclaim 3 rows of content space.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
pub const MIN_WIDTH: u16 = 40;

/// Returns the number of rows `card` takes in a column.
#[must_use]
pub fn card_height(card: &Card) -> u16 {
    if card.minimized {
        MINIMIZED_CARD_HEIGHT
    } else {
        CARD_HEIGHT
    }
}

/// Returns the number of columns `column` takes on screen.
#[must_use]
pub fn column_width(column: &Column) -> u16 {
    if column.minimized {
        MINIMIZED_COLUMN_WIDTH
    } else {
        COLUMN_WIDTH
    }
}

/// Lays items of the given sizes out along one axis, scrolled so that
/// `selected` is in view.
///
/// Returns `(index, offset, size)` for every item that is at least partly
/// visible within `available`.
fn strip(sizes: &[u16], selected: usize, available: u16) -> Vec<(usize, u16, u16)> {
    if sizes.is_empty() || available == 0 {
        return Vec::new();
    }
    let selected = selected.min(sizes.len() - 1);

    let mut first = 0;
    while first < selected {
        let span: u32 = sizes[first..=selected].iter().map(|s| u32::from(*s)).sum();
        if span <= u32::from(available) {
            break;
        }
        first += 1;
    }

    let mut slots = Vec::new();
    let mut offset = 0u16;
    for (idx, size) in sizes.iter().enumerate().skip(first) {
        if offset >= available {
            break;
        }
        let visible = (*size).min(available - offset);
        slots.push((idx, offset, visible));
        offset = offset.saturating_add(*size);
    }
    slots
}

/// Places the columns of `board` side by side in `area`.
///
/// Columns keep their natural width; when they do not all fit, the row is
/// scrolled so the selected column stays visible.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::Board;
/// use orcganizer_tui::layout::{COLUMN_WIDTH, column_slots};
/// use ratatui::layout::Rect;
///
/// let board = Board::with_default_columns("b-1", "Quests");
/// let slots = column_slots(&board, 0, Rect::new(0, 0, 100, 20));
///
/// assert_eq!(slots.len(), 3);
/// assert_eq!(slots[1].1.x, COLUMN_WIDTH);
/// ```
#[must_use]
pub fn column_slots(board: &Board, selected: usize, area: Rect) -> Vec<(usize, Rect)> {
    let widths: Vec<u16> = board.columns.iter().map(|c| column_width(c)).collect();
    strip(&widths, selected, area.width)
        .into_iter()
        .map(|(idx, offset, width)| {
            (idx, Rect::new(area.x + offset, area.y, width, area.height))
        })
        .collect()
}

/// Places the cards of `column` one below the other in `area`.
///
/// The list scrolls so the selected card (or the first card) is visible.
#[must_use]
pub fn card_slots(column: &Column, selected: Option<usize>, area: Rect) -> Vec<(usize, Rect)> {
    let heights: Vec<u16> = column.cards.iter().map(|c| card_height(c)).collect();
    strip(&heights, selected.unwrap_or(0), area.height)
        .into_iter()
        .map(|(idx, offset, height)| {
            (idx, Rect::new(area.x, area.y + offset, area.width, height))
        })
        .collect()
}

/// Returns the label of a board's tab in the board strip.
///
/// Minimized boards collapse to their initial.
#[must_use]
pub fn board_tab_label(board: &Board) -> String {
    if board.minimized {
        let initial = board.name.chars().next().unwrap_or('?');
        format!(" ▸{initial} ")
    } else {
        format!(" {} ", board.name)
    }
}

/// Places the tab of every board in the one-row board strip.
///
/// Tabs are separated by one cell; the strip scrolls so the selected tab
/// is visible.
#[must_use]
pub fn board_tabs(tree: &BoardTree, selected: usize, area: Rect) -> Vec<(usize, Rect)> {
    let widths: Vec<u16> = tree
        .boards
        .iter()
        .map(|b| {
            let width = Span::raw(board_tab_label(b)).width();
            u16::try_from(width).unwrap_or(u16::MAX).saturating_add(1)
        })
        .collect();
    strip(&widths, selected, area.width)
        .into_iter()
        .map(|(idx, offset, width)| {
            let width = if usize::from(offset) + usize::from(width) < usize::from(area.width) {
                width.saturating_sub(1)
            } else {
                width
            };
            (idx, Rect::new(area.x + offset, area.y, width, 1))
        })
        .collect()
}

/// Returns the area inside a column's borders.
#[must_use]
pub fn column_inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use orcganizer_protocol::CardDraft;

    use super::*;

    fn column_with(cards: usize) -> Column {
        let mut column = Column::new("todo", "To Do");
        column.cards = (0..cards)
            .map(|i| Arc::new(Card::from_draft(format!("t{i}"), "s", CardDraft::default())))
            .collect();
        column
    }

    #[test]
    fn strip_without_scrolling() {
        assert_eq!(strip(&[3, 3, 3], 0, 20), [(0, 0, 3), (1, 3, 3), (2, 6, 3)]);
    }

    #[test]
    fn strip_clips_last_item() {
        assert_eq!(strip(&[5, 5], 0, 7), [(0, 0, 5), (1, 5, 2)]);
    }

    #[test]
    fn strip_scrolls_to_selected() {
        let slots = strip(&[5, 5, 5, 5], 3, 10);
        assert_eq!(slots, [(2, 0, 5), (3, 5, 5)]);
    }

    #[test]
    fn strip_handles_empty_and_zero_space() {
        assert!(strip(&[], 0, 10).is_empty());
        assert!(strip(&[3], 0, 0).is_empty());
    }

    #[test]
    fn strip_clamps_out_of_range_selection() {
        assert_eq!(strip(&[5, 5], 9, 5), [(1, 0, 5)]);
    }

    #[test]
    fn minimized_column_is_narrow() {
        let mut board = Board::with_default_columns("b-1", "Quests");
        Arc::make_mut(&mut board.columns[0]).minimized = true;
        let slots = column_slots(&board, 0, Rect::new(0, 0, 100, 20));
        assert_eq!(slots[0].1.width, MINIMIZED_COLUMN_WIDTH);
        assert_eq!(slots[1].1.x, MINIMIZED_COLUMN_WIDTH);
    }

    #[test]
    fn card_slots_use_card_heights() {
        let mut column = column_with(3);
        Arc::make_mut(&mut column.cards[0]).minimized = true;
        let slots = card_slots(&column, None, Rect::new(1, 1, 20, 30));
        let ys: Vec<u16> = slots.iter().map(|(_, r)| r.y).collect();
        assert_eq!(ys, [1, 1 + MINIMIZED_CARD_HEIGHT, 1 + MINIMIZED_CARD_HEIGHT + CARD_HEIGHT]);
    }

    #[test]
    fn card_slots_scroll_to_selection() {
        let column = column_with(6);
        let slots = card_slots(&column, Some(5), Rect::new(0, 0, 20, CARD_HEIGHT * 2));
        assert_eq!(slots.first().map(|(i, _)| *i), Some(4));
        assert_eq!(slots.last().map(|(i, _)| *i), Some(5));
    }

    #[test]
    fn board_tabs_leave_a_separator() {
        let tree = BoardTree::from_boards([Board::new("b-1", "Ab"), Board::new("b-2", "Cd")]);
        let tabs = board_tabs(&tree, 0, Rect::new(0, 0, 40, 1));
        assert_eq!(tabs, [(0, Rect::new(0, 0, 4, 1)), (1, Rect::new(5, 0, 4, 1))]);
    }

    #[test]
    fn minimized_board_tab_collapses() {
        let mut board = Board::new("b-1", "Guild");
        board.minimized = true;
        assert_eq!(board_tab_label(&board), " ▸G ");
    }

    #[test]
    fn column_inner_strips_borders() {
        assert_eq!(column_inner(Rect::new(2, 3, 10, 8)), Rect::new(3, 4, 8, 6));
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn strip_stays_in_bounds_and_shows_selection(
                sizes in prop::collection::vec(1..40u16, 1..12),
                selected in 0..12usize,
                available in 1..120u16,
            ) {
                let slots = strip(&sizes, selected, available);
                let selected = selected.min(sizes.len() - 1);

                prop_assert!(slots.iter().any(|(idx, _, _)| *idx == selected));
                for window in slots.windows(2) {
                    prop_assert_eq!(window[0].0 + 1, window[1].0);
                    prop_assert_eq!(window[0].1 + window[0].2, window[1].1);
                }
                for (_, offset, size) in slots {
                    prop_assert!(u32::from(offset) + u32::from(size) <= u32::from(available));
                }
            }
        }
    }
}
