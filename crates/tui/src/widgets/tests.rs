//! Snapshot tests for widget rendering.
//!
//! These tests use insta to capture and verify the visual output of widgets.

use std::sync::Arc;

use orcganizer_protocol::{Card, CardDraft, Column, dummy::sample_tree};
use orcganizer_store::{ContainerKey, DragSession, DropLocation, ItemKind};
use ratatui::{buffer::Buffer, layout::Rect};

use super::{
    ColumnView, render_board_strip, render_column, render_confirm, render_status_bar,
    render_welcome, status_bar::mode_hints,
};
use crate::{
    state::{Mode, PendingAction},
    test_utils::buffer_to_string,
};

fn idle_view() -> ColumnView<'static> {
    ColumnView {
        board_id: "b-1",
        index: 0,
        focused: false,
        selected_card: None,
        drag: None,
    }
}

#[test]
fn snapshot_welcome() {
    let area = Rect::new(0, 0, 48, 9);
    let mut buf = Buffer::empty(area);

    render_welcome(area, &mut buf);

    insta::assert_snapshot!(buffer_to_string(&buf), @r"
    ╭──────────────────────────────────────────────╮
    │                                              │
    │          Welcome to your Quest board         │
    │   Gather your tasks and lead them to Done.   │
    │                                              │
    │                 [Enter] Begin                │
    │                                              │
    │                                              │
    ╰──────────────────────────────────────────────╯
    ");
}

#[test]
fn snapshot_empty_column() {
    let column = Column::new("todo", "To Do");
    let area = Rect::new(0, 0, 20, 5);
    let mut buf = Buffer::empty(area);

    render_column(&column, &idle_view(), area, &mut buf);

    insta::assert_snapshot!(buffer_to_string(&buf), @r"
    ╭ To Do (0) ───────╮
    │                  │
    │     No quests    │
    │                  │
    ╰──────────────────╯
    ");
}

#[test]
fn snapshot_minimized_column() {
    let mut column = Column::new("todo", "To Do");
    column.minimized = true;
    column.cards = (0..2)
        .map(|i| Arc::new(Card::from_draft(format!("t{i}"), "s", CardDraft::default())))
        .collect();
    let area = Rect::new(0, 0, 8, 6);
    let mut buf = Buffer::empty(area);

    render_column(&column, &idle_view(), area, &mut buf);

    insta::assert_snapshot!(buffer_to_string(&buf), @r"
    ╭ 2 ───╮
    │   T  │
    │   o  │
    │      │
    │   D  │
    ╰──────╯
    ");
}

#[test]
fn snapshot_confirm_reset() {
    let area = Rect::new(0, 0, 64, 6);
    let mut buf = Buffer::empty(area);

    render_confirm(&PendingAction::ResetAll, area, &mut buf);

    insta::assert_snapshot!(buffer_to_string(&buf), @r"
    ╭ Are you sure? ───────────────────────────────────────────────╮
    │Delete every board and task?                                  │
    │                                                              │
    │                                                              │
    │[y] Yes  [n] No                                               │
    ╰──────────────────────────────────────────────────────────────╯
    ");
}

#[test]
fn snapshot_board_strip() {
    let tree = sample_tree();
    let area = Rect::new(0, 0, 50, 1);
    let mut buf = Buffer::empty(area);

    render_board_strip(&tree, 0, None, area, &mut buf);

    insta::assert_snapshot!(buffer_to_string(&buf).trim(), @"The Fellowship of Focus │ The Guild of Quests │");
}

#[test]
fn snapshot_status_bar_in_drag_mode() {
    let area = Rect::new(0, 0, 60, 1);
    let mut buf = Buffer::empty(area);
    let mode = Mode::Drag(DragSession::begin(
        ItemKind::Card,
        DropLocation::new(ContainerKey::column("b-1", "todo"), 0),
    ));

    render_status_bar(mode_hints(&mode), area, &mut buf);

    insta::assert_snapshot!(buffer_to_string(&buf).trim_end(), @"←→↑↓ Move  Tab Board  Enter Drop  Esc Cancel");
}
