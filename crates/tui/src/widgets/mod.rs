//! Widget components for the orcganizer TUI.
//!
//! This module provides reusable rendering functions for the quest board UI,
//! organized into focused submodules for each visual component.
//!
//! # Overview
//!
//! Each widget is a pure function that renders state to a buffer. This
//! enables easy testing and composition.
//!
//! # Modules
//!
//! - [`board`]: Renders the columns of one board side by side
//! - [`board_strip`]: Renders the tab strip listing every board
//! - [`column`]: Renders a column with its cards and drop marker
//! - [`card`]: Renders a card with its header pattern
//! - [`detail`]: Renders the card detail screen
//! - [`dialog`]: Renders text prompts and confirmations
//! - [`help`]: Renders the keybinding overlay
//! - [`status_bar`]: Renders the footer with feedback and keybinding hints
//! - [`welcome`]: Renders the first-run screen
//!
//! # Card colors
//!
//! A card's border takes the first stop of its gradient pattern, so cards
//! are told apart by color at a glance. Dither cards use a neutral gray with
//! dots along the top edge.
//!
//! # Example
//!
//! ```
//! use orcganizer_protocol::dummy::sample_tree;
//! use orcganizer_tui::widgets;
//! use ratatui::{buffer::Buffer, layout::Rect};
//!
//! let tree = sample_tree();
//! let area = Rect::new(0, 0, 100, 24);
//! let mut buf = Buffer::empty(area);
//!
//! widgets::render_board(&tree.boards[0], 0, Some(0), None, area, &mut buf);
//! ```

pub mod board;
pub mod board_strip;
pub mod card;
pub mod column;
pub mod detail;
pub mod dialog;
pub mod help;
pub mod status_bar;
pub mod welcome;

// Re-export primary rendering functions for convenience
pub use board::render_board;
pub use board_strip::render_board_strip;
pub use card::{CardState, card_accent, render_card};
pub use column::{ColumnView, render_column};
pub use detail::{description_area_dimensions, max_scroll_offset, render_detail_panel};
pub use dialog::{render_confirm, render_prompt};
pub use help::render_help_overlay;
pub use status_bar::{render_status_bar, render_status_bar_with_message};
pub use welcome::render_welcome;

#[cfg(test)]
mod tests;
