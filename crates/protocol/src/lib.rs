//! Shared protocol types for the orcganizer application.
//!
//! This crate defines the quest board tree and every pure operation on it:
//! boards hold columns, columns hold cards, and each operation returns a new
//! tree that shares all untouched nodes with its input.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`card`]: Cards and their value types (priority, quest kind, icon, pattern)
//! - [`board`]: Boards, columns and the [`BoardTree`]
//! - [`reorder`]: Splice helpers every reordering is built on
//! - [`tree`]: Immutable create/update/delete/move operations
//! - [`pattern`]: Deterministic card header patterns
//! - [`print`]: Standalone printable card documents
//! - [`message`]: TUI event messages
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! Moving a card across columns:
//!
//! ```
//! use orcganizer_protocol::{Board, BoardTree, Card, CardDraft, CardLocation};
//!
//! let tree = BoardTree::new()
//!     .add_board(Board::with_default_columns("b-1", "The Order of Flow"))
//!     .add_card("b-1", "todo", Card::from_draft("t-1", "x1y2z3", CardDraft::titled("Scout")));
//!
//! let moved = tree.move_card(
//!     &CardLocation::new("b-1", "todo", 0),
//!     &CardLocation::new("b-1", "done", 0),
//! );
//!
//! // The original tree is untouched.
//! assert!(tree.contains_card("b-1", "todo", "t-1"));
//! assert!(moved.contains_card("b-1", "done", "t-1"));
//! ```

pub mod board;
pub mod card;
pub mod dummy;
pub mod error;
pub mod message;
pub mod pattern;
pub mod print;
pub mod reorder;
pub mod tree;

// Re-export primary types at crate root for convenience
pub use board::{
    Board, BoardId, BoardTree, Column, ColumnId, DEFAULT_BOARD_NAME, DEFAULT_COLUMNS,
};
pub use card::{Card, CardDraft, CardId, CardPatch, Icon, PatternType, Priority, TaskType};
pub use error::{ProtocolError, Result};
pub use message::Message;
pub use pattern::CardPattern;
pub use print::render_card_document;
pub use tree::{CardLocation, RemovedCard};
