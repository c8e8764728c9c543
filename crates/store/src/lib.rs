//! The orcganizer tree store.
//!
//! This crate holds the live board tree and is the only entry point for
//! changing it:
//!
//! - [`store`]: [`TreeStore`], create/update/delete/move with write-through saves
//! - [`drag`]: the drag-session coordinator that turns drops into moves
//! - [`undo`]: the single-slot undo window for card deletions
//! - [`ids`]: injected id and pattern seed generators
//! - [`names`]: generated quest board names
//! - [`error`]: error types

pub mod drag;
pub mod error;
pub mod ids;
pub mod names;
pub mod store;
pub mod undo;

pub use drag::{
    ContainerKey, DragResult, DragSession, DropLocation, ItemKind, MoveOp, ROOT_KEY, commit,
    is_key_safe_id, resolve,
};
pub use error::{BoxError, Result, StoreError};
pub use ids::{IdGenerator, IdKind, RandomIds, SequentialIds};
pub use names::generate_quest_board_name;
pub use store::{Persist, TreeStore};
pub use undo::{DEFAULT_UNDO_WINDOW, PendingUndo, UndoSlot};
