//! The drag-session coordinator.
//!
//! A drag gesture starts on an item in some container, hovers over zero or
//! more drop targets, and ends either on a target or nowhere. Only the end of
//! the gesture touches the store: [`DragSession::preview`] records where the
//! item would land, [`DragSession::finish`] produces a [`DragResult`], and
//! [`commit`] turns that result into exactly one [`TreeStore`] move.
//!
//! Containers are addressed by textual keys:
//!
//! | Key | Holds |
//! |-----|-------|
//! | `boards-root` | boards |
//! | `<boardId>` | the columns of a board |
//! | `<boardId>:<columnId>` | the cards of a column |

use std::fmt;
use std::str::FromStr;

use orcganizer_protocol::{BoardId, BoardTree, CardLocation, ColumnId};
use tracing::debug;

use crate::error::StoreError;
use crate::store::TreeStore;

/// Key of the list of boards.
pub const ROOT_KEY: &str = "boards-root";

const SEPARATOR: char = ':';

/// Returns `true` if `id` can appear in a container key without being
/// mistaken for another container.
///
/// # Examples
///
/// ```
/// use orcganizer_store::drag::is_key_safe_id;
///
/// assert!(is_key_safe_id("b-1"));
/// assert!(!is_key_safe_id("a:b"));
/// assert!(!is_key_safe_id("boards-root"));
/// assert!(!is_key_safe_id(""));
/// ```
#[must_use]
pub fn is_key_safe_id(id: &str) -> bool {
    !id.is_empty() && id != ROOT_KEY && !id.contains(SEPARATOR)
}

/// What is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A board, reordered among boards.
    Board,
    /// A column, reordered within its board.
    Column,
    /// A card, moved within or across columns and boards.
    Card,
}

/// A list an item can be dragged out of or dropped into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContainerKey {
    /// The list of boards.
    Root,
    /// The columns of a board.
    Board(BoardId),
    /// The cards of a column.
    Column {
        /// Owning board.
        board: BoardId,
        /// The column.
        column: ColumnId,
    },
}

impl ContainerKey {
    /// Creates the key of a column's card list.
    #[must_use]
    pub fn column(board: impl Into<BoardId>, column: impl Into<ColumnId>) -> Self {
        Self::Column {
            board: board.into(),
            column: column.into(),
        }
    }

    /// Returns `true` if items of `kind` live in this container.
    #[must_use]
    pub fn holds(&self, kind: ItemKind) -> bool {
        matches!(
            (self, kind),
            (Self::Root, ItemKind::Board)
                | (Self::Board(_), ItemKind::Column)
                | (Self::Column { .. }, ItemKind::Card)
        )
    }
}

impl fmt::Display for ContainerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str(ROOT_KEY),
            Self::Board(board) => f.write_str(board),
            Self::Column { board, column } => write!(f, "{board}{SEPARATOR}{column}"),
        }
    }
}

impl FromStr for ContainerKey {
    type Err = StoreError;

    /// Parses a container key.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_store::ContainerKey;
    ///
    /// let key: ContainerKey = "b-1:todo".parse().unwrap();
    /// assert_eq!(key, ContainerKey::column("b-1", "todo"));
    /// assert_eq!("boards-root".parse::<ContainerKey>().unwrap(), ContainerKey::Root);
    /// assert!("b-1:".parse::<ContainerKey>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StoreError::InvalidContainerKey(s.to_string());
        if s == ROOT_KEY {
            return Ok(Self::Root);
        }
        match s.split_once(SEPARATOR) {
            Some((board, column)) if !board.is_empty() && !column.is_empty() => {
                Ok(Self::column(board, column))
            }
            Some(_) => Err(invalid()),
            None if s.is_empty() => Err(invalid()),
            None => Ok(Self::Board(s.to_string())),
        }
    }
}

/// A position in a container.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropLocation {
    /// The container.
    pub container: ContainerKey,
    /// Index within the container.
    pub index: usize,
}

impl DropLocation {
    /// Creates a location.
    #[must_use]
    pub fn new(container: ContainerKey, index: usize) -> Self {
        Self { container, index }
    }
}

/// The outcome of a drag gesture.
///
/// `destination` is the index the item should occupy after it has been
/// taken out of its source list. It is `None` when the item was dropped
/// outside any target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragResult {
    /// What was dragged.
    pub kind: ItemKind,
    /// Where it was picked up.
    pub source: DropLocation,
    /// Where it was dropped.
    pub destination: Option<DropLocation>,
}

/// A single store move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOp {
    /// Reorder boards.
    Board {
        /// Current index.
        from: usize,
        /// Index after the move.
        to: usize,
    },
    /// Reorder the columns of one board.
    Column {
        /// The board.
        board: BoardId,
        /// Current index.
        from: usize,
        /// Index after the move.
        to: usize,
    },
    /// Move a card.
    Card {
        /// Current position.
        from: CardLocation,
        /// Position after the move.
        to: CardLocation,
    },
}

/// Translates a drag result into a move, or `None` if the drop is invalid.
///
/// A drop is rejected when it has no destination, when either container
/// does not hold items of the dragged kind, when a column would change
/// boards, when a referenced board or column does not exist, or when the
/// source index is out of range.
#[must_use]
pub fn resolve(tree: &BoardTree, result: &DragResult) -> Option<MoveOp> {
    let destination = result.destination.as_ref()?;
    let source = &result.source;
    if !source.container.holds(result.kind) || !destination.container.holds(result.kind) {
        return None;
    }

    match (&source.container, &destination.container) {
        (ContainerKey::Root, ContainerKey::Root) => {
            (source.index < tree.len()).then_some(MoveOp::Board {
                from: source.index,
                to: destination.index,
            })
        }
        (ContainerKey::Board(from_board), ContainerKey::Board(to_board)) => {
            if from_board != to_board {
                return None;
            }
            let board = tree.board(from_board)?;
            (source.index < board.columns.len()).then(|| MoveOp::Column {
                board: from_board.clone(),
                from: source.index,
                to: destination.index,
            })
        }
        (
            ContainerKey::Column {
                board: from_board,
                column: from_column,
            },
            ContainerKey::Column {
                board: to_board,
                column: to_column,
            },
        ) => {
            let column = tree.column(from_board, from_column)?;
            if source.index >= column.len() || !tree.contains_column(to_board, to_column) {
                return None;
            }
            Some(MoveOp::Card {
                from: CardLocation::new(from_board.as_str(), from_column.as_str(), source.index),
                to: CardLocation::new(to_board.as_str(), to_column.as_str(), destination.index),
            })
        }
        _ => None,
    }
}

/// Resolves `result` and applies it to `store` as one transition.
///
/// Returns `true` if the tree changed.
pub fn commit(store: &mut TreeStore, result: &DragResult) -> bool {
    let Some(op) = resolve(store.tree(), result) else {
        debug!(?result, "drop rejected");
        return false;
    };
    let changed = store.apply_move(&op);
    debug!(?op, changed, "drop committed");
    changed
}

/// An in-progress drag gesture.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::CardDraft;
/// use orcganizer_store::{
///     commit, ContainerKey, DragSession, DropLocation, ItemKind, SequentialIds, TreeStore,
/// };
///
/// let mut store = TreeStore::new(SequentialIds::new());
/// let board = store.create_board("Quests");
/// store.create_card(&board.id, "todo", CardDraft::titled("C1"));
///
/// let mut session = DragSession::begin(
///     ItemKind::Card,
///     DropLocation::new(ContainerKey::column(&board.id, "todo"), 0),
/// );
/// session.preview(Some(DropLocation::new(ContainerKey::column(&board.id, "done"), 0)));
///
/// assert!(commit(&mut store, &session.finish()));
/// assert_eq!(store.tree().column(&board.id, "done").unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    kind: ItemKind,
    source: DropLocation,
    hover: Option<DropLocation>,
}

impl DragSession {
    /// Starts dragging an item of `kind` from `source`.
    ///
    /// The item initially hovers over its own position.
    #[must_use]
    pub fn begin(kind: ItemKind, source: DropLocation) -> Self {
        Self {
            kind,
            hover: Some(source.clone()),
            source,
        }
    }

    /// Returns what is being dragged.
    #[must_use]
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Returns where the item was picked up.
    #[must_use]
    pub fn source(&self) -> &DropLocation {
        &self.source
    }

    /// Returns where the item would land if dropped now.
    #[must_use]
    pub fn hover(&self) -> Option<&DropLocation> {
        self.hover.as_ref()
    }

    /// Records the current drop target. `None` means outside any target.
    pub fn preview(&mut self, destination: Option<DropLocation>) {
        self.hover = destination;
    }

    /// Ends the gesture without a destination.
    #[must_use]
    pub fn cancel(self) -> DragResult {
        DragResult {
            kind: self.kind,
            source: self.source,
            destination: None,
        }
    }

    /// Ends the gesture on the last previewed target.
    #[must_use]
    pub fn finish(self) -> DragResult {
        DragResult {
            kind: self.kind,
            source: self.source,
            destination: self.hover,
        }
    }
}
