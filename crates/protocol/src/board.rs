//! Quest board structure.
//!
//! This module defines the three-level tree the application works on: a
//! [`BoardTree`] holds ordered [`Board`]s, each board holds ordered
//! [`Column`]s and each column holds ordered [`Card`]s.
//!
//! Children are stored behind [`Arc`] so that an updated tree shares every
//! node it did not touch with the tree it was derived from.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::card::{Card, CardId};
use crate::error::{ProtocolError, Result};

/// Identifier of a board, unique within the tree.
pub type BoardId = String;

/// Identifier of a column, unique within its board.
pub type ColumnId = String;

/// Name given to boards created without a name.
pub const DEFAULT_BOARD_NAME: &str = "New Quest board";

/// Ids and titles of the columns every new board starts with.
pub const DEFAULT_COLUMNS: [(&str, &str); 3] = [("todo", "To Do"), ("doing", "Doing"), ("done", "Done")];

/// A lane of cards on a board.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::Column;
///
/// let column = Column::new("todo", "To Do");
/// assert!(column.is_empty());
/// assert_eq!(column.title, "To Do");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Identifier, unique within the owning board.
    pub id: ColumnId,
    /// Header title.
    pub title: String,
    /// Header color (a CSS color, empty for the theme default).
    #[serde(default)]
    pub color: String,
    /// Whether the column is collapsed to its header.
    #[serde(default)]
    pub minimized: bool,
    /// Cards in display order, top first.
    #[serde(default)]
    pub cards: Vec<Arc<Card>>,
}

impl Column {
    /// Creates an empty column.
    #[must_use]
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: String::new(),
            minimized: false,
            cards: Vec::new(),
        }
    }

    /// Returns the number of cards in this column.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns `true` if the column holds no card.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Returns the position of a card by id.
    #[must_use]
    pub fn card_index(&self, id: &str) -> Option<usize> {
        self.cards.iter().position(|c| c.id == id)
    }

    /// Returns a card by id.
    #[must_use]
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id).map(AsRef::as_ref)
    }

    /// Returns the card ids in display order.
    #[must_use]
    pub fn card_ids(&self) -> Vec<&CardId> {
        self.cards.iter().map(|c| &c.id).collect()
    }
}

/// A named quest board.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::Board;
///
/// let board = Board::with_default_columns("b-1", "The Guild of Flow");
/// let titles: Vec<_> = board.columns.iter().map(|c| c.title.as_str()).collect();
/// assert_eq!(titles, ["To Do", "Doing", "Done"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Identifier, unique within the tree.
    pub id: BoardId,
    /// Display name.
    pub name: String,
    /// Whether the board is collapsed to its header.
    #[serde(default)]
    pub minimized: bool,
    /// Header color (a CSS color, empty for the theme default).
    #[serde(default)]
    pub header_color: String,
    /// Columns in display order, left first.
    #[serde(default)]
    pub columns: Vec<Arc<Column>>,
}

impl Board {
    /// Creates a board without columns.
    #[must_use]
    pub fn new(id: impl Into<BoardId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            minimized: false,
            header_color: String::new(),
            columns: Vec::new(),
        }
    }

    /// Creates a board with the `To Do`, `Doing` and `Done` columns.
    ///
    /// A blank `name` is replaced with [`DEFAULT_BOARD_NAME`].
    #[must_use]
    pub fn with_default_columns(id: impl Into<BoardId>, name: &str) -> Self {
        let name = name.trim();
        let name = if name.is_empty() { DEFAULT_BOARD_NAME } else { name };
        let mut board = Self::new(id, name);
        board.columns = DEFAULT_COLUMNS
            .iter()
            .map(|(id, title)| Arc::new(Column::new(*id, *title)))
            .collect();
        board
    }

    /// Returns the position of a column by id.
    #[must_use]
    pub fn column_index(&self, id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Returns a column by id.
    #[must_use]
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id).map(AsRef::as_ref)
    }

    /// Returns the number of cards across all columns.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.columns.iter().map(|c| c.len()).sum()
    }
}

/// Every board the user has, in display order.
///
/// This is the unit of persistence: the whole tree is saved and loaded at
/// once. It serializes as a bare JSON array of boards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardTree {
    /// Boards in display order, top first.
    pub boards: Vec<Arc<Board>>,
}

impl BoardTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree from owned boards.
    #[must_use]
    pub fn from_boards(boards: impl IntoIterator<Item = Board>) -> Self {
        Self {
            boards: boards.into_iter().map(Arc::new).collect(),
        }
    }

    /// Returns the number of boards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Returns `true` if there is no board.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }

    /// Returns the position of a board by id.
    #[must_use]
    pub fn board_index(&self, id: &str) -> Option<usize> {
        self.boards.iter().position(|b| b.id == id)
    }

    /// Returns a board by id.
    #[must_use]
    pub fn board(&self, id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == id).map(AsRef::as_ref)
    }

    /// Returns a column by board and column id.
    #[must_use]
    pub fn column(&self, board_id: &str, column_id: &str) -> Option<&Column> {
        self.board(board_id)?.column(column_id)
    }

    /// Returns a card by board, column and card id.
    #[must_use]
    pub fn card(&self, board_id: &str, column_id: &str, card_id: &str) -> Option<&Card> {
        self.column(board_id, column_id)?.card(card_id)
    }

    /// Returns `true` if a board with this id exists.
    #[must_use]
    pub fn contains_board(&self, id: &str) -> bool {
        self.board_index(id).is_some()
    }

    /// Returns `true` if the column exists on the given board.
    #[must_use]
    pub fn contains_column(&self, board_id: &str, column_id: &str) -> bool {
        self.column(board_id, column_id).is_some()
    }

    /// Returns `true` if the card exists in the given column.
    #[must_use]
    pub fn contains_card(&self, board_id: &str, column_id: &str, card_id: &str) -> bool {
        self.card(board_id, column_id, card_id).is_some()
    }

    /// Returns the total number of cards in the tree.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.boards.iter().map(|b| b.card_count()).sum()
    }

    /// Returns `true` if both trees share every board node.
    ///
    /// Operations that change nothing hand back a tree for which this holds,
    /// so it is a cheap way to detect a no-op.
    #[must_use]
    pub fn shares_nodes_with(&self, other: &Self) -> bool {
        self.boards.len() == other.boards.len()
            && self
                .boards
                .iter()
                .zip(&other.boards)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }

    /// Serializes the tree to a JSON array of boards.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::SerializationFailed`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(ProtocolError::SerializationFailed)
    }

    /// Parses a tree from a JSON array of well-formed boards.
    ///
    /// This is strict: stored data of unknown quality goes through the
    /// persistence layer's normalization instead.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::DeserializationFailed`] if the JSON does not
    /// describe a tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::BoardTree;
    ///
    /// let tree = BoardTree::from_json(r#"[{"id":"b-1","name":"Quests"}]"#).unwrap();
    /// assert!(tree.contains_board("b-1"));
    /// assert!(BoardTree::from_json("{}").is_err());
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ProtocolError::DeserializationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardDraft;

    #[test]
    fn default_columns_are_empty() {
        let board = Board::with_default_columns("b-1", "Quests");
        let ids: Vec<_> = board.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["todo", "doing", "done"]);
        assert!(board.columns.iter().all(|c| c.is_empty()));
        assert!(board.columns.iter().all(|c| !c.minimized && c.color.is_empty()));
    }

    #[test]
    fn blank_board_name_gets_default() {
        let board = Board::with_default_columns("b-1", "   ");
        assert_eq!(board.name, DEFAULT_BOARD_NAME);

        let board = Board::with_default_columns("b-2", "  The Band of Quests ");
        assert_eq!(board.name, "The Band of Quests");
    }

    #[test]
    fn column_lookups() {
        let mut column = Column::new("todo", "To Do");
        column
            .cards
            .push(Arc::new(Card::from_draft("t-1", "s", CardDraft::titled("A"))));
        column
            .cards
            .push(Arc::new(Card::from_draft("t-2", "s", CardDraft::titled("B"))));

        assert_eq!(column.len(), 2);
        assert_eq!(column.card_index("t-2"), Some(1));
        assert_eq!(column.card("t-1").map(|c| c.title.as_str()), Some("A"));
        assert!(column.card("t-3").is_none());
        assert_eq!(column.card_ids(), ["t-1", "t-2"]);
    }

    #[test]
    fn tree_lookups() {
        let tree = BoardTree::from_boards([
            Board::with_default_columns("b-1", "One"),
            Board::with_default_columns("b-2", "Two"),
        ]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.board_index("b-2"), Some(1));
        assert!(tree.column("b-1", "doing").is_some());
        assert!(tree.column("b-3", "doing").is_none());
        assert!(tree.card("b-1", "todo", "t-1").is_none());
        assert_eq!(tree.card_count(), 0);
    }

    #[test]
    fn tree_serializes_as_array() {
        let tree = BoardTree::from_boards([Board::with_default_columns("b-1", "One")]);
        let json = serde_json::to_value(&tree).expect("serialize");

        assert!(json.is_array());
        assert_eq!(json[0]["id"], "b-1");
        assert_eq!(json[0]["headerColor"], "");
        assert_eq!(json[0]["columns"][1]["id"], "doing");
    }

    #[test]
    fn tree_serialization_roundtrip() {
        let mut board = Board::with_default_columns("b-1", "One");
        Arc::make_mut(&mut board.columns[0])
            .cards
            .push(Arc::new(Card::from_draft("t-1", "x1y2z3", CardDraft::titled("Card"))));
        let tree = BoardTree::from_boards([board]);

        let json = tree.to_json().expect("serialize");
        let parsed = BoardTree::from_json(&json).expect("deserialize");
        assert_eq!(tree, parsed);
        assert!(parsed.contains_card("b-1", "todo", "t-1"));
        assert!(!parsed.contains_column("b-1", "later"));
    }

    #[test]
    fn clones_share_nodes() {
        let tree = BoardTree::from_boards([Board::with_default_columns("b-1", "One")]);
        let copy = tree.clone();
        assert!(tree.shares_nodes_with(&copy));

        let rebuilt = BoardTree::from_boards([Board::with_default_columns("b-1", "One")]);
        assert_eq!(tree, rebuilt);
        assert!(!tree.shares_nodes_with(&rebuilt));
    }
}
