//! Immutable operations on the board tree.
//!
//! Every method here takes `&self` and returns a new [`BoardTree`]. The input
//! tree is never modified, and the returned tree shares all nodes that the
//! operation did not touch. When a referenced board, column or card does not
//! exist the operation is a no-op: it returns a clone that shares every node
//! with the input (see [`BoardTree::shares_nodes_with`]).
//!
//! The tree does not invent ids or pattern seeds; callers pass in fully
//! formed boards, columns and cards.

use std::sync::Arc;

use crate::board::{Board, BoardId, BoardTree, Column, ColumnId};
use crate::card::{Card, CardPatch};
use crate::reorder::{insert_clamped, move_within, remove_at};

/// The position of a card: its board, its column and its index in the column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardLocation {
    /// Owning board.
    pub board: BoardId,
    /// Owning column.
    pub column: ColumnId,
    /// Index within the column.
    pub index: usize,
}

impl CardLocation {
    /// Creates a card location.
    #[must_use]
    pub fn new(board: impl Into<BoardId>, column: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            board: board.into(),
            column: column.into(),
            index,
        }
    }
}

/// A card taken out of a column, with the index it had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedCard {
    /// The removed card.
    pub card: Card,
    /// The index the card had in its column.
    pub index: usize,
}

impl BoardTree {
    /// Applies `edit` to a copy of the board `board_id`.
    ///
    /// Returns `None` if the board does not exist or `edit` reports that it
    /// changed nothing.
    fn edit_board(&self, board_id: &str, edit: impl FnOnce(&mut Board) -> bool) -> Option<Self> {
        let idx = self.board_index(board_id)?;
        let mut next = self.clone();
        edit(Arc::make_mut(&mut next.boards[idx])).then_some(next)
    }

    /// Applies `edit` to a copy of the column `column_id` of board `board_id`.
    fn edit_column(
        &self,
        board_id: &str,
        column_id: &str,
        edit: impl FnOnce(&mut Column) -> bool,
    ) -> Option<Self> {
        self.edit_board(board_id, |board| {
            let Some(idx) = board.column_index(column_id) else {
                return false;
            };
            edit(Arc::make_mut(&mut board.columns[idx]))
        })
    }

    /// Returns the tree to hand back when an operation changed nothing.
    fn unchanged(&self) -> Self {
        self.clone()
    }

    /// Returns a tree with `board` placed first.
    ///
    /// Nothing changes if a board with the same id already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::{Board, BoardTree};
    ///
    /// let tree = BoardTree::new()
    ///     .add_board(Board::with_default_columns("b-1", "First"))
    ///     .add_board(Board::with_default_columns("b-2", "Second"));
    ///
    /// assert_eq!(tree.boards[0].id, "b-2");
    /// assert_eq!(tree.boards[1].id, "b-1");
    /// ```
    #[must_use]
    pub fn add_board(&self, board: Board) -> Self {
        if self.board_index(&board.id).is_some() {
            return self.unchanged();
        }
        let mut next = self.clone();
        next.boards.insert(0, Arc::new(board));
        next
    }

    /// Returns a tree where board `board_id` is called `name`.
    #[must_use]
    pub fn rename_board(&self, board_id: &str, name: &str) -> Self {
        self.edit_board(board_id, |board| replace(&mut board.name, name))
            .unwrap_or_else(|| self.unchanged())
    }

    /// Returns a tree where board `board_id` has header color `color`.
    #[must_use]
    pub fn set_board_color(&self, board_id: &str, color: &str) -> Self {
        self.edit_board(board_id, |board| replace(&mut board.header_color, color))
            .unwrap_or_else(|| self.unchanged())
    }

    /// Returns a tree where board `board_id` is collapsed or expanded.
    #[must_use]
    pub fn toggle_board_minimized(&self, board_id: &str) -> Self {
        self.edit_board(board_id, |board| {
            board.minimized = !board.minimized;
            true
        })
        .unwrap_or_else(|| self.unchanged())
    }

    /// Returns a tree without board `board_id`.
    #[must_use]
    pub fn delete_board(&self, board_id: &str) -> Self {
        let Some(idx) = self.board_index(board_id) else {
            return self.unchanged();
        };
        let mut next = self.clone();
        next.boards.remove(idx);
        next
    }

    /// Returns a tree where the board at `from` sits at `to`.
    #[must_use]
    pub fn move_board(&self, from: usize, to: usize) -> Self {
        let mut next = self.clone();
        if move_within(&mut next.boards, from, to) {
            next
        } else {
            self.unchanged()
        }
    }

    /// Returns a tree with `column` appended to board `board_id`.
    ///
    /// Nothing changes if the board already has a column with the same id.
    #[must_use]
    pub fn add_column(&self, board_id: &str, column: Column) -> Self {
        self.edit_board(board_id, |board| {
            if board.column_index(&column.id).is_some() {
                return false;
            }
            board.columns.push(Arc::new(column));
            true
        })
        .unwrap_or_else(|| self.unchanged())
    }

    /// Returns a tree where column `column_id` is titled `title`.
    #[must_use]
    pub fn rename_column(&self, board_id: &str, column_id: &str, title: &str) -> Self {
        self.edit_column(board_id, column_id, |column| replace(&mut column.title, title))
            .unwrap_or_else(|| self.unchanged())
    }

    /// Returns a tree where column `column_id` has header color `color`.
    #[must_use]
    pub fn set_column_color(&self, board_id: &str, column_id: &str, color: &str) -> Self {
        self.edit_column(board_id, column_id, |column| replace(&mut column.color, color))
            .unwrap_or_else(|| self.unchanged())
    }

    /// Returns a tree where column `column_id` is collapsed or expanded.
    #[must_use]
    pub fn toggle_column_minimized(&self, board_id: &str, column_id: &str) -> Self {
        self.edit_column(board_id, column_id, |column| {
            column.minimized = !column.minimized;
            true
        })
        .unwrap_or_else(|| self.unchanged())
    }

    /// Returns a tree without column `column_id`. Its cards are discarded.
    #[must_use]
    pub fn delete_column(&self, board_id: &str, column_id: &str) -> Self {
        self.edit_board(board_id, |board| {
            let Some(idx) = board.column_index(column_id) else {
                return false;
            };
            board.columns.remove(idx);
            true
        })
        .unwrap_or_else(|| self.unchanged())
    }

    /// Returns a tree where, on board `board_id`, the column at `from` sits at `to`.
    #[must_use]
    pub fn move_column(&self, board_id: &str, from: usize, to: usize) -> Self {
        self.edit_board(board_id, |board| move_within(&mut board.columns, from, to))
            .unwrap_or_else(|| self.unchanged())
    }

    /// Returns a tree with `card` placed at the top of column `column_id`.
    #[must_use]
    pub fn add_card(&self, board_id: &str, column_id: &str, card: Card) -> Self {
        self.insert_card(board_id, column_id, 0, card)
    }

    /// Returns a tree with `card` inserted at `index` in column `column_id`.
    ///
    /// An index past the end appends. Nothing changes if the column already
    /// holds a card with the same id.
    #[must_use]
    pub fn insert_card(&self, board_id: &str, column_id: &str, index: usize, card: Card) -> Self {
        self.edit_column(board_id, column_id, |column| {
            if column.card_index(&card.id).is_some() {
                return false;
            }
            insert_clamped(&mut column.cards, index, Arc::new(card));
            true
        })
        .unwrap_or_else(|| self.unchanged())
    }

    /// Returns a tree where `patch` is merged onto card `card_id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::{Board, BoardTree, Card, CardDraft, CardPatch};
    ///
    /// let tree = BoardTree::new()
    ///     .add_board(Board::with_default_columns("b-1", "Quests"))
    ///     .add_card("b-1", "todo", Card::from_draft("t-1", "s", CardDraft::titled("Old")));
    ///
    /// let tree = tree.update_card("b-1", "todo", "t-1", &CardPatch::new().title("New"));
    /// assert_eq!(tree.card("b-1", "todo", "t-1").unwrap().title, "New");
    /// ```
    #[must_use]
    pub fn update_card(&self, board_id: &str, column_id: &str, card_id: &str, patch: &CardPatch) -> Self {
        self.update_card_with(board_id, column_id, card_id, |_| patch.clone())
    }

    /// Returns a tree where the patch computed by `updater` from the current
    /// card is merged onto card `card_id`.
    ///
    /// Because the patch is computed from the card as it is in this tree, an
    /// updater that flips a field (such as `minimized`) always sees the latest
    /// value.
    #[must_use]
    pub fn update_card_with(
        &self,
        board_id: &str,
        column_id: &str,
        card_id: &str,
        updater: impl FnOnce(&Card) -> CardPatch,
    ) -> Self {
        self.edit_column(board_id, column_id, |column| {
            let Some(idx) = column.card_index(card_id) else {
                return false;
            };
            let patched = column.cards[idx].patched(&updater(&column.cards[idx]));
            if patched == *column.cards[idx] {
                return false;
            }
            column.cards[idx] = Arc::new(patched);
            true
        })
        .unwrap_or_else(|| self.unchanged())
    }

    /// Returns a tree without card `card_id`, along with the removed card and
    /// the index it had.
    #[must_use]
    pub fn remove_card(
        &self,
        board_id: &str,
        column_id: &str,
        card_id: &str,
    ) -> (Self, Option<RemovedCard>) {
        let mut removed = None;
        let next = self.edit_column(board_id, column_id, |column| {
            let Some(index) = column.card_index(card_id) else {
                return false;
            };
            removed = remove_at(&mut column.cards, index).map(|card| RemovedCard {
                card: Arc::unwrap_or_clone(card),
                index,
            });
            removed.is_some()
        });
        match next {
            Some(next) => (next, removed),
            None => (self.unchanged(), None),
        }
    }

    /// Returns a tree where the card at `from` has moved to `to`.
    ///
    /// The card is taken out of its source column and inserted into the
    /// destination column in a single step: the returned tree never holds the
    /// card twice, nor loses it. `to.index` is the index the card occupies
    /// after the move; it is clamped to the destination length.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::{Board, BoardTree, Card, CardDraft, CardLocation};
    ///
    /// let tree = BoardTree::new()
    ///     .add_board(Board::with_default_columns("b-1", "Quests"))
    ///     .add_card("b-1", "todo", Card::from_draft("t-1", "s", CardDraft::titled("C1")));
    ///
    /// let tree = tree.move_card(
    ///     &CardLocation::new("b-1", "todo", 0),
    ///     &CardLocation::new("b-1", "doing", 0),
    /// );
    ///
    /// assert!(tree.column("b-1", "todo").unwrap().is_empty());
    /// assert_eq!(tree.column("b-1", "doing").unwrap().card_ids(), ["t-1"]);
    /// ```
    #[must_use]
    pub fn move_card(&self, from: &CardLocation, to: &CardLocation) -> Self {
        let Some(source) = self.column(&from.board, &from.column) else {
            return self.unchanged();
        };
        let Some(destination) = self.column(&to.board, &to.column) else {
            return self.unchanged();
        };
        let Some(card) = source.cards.get(from.index) else {
            return self.unchanged();
        };

        if from.board == to.board && from.column == to.column {
            return self
                .edit_column(&from.board, &from.column, |column| {
                    move_within(&mut column.cards, from.index, to.index)
                })
                .unwrap_or_else(|| self.unchanged());
        }

        // A card id may already be taken in the destination column.
        if destination.card_index(&card.id).is_some() {
            return self.unchanged();
        }

        let card = Arc::clone(card);
        let Some(without) = self.edit_column(&from.board, &from.column, |column| {
            remove_at(&mut column.cards, from.index).is_some()
        }) else {
            return self.unchanged();
        };
        without
            .edit_column(&to.board, &to.column, |column| {
                insert_clamped(&mut column.cards, to.index, card);
                true
            })
            .unwrap_or_else(|| self.unchanged())
    }
}

/// Replaces `target` with `value`, reporting whether it changed.
fn replace(target: &mut String, value: &str) -> bool {
    if target == value {
        return false;
    }
    value.clone_into(target);
    true
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::card::CardDraft;
    use proptest::prelude::*;

    fn tree_with(todo: usize, doing: usize) -> BoardTree {
        let mut tree = BoardTree::new().add_board(Board::with_default_columns("b", "Board"));
        for i in 0..todo {
            tree = tree.insert_card("b", "todo", i, Card::from_draft(format!("a{i}"), "s", CardDraft::default()));
        }
        for i in 0..doing {
            tree = tree.insert_card("b", "doing", i, Card::from_draft(format!("b{i}"), "s", CardDraft::default()));
        }
        tree
    }

    fn all_ids(tree: &BoardTree) -> Vec<String> {
        let mut ids: Vec<String> = tree
            .boards
            .iter()
            .flat_map(|b| b.columns.iter())
            .flat_map(|c| c.cards.iter())
            .map(|c| c.id.clone())
            .collect();
        ids.sort();
        ids
    }

    proptest! {
        /// Card moves never duplicate or drop a card, wherever they land.
        #[test]
        fn move_card_conserves_cards(
            todo in 0usize..8,
            doing in 0usize..8,
            from_doing in any::<bool>(),
            to_doing in any::<bool>(),
            from in 0usize..10,
            to in 0usize..10,
        ) {
            let tree = tree_with(todo, doing);
            let column = |d: bool| if d { "doing" } else { "todo" };
            let next = tree.move_card(
                &CardLocation::new("b", column(from_doing), from),
                &CardLocation::new("b", column(to_doing), to),
            );
            prop_assert_eq!(next.card_count(), tree.card_count());
            prop_assert_eq!(all_ids(&next), all_ids(&tree));
        }

        /// Column moves keep every column exactly once.
        #[test]
        fn move_column_conserves_columns(from in 0usize..5, to in 0usize..5) {
            let tree = tree_with(2, 1);
            let next = tree.move_column("b", from, to);
            let mut before: Vec<_> = tree.boards[0].columns.iter().map(|c| c.id.clone()).collect();
            let mut after: Vec<_> = next.boards[0].columns.iter().map(|c| c.id.clone()).collect();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }
    }
}
