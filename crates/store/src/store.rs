//! The tree store.
//!
//! [`TreeStore`] owns the current [`BoardTree`] and is the only place that
//! replaces it. Every operation computes the next tree with the pure
//! operations from [`orcganizer_protocol::tree`], commits it only if
//! something changed, then writes the whole tree through to the configured
//! [`Persist`] sink.
//!
//! Operations that reference a missing board, column or card are no-ops and
//! report `false` (or `None`).

use std::fmt;
use std::time::{Duration, Instant};

use orcganizer_protocol::{
    Board, BoardTree, Card, CardDraft, CardLocation, CardPatch, Column,
};
use tracing::{debug, instrument, warn};

use crate::drag::MoveOp;
use crate::error::Result;
use crate::ids::{IdGenerator, IdKind};
use crate::undo::{PendingUndo, UndoSlot};

/// A sink the store writes the tree to after every committed change.
pub trait Persist: fmt::Debug {
    /// Writes the whole tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree could not be written. The store logs it
    /// and carries on.
    fn persist(&mut self, tree: &BoardTree) -> Result<()>;

    /// Removes everything the sink has stored.
    ///
    /// The default writes an empty tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data could not be removed.
    fn clear(&mut self) -> Result<()> {
        self.persist(&BoardTree::new())
    }
}

/// Holds the board tree and applies every change to it.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::CardDraft;
/// use orcganizer_store::{SequentialIds, TreeStore};
///
/// let mut store = TreeStore::new(SequentialIds::new());
/// let board = store.create_board("The Order of Flow");
/// let card = store
///     .create_card(&board.id, "todo", CardDraft::titled("Slay the backlog"))
///     .expect("column exists");
///
/// assert_eq!(store.tree().card(&board.id, "todo", &card.id), Some(&card));
/// ```
#[derive(Debug)]
pub struct TreeStore {
    tree: BoardTree,
    ids: Box<dyn IdGenerator + Send>,
    sink: Option<Box<dyn Persist + Send>>,
    undo: UndoSlot,
}

impl TreeStore {
    /// Creates a store holding an empty tree.
    #[must_use]
    pub fn new(ids: impl IdGenerator + Send + 'static) -> Self {
        Self::with_tree(BoardTree::new(), ids)
    }

    /// Creates a store holding `tree`.
    #[must_use]
    pub fn with_tree(tree: BoardTree, ids: impl IdGenerator + Send + 'static) -> Self {
        Self {
            tree,
            ids: Box::new(ids),
            sink: None,
            undo: UndoSlot::default(),
        }
    }

    /// Writes every committed change through to `sink`.
    #[must_use]
    pub fn with_persist(mut self, sink: impl Persist + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Sets how long a deleted card can be restored (clamped to 5-8 seconds).
    #[must_use]
    pub fn with_undo_window(mut self, window: Duration) -> Self {
        self.undo = UndoSlot::new(window);
        self
    }

    /// Returns the current tree.
    #[must_use]
    pub fn tree(&self) -> &BoardTree {
        &self.tree
    }

    /// Returns a fresh pattern seed from the store's generator.
    pub fn pattern_seed(&mut self) -> String {
        self.ids.pattern_seed()
    }

    /// Replaces the tree with `next` if it differs, and saves it.
    fn commit(&mut self, next: BoardTree) -> bool {
        if next.shares_nodes_with(&self.tree) {
            return false;
        }
        self.tree = next;
        self.save();
        true
    }

    fn save(&mut self) {
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if let Err(err) = sink.persist(&self.tree) {
            warn!(error = %err, "failed to save boards, keeping in-memory state");
        }
    }

    // --- Boards ---

    /// Forges a new board with the default columns and places it first.
    ///
    /// A blank `name` becomes `New Quest board`.
    #[instrument(skip(self))]
    pub fn create_board(&mut self, name: &str) -> Board {
        let tree = &self.tree;
        let id = self.ids.fresh_id(IdKind::Board, &|id: &str| tree.contains_board(id));
        let board = Board::with_default_columns(id, name);
        debug!(id = %board.id, name = %board.name, "created board");
        let next = self.tree.add_board(board.clone());
        self.commit(next);
        board
    }

    /// Renames a board.
    pub fn rename_board(&mut self, board_id: &str, name: &str) -> bool {
        let next = self.tree.rename_board(board_id, name);
        self.commit(next)
    }

    /// Sets the header color of a board.
    pub fn set_board_color(&mut self, board_id: &str, color: &str) -> bool {
        let next = self.tree.set_board_color(board_id, color);
        self.commit(next)
    }

    /// Collapses or expands a board.
    pub fn toggle_board_minimized(&mut self, board_id: &str) -> bool {
        let next = self.tree.toggle_board_minimized(board_id);
        self.commit(next)
    }

    /// Deletes a board and everything on it.
    #[instrument(skip(self))]
    pub fn delete_board(&mut self, board_id: &str) -> bool {
        let next = self.tree.delete_board(board_id);
        self.commit(next)
    }

    /// Moves the board at `from` to `to`.
    pub fn move_board(&mut self, from: usize, to: usize) -> bool {
        let next = self.tree.move_board(from, to);
        self.commit(next)
    }

    // --- Columns ---

    /// Appends a column to a board and returns it.
    ///
    /// A blank `title` becomes `Column {n}`, `n` being the new column's
    /// 1-based position. Returns `None` if the board does not exist.
    #[instrument(skip(self))]
    pub fn add_column(&mut self, board_id: &str, title: &str) -> Option<Column> {
        let board = self.tree.board(board_id)?;
        let id = self
            .ids
            .fresh_id(IdKind::Column, &|id: &str| board.column_index(id).is_some());
        let title = title.trim();
        let title = if title.is_empty() {
            format!("Column {}", board.columns.len() + 1)
        } else {
            title.to_string()
        };
        let column = Column::new(id, title);
        let next = self.tree.add_column(board_id, column.clone());
        self.commit(next).then_some(column)
    }

    /// Renames a column.
    pub fn rename_column(&mut self, board_id: &str, column_id: &str, title: &str) -> bool {
        let next = self.tree.rename_column(board_id, column_id, title);
        self.commit(next)
    }

    /// Sets the header color of a column.
    pub fn set_column_color(&mut self, board_id: &str, column_id: &str, color: &str) -> bool {
        let next = self.tree.set_column_color(board_id, column_id, color);
        self.commit(next)
    }

    /// Collapses or expands a column.
    pub fn toggle_column_minimized(&mut self, board_id: &str, column_id: &str) -> bool {
        let next = self.tree.toggle_column_minimized(board_id, column_id);
        self.commit(next)
    }

    /// Deletes a column. Its cards are discarded.
    #[instrument(skip(self))]
    pub fn delete_column(&mut self, board_id: &str, column_id: &str) -> bool {
        let next = self.tree.delete_column(board_id, column_id);
        self.commit(next)
    }

    /// Moves the column at `from` to `to` within a board.
    pub fn move_column(&mut self, board_id: &str, from: usize, to: usize) -> bool {
        let next = self.tree.move_column(board_id, from, to);
        self.commit(next)
    }

    // --- Cards ---

    /// Creates a card at the top of a column and returns it.
    ///
    /// The card gets a fresh id, unique across the whole tree, and a fresh
    /// pattern seed. Returns `None` if the column does not exist.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn create_card(&mut self, board_id: &str, column_id: &str, draft: CardDraft) -> Option<Card> {
        if !self.tree.contains_column(board_id, column_id) {
            return None;
        }
        let tree = &self.tree;
        let id = self
            .ids
            .fresh_id(IdKind::Card, &|id: &str| contains_card_id(tree, id));
        let seed = self.ids.pattern_seed();
        let card = Card::from_draft(id, seed, draft);
        debug!(id = %card.id, "created card");
        let next = self.tree.add_card(board_id, column_id, card.clone());
        self.commit(next).then_some(card)
    }

    /// Merges `patch` onto a card.
    pub fn update_card(
        &mut self,
        board_id: &str,
        column_id: &str,
        card_id: &str,
        patch: &CardPatch,
    ) -> bool {
        let next = self.tree.update_card(board_id, column_id, card_id, patch);
        self.commit(next)
    }

    /// Merges the patch `updater` computes from the current card.
    pub fn update_card_with(
        &mut self,
        board_id: &str,
        column_id: &str,
        card_id: &str,
        updater: impl FnOnce(&Card) -> CardPatch,
    ) -> bool {
        let next = self
            .tree
            .update_card_with(board_id, column_id, card_id, updater);
        self.commit(next)
    }

    /// Gives a card a new pattern seed and switches its pattern type.
    pub fn reroll_pattern(&mut self, board_id: &str, column_id: &str, card_id: &str) -> bool {
        if self.tree.card(board_id, column_id, card_id).is_none() {
            return false;
        }
        let seed = self.ids.pattern_seed();
        self.update_card_with(board_id, column_id, card_id, |card| {
            CardPatch::new()
                .pattern_seed(seed)
                .pattern_type(card.pattern_type.toggled())
        })
    }

    /// Deletes a card, returning it and the index it had.
    ///
    /// The card can be restored with [`TreeStore::undo_delete`] until the
    /// undo window closes or another card is deleted.
    #[instrument(skip(self))]
    pub fn delete_card(
        &mut self,
        board_id: &str,
        column_id: &str,
        card_id: &str,
        now: Instant,
    ) -> Option<(Card, usize)> {
        let (next, removed) = self.tree.remove_card(board_id, column_id, card_id);
        let removed = removed?;
        self.commit(next);
        self.undo
            .record(board_id, column_id, removed.index, removed.card.clone(), now);
        Some((removed.card, removed.index))
    }

    /// Restores the last deleted card at its former index.
    ///
    /// Returns the restored card, or `None` if there is nothing to undo, the
    /// window has closed, or the column is gone.
    #[instrument(skip(self))]
    pub fn undo_delete(&mut self, now: Instant) -> Option<Card> {
        let PendingUndo {
            board,
            column,
            index,
            card,
            ..
        } = self.undo.take(now)?;
        let next = self.tree.insert_card(&board, &column, index, card.clone());
        if !self.commit(next) {
            debug!(id = %card.id, "deleted card could not be restored");
            return None;
        }
        Some(card)
    }

    /// Returns the deletion that can still be undone at `now`.
    #[must_use]
    pub fn pending_undo(&self, now: Instant) -> Option<&PendingUndo> {
        self.undo.peek(now)
    }

    /// Discards the pending deletion if its window has closed at `now`.
    pub fn expire_undo(&mut self, now: Instant) -> bool {
        self.undo.expire(now)
    }

    /// Moves a card, possibly to another column or board.
    pub fn move_card(&mut self, from: &CardLocation, to: &CardLocation) -> bool {
        let next = self.tree.move_card(from, to);
        self.commit(next)
    }

    /// Applies a move resolved by the drag coordinator.
    pub fn apply_move(&mut self, op: &MoveOp) -> bool {
        match op {
            MoveOp::Board { from, to } => self.move_board(*from, *to),
            MoveOp::Column { board, from, to } => self.move_column(board, *from, *to),
            MoveOp::Card { from, to } => self.move_card(from, to),
        }
    }

    /// Deletes every board and whatever the sink has stored.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.tree = BoardTree::new();
        self.undo.clear();
        let Some(sink) = self.sink.as_mut() else {
            return;
        };
        if let Err(err) = sink.clear() {
            warn!(error = %err, "failed to clear stored boards");
        }
    }
}

/// Returns `true` if any column of any board holds a card with this id.
fn contains_card_id(tree: &BoardTree, id: &str) -> bool {
    tree.boards
        .iter()
        .flat_map(|board| board.columns.iter())
        .any(|column| column.card_index(id).is_some())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use orcganizer_protocol::{Icon, PatternType, Priority, TaskType};

    use super::*;
    use crate::error::StoreError;
    use crate::ids::SequentialIds;

    /// Records every persisted tree; can be told to fail.
    #[derive(Debug, Clone, Default)]
    struct RecordingSink {
        saved: Arc<Mutex<Vec<BoardTree>>>,
        fail: bool,
    }

    impl RecordingSink {
        fn count(&self) -> usize {
            self.saved.lock().unwrap().len()
        }

        fn last(&self) -> Option<BoardTree> {
            self.saved.lock().unwrap().last().cloned()
        }
    }

    impl Persist for RecordingSink {
        fn persist(&mut self, tree: &BoardTree) -> Result<()> {
            if self.fail {
                return Err(StoreError::PersistFailed("quota exceeded".into()));
            }
            self.saved.lock().unwrap().push(tree.clone());
            Ok(())
        }
    }

    fn store_with_board() -> (TreeStore, String) {
        let mut store = TreeStore::new(SequentialIds::new());
        let board = store.create_board("B1");
        (store, board.id)
    }

    #[test]
    fn create_board_has_default_columns_and_goes_first() {
        let mut store = TreeStore::new(SequentialIds::new());
        let first = store.create_board("First");
        let second = store.create_board("  ");

        assert_eq!(second.name, "New Quest board");
        assert_eq!(store.tree().boards[0].id, second.id);
        assert_eq!(store.tree().boards[1].id, first.id);
        let ids: Vec<_> = first.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["todo", "doing", "done"]);
    }

    #[test]
    fn ids_are_not_reused_after_deletion() {
        let (mut store, board) = store_with_board();
        let a = store.create_card(&board, "todo", CardDraft::default()).unwrap();
        store.delete_card(&board, "todo", &a.id, Instant::now());
        let b = store.create_card(&board, "todo", CardDraft::default()).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn card_ids_skip_ids_already_in_the_tree() {
        let tree = BoardTree::new()
            .add_board(Board::with_default_columns("b-9", "Loaded"))
            .add_card("b-9", "done", Card::from_draft("t-1", "x", CardDraft::default()));
        let mut store = TreeStore::with_tree(tree, SequentialIds::new());

        let card = store.create_card("b-9", "todo", CardDraft::default()).unwrap();
        assert_eq!(card.id, "t-2");
    }

    #[test]
    fn create_card_goes_to_head_with_seed() {
        let (mut store, board) = store_with_board();
        let first = store.create_card(&board, "todo", CardDraft::titled("C1")).unwrap();
        let second = store.create_card(&board, "todo", CardDraft::titled("C2")).unwrap();

        let column = store.tree().column(&board, "todo").unwrap();
        assert_eq!(column.card_ids(), [&second.id, &first.id]);
        assert_eq!(first.pattern_seed, "s1");
        assert_eq!(second.pattern_seed, "s2");
    }

    #[test]
    fn create_card_in_missing_column_is_none() {
        let (mut store, board) = store_with_board();
        assert!(store.create_card(&board, "nope", CardDraft::default()).is_none());
        assert!(store.create_card("nope", "todo", CardDraft::default()).is_none());
    }

    #[test]
    fn add_column_defaults_title_to_position() {
        let (mut store, board) = store_with_board();
        let column = store.add_column(&board, "").unwrap();
        assert_eq!(column.title, "Column 4");
        let named = store.add_column(&board, " Backlog ").unwrap();
        assert_eq!(named.title, "Backlog");
        assert!(store.add_column("missing", "x").is_none());
    }

    #[test]
    fn sequential_patches_merge() {
        let (mut store, board) = store_with_board();
        let card = store.create_card(&board, "todo", CardDraft::titled("C1")).unwrap();

        assert!(store.update_card(&board, "todo", &card.id, &CardPatch::new().title("X")));
        assert!(store.update_card(&board, "todo", &card.id, &CardPatch::new().notes("Y")));

        let stored = store.tree().card(&board, "todo", &card.id).unwrap();
        assert_eq!(stored.title, "X");
        assert_eq!(stored.notes, "Y");
    }

    #[test]
    fn priority_patch_touches_only_priority() {
        let (mut store, board) = store_with_board();
        let draft = CardDraft {
            title: "Scout".into(),
            notes: "north".into(),
            icon: Icon::Map,
            task_type: TaskType::Main,
            ..CardDraft::default()
        };
        let card = store.create_card(&board, "todo", draft).unwrap();

        store.update_card(&board, "todo", &card.id, &CardPatch::new().priority(4));

        let stored = store.tree().card(&board, "todo", &card.id).unwrap();
        assert_eq!(stored.priority, Priority::clamped(4));
        assert_eq!(*stored, Card { priority: Priority::clamped(4), ..card });
    }

    #[test]
    fn reroll_pattern_changes_seed_and_type() {
        let (mut store, board) = store_with_board();
        let card = store.create_card(&board, "todo", CardDraft::default()).unwrap();

        assert!(store.reroll_pattern(&board, "todo", &card.id));
        let stored = store.tree().card(&board, "todo", &card.id).unwrap();
        assert_ne!(stored.pattern_seed, card.pattern_seed);
        assert_eq!(stored.pattern_type, PatternType::Dither);
        assert!(!store.reroll_pattern(&board, "todo", "missing"));
    }

    #[test]
    fn delete_then_undo_restores_column() {
        let (mut store, board) = store_with_board();
        for title in ["a", "b", "c"] {
            store.create_card(&board, "todo", CardDraft::titled(title));
        }
        let before = store.tree().column(&board, "todo").unwrap().clone();
        let middle = before.cards[1].id.clone();

        let now = Instant::now();
        let (card, index) = store.delete_card(&board, "todo", &middle, now).unwrap();
        assert_eq!(index, 1);
        assert_eq!(card.id, middle);
        assert_eq!(store.tree().column(&board, "todo").unwrap().len(), 2);

        let restored = store.undo_delete(now + Duration::from_secs(1)).unwrap();
        assert_eq!(restored.id, middle);
        assert_eq!(store.tree().column(&board, "todo").unwrap(), &before);
    }

    #[test]
    fn undo_after_window_does_nothing() {
        let (mut store, board) = store_with_board();
        let card = store.create_card(&board, "todo", CardDraft::default()).unwrap();
        let now = Instant::now();
        store.delete_card(&board, "todo", &card.id, now);

        assert!(store.undo_delete(now + Duration::from_secs(6)).is_none());
        assert!(store.tree().column(&board, "todo").unwrap().is_empty());
    }

    #[test]
    fn undo_into_deleted_column_does_nothing() {
        let (mut store, board) = store_with_board();
        let card = store.create_card(&board, "todo", CardDraft::default()).unwrap();
        let now = Instant::now();
        store.delete_card(&board, "todo", &card.id, now);
        store.delete_column(&board, "todo");

        assert!(store.undo_delete(now).is_none());
        assert!(store.pending_undo(now).is_none());
    }

    #[test]
    fn not_found_operations_report_false() {
        let (mut store, board) = store_with_board();
        let before = store.tree().clone();

        assert!(!store.rename_board("missing", "x"));
        assert!(!store.rename_column(&board, "missing", "x"));
        assert!(!store.update_card(&board, "todo", "missing", &CardPatch::new().title("x")));
        assert!(store.delete_card(&board, "todo", "missing", Instant::now()).is_none());
        assert!(!store.move_board(5, 0));
        assert!(!store.move_column(&board, 9, 0));
        assert!(store.tree().shares_nodes_with(&before));
    }

    #[test]
    fn every_commit_is_written_through() {
        let sink = RecordingSink::default();
        let mut store = TreeStore::new(SequentialIds::new()).with_persist(sink.clone());

        let board = store.create_board("B1");
        store.create_card(&board.id, "todo", CardDraft::titled("C1"));
        store.rename_board(&board.id, "B1");

        // The rename changed nothing, so only two saves.
        assert_eq!(sink.count(), 2);
        assert_eq!(sink.last().as_ref(), Some(store.tree()));
    }

    #[test]
    fn failed_save_keeps_in_memory_state() {
        let sink = RecordingSink {
            fail: true,
            ..RecordingSink::default()
        };
        let mut store = TreeStore::new(SequentialIds::new()).with_persist(sink.clone());

        let board = store.create_board("B1");
        assert!(store.tree().contains_board(&board.id));
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn reset_clears_tree_and_sink() {
        let sink = RecordingSink::default();
        let mut store = TreeStore::new(SequentialIds::new()).with_persist(sink.clone());
        let board = store.create_board("B1");
        let card = store.create_card(&board.id, "todo", CardDraft::default()).unwrap();
        let now = Instant::now();
        store.delete_card(&board.id, "todo", &card.id, now);

        store.reset();

        assert!(store.tree().is_empty());
        assert!(store.pending_undo(now).is_none());
        assert_eq!(sink.last(), Some(BoardTree::new()));
    }

    #[test]
    fn scenario_create_board_add_card_and_move() {
        let mut store = TreeStore::new(SequentialIds::new());
        let board = store.create_board("B1");
        let card = store
            .create_card(&board.id, "todo", CardDraft::titled("C1"))
            .unwrap();

        assert!(store.move_card(
            &CardLocation::new(&board.id, "todo", 0),
            &CardLocation::new(&board.id, "doing", 0),
        ));

        assert!(store.tree().column(&board.id, "todo").unwrap().is_empty());
        assert_eq!(
            store.tree().column(&board.id, "doing").unwrap().card_ids(),
            [&card.id]
        );
    }
}
