//! Sample data for testing and demonstration.
//!
//! This module builds a small quest board with a handful of cards, used by
//! the TUI tests and by the binary's `--demo` mode.
//!
//! # Examples
//!
//! ```
//! use orcganizer_protocol::dummy::sample_tree;
//!
//! let tree = sample_tree();
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree.card_count(), 5);
//! ```

use std::sync::Arc;

use crate::board::{Board, BoardTree};
use crate::card::{Card, CardDraft, CardPatch, Icon, PatternType, TaskType};

/// A builder for sample cards with non-default fields.
struct CardBuilder {
    id: &'static str,
    seed: &'static str,
    title: &'static str,
    patch: CardPatch,
}

impl CardBuilder {
    /// Creates a builder for a card with the given id, seed and title.
    fn new(id: &'static str, seed: &'static str, title: &'static str) -> Self {
        Self {
            id,
            seed,
            title,
            patch: CardPatch::new(),
        }
    }

    fn notes(mut self, notes: &str) -> Self {
        self.patch = self.patch.notes(notes);
        self
    }

    fn priority(mut self, priority: i64) -> Self {
        self.patch = self.patch.priority(priority);
        self
    }

    fn main_quest(mut self) -> Self {
        self.patch = self.patch.task_type(TaskType::Main);
        self
    }

    fn icon(mut self, icon: Icon) -> Self {
        self.patch = self.patch.icon(icon);
        self
    }

    fn dither(mut self) -> Self {
        self.patch = self.patch.pattern_type(PatternType::Dither);
        self
    }

    fn build(self) -> Card {
        Card::from_draft(self.id, self.seed, CardDraft::titled(self.title)).patched(&self.patch)
    }
}

/// Pushes `cards` onto the column `column_id` of `board`, in order.
fn fill(board: &mut Board, column_id: &str, cards: impl IntoIterator<Item = Card>) {
    if let Some(idx) = board.column_index(column_id) {
        Arc::make_mut(&mut board.columns[idx])
            .cards
            .extend(cards.into_iter().map(Arc::new));
    }
}

/// Generates a sample tree with two boards.
///
/// - **The Fellowship of Focus**: two cards in `To Do`, one in `Doing` and
///   one in `Done`
/// - **The Guild of Quests**: one card in `To Do`, a yellow header
#[must_use]
pub fn sample_tree() -> BoardTree {
    let mut fellowship = Board::with_default_columns("b-sample-1", "The Fellowship of Focus");
    fill(
        &mut fellowship,
        "todo",
        [
            CardBuilder::new("t1", "k3j9x0", "Wire up task dialog")
                .notes("Connect dialog open state to the column's New Task button.")
                .priority(2)
                .main_quest()
                .icon(Icon::Scroll)
                .build(),
            CardBuilder::new("t3", "p0q8zz", "Brew potions for the raid")
                .notes("Two healing, one mana.")
                .priority(1)
                .icon(Icon::Potion)
                .dither()
                .build(),
        ],
    );
    fill(
        &mut fellowship,
        "doing",
        [CardBuilder::new("t2", "m4n5b6", "Refactor to multi-file")
            .notes("Split the app into components and a shared store.")
            .priority(3)
            .main_quest()
            .icon(Icon::Shield)
            .build()],
    );
    fill(
        &mut fellowship,
        "done",
        [CardBuilder::new("t4", "a1b2c3", "Forge the first board")
            .priority(5)
            .icon(Icon::Star)
            .build()],
    );

    let mut guild = Board::with_default_columns("b-sample-2", "The Guild of Quests");
    guild.header_color = "#a16207".to_string();
    fill(
        &mut guild,
        "todo",
        [CardBuilder::new("t5", "zz9y8x", "Map the northern caves")
            .notes("Bring a lantern.\nAvoid the troll bridge.")
            .icon(Icon::Map)
            .build()],
    );

    BoardTree::from_boards([fellowship, guild])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_tree_has_cards_in_every_column_of_first_board() {
        let tree = sample_tree();
        let board = &tree.boards[0];
        assert!(board.columns.iter().all(|c| !c.is_empty()));
        assert_eq!(board.card_count(), 4);
    }

    #[test]
    fn sample_card_ids_are_unique() {
        let tree = sample_tree();
        let mut ids: Vec<_> = tree
            .boards
            .iter()
            .flat_map(|b| b.columns.iter())
            .flat_map(|c| c.cards.iter())
            .map(|c| c.id.clone())
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn sample_cards_keep_their_fields() {
        let tree = sample_tree();
        let card = tree.card("b-sample-1", "todo", "t3").expect("sample card");
        assert_eq!(card.icon, Icon::Potion);
        assert_eq!(card.pattern_type, PatternType::Dither);
        assert_eq!(card.priority.value(), 1);
        assert_eq!(card.task_type, TaskType::Sub);
    }
}
