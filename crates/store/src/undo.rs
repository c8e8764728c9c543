//! Single-slot undo for card deletions.
//!
//! Only the most recent deletion can be undone, and only for a short window
//! after it happened. Time is passed in explicitly so the slot can be tested
//! without sleeping.

use std::time::{Duration, Instant};

use orcganizer_protocol::{BoardId, Card, ColumnId};

/// Shortest allowed undo window.
pub const MIN_UNDO_WINDOW: Duration = Duration::from_secs(5);

/// Longest allowed undo window.
pub const MAX_UNDO_WINDOW: Duration = Duration::from_secs(8);

/// Undo window used when none is configured.
pub const DEFAULT_UNDO_WINDOW: Duration = Duration::from_secs(6);

/// A deleted card waiting to be restored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUndo {
    /// Board the card was deleted from.
    pub board: BoardId,
    /// Column the card was deleted from.
    pub column: ColumnId,
    /// Index the card had in the column.
    pub index: usize,
    /// The deleted card.
    pub card: Card,
    /// When the undo stops being available.
    pub expires_at: Instant,
}

/// Holds at most one [`PendingUndo`].
#[derive(Debug, Clone)]
pub struct UndoSlot {
    window: Duration,
    pending: Option<PendingUndo>,
}

impl UndoSlot {
    /// Creates an empty slot with the given window, clamped to 5-8 seconds.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window: window.clamp(MIN_UNDO_WINDOW, MAX_UNDO_WINDOW),
            pending: None,
        }
    }

    /// Returns the undo window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Records a deletion made at `now`, replacing whatever was pending.
    pub fn record(
        &mut self,
        board: impl Into<BoardId>,
        column: impl Into<ColumnId>,
        index: usize,
        card: Card,
        now: Instant,
    ) {
        self.pending = Some(PendingUndo {
            board: board.into(),
            column: column.into(),
            index,
            card,
            expires_at: now + self.window,
        });
    }

    /// Returns the pending deletion if it is still undoable at `now`.
    #[must_use]
    pub fn peek(&self, now: Instant) -> Option<&PendingUndo> {
        self.pending.as_ref().filter(|p| now < p.expires_at)
    }

    /// Takes the pending deletion if it is still undoable at `now`.
    ///
    /// An expired entry is discarded.
    pub fn take(&mut self, now: Instant) -> Option<PendingUndo> {
        self.expire(now);
        self.pending.take()
    }

    /// Discards the pending deletion if its window has closed.
    ///
    /// Returns `true` if something was discarded.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.pending.as_ref().is_some_and(|p| now >= p.expires_at) {
            self.pending = None;
            return true;
        }
        false
    }

    /// Empties the slot.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Returns `true` if nothing is pending, expired or not.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}

impl Default for UndoSlot {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use orcganizer_protocol::CardDraft;

    use super::*;

    fn card(id: &str) -> Card {
        Card::from_draft(id, "seed", CardDraft::titled(id))
    }

    #[test]
    fn window_is_clamped() {
        assert_eq!(UndoSlot::new(Duration::from_secs(1)).window(), MIN_UNDO_WINDOW);
        assert_eq!(UndoSlot::new(Duration::from_secs(60)).window(), MAX_UNDO_WINDOW);
        assert_eq!(UndoSlot::new(Duration::from_secs(7)).window(), Duration::from_secs(7));
        assert_eq!(UndoSlot::default().window(), DEFAULT_UNDO_WINDOW);
    }

    #[test]
    fn take_within_window_returns_card() {
        let now = Instant::now();
        let mut slot = UndoSlot::default();
        slot.record("b-1", "todo", 2, card("t-1"), now);

        let pending = slot.take(now + Duration::from_secs(5)).expect("still open");
        assert_eq!(pending.index, 2);
        assert_eq!(pending.card.id, "t-1");
        assert!(slot.is_empty());
    }

    #[test]
    fn take_after_window_discards() {
        let now = Instant::now();
        let mut slot = UndoSlot::default();
        slot.record("b-1", "todo", 0, card("t-1"), now);

        assert!(slot.take(now + DEFAULT_UNDO_WINDOW).is_none());
        assert!(slot.is_empty());
        // Gone for good, even if asked with an earlier instant.
        assert!(slot.take(now).is_none());
    }

    #[test]
    fn new_deletion_replaces_pending() {
        let now = Instant::now();
        let mut slot = UndoSlot::default();
        slot.record("b-1", "todo", 0, card("t-1"), now);
        slot.record("b-1", "done", 1, card("t-2"), now);

        let pending = slot.take(now).expect("pending");
        assert_eq!(pending.card.id, "t-2");
        assert!(slot.take(now).is_none());
    }

    #[test]
    fn expire_reports_discard_once() {
        let now = Instant::now();
        let mut slot = UndoSlot::new(Duration::from_secs(5));
        slot.record("b-1", "todo", 0, card("t-1"), now);

        assert!(!slot.expire(now + Duration::from_secs(4)));
        assert!(slot.peek(now + Duration::from_secs(4)).is_some());
        assert!(slot.expire(now + Duration::from_secs(5)));
        assert!(!slot.expire(now + Duration::from_secs(6)));
    }
}
