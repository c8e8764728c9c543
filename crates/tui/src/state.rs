//! Application state management.
//!
//! This module defines the core state structures for the TUI application:
//! the tree store being edited, what is selected, and which interaction mode
//! (drag, text prompt, confirmation) is active.

use orcganizer_protocol::{Board, BoardId, Card, CardId, Column, ColumnId};
use orcganizer_store::{ContainerKey, DragResult, DragSession, DropLocation, ItemKind, TreeStore};

/// The current focus area in the UI.
///
/// Determines which UI component receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Focus is on the columns of the current board.
    #[default]
    Board,
    /// Focus is on the card detail panel.
    Detail,
}

/// What a text prompt edits once confirmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTarget {
    /// Name for a board that is about to be forged.
    NewBoard,
    /// New name of an existing board.
    BoardName {
        /// The board.
        board: BoardId,
    },
    /// Title of a column that is about to be added.
    NewColumn {
        /// The board receiving the column.
        board: BoardId,
    },
    /// New title of an existing column.
    ColumnTitle {
        /// The board.
        board: BoardId,
        /// The column.
        column: ColumnId,
    },
    /// Title of a card that is about to be created.
    NewCard {
        /// The board.
        board: BoardId,
        /// The column receiving the card.
        column: ColumnId,
    },
    /// New title of an existing card.
    CardTitle {
        /// The board.
        board: BoardId,
        /// The column.
        column: ColumnId,
        /// The card.
        card: CardId,
    },
    /// New notes of an existing card.
    CardNotes {
        /// The board.
        board: BoardId,
        /// The column.
        column: ColumnId,
        /// The card.
        card: CardId,
    },
}

impl TextTarget {
    /// Returns the title of the prompt.
    #[must_use]
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::NewBoard => "Name your Quest board",
            Self::BoardName { .. } => "Rename Quest board",
            Self::NewColumn { .. } => "Add column",
            Self::ColumnTitle { .. } => "Rename column",
            Self::NewCard { .. } => "New task",
            Self::CardTitle { .. } => "Edit title",
            Self::CardNotes { .. } => "Edit notes",
        }
    }

    /// Returns the label of the confirming key.
    #[must_use]
    pub fn confirm_label(&self) -> &'static str {
        match self {
            Self::NewBoard => "Forge Quest board",
            Self::NewColumn { .. } => "Add column",
            Self::NewCard { .. } => "Create task",
            _ => "Save",
        }
    }

    /// Returns `true` if the text may contain line breaks.
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::CardNotes { .. })
    }

    /// Returns `true` if the prompt suggests generated quest names.
    #[must_use]
    pub fn suggests_names(&self) -> bool {
        matches!(self, Self::NewBoard | Self::BoardName { .. })
    }

    /// Returns the error shown when the prompt is confirmed empty, or `None`
    /// if an empty value is accepted.
    #[must_use]
    pub fn blank_error(&self) -> Option<&'static str> {
        match self {
            Self::NewBoard => Some("enter quest name to Forge Quest board"),
            Self::BoardName { .. } => Some("enter a name for the Quest board"),
            Self::ColumnTitle { .. } => Some("enter a column title"),
            Self::NewCard { .. } | Self::CardTitle { .. } => Some("enter a title for the task"),
            Self::NewColumn { .. } | Self::CardNotes { .. } => None,
        }
    }
}

/// An open text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    /// What the text is for.
    pub target: TextTarget,
    /// The text typed so far.
    pub buffer: String,
    /// Validation error from the last confirmation attempt.
    pub error: Option<String>,
}

impl TextInput {
    /// Opens a prompt for `target`, prefilled with `initial`.
    #[must_use]
    pub fn new(target: TextTarget, initial: impl Into<String>) -> Self {
        Self {
            target,
            buffer: initial.into(),
            error: None,
        }
    }

    /// Appends a character.
    pub fn push(&mut self, ch: char) {
        self.buffer.push(ch);
        self.error = None;
    }

    /// Appends pasted text.
    ///
    /// Line breaks are kept in multi-line prompts and become spaces
    /// elsewhere.
    pub fn paste(&mut self, text: &str) {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        if self.target.is_multiline() {
            self.buffer.push_str(&text);
        } else {
            self.buffer.push_str(&text.replace('\n', " "));
        }
        self.error = None;
    }

    /// Removes the last character.
    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Inserts a line break if the target accepts them.
    pub fn newline(&mut self) {
        if self.target.is_multiline() {
            self.buffer.push('\n');
        }
    }

    /// Replaces the whole text.
    pub fn replace(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.error = None;
    }
}

/// A destructive action waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Delete a card.
    DeleteCard {
        /// The board.
        board: BoardId,
        /// The column.
        column: ColumnId,
        /// The card.
        card: CardId,
        /// Title, for the question.
        title: String,
    },
    /// Delete a column and its cards.
    DeleteColumn {
        /// The board.
        board: BoardId,
        /// The column.
        column: ColumnId,
        /// Title, for the question.
        title: String,
    },
    /// Delete a board.
    DeleteBoard {
        /// The board.
        board: BoardId,
        /// Name, for the question.
        name: String,
    },
    /// Clear every board.
    ResetAll,
}

impl PendingAction {
    /// Returns the question asked before running the action.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_tui::state::PendingAction;
    ///
    /// assert_eq!(PendingAction::ResetAll.question(), "Delete every board and task?");
    /// ```
    #[must_use]
    pub fn question(&self) -> String {
        match self {
            Self::DeleteCard { title, .. } => format!("Delete task \"{title}\"?"),
            Self::DeleteColumn { title, .. } => {
                format!("Delete column \"{title}\" and all of its tasks?")
            }
            Self::DeleteBoard { name, .. } => format!("Delete Quest board \"{name}\"?"),
            Self::ResetAll => "Delete every board and task?".to_string(),
        }
    }
}

/// The interaction mode, deciding how keys are interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Browsing and single-key commands.
    #[default]
    Normal,
    /// An item is being dragged.
    Drag(DragSession),
    /// A text prompt is open.
    Input(TextInput),
    /// A yes/no question is open.
    Confirm(PendingAction),
}

/// One keyboard step of a drag's drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverStep {
    /// Towards the top of a column.
    Up,
    /// Towards the bottom of a column.
    Down,
    /// To the previous column, or the previous position in a row.
    Left,
    /// To the next column, or the next position in a row.
    Right,
    /// To the previous board.
    PrevBoard,
    /// To the next board.
    NextBoard,
}

/// The application state.
///
/// Contains all mutable state for the TUI application including
/// the tree store, focus state, and selection tracking.
#[derive(Debug)]
pub struct AppState {
    /// The store holding the boards being displayed.
    pub store: TreeStore,
    /// Current focus area.
    pub focus: Focus,
    /// Index of the board being shown.
    pub selected_board: usize,
    /// Index of the selected column within the board.
    pub selected_column: usize,
    /// Index of the selected card within the column, if any.
    pub selected_card: Option<usize>,
    /// Whether the detail panel is visible.
    pub detail_visible: bool,
    /// Scroll offset for the detail panel notes.
    pub detail_scroll: u16,
    /// Whether the help overlay is visible.
    pub help_visible: bool,
    /// The active interaction mode.
    pub mode: Mode,
    /// One-line feedback for the last action.
    pub status: Option<String>,
}

impl AppState {
    /// Creates a new application state over `store`.
    ///
    /// Initializes with focus on the board, selecting the first column.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_store::{SequentialIds, TreeStore};
    /// use orcganizer_tui::AppState;
    ///
    /// let state = AppState::new(TreeStore::new(SequentialIds::new()));
    /// assert!(state.is_welcome());
    /// ```
    #[must_use]
    pub fn new(store: TreeStore) -> Self {
        let mut state = Self {
            store,
            focus: Focus::default(),
            selected_board: 0,
            selected_column: 0,
            selected_card: None,
            detail_visible: false,
            detail_scroll: 0,
            help_visible: false,
            mode: Mode::default(),
            status: None,
        };
        state.clamp_selection();
        state
    }

    /// Returns `true` when there are no boards yet.
    #[must_use]
    pub fn is_welcome(&self) -> bool {
        self.store.tree().is_empty()
    }

    /// Returns the board being shown.
    #[must_use]
    pub fn current_board(&self) -> Option<&Board> {
        self.store
            .tree()
            .boards
            .get(self.selected_board)
            .map(|board| &**board)
    }

    /// Returns the selected column.
    #[must_use]
    pub fn current_column(&self) -> Option<&Column> {
        self.current_board()?
            .columns
            .get(self.selected_column)
            .map(|column| &**column)
    }

    /// Returns a reference to the currently selected card, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::dummy::sample_tree;
    /// use orcganizer_store::{SequentialIds, TreeStore};
    /// use orcganizer_tui::AppState;
    ///
    /// let mut state = AppState::new(TreeStore::with_tree(sample_tree(), SequentialIds::new()));
    /// assert!(state.selected_card().is_none());
    ///
    /// state.navigate_down();
    /// assert_eq!(state.selected_card().map(|c| c.id.as_str()), Some("t1"));
    /// ```
    #[must_use]
    pub fn selected_card(&self) -> Option<&Card> {
        self.current_column()?
            .cards
            .get(self.selected_card?)
            .map(|card| &**card)
    }

    /// Returns the board and column ids of the selection.
    #[must_use]
    pub fn column_ids(&self) -> Option<(BoardId, ColumnId)> {
        let board = self.current_board()?;
        let column = board.columns.get(self.selected_column)?;
        Some((board.id.clone(), column.id.clone()))
    }

    /// Returns the board, column and card ids of the selected card.
    #[must_use]
    pub fn card_ids(&self) -> Option<(BoardId, ColumnId, CardId)> {
        let (board, column) = self.column_ids()?;
        let card = self.selected_card()?.id.clone();
        Some((board, column, card))
    }

    /// Toggles the help overlay visibility.
    ///
    /// When help is shown, other interactions are blocked until
    /// help is dismissed.
    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    /// Dismisses the help overlay if it is visible.
    ///
    /// Returns `true` if help was visible and has been dismissed,
    /// `false` if help was not visible.
    #[must_use]
    pub fn dismiss_help(&mut self) -> bool {
        if self.help_visible {
            self.help_visible = false;
            true
        } else {
            false
        }
    }

    fn column_count(&self) -> usize {
        self.current_board().map_or(0, |b| b.columns.len())
    }

    /// Moves the column selection to the left, wrapping around if needed.
    pub fn navigate_left(&mut self) {
        let count = self.column_count();
        if count == 0 {
            return;
        }
        self.selected_column = if self.selected_column > 0 {
            self.selected_column - 1
        } else {
            count - 1
        };
        self.clamp_card_selection();
    }

    /// Moves the column selection to the right, wrapping around if needed.
    pub fn navigate_right(&mut self) {
        let count = self.column_count();
        if count == 0 {
            return;
        }
        self.selected_column = (self.selected_column + 1) % count;
        self.clamp_card_selection();
    }

    /// Moves the card selection up within the current column.
    pub fn navigate_up(&mut self) {
        let len = self.current_column().map_or(0, Column::len);
        if len == 0 {
            self.selected_card = None;
            return;
        }

        self.selected_card = match self.selected_card {
            Some(idx) if idx > 0 => Some(idx - 1),
            // Wrap to bottom
            Some(_) => Some(len - 1),
            None => Some(0),
        };
    }

    /// Moves the card selection down within the current column.
    pub fn navigate_down(&mut self) {
        let len = self.current_column().map_or(0, Column::len);
        if len == 0 {
            self.selected_card = None;
            return;
        }

        self.selected_card = match self.selected_card {
            Some(idx) if idx + 1 < len => Some(idx + 1),
            // Wrap to top
            Some(_) | None => Some(0),
        };
    }

    /// Shows the next board, wrapping around.
    pub fn next_board(&mut self) {
        let count = self.store.tree().len();
        if count == 0 {
            return;
        }
        self.show_board((self.selected_board + 1) % count);
    }

    /// Shows the previous board, wrapping around.
    pub fn prev_board(&mut self) {
        let count = self.store.tree().len();
        if count == 0 {
            return;
        }
        self.show_board((self.selected_board + count - 1) % count);
    }

    /// Shows the board at `index`, selecting its first column.
    pub fn show_board(&mut self, index: usize) {
        self.selected_board = index;
        self.selected_column = 0;
        self.selected_card = None;
        self.clamp_selection();
    }

    /// Toggles the detail panel visibility.
    pub fn toggle_detail(&mut self) {
        self.detail_visible = !self.detail_visible;
        self.focus = if self.detail_visible {
            Focus::Detail
        } else {
            Focus::Board
        };
        // Reset scroll when opening/closing
        self.detail_scroll = 0;
    }

    /// Scrolls the detail panel by the given delta.
    ///
    /// Positive delta scrolls down, negative scrolls up. Call
    /// [`AppState::clamp_detail_scroll`] afterwards to stop at the end of
    /// the content.
    pub fn scroll_detail(&mut self, delta: i16) {
        if delta > 0 {
            self.detail_scroll = self.detail_scroll.saturating_add(delta.unsigned_abs());
        } else {
            self.detail_scroll = self.detail_scroll.saturating_sub(delta.unsigned_abs());
        }
    }

    /// Clamps the detail scroll offset to a maximum value.
    pub fn clamp_detail_scroll(&mut self, max: u16) {
        self.detail_scroll = self.detail_scroll.min(max);
    }

    /// Clears the current card selection.
    pub fn clear_selection(&mut self) {
        self.selected_card = None;
    }

    /// Brings every index back in range after the tree changed.
    ///
    /// Closes the detail panel if its card is gone.
    pub fn clamp_selection(&mut self) {
        let boards = self.store.tree().len();
        self.selected_board = self.selected_board.min(boards.saturating_sub(1));
        let columns = self.column_count();
        self.selected_column = self.selected_column.min(columns.saturating_sub(1));
        self.clamp_card_selection();
        if self.detail_visible && self.selected_card().is_none() {
            self.toggle_detail();
        }
    }

    /// Ensures the card selection is valid for the current column.
    fn clamp_card_selection(&mut self) {
        let len = self.current_column().map_or(0, Column::len);
        if len == 0 {
            self.selected_card = None;
        } else if let Some(idx) = self.selected_card
            && idx >= len
        {
            self.selected_card = Some(len - 1);
        }
    }

    /// Selects the card with `card_id` in the current board, if present.
    pub fn select_card(&mut self, column_id: &str, card_id: &str) {
        let Some(board) = self.current_board() else {
            return;
        };
        let Some(column_idx) = board.column_index(column_id) else {
            return;
        };
        let card_idx = board.columns[column_idx].card_index(card_id);
        self.selected_column = column_idx;
        self.selected_card = card_idx;
    }

    // --- Drag ---

    /// Returns the active drag session.
    #[must_use]
    pub fn drag(&self) -> Option<&DragSession> {
        match &self.mode {
            Mode::Drag(session) => Some(session),
            _ => None,
        }
    }

    /// Picks up the selected item of `kind`.
    ///
    /// Returns `false` if nothing of that kind is selected.
    pub fn begin_drag(&mut self, kind: ItemKind) -> bool {
        let Some(board) = self.current_board() else {
            return false;
        };
        let source = match kind {
            ItemKind::Board => DropLocation::new(ContainerKey::Root, self.selected_board),
            ItemKind::Column => {
                if board.columns.is_empty() {
                    return false;
                }
                DropLocation::new(ContainerKey::Board(board.id.clone()), self.selected_column)
            }
            ItemKind::Card => {
                let (Some(column), Some(index)) = (self.current_column(), self.selected_card)
                else {
                    return false;
                };
                DropLocation::new(ContainerKey::column(&board.id, &column.id), index)
            }
        };
        self.mode = Mode::Drag(DragSession::begin(kind, source));
        true
    }

    /// Moves the drop target of the active drag one step.
    ///
    /// Only the preview changes; the tree is untouched until the drop.
    pub fn move_hover(&mut self, step: HoverStep) {
        let Mode::Drag(session) = &self.mode else {
            return;
        };
        let current = session.hover().unwrap_or(session.source()).clone();
        let next = match session.kind() {
            ItemKind::Card => self.card_hover_step(session.source(), &current, step),
            ItemKind::Column => self.row_hover_step(&current, step, self.column_count()),
            ItemKind::Board => self.row_hover_step(&current, step, self.store.tree().len()),
        };
        let Some(next) = next else {
            return;
        };
        self.follow_hover(&next);
        if let Mode::Drag(session) = &mut self.mode {
            session.preview(Some(next));
        }
    }

    /// Sets the drop target of the active drag directly, e.g. from a click.
    pub fn preview_drop(&mut self, destination: Option<DropLocation>) {
        if let Mode::Drag(session) = &mut self.mode {
            session.preview(destination);
        }
    }

    /// Highest index a card can be dropped at in a column.
    ///
    /// Within its own column the card is lifted out first, so the last slot
    /// is one less than elsewhere.
    fn max_card_index(&self, source: &DropLocation, board: &str, column: &str) -> usize {
        let len = self.store.tree().column(board, column).map_or(0, Column::len);
        if source.container == ContainerKey::column(board, column) {
            len.saturating_sub(1)
        } else {
            len
        }
    }

    fn card_hover_step(
        &self,
        source: &DropLocation,
        current: &DropLocation,
        step: HoverStep,
    ) -> Option<DropLocation> {
        let tree = self.store.tree();
        let ContainerKey::Column { board, column } = &current.container else {
            return None;
        };
        let board_idx = tree.board_index(board)?;
        let column_idx = tree.boards[board_idx].column_index(column)?;

        let (board_idx, column_idx, index) = match step {
            HoverStep::Up => (board_idx, column_idx, current.index.saturating_sub(1)),
            HoverStep::Down => (board_idx, column_idx, current.index + 1),
            HoverStep::Left => (board_idx, column_idx.checked_sub(1)?, current.index),
            HoverStep::Right => (board_idx, column_idx + 1, current.index),
            HoverStep::PrevBoard => (board_idx.checked_sub(1)?, column_idx, current.index),
            HoverStep::NextBoard => (board_idx + 1, column_idx, current.index),
        };

        let target = tree.boards.get(board_idx)?;
        if target.columns.is_empty() {
            return None;
        }
        let column = &target.columns[column_idx.min(target.columns.len() - 1)];
        let index = index.min(self.max_card_index(source, &target.id, &column.id));
        Some(DropLocation::new(
            ContainerKey::column(&target.id, &column.id),
            index,
        ))
    }

    fn row_hover_step(
        &self,
        current: &DropLocation,
        step: HoverStep,
        len: usize,
    ) -> Option<DropLocation> {
        let index = match step {
            HoverStep::Up | HoverStep::Left | HoverStep::PrevBoard => current.index.checked_sub(1)?,
            HoverStep::Down | HoverStep::Right | HoverStep::NextBoard => current.index + 1,
        };
        (index < len).then(|| DropLocation::new(current.container.clone(), index))
    }

    /// Shows the board a dragged card hovers over.
    fn follow_hover(&mut self, hover: &DropLocation) {
        let ContainerKey::Column { board, column } = &hover.container else {
            return;
        };
        let tree = self.store.tree();
        let Some(board_idx) = tree.board_index(board) else {
            return;
        };
        let column_idx = tree.boards[board_idx].column_index(column).unwrap_or(0);
        self.selected_board = board_idx;
        self.selected_column = column_idx;
    }

    /// Selects the item where a committed drag put it.
    pub fn follow_drop(&mut self, result: &DragResult) {
        let Some(destination) = &result.destination else {
            return;
        };
        match &destination.container {
            ContainerKey::Root => self.selected_board = destination.index,
            ContainerKey::Board(_) => self.selected_column = destination.index,
            ContainerKey::Column { board, column } => {
                let tree = self.store.tree();
                if let Some(board_idx) = tree.board_index(board) {
                    self.selected_board = board_idx;
                    self.selected_column = tree.boards[board_idx].column_index(column).unwrap_or(0);
                    self.selected_card = Some(destination.index);
                }
            }
        }
        self.clamp_selection();
    }
}
