//! TUI message types for event handling.
//!
//! This module defines the message enum used for communication between
//! the TUI input handler and the application state.

use serde::{Deserialize, Serialize};

/// Messages that represent user actions in the TUI.
///
/// These messages are produced by the input handler and consumed by
/// the application state to update the UI.
///
/// # Examples
///
/// ```
/// use orcganizer_protocol::Message;
///
/// let msg = Message::SetPriority { value: 3 };
/// assert!(msg.is_card_edit());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Move selection to the left column.
    NavigateLeft,
    /// Move selection to the right column.
    NavigateRight,
    /// Move selection up within the current column.
    NavigateUp,
    /// Move selection down within the current column.
    NavigateDown,
    /// Show the next board.
    NextBoard,
    /// Show the previous board.
    PrevBoard,
    /// Open or close the selected card.
    Select,
    /// Escape: cancel a drag, close a panel or clear selection (contextual).
    Escape,
    /// Quit the application.
    Quit,
    /// Toggle help overlay.
    ToggleHelp,
    /// Mouse click at coordinates (column, row).
    ClickAt {
        /// Column (x coordinate) of the click.
        column: u16,
        /// Row (y coordinate) of the click.
        row: u16,
    },

    // --- Drag messages ---
    /// Pick up the selected card.
    GrabCard,
    /// Pick up the selected column.
    GrabColumn,
    /// Pick up the current board.
    GrabBoard,
    /// Drop the dragged item at the previewed position.
    Drop,

    // --- Structure messages ---
    /// Forge a new board.
    NewBoard,
    /// Add a card at the top of the selected column.
    NewCard,
    /// Append a column to the current board.
    AddColumn,
    /// Delete the selected card.
    DeleteCard,
    /// Delete the selected column.
    DeleteColumn,
    /// Delete the current board.
    DeleteBoard,
    /// Restore the last deleted card.
    Undo,
    /// Clear every board.
    ResetAll,

    // --- Card messages ---
    /// Edit the title of the selected card.
    EditTitle,
    /// Edit the notes of the selected card.
    EditNotes,
    /// Set the priority of the selected card.
    SetPriority {
        /// New priority, clamped to `0..=5`.
        value: u8,
    },
    /// Switch the selected card to the next icon.
    CycleIcon,
    /// Switch the selected card between main and side quest.
    ToggleTaskType,
    /// Give the selected card a new header pattern.
    RerollPattern,
    /// Collapse or expand the selected card.
    ToggleCardMinimized,
    /// Render the selected card as a printable document.
    PrintCard,

    // --- Column and board messages ---
    /// Rename the selected column.
    RenameColumn,
    /// Rename the current board.
    RenameBoard,
    /// Collapse or expand the selected column.
    ToggleColumnMinimized,
    /// Collapse or expand the current board.
    ToggleBoardMinimized,
    /// Switch the selected column to the next header color.
    CycleColumnColor,
    /// Switch the current board to the next header color.
    CycleBoardColor,

    // --- Text input messages ---
    /// Input a character while editing.
    Input {
        /// The character that was input.
        ch: char,
    },
    /// Paste text while editing.
    Paste {
        /// The pasted text.
        text: String,
    },
    /// Delete the last character while editing.
    Backspace,
    /// Insert a line break while editing notes.
    Newline,
    /// Suggest a generated quest name while naming a board.
    SuggestName,
    /// Confirm the current edit or dialog.
    Confirm,
    /// Cancel the current edit or dialog.
    Cancel,
}

impl Message {
    /// Returns `true` if this message is a navigation action.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::Message;
    ///
    /// assert!(Message::NavigateLeft.is_navigation());
    /// assert!(Message::NextBoard.is_navigation());
    /// assert!(!Message::Select.is_navigation());
    /// ```
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::NavigateLeft
                | Self::NavigateRight
                | Self::NavigateUp
                | Self::NavigateDown
                | Self::NextBoard
                | Self::PrevBoard
        )
    }

    /// Returns `true` if this message should terminate the application.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::Message;
    ///
    /// assert!(Message::Quit.is_terminating());
    /// assert!(!Message::Escape.is_terminating());
    /// ```
    #[must_use]
    pub fn is_terminating(&self) -> bool {
        matches!(self, Self::Quit)
    }

    /// Returns `true` if this message starts or ends a drag session.
    #[must_use]
    pub fn is_drag(&self) -> bool {
        matches!(
            self,
            Self::GrabCard | Self::GrabColumn | Self::GrabBoard | Self::Drop
        )
    }

    /// Returns `true` if this message changes a field of the selected card.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_protocol::Message;
    ///
    /// assert!(Message::CycleIcon.is_card_edit());
    /// assert!(!Message::DeleteCard.is_card_edit());
    /// ```
    #[must_use]
    pub fn is_card_edit(&self) -> bool {
        matches!(
            self,
            Self::EditTitle
                | Self::EditNotes
                | Self::SetPriority { .. }
                | Self::CycleIcon
                | Self::ToggleTaskType
                | Self::RerollPattern
                | Self::ToggleCardMinimized
        )
    }

    /// Returns `true` if this message removes data and asks for confirmation.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            Self::DeleteCard | Self::DeleteColumn | Self::DeleteBoard | Self::ResetAll
        )
    }

    /// Returns `true` if this message belongs to text input mode.
    #[must_use]
    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            Self::Input { .. }
                | Self::Paste { .. }
                | Self::Backspace
                | Self::Newline
                | Self::SuggestName
                | Self::Confirm
                | Self::Cancel
        )
    }
}
