//! Event handling and key mappings.
//!
//! This module provides event polling and conversion from terminal events
//! to application messages. Keys mean different things depending on the
//! interaction mode, so there is one mapper per mode.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use orcganizer_protocol::Message;

use crate::state::Mode;

/// Default poll timeout for events.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Polls for a terminal event with the default timeout.
///
/// Returns `Some(Event)` if an event is available within the timeout,
/// or `None` if the timeout expires without an event.
///
/// # Errors
///
/// Returns an error if polling the terminal fails.
pub fn poll_event() -> std::io::Result<Option<Event>> {
    if event::poll(POLL_TIMEOUT)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Converts an event (keyboard or mouse) to a message for the given mode.
///
/// Returns `None` if the event is not handled.
#[must_use]
pub fn event_to_message(event: &Event, mode: &Mode) -> Option<Message> {
    match event {
        Event::Key(key) => match mode {
            Mode::Normal => key_to_message(*key),
            Mode::Drag(_) => key_to_drag_message(*key),
            Mode::Input(input) => key_to_input_message(*key, input.target.is_multiline()),
            Mode::Confirm(_) => key_to_confirm_message(*key),
        },
        Event::Mouse(mouse) => mouse_to_message(mouse),
        Event::Paste(text) if matches!(mode, Mode::Input(_)) => {
            Some(Message::Paste { text: text.clone() })
        }
        _ => None,
    }
}

/// Converts a mouse event to an application message.
///
/// Only left-click press events are handled, producing a `ClickAt` message
/// with the click coordinates.
#[must_use]
fn mouse_to_message(mouse: &crossterm::event::MouseEvent) -> Option<Message> {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Message::ClickAt {
            column: mouse.column,
            row: mouse.row,
        }),
        _ => None,
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Converts a key event to a message while browsing.
///
/// # Key Bindings
///
/// | Key | Action |
/// |-----|--------|
/// | `Ctrl+C`, `q` | Quit |
/// | `Esc` | Escape (close panel or clear selection) |
/// | `Left` / `Right` | Previous / next column |
/// | `Up` / `Down` | Previous / next card |
/// | `Tab` / `Shift+Tab` | Next / previous board |
/// | `Enter` | Open the selected card |
/// | `Space` / `g` / `G` | Grab card / column / board |
/// | `n` / `N` / `c` | New card / board / column |
/// | `x` / `X` / `D` | Delete card / column / board |
/// | `u` | Undo card deletion |
/// | `e` / `E` | Edit card title / notes |
/// | `r` / `R` | Rename column / board |
/// | `0`-`5` | Set priority |
/// | `i` / `t` / `p` | Next icon / toggle quest kind / reroll pattern |
/// | `z` / `Z` / `m` | Minimize card / column / board |
/// | `C` / `H` | Cycle column / board color |
/// | `P` | Print card |
/// | `!` | Reset all data |
/// | `?` | Toggle help |
#[must_use]
pub fn key_to_message(key: KeyEvent) -> Option<Message> {
    // Check for Ctrl+C first
    if is_ctrl_c(&key) {
        return Some(Message::Quit);
    }
    if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
        return None;
    }

    match key.code {
        KeyCode::Esc => Some(Message::Escape),

        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),
        KeyCode::Tab => Some(Message::NextBoard),
        KeyCode::BackTab => Some(Message::PrevBoard),
        KeyCode::Enter => Some(Message::Select),

        KeyCode::Char(ch) => char_to_message(ch),
        _ => None,
    }
}

fn char_to_message(ch: char) -> Option<Message> {
    let msg = match ch {
        'q' => Message::Quit,
        '?' => Message::ToggleHelp,

        ' ' => Message::GrabCard,
        'g' => Message::GrabColumn,
        'G' => Message::GrabBoard,

        'n' => Message::NewCard,
        'N' => Message::NewBoard,
        'c' => Message::AddColumn,
        'x' => Message::DeleteCard,
        'X' => Message::DeleteColumn,
        'D' => Message::DeleteBoard,
        'u' => Message::Undo,
        '!' => Message::ResetAll,

        'e' => Message::EditTitle,
        'E' => Message::EditNotes,
        'i' => Message::CycleIcon,
        't' => Message::ToggleTaskType,
        'p' => Message::RerollPattern,
        'z' => Message::ToggleCardMinimized,
        'P' => Message::PrintCard,
        '0'..='5' => Message::SetPriority {
            value: ch.to_digit(10).and_then(|d| u8::try_from(d).ok())?,
        },

        'r' => Message::RenameColumn,
        'R' => Message::RenameBoard,
        'Z' => Message::ToggleColumnMinimized,
        'm' => Message::ToggleBoardMinimized,
        'C' => Message::CycleColumnColor,
        'H' => Message::CycleBoardColor,
        _ => return None,
    };
    Some(msg)
}

/// Converts a key event to a message while an item is being dragged.
///
/// # Key Bindings (Drag Mode)
///
/// | Key | Action |
/// |-----|--------|
/// | Arrows | Move the drop target |
/// | `Tab` / `Shift+Tab` | Move the drop target to the next / previous board |
/// | `Enter` / `Space` | Drop |
/// | `Esc` | Cancel the drag |
#[must_use]
pub fn key_to_drag_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(&key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Left => Some(Message::NavigateLeft),
        KeyCode::Right => Some(Message::NavigateRight),
        KeyCode::Up => Some(Message::NavigateUp),
        KeyCode::Down => Some(Message::NavigateDown),
        KeyCode::Tab => Some(Message::NextBoard),
        KeyCode::BackTab => Some(Message::PrevBoard),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Message::Drop),
        KeyCode::Esc => Some(Message::Escape),
        _ => None,
    }
}

/// Converts a key event to a message while a text prompt is open.
///
/// # Key Bindings (Text Input)
///
/// | Key | Action |
/// |-----|--------|
/// | `Enter` | Confirm |
/// | `Alt+Enter`, `Ctrl+N` | Line break (notes only) |
/// | `Esc` | Cancel |
/// | `Backspace` | Delete the last character |
/// | `Ctrl+G` | Suggest a quest name |
/// | Any char | Input |
#[must_use]
pub fn key_to_input_message(key: KeyEvent, multiline: bool) -> Option<Message> {
    if is_ctrl_c(&key) {
        return Some(Message::Quit);
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    match key.code {
        KeyCode::Enter if alt && multiline => Some(Message::Newline),
        KeyCode::Char('n') if ctrl && multiline => Some(Message::Newline),
        KeyCode::Char('g') if ctrl => Some(Message::SuggestName),
        KeyCode::Enter => Some(Message::Confirm),
        KeyCode::Esc => Some(Message::Cancel),
        KeyCode::Backspace => Some(Message::Backspace),
        KeyCode::Char(ch) if !ctrl && !alt => Some(Message::Input { ch }),
        _ => None,
    }
}

/// Converts a key event to a message while a yes/no question is open.
///
/// `y` or `Enter` confirms; `n` or `Esc` cancels.
#[must_use]
pub fn key_to_confirm_message(key: KeyEvent) -> Option<Message> {
    if is_ctrl_c(&key) {
        return Some(Message::Quit);
    }

    match key.code {
        KeyCode::Enter | KeyCode::Char('y' | 'Y') => Some(Message::Confirm),
        KeyCode::Esc | KeyCode::Char('n' | 'N') => Some(Message::Cancel),
        _ => None,
    }
}
