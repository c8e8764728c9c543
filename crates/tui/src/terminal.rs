//! Entering and leaving the full-screen terminal mode.
//!
//! The quest board owns the whole terminal while it runs: raw mode, the
//! alternate screen, mouse capture for clicking cards, and bracketed paste
//! so pasted text arrives in prompts as one piece. These helpers switch into
//! that state and back, including when the application panics.

use std::io::{self, Stdout, Write};

use crossterm::{
    event::{
        DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// The terminal type used by the application.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Window title shown while the board is open.
const WINDOW_TITLE: &str = "orcganizer";

/// Error raised while switching the terminal in or out of TUI mode.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    /// Could not enter TUI mode.
    #[error("failed to setup terminal: {0}")]
    Setup(#[source] io::Error),

    /// Could not give the terminal back.
    #[error("failed to restore terminal: {0}")]
    Restore(#[source] io::Error),
}

/// Writes the escape sequences that undo what [`setup_terminal`] enabled.
fn leave_tui_mode(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )
}

/// Puts the terminal into raw mode on the alternate screen.
///
/// # Errors
///
/// Returns an error if any terminal operation fails.
///
/// # Examples
///
/// ```no_run
/// use orcganizer_tui::terminal;
///
/// let mut terminal = terminal::setup_terminal().expect("failed to setup terminal");
/// // Draw the board...
/// terminal::restore_terminal(&mut terminal).expect("failed to restore terminal");
/// ```
pub fn setup_terminal() -> Result<AppTerminal, TerminalError> {
    enable_raw_mode().map_err(TerminalError::Setup)?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste,
        SetTitle(WINDOW_TITLE)
    )
    .map_err(TerminalError::Setup)?;
    Terminal::new(CrosstermBackend::new(stdout)).map_err(TerminalError::Setup)
}

/// Undoes [`setup_terminal`] and shows the cursor again.
///
/// # Errors
///
/// Returns an error if any terminal operation fails.
pub fn restore_terminal(terminal: &mut AppTerminal) -> Result<(), TerminalError> {
    disable_raw_mode().map_err(TerminalError::Restore)?;
    leave_tui_mode(terminal.backend_mut()).map_err(TerminalError::Restore)?;
    terminal.show_cursor().map_err(TerminalError::Restore)
}

/// Installs a panic hook that gives the terminal back before the panic
/// message is printed.
///
/// Call it once, before [`setup_terminal`].
///
/// # Examples
///
/// ```no_run
/// use orcganizer_tui::terminal;
///
/// terminal::install_panic_hook();
/// let mut terminal = terminal::setup_terminal().expect("failed to setup terminal");
/// ```
pub fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        // Best effort: the terminal may be half set up.
        let _ = disable_raw_mode();
        let _ = leave_tui_mode(&mut io::stdout());
        previous(info);
    }));
}
