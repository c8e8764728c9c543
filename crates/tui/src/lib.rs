//! Terminal UI for orcganizer.
//!
//! This crate provides a Ratatui-based terminal interface for browsing and
//! editing quest boards: boards are shown one at a time as a row of columns
//! holding task cards, which can be dragged with the keyboard or the mouse.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`app`]: Main application struct and run loop
//! - [`state`]: Application state management
//! - [`event`]: Event handling and key mappings
//! - [`layout`]: Placement of columns, cards and board tabs
//! - [`palette`]: Header colors
//! - [`terminal`]: Terminal setup, teardown, and panic handling
//! - [`widgets`]: Rendering functions
//!
//! # Example
//!
//! ```no_run
//! use orcganizer_store::{SequentialIds, TreeStore};
//! use orcganizer_tui::{App, terminal};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     terminal::install_panic_hook();
//!     let mut terminal = terminal::setup_terminal()?;
//!
//!     let mut app = App::new(TreeStore::new(SequentialIds::new()));
//!     let result = app.run(&mut terminal).await;
//!
//!     terminal::restore_terminal(&mut terminal)?;
//!     result
//! }
//! ```

pub mod app;
pub mod event;
pub mod layout;
pub mod palette;
pub mod state;
pub mod terminal;
pub mod widgets;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export primary types at crate root for convenience
pub use app::App;
pub use state::{AppState, Focus};
