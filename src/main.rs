//! orcganizer - A fantasy-themed quest board in the terminal.
//!
//! This is the main binary that launches the TUI application.
//!
//! Boards are loaded from the data directory and saved back after every
//! change. Pass `--demo` to start from sample boards kept in memory only.

use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context;
use orcganizer_config::{Config, MemoryStore, PersistenceAdapter};
use orcganizer_protocol::dummy::sample_tree;
use orcganizer_store::{SequentialIds, TreeStore};
use orcganizer_tui::{App, terminal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "ORCGANIZER_LOG";

/// Name of the log file in the data directory.
const LOG_FILE: &str = "orcganizer.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let demo = std::env::args().skip(1).any(|arg| arg == "--demo");

    let config = Config::load().await.context("loading configuration")?;
    let data_dir = config.data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating {}", data_dir.display()))?;
    init_logging(&data_dir)?;

    let store = if demo {
        info!("starting with sample boards");
        TreeStore::with_tree(sample_tree(), SequentialIds::new())
            .with_persist(PersistenceAdapter::new(MemoryStore::new()))
    } else {
        let adapter = PersistenceAdapter::open(&data_dir)?;
        let mut ids = config.ids.generator();
        let tree = adapter.load(&mut *ids).unwrap_or_default();
        info!(boards = tree.len(), data_dir = %data_dir.display(), "starting");
        TreeStore::with_tree(tree, ids).with_persist(adapter)
    };
    let store = store.with_undo_window(config.undo.window());

    // Install panic hook to restore terminal on panic
    terminal::install_panic_hook();

    // Setup terminal
    let mut terminal = terminal::setup_terminal()?;

    let mut app = App::new(store);

    // Run the main loop
    let result = app.run(&mut terminal).await;

    // Always restore terminal, even if app.run() failed
    terminal::restore_terminal(&mut terminal)?;

    if let Err(err) = &result {
        warn!(error = %err, "exited with an error");
    }
    result
}

/// Sends `tracing` output to the log file in `data_dir`.
///
/// The terminal belongs to the UI, so nothing is written to stdout or stderr.
fn init_logging(data_dir: &Path) -> anyhow::Result<()> {
    let path = data_dir.join(LOG_FILE);
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
