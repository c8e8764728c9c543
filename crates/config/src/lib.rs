//! Configuration and persistence for the orcganizer application.
//!
//! This crate loads the application configuration and owns everything that
//! touches stored boards.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`undo`]: Undo window configuration
//! - [`persistence`]: Config file reading and writing
//! - [`storage`]: Keyed storage backends (files, memory)
//! - [`envelope`]: The versioned stored form of the board tree
//! - [`normalize`]: Best-effort repair of stored boards
//! - [`adapter`]: Loading, migrating and saving the board tree
//! - [`error`]: Error types for configuration and storage
//!
//! # Configuration Sources (Priority)
//!
//! 1. Local config (`./orcganizer.json5` or `./orcganizer.json`)
//! 2. User config (`~/.config/orcganizer/config.json5` or `~/.config/orcganizer/config.json`)
//! 3. Built-in defaults
//!
//! ```json5
//! {
//!   storage: { data_dir: "/home/me/quests" },
//!   undo: { window_secs: 6 },   // 5 to 8 seconds
//!   ids: "random",              // or "sequential"
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use orcganizer_config::{Config, PersistenceAdapter};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = Config::load().await?;
//! let adapter = PersistenceAdapter::open(config.data_dir()?)?;
//! let mut ids = config.ids.generator();
//! if let Some(tree) = adapter.load(&mut *ids) {
//!     println!("Loaded {} boards", tree.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod config;
pub mod envelope;
pub mod error;
pub mod normalize;
pub mod persistence;
pub mod storage;
pub mod undo;

// Re-export primary types at crate root for convenience
pub use adapter::PersistenceAdapter;
pub use config::{Config, IdStrategy, StorageConfig};
pub use error::{ConfigError, Result, StorageError, StorageResult};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use undo::UndoConfig;
