//! The persistence adapter.
//!
//! [`PersistenceAdapter`] is the only part of the application that knows how
//! boards are stored. It loads the tree once at startup, migrating legacy
//! records to the current envelope, and is then handed to the tree store as
//! its write-through [`Persist`] sink.

use std::path::PathBuf;

use orcganizer_protocol::BoardTree;
use orcganizer_store::{IdGenerator, Persist, StoreError};
use tracing::{debug, info, instrument, warn};

use crate::envelope::{LEGACY_KEYS, STORAGE_KEY, decode_envelope, decode_legacy, encode};
use crate::error::StorageResult;
use crate::normalize::normalize_boards;
use crate::storage::{FileStore, KeyValueStore};

/// Loads and saves the board tree through a [`KeyValueStore`].
///
/// # Examples
///
/// ```
/// use orcganizer_config::PersistenceAdapter;
/// use orcganizer_config::storage::MemoryStore;
/// use orcganizer_protocol::{Board, BoardTree};
/// use orcganizer_store::SequentialIds;
///
/// let adapter = PersistenceAdapter::new(MemoryStore::new());
/// assert!(adapter.load(&mut SequentialIds::new()).is_none());
///
/// let tree = BoardTree::from_boards([Board::with_default_columns("b-1", "Quests")]);
/// adapter.save(&tree).unwrap();
/// assert_eq!(adapter.load(&mut SequentialIds::new()), Some(tree));
/// ```
#[derive(Debug)]
pub struct PersistenceAdapter {
    store: Box<dyn KeyValueStore>,
}

impl PersistenceAdapter {
    /// Creates an adapter over `store`.
    #[must_use]
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Creates an adapter storing files in `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(data_dir: impl Into<PathBuf>) -> StorageResult<Self> {
        Ok(Self::new(FileStore::with_path(data_dir)?))
    }

    /// Loads the stored tree.
    ///
    /// The current envelope is read first; if it is missing or unreadable,
    /// the legacy keys are tried in order. Whatever is found is normalized
    /// (missing ids come from `ids`), rewritten under the current key, and
    /// the legacy keys are removed once the rewrite succeeded.
    ///
    /// Returns `None` if nothing usable is stored. Read failures are logged
    /// and treated as "nothing stored".
    #[instrument(skip_all)]
    pub fn load(&self, ids: &mut dyn IdGenerator) -> Option<BoardTree> {
        let current = self.read(STORAGE_KEY).and_then(|raw| {
            let boards = decode_envelope(&raw);
            if boards.is_none() {
                warn!(raw = %raw, "discarding unreadable stored boards");
            }
            boards
        });
        let (raw_boards, source) = match current {
            Some(boards) => (boards, STORAGE_KEY),
            None => LEGACY_KEYS.iter().find_map(|key| {
                self.read(key)
                    .and_then(|raw| decode_legacy(&raw))
                    .map(|boards| (boards, *key))
            })?,
        };

        let tree = normalize_boards(&raw_boards, ids);
        info!(boards = tree.len(), cards = tree.card_count(), source, "loaded boards");

        match self.save(&tree) {
            Ok(()) => self.remove_legacy_keys(),
            Err(e) => warn!(error = %e, "failed to rewrite loaded boards"),
        }
        Some(tree)
    }

    /// Writes `tree` under the current key.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree cannot be serialized or written.
    pub fn save(&self, tree: &BoardTree) -> StorageResult<()> {
        let json = encode(tree)?;
        self.store.set(STORAGE_KEY, &json)?;
        debug!(boards = tree.len(), "saved boards");
        Ok(())
    }

    /// Removes the current and every legacy key.
    ///
    /// # Errors
    ///
    /// Returns the first removal error; the other keys are still attempted.
    pub fn clear(&self) -> StorageResult<()> {
        let results: Vec<_> = std::iter::once(STORAGE_KEY)
            .chain(LEGACY_KEYS)
            .map(|key| self.store.remove(key))
            .collect();
        results.into_iter().collect()
    }

    fn read(&self, key: &str) -> Option<String> {
        self.store
            .get(key)
            .inspect_err(|e| warn!(key, error = %e, "failed to read stored boards"))
            .ok()
            .flatten()
    }

    fn remove_legacy_keys(&self) {
        for key in LEGACY_KEYS {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "failed to remove legacy boards");
            }
        }
    }
}

impl Persist for PersistenceAdapter {
    fn persist(&mut self, tree: &BoardTree) -> orcganizer_store::Result<()> {
        self.save(tree)
            .map_err(|e| StoreError::PersistFailed(Box::new(e)))
    }

    fn clear(&mut self) -> orcganizer_store::Result<()> {
        PersistenceAdapter::clear(self).map_err(|e| StoreError::PersistFailed(Box::new(e)))
    }
}
