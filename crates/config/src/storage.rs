//! Keyed storage backends.
//!
//! Boards are stored as strings under a handful of well-known keys. A
//! [`KeyValueStore`] hides where those strings actually live:
//!
//! - [`FileStore`]: one file per key in the data directory
//! - [`MemoryStore`]: an in-process map, for tests and the demo mode
//!
//! # Directory Structure
//!
//! ```text
//! ~/.local/share/orcganizer/               # Linux
//! ~/Library/Application Support/orcganizer/  # macOS
//! ├── orcganizer_boards_v3.json
//! └── orcganizer.log
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, instrument, warn};

use crate::error::{StorageError, StorageResult};

/// A string store addressed by key.
pub trait KeyValueStore: fmt::Debug + Send {
    /// Returns the value stored under `key`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the value exists but cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes the value stored under `key`. Removing a missing key is fine.
    ///
    /// # Errors
    ///
    /// Returns an error if the value exists but cannot be removed.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Stores each key as a JSON file in a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Creates a store in `base_path`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use orcganizer_config::storage::{FileStore, KeyValueStore};
    ///
    /// let store = FileStore::with_path("/tmp/orcganizer").expect("data dir");
    /// store.set("greeting", "\"hail\"").expect("write");
    /// ```
    #[instrument(skip_all)]
    pub fn with_path(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();
        debug!(?base_path, "opening file store");
        if !base_path.exists() {
            debug!(?base_path, "creating data directory");
            fs::create_dir_all(&base_path).map_err(|source| StorageError::Write {
                key: base_path.display().to_string(),
                source,
            })?;
        }
        Ok(Self { base_path })
    }

    /// Returns the directory the files live in.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Returns the file path for a key.
    ///
    /// Anything that could escape the directory is replaced with `_`.
    fn key_path(&self, key: &str) -> PathBuf {
        let safe_key = key.replace(['/', '\\', '.'], "_");
        self.base_path.join(format!("{safe_key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.key_path(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(?path, "no stored value");
                Ok(None)
            }
            Err(source) => {
                warn!(?path, error = %source, "failed to read stored value");
                Err(StorageError::Read {
                    key: key.to_string(),
                    source,
                })
            }
        }
    }

    /// Writes to a sibling temporary file first and renames it over the
    /// target, so an interrupted write never leaves a truncated value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.key_path(key);
        let partial = path.with_extension("json.partial");
        fs::write(&partial, value)
            .and_then(|()| fs::rename(&partial, &path))
            .map_err(|source| {
                let _ = fs::remove_file(&partial);
                StorageError::Write {
                    key: key.to_string(),
                    source,
                }
            })?;
        debug!(?path, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.key_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// Keeps values in memory.
///
/// Clones share the same entries, so a test can keep a handle on a store it
/// gave away. Writes can be made to fail to model a full or disabled storage.
///
/// # Examples
///
/// ```
/// use orcganizer_config::storage::{KeyValueStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.set("k", "v").unwrap();
/// assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
///
/// store.fail_writes(true);
/// assert!(store.set("k", "w").is_err());
/// assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `set` fail (or succeed again).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns the stored keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("quota exceeded writing {key}")));
        }
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}
