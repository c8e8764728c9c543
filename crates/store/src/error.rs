//! Error types for the store crate.

use thiserror::Error;

/// A boxed error from a persistence backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur around the tree store.
///
/// None of these ever change the in-memory tree: a failed save is logged and
/// the store keeps going.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A drag container key could not be parsed.
    #[error("invalid container key: {0:?}")]
    InvalidContainerKey(String),

    /// The persistence sink failed to write the tree.
    #[error("failed to persist boards")]
    PersistFailed(#[source] BoxError),
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
