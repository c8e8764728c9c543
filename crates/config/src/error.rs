//! Error types for configuration and storage operations.
//!
//! This module defines the error types that can occur during configuration
//! loading, parsing and validation, and while reading or writing stored
//! boards.

use std::path::PathBuf;

/// Errors that can occur during configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file at {path}: {source}")]
    ReadFile {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file at {path}: {source}")]
    WriteFile {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON5 configuration.
    #[error("failed to parse config: {0}")]
    ParseJson5(#[from] serde_json5::Error),

    /// Failed to serialize configuration to JSON.
    #[error("failed to serialize config: {0}")]
    SerializeJson(#[from] serde_json::Error),

    /// Invalid undo window.
    #[error("invalid undo window: {reason}")]
    InvalidUndoWindow {
        /// The reason the window is invalid.
        reason: String,
    },

    /// Failed to determine the data directory.
    #[error("could not determine data directory")]
    NoDataDirectory,
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while reading or writing stored boards.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to read a stored value.
    #[error("failed to read {key}: {source}")]
    Read {
        /// The key that could not be read.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a stored value.
    #[error("failed to write {key}: {source}")]
    Write {
        /// The key that could not be written.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove a stored value.
    #[error("failed to remove {key}: {source}")]
    Remove {
        /// The key that could not be removed.
        key: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the boards.
    #[error("failed to serialize boards: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The storage refuses writes (full or disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A specialized Result type for storage operations.
pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_undo_window() {
        let err = ConfigError::InvalidUndoWindow {
            reason: "must be at least 5 seconds".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid undo window: must be at least 5 seconds"
        );
    }

    #[test]
    fn display_storage_write() {
        let err = StorageError::Write {
            key: "orcganizer.boards.v3".to_string(),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(err.to_string(), "failed to write orcganizer.boards.v3: disk full");
    }
}
