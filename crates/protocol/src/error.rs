//! Error types for the orcganizer-protocol crate.
//!
//! Tree operations never fail: a missing board, column or card makes them a
//! no-op. The errors here come from parsing the small enumerations that make
//! up a card, and from the JSON form of the tree.

use thiserror::Error;

/// Errors that can occur when working with protocol types.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Failed to serialize a protocol type to JSON.
    #[error("failed to serialize to JSON: {0}")]
    SerializationFailed(#[source] serde_json::Error),

    /// Failed to deserialize a protocol type from JSON.
    #[error("failed to deserialize from JSON: {0}")]
    DeserializationFailed(#[source] serde_json::Error),

    /// The icon name is not one of the known icons.
    #[error("unknown icon: {0:?}")]
    UnknownIcon(String),

    /// The quest kind is neither `main` nor `sub`.
    #[error("unknown task type: {0:?}")]
    UnknownTaskType(String),

    /// The pattern type is neither `default` nor `dither`.
    #[error("unknown pattern type: {0:?}")]
    UnknownPatternType(String),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
