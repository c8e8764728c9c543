//! The stored form of the board tree.
//!
//! The current format is a versioned envelope stored under [`STORAGE_KEY`]:
//!
//! ```json
//! { "version": 3, "boards": [ ... ] }
//! ```
//!
//! Older releases stored a bare array of boards under one of the
//! [`LEGACY_KEYS`]. Both are decoded into untyped JSON so that partial or
//! malformed records can still be normalized.

use orcganizer_protocol::BoardTree;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

/// Key of the current envelope.
pub const STORAGE_KEY: &str = "orcganizer.boards.v3";

/// Keys older releases stored boards under, newest first.
pub const LEGACY_KEYS: [&str; 2] = ["orcganizer.boards.v2", "orcganizer.boards.v1"];

/// Version written into every envelope.
pub const ENVELOPE_VERSION: u64 = 3;

#[derive(Serialize)]
struct Envelope<'a> {
    version: u64,
    boards: &'a BoardTree,
}

/// Serializes `tree` into a current envelope.
///
/// # Errors
///
/// Returns an error if the tree cannot be serialized.
///
/// # Examples
///
/// ```
/// use orcganizer_config::envelope::encode;
/// use orcganizer_protocol::BoardTree;
///
/// assert_eq!(encode(&BoardTree::new()).unwrap(), r#"{"version":3,"boards":[]}"#);
/// ```
pub fn encode(tree: &BoardTree) -> serde_json::Result<String> {
    serde_json::to_string(&Envelope {
        version: ENVELOPE_VERSION,
        boards: tree,
    })
}

/// Extracts the raw boards from a current envelope.
///
/// Returns `None` if `raw` is not JSON or has no `boards` array. An envelope
/// written by a newer release is read on a best-effort basis.
#[must_use]
pub fn decode_envelope(raw: &str) -> Option<Vec<Value>> {
    let value: Value = serde_json::from_str(raw)
        .inspect_err(|e| warn!(error = %e, "stored envelope is not valid JSON"))
        .ok()?;
    let version = value.get("version").and_then(Value::as_u64);
    if version.is_some_and(|v| v > ENVELOPE_VERSION) {
        warn!(?version, "stored boards come from a newer release");
    }
    match value {
        Value::Object(mut map) => match map.remove("boards") {
            Some(Value::Array(boards)) => Some(boards),
            _ => None,
        },
        _ => None,
    }
}

/// Extracts the raw boards from a legacy record (a bare array).
#[must_use]
pub fn decode_legacy(raw: &str) -> Option<Vec<Value>> {
    match serde_json::from_str(raw) {
        Ok(Value::Array(boards)) => Some(boards),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, "legacy boards are not valid JSON");
            None
        }
    }
}
