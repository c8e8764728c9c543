//! Undo window configuration.
//!
//! A deleted card can be restored for a few seconds after the deletion. The
//! window is configurable, but only within a short range: long enough to
//! notice a mistake, short enough that a stale undo does not surprise.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default undo window (6 seconds).
pub const DEFAULT_UNDO_WINDOW_SECS: u64 = 6;

/// Minimum allowed undo window (5 seconds).
pub const MIN_UNDO_WINDOW_SECS: u64 = 5;

/// Maximum allowed undo window (8 seconds).
pub const MAX_UNDO_WINDOW_SECS: u64 = 8;

/// Configuration for the card deletion undo window.
///
/// # Examples
///
/// ```
/// use orcganizer_config::UndoConfig;
///
/// let config = UndoConfig::default();
/// assert_eq!(config.window_secs, 6);
/// assert!(config.validate().is_ok());
///
/// assert!(UndoConfig::with_window(30).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoConfig {
    /// How long a deleted card can be restored, in seconds.
    #[serde(default = "default_window")]
    pub window_secs: u64,
}

fn default_window() -> u64 {
    DEFAULT_UNDO_WINDOW_SECS
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            window_secs: DEFAULT_UNDO_WINDOW_SECS,
        }
    }
}

impl UndoConfig {
    /// Creates a configuration with the given window.
    #[must_use]
    pub fn with_window(window_secs: u64) -> Self {
        Self { window_secs }
    }

    /// Returns the window as a [`Duration`].
    #[must_use]
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Validates the window.
    ///
    /// # Errors
    ///
    /// Returns an error if the window is outside 5-8 seconds.
    pub fn validate(&self) -> Result<()> {
        if self.window_secs < MIN_UNDO_WINDOW_SECS {
            return Err(ConfigError::InvalidUndoWindow {
                reason: format!(
                    "window must be at least {MIN_UNDO_WINDOW_SECS} seconds, got {}",
                    self.window_secs
                ),
            });
        }

        if self.window_secs > MAX_UNDO_WINDOW_SECS {
            return Err(ConfigError::InvalidUndoWindow {
                reason: format!(
                    "window must be at most {MAX_UNDO_WINDOW_SECS} seconds, got {}",
                    self.window_secs
                ),
            });
        }

        Ok(())
    }
}
