//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the orcganizer application.

use std::path::{Path, PathBuf};

use orcganizer_store::{IdGenerator, RandomIds, SequentialIds};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file, parse_config, read_config_file, write_config_file};
use crate::undo::UndoConfig;

/// Data directory name under the platform data directory.
const DATA_DIR_NAME: &str = "orcganizer";

/// The main configuration struct for the orcganizer application.
///
/// # Examples
///
/// ```
/// use orcganizer_config::{Config, IdStrategy, UndoConfig};
///
/// // Create a default config
/// let config = Config::default();
/// assert_eq!(config.ids, IdStrategy::Random);
///
/// // Create a custom config
/// let config = Config {
///     undo: UndoConfig::with_window(8),
///     ids: IdStrategy::Sequential,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where boards are stored.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Undo window for card deletions.
    #[serde(default)]
    pub undo: UndoConfig,

    /// How new ids are generated.
    #[serde(default)]
    pub ids: IdStrategy,
}

/// Storage location configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the stored boards and the log file.
    ///
    /// Defaults to the platform data directory (`~/.local/share/orcganizer`
    /// on Linux).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Id generation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// Random uuid-based ids.
    #[default]
    Random,
    /// Counter-based ids (`b-1`, `t-2`...), handy for demos and debugging.
    Sequential,
}

impl IdStrategy {
    /// Builds an id generator for this strategy.
    #[must_use]
    pub fn generator(self) -> Box<dyn IdGenerator + Send> {
        match self {
            Self::Random => Box::new(RandomIds::new()),
            Self::Sequential => Box::new(SequentialIds::new()),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    ///
    /// This is equivalent to `Config::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./orcganizer.json5` or `./orcganizer.json`
    /// 2. User: `~/.config/orcganizer/config.json5` or `~/.config/orcganizer/config.json`
    ///
    /// If no configuration file is found, returns a default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use orcganizer_config::Config;
    ///
    /// # async fn example() -> orcganizer_config::Result<()> {
    /// let config = Config::load().await?;
    /// println!("Undo window: {} seconds", config.undo.window_secs);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load() -> Result<Self> {
        let Some(path) = find_config_file() else {
            return Ok(Self::default());
        };
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::ReadFile {
                path: path.clone(),
                source,
            })?;
        let config: Config = parse_config(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the undo window is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use orcganizer_config::{Config, UndoConfig};
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.undo = UndoConfig::with_window(1);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.undo.validate()?;
        Ok(())
    }

    /// Returns the data directory, falling back to the platform default.
    ///
    /// # Errors
    ///
    /// Returns an error if no directory is configured and the platform data
    /// directory cannot be determined.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|d| d.join(DATA_DIR_NAME))
            .ok_or(ConfigError::NoDataDirectory)
    }
}

#[cfg(test)]
mod tests {
    use orcganizer_store::IdKind;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.undo.window_secs, 6);
        assert_eq!(config.ids, IdStrategy::Random);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn new_config() {
        assert_eq!(Config::new(), Config::default());
    }

    #[test]
    fn validate_invalid_undo_window() {
        let config = Config {
            undo: UndoConfig::with_window(20),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn configured_data_dir_wins() {
        let config = Config {
            storage: StorageConfig {
                data_dir: Some(PathBuf::from("/tmp/quests")),
            },
            ..Default::default()
        };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/quests"));
    }

    #[test]
    fn sequential_strategy_builds_sequential_ids() {
        let mut ids = IdStrategy::Sequential.generator();
        assert_eq!(ids.next_id(IdKind::Board), "b-1");
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn data_dir_not_serialized_when_none() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(!json.contains("data_dir"));
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json5");
        std::fs::write(
            &path,
            r#"
            {
                // Boards live next to the config.
                storage: { data_dir: "/srv/quests" },
                undo: { window_secs: 8 },
                ids: "sequential",
            }
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/srv/quests")));
        assert_eq!(config.undo.window_secs, 8);
        assert_eq!(config.ids, IdStrategy::Sequential);
    }

    #[test]
    fn load_from_rejects_invalid_window() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"undo": {"window_secs": 60}}"#).unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUndoWindow { .. }));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let original = Config {
            storage: StorageConfig {
                data_dir: Some(dir.path().join("data")),
            },
            undo: UndoConfig::with_window(7),
            ids: IdStrategy::Sequential,
        };

        original.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(original, loaded);
    }
}
