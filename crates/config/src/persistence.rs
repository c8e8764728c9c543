//! Configuration file reading and writing.
//!
//! Configuration is read as JSON5 (which also accepts plain JSON) and written
//! back as pretty-printed JSON. Files are searched in this order:
//!
//! 1. Local: `./orcganizer.json5` or `./orcganizer.json`
//! 2. User: `~/.config/orcganizer/config.json5` or `~/.config/orcganizer/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Configuration file names to search for, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["orcganizer.json5", "orcganizer.json"];

/// User config directory name.
const USER_CONFIG_DIR: &str = "orcganizer";

/// User config file names to search for, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file path, if any.
///
/// # Examples
///
/// ```no_run
/// use orcganizer_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let local = CONFIG_FILE_NAMES.iter().map(PathBuf::from);
    let user = dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_DIR))
        .into_iter()
        .flat_map(|dir| USER_CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)));
    local.chain(user).find(|path| path.exists())
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Parses configuration text.
///
/// # Errors
///
/// Returns an error if the content is neither JSON5 nor JSON.
pub fn parse_config<T: serde::de::DeserializeOwned>(content: &str) -> Result<T> {
    serde_json5::from_str(content).map_err(ConfigError::from)
}

/// Writes a configuration to a file as pretty-printed JSON.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns an error if the directory or the file cannot be written, or the
/// configuration cannot be serialized.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        window: u64,
    }

    #[test]
    fn parse_json5_with_comments() {
        let sample: Sample = parse_config(
            r#"
            {
                // The quest log
                name: "quests",
                window: 6,
            }
            "#,
        )
        .unwrap();
        assert_eq!(sample.name, "quests");
        assert_eq!(sample.window, 6);
    }

    #[test]
    fn parse_plain_json() {
        let sample: Sample = parse_config(r#"{"name": "quests", "window": 7}"#).unwrap();
        assert_eq!(sample.window, 7);
    }

    #[test]
    fn read_nonexistent_file() {
        let result: Result<Sample> = read_config_file("/nonexistent/orcganizer.json");
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn read_invalid_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("invalid.json");
        std::fs::write(&path, "not a config").unwrap();

        let result: Result<Sample> = read_config_file(&path);
        assert!(matches!(result, Err(ConfigError::ParseJson5(_))));
    }

    #[test]
    fn write_creates_parent_directories_and_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let original = Sample {
            name: "quests".to_string(),
            window: 5,
        };

        write_config_file(&path, &original).unwrap();
        let loaded: Sample = read_config_file(&path).unwrap();
        assert_eq!(loaded, original);
    }
}
