use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SafePassError};
use crate::vault::format::{default_store_path, DEFAULT_FILE_NAME};

/// Application configuration, loaded from `<home>/SafePassConfig/config.json`.
///
/// Every field except `fileLocation` has a sensible default, and a
/// missing file yields defaults for all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Where the store file lives.  A directory gets `passwords.spv`
    /// appended.
    pub file_location: String,

    /// Length used by `generate` and `add --generate` when none is given.
    #[serde(default = "default_generator_length")]
    pub generator_length: usize,

    /// Folders registered in addition to the built-in ones.
    #[serde(default)]
    pub folders: Vec<String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_generator_length() -> usize {
    16
}

fn default_file_location() -> String {
    default_store_path()
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_FILE_NAME))
        .to_string_lossy()
        .into_owned()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            file_location: default_file_location(),
            generator_length: default_generator_length(),
            folders: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Directory (under the home directory) holding the config file.
    pub const DIR_NAME: &'static str = "SafePassConfig";

    /// Name of the config file.
    pub const FILE_NAME: &'static str = "config.json";

    /// Build a config that points at `file_location`.
    pub fn new(file_location: impl Into<String>) -> Self {
        Self {
            file_location: file_location.into(),
            ..Self::default()
        }
    }

    /// Default config path: `<home>/SafePassConfig/config.json`.
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(Self::DIR_NAME).join(Self::FILE_NAME))
            .ok_or_else(|| SafePassError::ConfigError("cannot determine home directory".into()))
    }

    /// Load the config at `path`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;

        let config: AppConfig = serde_json::from_str(&contents).map_err(|e| {
            SafePassError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })?;

        Ok(config)
    }

    /// Create the config file at `path`, including parent directories.
    ///
    /// Fails if a config file is already there.
    pub fn create(path: &Path, file_location: &str) -> Result<Self> {
        if path.exists() {
            return Err(SafePassError::ConfigError(format!(
                "config file already exists at {}",
                path.display()
            )));
        }

        let config = Self::new(file_location);
        config.save(path)?;
        Ok(config)
    }

    /// Write this config to `path`, overwriting any previous contents.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| SafePassError::SerializationError(format!("config: {e}")))?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Remove the config file at `path`.  A missing file is not an error.
    pub fn delete(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve `file_location` to the store file path.
    ///
    /// Example: `/home/user/vault` (a directory) → `/home/user/vault/passwords.spv`
    pub fn store_path(&self) -> PathBuf {
        let location = PathBuf::from(&self.file_location);
        if location.is_dir() {
            location.join(DEFAULT_FILE_NAME)
        } else {
            location
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_sensible() {
        let c = AppConfig::default();
        assert!(c.file_location.ends_with(DEFAULT_FILE_NAME));
        assert_eq!(c.generator_length, 16);
        assert!(c.folders.is_empty());
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig::load(&tmp.path().join("config.json")).unwrap();
        assert_eq!(config.generator_length, 16);
    }

    #[test]
    fn load_parses_json_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(
            &path,
            r#"{ "fileLocation": "/data/pw.spv", "generatorLength": 24, "folders": ["Work"] }"#,
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.file_location, "/data/pw.spv");
        assert_eq!(config.generator_length, 24);
        assert_eq!(config.folders, vec!["Work".to_string()]);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, r#"{ "fileLocation": "/data/pw.spv" }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.file_location, "/data/pw.spv");
        assert_eq!(config.generator_length, 16);
        assert!(config.folders.is_empty());
    }

    #[test]
    fn load_errors_on_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        fs::write(&path, "not valid {{json").unwrap();

        let result = AppConfig::load(&path);
        assert!(matches!(result, Err(SafePassError::ConfigError(_))));
    }

    #[test]
    fn create_then_load_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("SafePassConfig").join("config.json");

        AppConfig::create(&path, "/data/pw.spv").unwrap();
        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.file_location, "/data/pw.spv");

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"fileLocation\""));
    }

    #[test]
    fn create_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        AppConfig::create(&path, "a").unwrap();
        assert!(AppConfig::create(&path, "b").is_err());
    }

    #[test]
    fn delete_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.json");
        AppConfig::create(&path, "a").unwrap();
        AppConfig::delete(&path).unwrap();
        assert!(!path.exists());
        AppConfig::delete(&path).unwrap();
    }

    #[test]
    fn store_path_appends_file_name_for_directories() {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig::new(tmp.path().to_string_lossy());
        assert_eq!(config.store_path(), tmp.path().join(DEFAULT_FILE_NAME));

        let file = tmp.path().join("mine.spv");
        let config = AppConfig::new(file.to_string_lossy());
        assert_eq!(config.store_path(), file);
    }
}
