//! Config persistence and path resolution for `Config`.
//!
//! Covers:
//! - `load` / `load_from` (YAML file read, defaults when absent)
//! - `save_to` (atomic write via temp file + rename)
//! - XDG-compliant path helpers (`config_dir`, `config_path`)

use super::Config;
use crate::defaults::CONFIG_FILE_NAME;
use crate::error::ConfigError;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    /// Directory holding the config file (`~/.config/tabshift` on Linux).
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tabshift")
    }

    /// Default config file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("Config file not found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml_ng::from_str(contents)?;
        config.warn_suspicious_values();
        Ok(config)
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Write to a temp file then rename so a crash never leaves a torn file
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        log::info!("Config saved to {:?}", path);
        Ok(())
    }

    fn warn_suspicious_values(&self) {
        if self.padding < 0 {
            log::warn!("Config padding {} is negative and will be treated as 0", self.padding);
        }
        for (language, settings) in &self.language_overrides {
            if language.trim().is_empty() {
                log::warn!("Config has a language override with an empty language id");
            }
            if settings.is_empty() {
                log::debug!("Language override for '{}' sets no keys", language);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RawSettings;
    use crate::types::Direction;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_reload_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join(CONFIG_FILE_NAME);

        let config = Config::new()
            .with_direction(Direction::Right)
            .with_padding(2)
            .with_filters(["pinned", "dirty"])
            .with_language_override(
                "markdown",
                RawSettings {
                    enabled: Some(false),
                    ..RawSettings::default()
                },
            );
        config.save_to(&path).expect("Failed to save config");

        let loaded = Config::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded, config);
        assert!(!path.with_extension("yaml.tmp").exists());
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "\n").expect("Failed to write config");

        let loaded = Config::load_from(&path).expect("Failed to load config");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let err = Config::from_yaml("direction: [left").expect_err("should fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = Config::load_from(&temp_dir.path().join("missing.yaml")).expect_err("missing");
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
