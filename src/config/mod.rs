//! Configuration for the intake demo page

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Poll interval in milliseconds for terminal events and deferred tasks
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Delay in milliseconds before the error summary takes focus after a failed submit
    #[serde(default = "default_live_region_delay")]
    pub live_region_delay_ms: u64,

    /// Title shown in the form dialog heading
    #[serde(default = "default_title")]
    pub title: String,
}

const fn default_poll_interval() -> u64 {
    100
}

const fn default_live_region_delay() -> u64 {
    100
}

fn default_title() -> String {
    crate::form::surface::DEFAULT_TITLE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            live_region_delay_ms: default_live_region_delay(),
            title: default_title(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing the config file fails
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Save configuration to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be created or the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory {}", parent.display())
            })?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        crate::paths::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("intake")
            .join("config.json")
    }

    /// Event poll interval
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Delay before the error summary takes focus
    #[must_use]
    pub const fn live_region_delay(&self) -> Duration {
        Duration::from_millis(self.live_region_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.live_region_delay(), Duration::from_millis(100));
        assert_eq!(config.title, "Application Form");
    }

    #[test]
    fn test_save_and_load() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.json");

        let config = Config {
            poll_interval_ms: 250,
            live_region_delay_ms: 50,
            title: "Apply".to_string(),
        };
        config.save_to(&config_path)?;

        assert_eq!(Config::load_from(&config_path)?, config);
        Ok(())
    }

    #[test]
    fn test_missing_fields_use_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, r#"{"title": "Join us"}"#)?;

        let config = Config::load_from(&config_path)?;

        assert_eq!(config.title, "Join us");
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.live_region_delay_ms, 100);
        Ok(())
    }

    #[test]
    fn test_load_from_invalid_json_reports_path() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "not json")?;

        let err = Config::load_from(&config_path)
            .err()
            .ok_or("invalid JSON must not load")?;

        assert!(err.to_string().contains("Failed to parse config"));
        Ok(())
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = Config::load_from(Path::new("/nonexistent/intake/config.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_default_path_ends_with_config_json() {
        assert!(Config::default_path().ends_with("intake/config.json"));
    }
}
