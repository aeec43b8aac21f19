//! Application settings for the stickmap binary
//!
//! Read from `<config dir>/stickmap/stickmap.toml`. Every field has a default,
//! so a missing file or missing keys never stop startup.

use crate::controller::stick::DEFAULT_EVENT_CAPACITY;
use crate::persistence::profile;
use color_eyre::{eyre::eyre, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn, Level};

const CONFIG_DIR: &str = "stickmap";
const CONFIG_FILE: &str = "stickmap.toml";

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Profile name, resolved under the config directory
    #[serde(default = "default_profile_name")]
    pub profile_name: String,
    /// Explicit profile file, wins over `profile_name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_path: Option<PathBuf>,
    /// 0-based stick index the binary drives
    #[serde(default)]
    pub stick_index: usize,
    #[serde(default = "default_x_axis")]
    pub x_axis: usize,
    #[serde(default = "default_y_axis")]
    pub y_axis: usize,
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_profile_name() -> String {
    "default".to_string()
}
fn default_x_axis() -> usize {
    0
}
fn default_y_axis() -> usize {
    1
}
fn default_event_capacity() -> usize {
    DEFAULT_EVENT_CAPACITY
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            profile_name: default_profile_name(),
            profile_path: None,
            stick_index: 0,
            x_axis: default_x_axis(),
            y_axis: default_y_axis(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl AppConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;
        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Missing file means defaults, a broken file is reported
    pub async fn load_or_default(path: &Path) -> Result<Self> {
        let exists = tokio::fs::try_exists(path)
            .await
            .map_err(|e| eyre!("Failed to check config file {}: {}", path.display(), e))?;
        if exists {
            Self::load(path).await
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Log level as understood by tracing, `None` if unparseable
    pub fn level(&self) -> Option<Level> {
        self.log_level.parse().ok()
    }

    pub fn profile_file(&self) -> PathBuf {
        self.profile_path
            .clone()
            .unwrap_or_else(|| profile::default_path(&self.profile_name))
    }
}

/// `<config dir>/stickmap/stickmap.toml`
pub fn default_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| {
        warn!("Could not determine config directory, using current directory");
        PathBuf::from(".")
    });
    path.push(CONFIG_DIR);
    path.push(CONFIG_FILE);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_use_defaults() {
        let config: AppConfig = toml::from_str("log_level = \"debug\"").unwrap();
        assert_eq!(config.level(), Some(Level::DEBUG));
        assert_eq!(config.profile_name, "default");
        assert_eq!(config.y_axis, 1);
        assert_eq!(config.event_capacity, DEFAULT_EVENT_CAPACITY);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let config = AppConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level(), None);
    }

    #[test]
    fn test_profile_path_wins() {
        let mut config = AppConfig::default();
        assert!(config.profile_file().ends_with("profiles/default.toml"));
        config.profile_path = Some(PathBuf::from("/tmp/racing.toml"));
        assert_eq!(config.profile_file(), PathBuf::from("/tmp/racing.toml"));
    }

    #[tokio::test]
    async fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stickmap.toml");
        assert_eq!(
            AppConfig::load_or_default(&path).await.unwrap(),
            AppConfig::default()
        );

        tokio::fs::write(&path, "stick_index = 2\nx_axis = 3\ny_axis = 4\n")
            .await
            .unwrap();
        let config = AppConfig::load_or_default(&path).await.unwrap();
        assert_eq!((config.stick_index, config.x_axis, config.y_axis), (2, 3, 4));

        tokio::fs::write(&path, "stick_index = [").await.unwrap();
        assert!(AppConfig::load_or_default(&path).await.is_err());
    }
}
