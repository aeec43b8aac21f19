//! Profile store.
//!
//! A profile is a named TOML document holding one block per configured stick.
//! Loading and saving go through `tokio::fs`.

use super::{lenient, StickConfig};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CONFIG_DIR: &str = "stickmap";
const PROFILE_DIR: &str = "profiles";
const PROFILE_EXTENSION: &str = "toml";

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Profile could not be parsed: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Profile could not be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::value", skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Local>>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub sticks: Vec<StickConfig>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Block for the stick with the given 1-based index
    pub fn stick(&self, index: i32) -> Option<&StickConfig> {
        self.sticks.iter().find(|s| s.index == Some(index))
    }

    /// Stores a stick block, replacing an existing block with the same index.
    /// `None` removes the block, a default stick has nothing to persist.
    pub fn set_stick(&mut self, index: i32, config: Option<StickConfig>) {
        self.sticks.retain(|s| s.index != Some(index));
        if let Some(mut config) = config {
            config.index = Some(index);
            self.sticks.push(config);
            self.sticks.sort_by_key(|s| s.index);
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, ProfileError> {
        Ok(toml::from_str(text)?)
    }

    pub fn to_toml(&self) -> Result<String, ProfileError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub async fn load(path: &Path) -> Result<Self, ProfileError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ProfileError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let profile = Self::from_toml(&text)?;
        info!(
            "Loaded profile '{}' with {} stick(s) from {}",
            profile.name,
            profile.sticks.len(),
            path.display()
        );
        Ok(profile)
    }

    /// Writes the profile, creating parent directories as needed.
    /// Updates `saved_at` before writing.
    pub async fn save(&mut self, path: &Path) -> Result<(), ProfileError> {
        self.saved_at = Some(Local::now());
        let text = self.to_toml()?;

        let io_error = |source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
            }
        }
        tokio::fs::write(path, text).await.map_err(io_error)?;

        debug!("Saved profile '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Loads a profile, or starts an empty one named after the file when it
    /// does not exist yet. Unreadable or broken files are reported.
    pub async fn load_or_default(path: &Path) -> Result<Self, ProfileError> {
        match Self::load(path).await {
            Ok(profile) => Ok(profile),
            Err(ProfileError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                info!("No profile at {}, starting empty", path.display());
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Ok(Self::new(name))
            }
            Err(e) => Err(e),
        }
    }
}

/// `<config dir>/stickmap/profiles/<name>.toml`
pub fn default_path(name: &str) -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| {
        warn!("Could not determine config directory, using current directory");
        PathBuf::from(".")
    });
    path.push(CONFIG_DIR);
    path.push(PROFILE_DIR);
    path.push(name);
    path.set_extension(PROFILE_EXTENSION);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{SlotConfig, StickButtonConfig};

    fn sample_stick() -> StickConfig {
        StickConfig {
            dead_zone: Some(6000),
            diagonal_range: Some(60),
            buttons: vec![StickButtonConfig {
                index: Some(1),
                slots: vec![SlotConfig {
                    code: Some(0x77),
                    mode: Some("keyboard".to_string()),
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_set_stick_replaces_and_removes() {
        let mut profile = Profile::new("racing");
        profile.set_stick(2, Some(sample_stick()));
        profile.set_stick(1, Some(StickConfig::default()));
        assert_eq!(profile.sticks.len(), 2);
        assert_eq!(profile.sticks[0].index, Some(1));
        assert_eq!(profile.stick(2).and_then(|s| s.dead_zone), Some(6000));

        profile.set_stick(2, None);
        assert!(profile.stick(2).is_none());
        assert_eq!(profile.sticks.len(), 1);
    }

    #[test]
    fn test_default_path_layout() {
        let path = default_path("racing");
        assert!(path.ends_with("stickmap/profiles/racing.toml"));
    }

    #[test]
    fn test_broken_toml_is_parse_error() {
        let result = Profile::from_toml("sticks = [[[");
        assert!(matches!(result, Err(ProfileError::Parse(_))));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("racing.toml");

        let mut profile = Profile::new("racing");
        profile.set_stick(1, Some(sample_stick()));
        profile.save(&path).await.unwrap();
        assert!(profile.saved_at.is_some());

        let loaded = Profile::load(&path).await.unwrap();
        assert_eq!(loaded.name, "racing");
        assert_eq!(loaded.sticks, profile.sticks);
        assert!(loaded.saved_at.is_some());
    }

    #[tokio::test]
    async fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(
            Profile::load(&path).await,
            Err(ProfileError::Io { .. })
        ));
        let profile = Profile::load_or_default(&path).await.unwrap();
        assert_eq!(profile.name, "absent");
        assert!(profile.sticks.is_empty());
    }

    #[tokio::test]
    async fn test_broken_file_is_not_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        tokio::fs::write(&path, "sticks = [[[").await.unwrap();

        assert!(matches!(
            Profile::load_or_default(&path).await,
            Err(ProfileError::Parse(_))
        ));
        assert_eq!(
            tokio::fs::read_to_string(&path).await.unwrap(),
            "sticks = [[["
        );
    }
}
