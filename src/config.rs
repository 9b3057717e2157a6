//! Configuration file handling.
//!
//! The config lives at `<config_dir>/towr-replay/config.toml`. Every field has
//! a default, so a missing file or missing sections are not errors.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::playback::AdvanceMode;
use crate::trajectory::EffectorLayout;

/// Errors from reading or writing the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine the platform config directory")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub trajectory: TrajectoryConfig,
    pub playback: PlaybackConfig,
}

/// Which trajectory to load and how to read its columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    /// Folder holding trajectory files, relative to the host's content root
    pub directory: PathBuf,
    /// Trajectory file name inside `directory`
    pub filename: String,
    /// Column layout of the end-effector blocks
    pub effector_layout: EffectorLayout,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("TowrTrajectories"),
            filename: "anymal_wall_new3.txt".to_string(),
            effector_layout: EffectorLayout::default(),
        }
    }
}

/// How the cursor advances and how fast a headless driver ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub advance_mode: AdvanceMode,
    /// Frames per second used by the CLI driver
    pub fps: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            advance_mode: AdvanceMode::default(),
            fps: 60,
        }
    }
}

impl Config {
    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("towr-replay").join("config.toml"))
    }

    /// Load the config file, or defaults if it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from a specific path, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the config to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Write the config to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, self.to_toml()?).map_err(write_err)
    }

    /// Full path of the configured trajectory below a content root.
    pub fn trajectory_path(&self, content_root: &Path) -> PathBuf {
        content_root
            .join(&self.trajectory.directory)
            .join(&self.trajectory.filename)
    }
}
