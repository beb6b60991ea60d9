//! Coordinator and Engine Configuration

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

/// Playback engine worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Capacity of the bounded command channel
    pub command_capacity: usize,

    /// How often the worker wakes to check the shutdown flag (ms)
    pub poll_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command_capacity: 32,
            poll_interval_ms: 16,
        }
    }
}

impl EngineConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.command_capacity == 0 || self.command_capacity > 4096 {
            return Err(format!("Invalid command capacity: {}", self.command_capacity));
        }
        if self.poll_interval_ms == 0 || self.poll_interval_ms > 1000 {
            return Err(format!("Invalid poll interval: {}ms", self.poll_interval_ms));
        }
        Ok(())
    }
}

/// Overall equalizer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EqualizerConfig {
    /// Localized label shown for the manual preset
    #[serde(default = "default_manual_label")]
    pub manual_label: String,

    /// Directory scanned for user preset files
    #[serde(default)]
    pub presets_dir: Option<PathBuf>,

    /// Settings file; the platform config dir is used when unset
    #[serde(default)]
    pub settings_path: Option<PathBuf>,

    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_manual_label() -> String {
    "Manual".to_string()
}

impl Default for EqualizerConfig {
    fn default() -> Self {
        Self {
            manual_label: default_manual_label(),
            presets_dir: None,
            settings_path: None,
            engine: EngineConfig::default(),
        }
    }
}

impl EqualizerConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> SettingsResult<Self> {
        let data = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.manual_label.trim().is_empty() {
            return Err("Manual preset label must not be empty".to_string());
        }
        self.engine.validate()
    }
}
