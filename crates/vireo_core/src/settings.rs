//! Persistent Settings Management
//!
//! Settings are a namespaced key/value map. Every `set` is independent and
//! last-writer-wins; there is no transactional grouping across keys.
//!
//! # Storage Locations
//! - Linux: `~/.config/vireo/settings.json`
//! - Windows: `%APPDATA%\vireo\settings.json`
//! - macOS: `~/Library/Application Support/vireo/settings.json`

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::error::{SettingsError, SettingsResult};

/// Keys used by the equalizer
pub mod keys {
    /// Namespace every equalizer key lives under
    pub const NAMESPACE: &str = "Equalizer";
    /// `bool`: whether the equalizer is applied
    pub const IS_ENABLED: &str = "IsEnabled";
    /// `string`: name of the preset to load on start
    pub const SELECTED_PRESET: &str = "SelectedPreset";
    /// `string`: value string of the manual preset
    pub const MANUAL_PRESET: &str = "ManualPreset";
}

/// Namespaced key/value persistence
pub trait SettingsStore: Send + Sync {
    fn get(&self, namespace: &str, key: &str) -> Option<Value>;

    fn set(&self, namespace: &str, key: &str, value: Value) -> SettingsResult<()>;

    fn get_bool(&self, namespace: &str, key: &str) -> Option<bool> {
        self.get(namespace, key).and_then(|v| v.as_bool())
    }

    fn get_string(&self, namespace: &str, key: &str) -> Option<String> {
        match self.get(namespace, key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    fn set_bool(&self, namespace: &str, key: &str, value: bool) -> SettingsResult<()> {
        self.set(namespace, key, Value::Bool(value))
    }

    fn set_string(&self, namespace: &str, key: &str, value: &str) -> SettingsResult<()> {
        self.set(namespace, key, Value::String(value.to_string()))
    }
}

type Document = BTreeMap<String, BTreeMap<String, Value>>;

/// In-memory store, used when persistence is not wanted and in tests
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<Document>,
    writes: Mutex<Vec<(String, String, Value)>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value without recording it as a write
    pub fn with_value(self, namespace: &str, key: &str, value: impl Into<Value>) -> Self {
        self.values
            .lock()
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.into());
        self
    }

    /// Every `set` call so far, in order
    pub fn writes(&self) -> Vec<(String, String, Value)> {
        self.writes.lock().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, namespace: &str, key: &str) -> Option<Value> {
        self.values
            .lock()
            .get(namespace)
            .and_then(|section| section.get(key))
            .cloned()
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> SettingsResult<()> {
        self.values
            .lock()
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.clone());
        self.writes
            .lock()
            .push((namespace.to_string(), key.to_string(), value));
        Ok(())
    }
}

/// JSON file store; every `set` is written through to disk
#[derive(Debug)]
pub struct JsonSettings {
    path: PathBuf,
    values: Mutex<Document>,
}

impl JsonSettings {
    /// Open the store at the platform config path
    pub fn open_default() -> SettingsResult<Self> {
        let path = Self::default_path().ok_or(SettingsError::NoConfigDir)?;
        Ok(Self::open(path))
    }

    /// Open the store at `path`, or start empty if missing/corrupt
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = Self::load(&path).unwrap_or_default();
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the platform-specific settings file path
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "vireo", "vireo")
            .map(|proj| proj.config_dir().join("settings.json"))
    }

    fn load(path: &Path) -> Option<Document> {
        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return None;
        }

        match fs::File::open(path) {
            Ok(file) => match serde_json::from_reader(file) {
                Ok(values) => {
                    info!("Settings loaded from {:?}", path);
                    Some(values)
                }
                Err(e) => {
                    error!("Failed to parse settings file: {}", e);
                    None
                }
            },
            Err(e) => {
                error!("Failed to open settings file: {}", e);
                None
            }
        }
    }

    /// Sibling file the document is staged in before it replaces `path`
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn save(&self, values: &Document) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Write the staging file, then rename it over the settings file
        let staging = self.staging_path();
        let data = serde_json::to_vec_pretty(values)?;
        fs::write(&staging, data).map_err(|source| SettingsError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &self.path).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;

        debug!("Settings saved to {:?}", self.path);
        Ok(())
    }
}

impl SettingsStore for JsonSettings {
    fn get(&self, namespace: &str, key: &str) -> Option<Value> {
        self.values
            .lock()
            .get(namespace)
            .and_then(|section| section.get(key))
            .cloned()
    }

    fn set(&self, namespace: &str, key: &str, value: Value) -> SettingsResult<()> {
        let mut values = self.values.lock();
        values
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value);
        self.save(&values)
    }
}
