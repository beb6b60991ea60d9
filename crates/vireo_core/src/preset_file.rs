//! Preset File Format
//!
//! One JSON document per preset:
//!
//! ```json
//! { "name": "Rock", "bands": [5.0, 4.0, ...], "saved_at": "2026-01-01T00:00:00Z" }
//! ```

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use vireo_eq::{BandGains, EqualizerPreset, PresetError, BAND_COUNT};

use crate::error::{CatalogError, CatalogResult};

/// File extension for exported presets (without the dot)
pub const PRESET_FILE_EXTENSION: &str = "eqp";

/// On-disk representation of a preset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetFile {
    pub name: String,
    pub bands: Vec<f32>,
    pub saved_at: DateTime<Utc>,
}

impl PresetFile {
    pub fn from_preset(preset: &EqualizerPreset) -> Self {
        Self {
            name: preset.name().to_string(),
            bands: preset.gains().to_vec(),
            saved_at: Utc::now(),
        }
    }

    /// Build a read-only named preset from this file
    pub fn into_preset(self) -> CatalogResult<EqualizerPreset> {
        let gains: BandGains =
            self.bands
                .as_slice()
                .try_into()
                .map_err(|_| PresetError::BandCountMismatch {
                    expected: BAND_COUNT,
                    got: self.bands.len(),
                })?;
        Ok(EqualizerPreset::with_gains(self.name, gains, true))
    }
}

/// Decode preset file contents; `path` is only used for error reporting
pub fn parse_preset_file(path: &Path, contents: &str) -> CatalogResult<EqualizerPreset> {
    let file: PresetFile =
        serde_json::from_str(contents).map_err(|source| CatalogError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    file.into_preset()
}

/// Read a preset file from disk
pub fn read_preset_file(path: &Path) -> CatalogResult<EqualizerPreset> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_preset_file(path, &contents)
}

/// Write `preset` to `path`, replacing any existing file
pub fn write_preset_file(path: &Path, preset: &EqualizerPreset) -> CatalogResult<()> {
    let io_err = |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(&PresetFile::from_preset(preset)).map_err(
        |source| CatalogError::Malformed {
            path: path.to_path_buf(),
            source,
        },
    )?;
    fs::write(path, json).map_err(io_err)?;

    info!("Preset '{}' saved to {:?}", preset.name(), path);
    Ok(())
}
