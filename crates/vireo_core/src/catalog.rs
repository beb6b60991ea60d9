//! Preset Catalog
//!
//! Supplies the preset list and the preset to select on start. The
//! [`PresetLibrary`] implementation combines the built-in table, user preset
//! files and the manual preset persisted in settings.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use vireo_eq::{builtin_presets, is_builtin, EqualizerPreset, SharedPreset, MANUAL_PRESET_NAME};

use crate::error::{CatalogError, CatalogResult};
use crate::preset_file::{parse_preset_file, PRESET_FILE_EXTENSION};
use crate::settings::{keys, SettingsStore};

/// Asynchronous source of presets
pub trait PresetCatalog {
    /// All available presets, in display order
    fn get_presets(&self) -> impl Future<Output = CatalogResult<Vec<SharedPreset>>> + Send;

    /// The preset that was selected last time
    fn get_selected_preset(&self) -> impl Future<Output = CatalogResult<SharedPreset>> + Send;
}

/// Manual preset rebuilt from the `ManualPreset` setting, flat if absent
pub fn load_manual_preset(settings: &dyn SettingsStore) -> EqualizerPreset {
    match settings.get_string(keys::NAMESPACE, keys::MANUAL_PRESET) {
        Some(value) => EqualizerPreset::manual_from_value_string(&value).unwrap_or_else(|e| {
            warn!("Ignoring stored manual preset {:?}: {}", value, e);
            EqualizerPreset::manual()
        }),
        None => EqualizerPreset::manual(),
    }
}

/// Pick the preset named by the `SelectedPreset` setting, else the manual one
pub fn resolve_selected(
    presets: &[SharedPreset],
    settings: &dyn SettingsStore,
) -> Option<SharedPreset> {
    let wanted = settings
        .get_string(keys::NAMESPACE, keys::SELECTED_PRESET)
        .unwrap_or_else(|| MANUAL_PRESET_NAME.to_string());

    presets
        .iter()
        .find(|p| p.name() == wanted)
        .or_else(|| presets.iter().find(|p| p.is_manual()))
        .cloned()
}

/// Built-in presets, user preset files and the persisted manual preset
pub struct PresetLibrary {
    settings: Arc<dyn SettingsStore>,
    presets_dir: Option<PathBuf>,
    loaded: OnceCell<Vec<SharedPreset>>,
}

impl PresetLibrary {
    pub fn new(settings: Arc<dyn SettingsStore>, presets_dir: Option<PathBuf>) -> Self {
        Self {
            settings,
            presets_dir,
            loaded: OnceCell::new(),
        }
    }

    async fn load(&self) -> CatalogResult<Vec<SharedPreset>> {
        let mut presets = builtin_presets();

        if let Some(dir) = &self.presets_dir {
            for preset in Self::load_dir(dir).await? {
                if is_builtin(preset.name()) || preset.is_manual() {
                    warn!("Skipping preset file shadowing reserved name '{}'", preset.name());
                    continue;
                }
                if presets.iter().any(|p| p.name() == preset.name()) {
                    warn!("Skipping duplicate preset '{}'", preset.name());
                    continue;
                }
                presets.push(preset.shared());
            }
        }

        presets.push(load_manual_preset(self.settings.as_ref()).shared());

        info!("Loaded {} equalizer presets", presets.len());
        Ok(presets)
    }

    /// Preset files are listed under their file stem
    fn named_by_stem(path: &Path, preset: EqualizerPreset) -> EqualizerPreset {
        match path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) if !stem.is_empty() && stem != preset.name() => {
                debug!("Listing '{}' from {:?} as '{}'", preset.name(), path, stem);
                EqualizerPreset::with_gains(stem, preset.gains(), true)
            }
            _ => preset,
        }
    }

    async fn load_dir(dir: &Path) -> CatalogResult<Vec<EqualizerPreset>> {
        let io_err = |source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        };

        if !tokio::fs::try_exists(dir).await.map_err(io_err)? {
            debug!("Presets directory {:?} does not exist", dir);
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await.map_err(io_err)?;
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some(PRESET_FILE_EXTENSION) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut presets = Vec::with_capacity(paths.len());
        for path in paths {
            let contents = match tokio::fs::read_to_string(&path).await {
                Ok(contents) => contents,
                Err(e) => {
                    warn!("Failed to read preset file {:?}: {}", path, e);
                    continue;
                }
            };
            match parse_preset_file(&path, &contents) {
                Ok(preset) => presets.push(Self::named_by_stem(&path, preset)),
                Err(e) => warn!("Skipping preset file: {}", e),
            }
        }
        Ok(presets)
    }
}

impl PresetCatalog for PresetLibrary {
    async fn get_presets(&self) -> CatalogResult<Vec<SharedPreset>> {
        self.loaded
            .get_or_try_init(|| self.load())
            .await
            .map(|presets| presets.clone())
    }

    async fn get_selected_preset(&self) -> CatalogResult<SharedPreset> {
        let presets = self.get_presets().await?;
        resolve_selected(&presets, self.settings.as_ref())
            .ok_or_else(|| CatalogError::NotFound(MANUAL_PRESET_NAME.to_string()))
    }
}
