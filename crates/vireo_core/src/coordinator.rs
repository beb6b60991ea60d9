//! Equalizer Coordinator
//!
//! Owns the selected preset and keeps three parties in sync:
//! the preset catalog (where presets come from), the playback engine (which
//! holds the active preset handle) and the settings store (what the next
//! start will load).
//!
//! # Selection and persistence
//!
//! ```text
//!            select(named)                  band edit
//!   ┌────────┐ ◀──────────── ┌────────┐ ◀──────────────┐
//!   │ Named  │               │ Manual │                │
//!   └────────┘ ────────────▶ └────────┘ ───────────────┘
//!        │     select(manual)     ▲
//!        └────────────────────────┘
//!                band edit
//! ```
//!
//! Any band edit on the selected preset, built-in or not, persists
//! `SelectedPreset = "Manual"` together with the edited values, so the next
//! start loads the manual preset.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use vireo_eq::{
    builtin_presets, EqualizerPreset, SharedPreset, Subscription, MANUAL_PRESET_NAME,
};

use crate::catalog::{load_manual_preset, resolve_selected, PresetCatalog};
use crate::dialog::{Notifier, SaveDialog, SaveOutcome};
use crate::engine::PlaybackEngine;
use crate::error::{CatalogResult, CoordinatorError};
use crate::preset_file::{write_preset_file, PRESET_FILE_EXTENSION};
use crate::settings::{keys, SettingsStore};

/// Whether the selection follows a named preset or the user's own edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Named,
    Manual,
}

/// Where the presets used by [`EqualizerCoordinator::initialize`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetSource {
    Catalog,
    /// Catalog failed; built-ins plus the persisted manual preset were used
    Fallback,
}

/// Persist the manual-preset migration: select "Manual" next time, with
/// `preset`'s current values
fn persist_manual(settings: &dyn SettingsStore, preset: &EqualizerPreset) {
    if let Err(e) =
        settings.set_string(keys::NAMESPACE, keys::SELECTED_PRESET, MANUAL_PRESET_NAME)
    {
        error!("Failed to persist selected preset: {}", e);
    }
    if let Err(e) = settings.set_string(
        keys::NAMESPACE,
        keys::MANUAL_PRESET,
        &preset.to_value_string(),
    ) {
        error!("Failed to persist manual preset: {}", e);
    }
}

/// Watch `preset` for band edits: flag the edit and persist the manual
/// migration
fn observe(
    settings: &Arc<dyn SettingsStore>,
    edited: &Arc<AtomicBool>,
    preset: &SharedPreset,
) -> Subscription {
    let settings = Arc::clone(settings);
    let edited = Arc::clone(edited);
    let target = Arc::downgrade(preset);

    preset.subscribe(move |change| {
        edited.store(true, Ordering::SeqCst);
        if let Some(preset) = target.upgrade() {
            debug!(
                band = change.band,
                gain_db = change.gain_db,
                "Band changed on '{}', saving as manual",
                preset.name()
            );
            persist_manual(settings.as_ref(), &preset);
        }
    })
}

/// Coordinates preset selection, band edits, enable state and persistence
pub struct EqualizerCoordinator<C> {
    catalog: C,
    settings: Arc<dyn SettingsStore>,
    playback: Arc<dyn PlaybackEngine>,

    /// Localized label shown for the manual preset
    manual_label: String,

    presets: Vec<SharedPreset>,
    selected: SharedPreset,
    is_enabled: bool,

    /// Band-change observer on `selected`
    subscription: Option<Subscription>,

    /// Set by the observer when `selected` was edited since it was selected
    edited: Arc<AtomicBool>,
}

impl<C: PresetCatalog> EqualizerCoordinator<C> {
    /// Create a coordinator. Nothing is loaded until [`Self::initialize`].
    pub fn new(
        catalog: C,
        settings: Arc<dyn SettingsStore>,
        playback: Arc<dyn PlaybackEngine>,
        manual_label: impl Into<String>,
    ) -> Self {
        let manual_label = manual_label.into();

        // Placeholder so a selection always exists
        let placeholder = EqualizerPreset::manual().shared();
        placeholder.set_display_name(manual_label.as_str());

        let edited = Arc::new(AtomicBool::new(false));
        let subscription = observe(&settings, &edited, &placeholder);

        Self {
            catalog,
            settings,
            playback,
            manual_label,
            presets: Vec::new(),
            selected: placeholder,
            is_enabled: false,
            subscription: Some(subscription),
            edited,
        }
    }

    /// Load presets and restore the persisted state
    ///
    /// Performs no settings writes: the enabled flag and the selection are
    /// read back and applied to the playback engine only.
    pub async fn initialize(&mut self) -> PresetSource {
        let (presets, selected, source) = match self.fetch().await {
            Ok((presets, selected)) => (presets, selected, PresetSource::Catalog),
            Err(e) => {
                error!("Failed to load equalizer presets, using built-ins: {}", e);
                let (presets, selected) = self.fallback();
                (presets, selected, PresetSource::Fallback)
            }
        };

        for preset in &presets {
            self.relabel(preset);
        }
        self.presets = presets;

        self.is_enabled = self
            .settings
            .get_bool(keys::NAMESPACE, keys::IS_ENABLED)
            .unwrap_or(false);
        self.forward_enabled(self.is_enabled);

        self.apply_selection(selected, false);

        info!(
            presets = self.presets.len(),
            selected = self.selected.name(),
            enabled = self.is_enabled,
            "Equalizer initialized"
        );
        source
    }

    async fn fetch(&self) -> CatalogResult<(Vec<SharedPreset>, SharedPreset)> {
        let presets = self.catalog.get_presets().await?;
        let selected = self.catalog.get_selected_preset().await?;
        Ok((presets, selected))
    }

    fn fallback(&self) -> (Vec<SharedPreset>, SharedPreset) {
        let manual = load_manual_preset(self.settings.as_ref()).shared();
        let mut presets = builtin_presets();
        presets.push(Arc::clone(&manual));

        let selected = resolve_selected(&presets, self.settings.as_ref()).unwrap_or(manual);
        (presets, selected)
    }

    /// Make `preset` the selection
    ///
    /// Persists its name if it differs from the stored one, hands it to the
    /// playback engine and moves the band-change observer onto it. Engine and
    /// settings failures are logged; the selection commits regardless.
    pub fn select_preset(&mut self, preset: SharedPreset) {
        info!("Selecting equalizer preset '{}'", preset.name());
        self.apply_selection(preset, true);
    }

    /// Select a listed preset by name
    pub fn select_preset_by_name(&mut self, name: &str) -> Result<(), CoordinatorError> {
        let preset = self
            .presets
            .iter()
            .find(|p| p.name() == name)
            .cloned()
            .ok_or_else(|| CoordinatorError::UnknownPreset(name.to_string()))?;
        self.select_preset(preset);
        Ok(())
    }

    /// Enable or bypass the equalizer; always persisted and forwarded
    pub fn set_enabled(&mut self, enabled: bool) {
        self.is_enabled = enabled;

        if let Err(e) = self
            .settings
            .set_bool(keys::NAMESPACE, keys::IS_ENABLED, enabled)
        {
            error!("Failed to persist equalizer state: {}", e);
        }
        self.forward_enabled(enabled);
    }

    /// Return to a neutral manual preset
    ///
    /// A selected manual preset is flattened in place. Any other selection is
    /// replaced by a new manual preset, which also takes the manual slot of
    /// the preset list. The manual preset is persisted either way.
    pub fn reset(&mut self) {
        if self.selected.is_manual() {
            debug!("Resetting manual preset in place");
            self.selected.reset();
        } else {
            debug!("Replacing '{}' with a new manual preset", self.selected.name());
            let manual = EqualizerPreset::manual().shared();
            match self.presets.iter().position(|p| p.is_manual()) {
                Some(index) => self.presets[index] = Arc::clone(&manual),
                None => self.presets.push(Arc::clone(&manual)),
            }
            self.apply_selection(manual, true);
        }

        persist_manual(self.settings.as_ref(), &self.selected);
    }

    /// Edit one band of the selected preset
    pub fn set_band(&self, band: usize, gain_db: f32) -> Result<(), CoordinatorError> {
        self.selected.set_band(band, gain_db)?;
        Ok(())
    }

    /// Export the selected preset to a file picked by `dialog`
    pub fn save_to_file(&self, dialog: &dyn SaveDialog, notifier: &dyn Notifier) -> SaveOutcome {
        let preset = &self.selected;
        let Some(path) = dialog.pick_destination(&preset.display_name(), PRESET_FILE_EXTENSION)
        else {
            debug!("Preset export cancelled");
            return SaveOutcome::Cancelled;
        };

        match write_preset_file(&path, preset) {
            Ok(()) => SaveOutcome::Saved(path),
            Err(e) => {
                error!("Failed to save preset '{}': {}", preset.name(), e);
                notifier.notify_error(
                    "Error",
                    &format!("Could not save preset '{}': {}", preset.display_name(), e),
                );
                SaveOutcome::Failed
            }
        }
    }

    pub fn presets(&self) -> &[SharedPreset] {
        &self.presets
    }

    pub fn selected_preset(&self) -> &SharedPreset {
        &self.selected
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn manual_label(&self) -> &str {
        &self.manual_label
    }

    /// Current position in the Named/Manual state machine
    pub fn mode(&self) -> SelectionMode {
        if self.selected.is_manual() || self.edited.load(Ordering::SeqCst) {
            SelectionMode::Manual
        } else {
            SelectionMode::Named
        }
    }

    fn apply_selection(&mut self, preset: SharedPreset, persist: bool) {
        // Detach from the old selection before anything else
        self.subscription = None;

        self.relabel(&preset);
        self.selected = Arc::clone(&preset);
        self.edited.store(false, Ordering::SeqCst);

        if persist {
            let stored = self
                .settings
                .get_string(keys::NAMESPACE, keys::SELECTED_PRESET);
            if stored.as_deref() != Some(preset.name()) {
                if let Err(e) =
                    self.settings
                        .set_string(keys::NAMESPACE, keys::SELECTED_PRESET, preset.name())
                {
                    error!("Failed to persist selected preset: {}", e);
                }
            }
        }

        if let Err(e) = self.playback.switch_preset(Arc::clone(&preset)) {
            warn!("Playback engine did not take preset '{}': {}", preset.name(), e);
        }

        self.subscription = Some(self.observe(&preset));
    }

    fn observe(&self, preset: &SharedPreset) -> Subscription {
        observe(&self.settings, &self.edited, preset)
    }

    fn relabel(&self, preset: &EqualizerPreset) {
        if preset.is_manual() {
            preset.set_display_name(self.manual_label.as_str());
        }
    }

    fn forward_enabled(&self, enabled: bool) {
        if let Err(e) = self.playback.set_equalizer_enabled(enabled) {
            warn!("Playback engine did not take equalizer state: {}", e);
        }
    }
}
