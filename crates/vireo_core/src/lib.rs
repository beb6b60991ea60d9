//! Vireo Core - Equalizer Preset Coordination
//!
//! This crate keeps the equalizer's preset selection consistent across:
//! - The preset catalog (built-ins, preset files, the persisted manual preset)
//! - The playback engine, which holds the live preset handle on its own thread
//! - The settings store that restores the selection on the next start
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Front end (CLI/UI)                      │
//! │   select / set_band / reset / enable ──▶ Coordinator        │
//! └─────────────────────────────────────────────────────────────┘
//!          │ async                │ band events        │ Command
//!          ▼                      ▼                    ▼
//!   PresetCatalog          SettingsStore        Engine thread
//!   (tokio::fs)            (JSON file)          (crossbeam-channel)
//! ```

mod catalog;
mod config;
mod coordinator;
mod dialog;
mod engine;
mod error;
mod message;
mod preset_file;
mod settings;

pub use catalog::{load_manual_preset, resolve_selected, PresetCatalog, PresetLibrary};
pub use config::{EngineConfig, EqualizerConfig};
pub use coordinator::{EqualizerCoordinator, PresetSource, SelectionMode};
pub use dialog::{FixedDestination, Notifier, SaveDialog, SaveOutcome};
pub use engine::{EqualizerEngine, PlaybackEngine};
pub use error::{
    CatalogError, CatalogResult, CoordinatorError, EngineError, EngineResult, SettingsError,
    SettingsResult,
};
pub use message::{Command, Event};
pub use preset_file::{
    parse_preset_file, read_preset_file, write_preset_file, PresetFile, PRESET_FILE_EXTENSION,
};
pub use settings::{keys, JsonSettings, MemorySettings, SettingsStore};

// Re-export preset types for convenience
pub use vireo_eq::{
    builtin_presets, EqualizerPreset, SharedPreset, BAND_COUNT, EQ_BANDS, MANUAL_PRESET_NAME,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_exports() {
        // Verify public API is accessible
        let _config = EqualizerConfig::default();
        let _engine_config = EngineConfig::default();
        assert_eq!(keys::NAMESPACE, "Equalizer");
        assert_eq!(PRESET_FILE_EXTENSION, "eqp");
    }
}
