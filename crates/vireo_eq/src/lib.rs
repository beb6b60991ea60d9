//! Vireo EQ - Equalizer Preset Model
//!
//! This crate provides the preset side of the Vireo equalizer:
//! - 10-band layout with bounded gains
//! - Shared, interior-mutable presets the playback engine can hold live
//! - Band-change notifications with owned, swappable subscriptions
//! - Value-string codec used to persist the manual preset
//! - Built-in preset table
//!
//! # Architecture
//!
//! Presets are handed around as `Arc<EqualizerPreset>`. Editing a band
//! updates the shared gains first, then notifies subscribers outside the
//! lock, so an observer may read the preset back from its callback.

mod bands;
mod error;
mod preset;
mod presets;
mod subscription;

pub use bands::{
    clamp_gain, parse_value_string, to_value_string, BandGains, BAND_COUNT, EQ_BANDS,
    MAX_GAIN_DB, MIN_GAIN_DB, NEUTRAL_GAIN_DB,
};
pub use error::{PresetError, PresetResult};
pub use preset::{EqualizerPreset, SharedPreset, MANUAL_PRESET_NAME};
pub use presets::{builtin_presets, is_builtin, BuiltinPreset, PRESETS};
pub use subscription::{BandChange, ListenerRegistry, Subscription};
