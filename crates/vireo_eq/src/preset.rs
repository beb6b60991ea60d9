//! Equalizer Preset
//!
//! Presets are shared (`Arc`) between the coordinator and the playback
//! engine, so band edits go through interior locks and are visible to every
//! holder of the handle immediately.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::bands::{self, BandGains, BAND_COUNT, NEUTRAL_GAIN_DB};
use crate::error::PresetResult;
use crate::subscription::{BandChange, ListenerRegistry, Subscription};

/// Reserved name of the synthetic, user-editable preset
pub const MANUAL_PRESET_NAME: &str = "Manual";

/// Shared handle to a preset
pub type SharedPreset = Arc<EqualizerPreset>;

/// Named set of band gains
pub struct EqualizerPreset {
    name: String,
    display_name: RwLock<String>,
    is_read_only: bool,
    gains: RwLock<BandGains>,
    listeners: ListenerRegistry,
}

impl EqualizerPreset {
    /// Create a flat preset
    pub fn new(name: impl Into<String>, is_read_only: bool) -> Self {
        Self::with_gains(name, [NEUTRAL_GAIN_DB; BAND_COUNT], is_read_only)
    }

    /// Create a preset from explicit gains (each gain is clamped)
    pub fn with_gains(name: impl Into<String>, gains: BandGains, is_read_only: bool) -> Self {
        let name = name.into();
        Self {
            display_name: RwLock::new(name.clone()),
            name,
            is_read_only,
            gains: RwLock::new(gains.map(bands::clamp_gain)),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Fresh, flat, editable manual preset
    pub fn manual() -> Self {
        Self::new(MANUAL_PRESET_NAME, false)
    }

    /// Manual preset restored from a persisted value string
    pub fn manual_from_value_string(value: &str) -> PresetResult<Self> {
        let gains = bands::parse_value_string(value)?;
        Ok(Self::with_gains(MANUAL_PRESET_NAME, gains, false))
    }

    pub fn shared(self) -> SharedPreset {
        Arc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> String {
        self.display_name.read().clone()
    }

    pub fn set_display_name(&self, display_name: impl Into<String>) {
        *self.display_name.write() = display_name.into();
    }

    pub fn is_read_only(&self) -> bool {
        self.is_read_only
    }

    pub fn is_manual(&self) -> bool {
        self.name == MANUAL_PRESET_NAME
    }

    /// Snapshot of all band gains
    pub fn gains(&self) -> BandGains {
        *self.gains.read()
    }

    pub fn band(&self, band: usize) -> Option<f32> {
        self.gains.read().get(band).copied()
    }

    /// Set one band gain (clamped) and notify subscribers
    ///
    /// Returns `false` when the stored value did not change; no notification
    /// is sent in that case.
    pub fn set_band(&self, band: usize, gain_db: f32) -> PresetResult<bool> {
        bands::check_band_index(band)?;
        let gain_db = bands::clamp_gain(gain_db);

        {
            let mut gains = self.gains.write();
            if gains[band] == gain_db {
                return Ok(false);
            }
            gains[band] = gain_db;
        }

        self.listeners.notify(BandChange { band, gain_db });
        Ok(true)
    }

    /// Return every band to neutral, notifying once per changed band
    pub fn reset(&self) {
        for band in 0..BAND_COUNT {
            // Index is always in range here
            let _ = self.set_band(band, NEUTRAL_GAIN_DB);
        }
    }

    /// Whether all bands sit at neutral
    pub fn is_flat(&self) -> bool {
        self.gains.read().iter().all(|g| *g == NEUTRAL_GAIN_DB)
    }

    /// Gains encoded as a `;`-separated value string
    pub fn to_value_string(&self) -> String {
        bands::to_value_string(&self.gains())
    }

    /// Observe band changes until the returned handle is dropped
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(BandChange) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Number of attached band-change observers
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for EqualizerPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EqualizerPreset")
            .field("name", &self.name)
            .field("display_name", &self.display_name())
            .field("is_read_only", &self.is_read_only)
            .field("gains", &self.gains())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PresetError;
    use parking_lot::Mutex;

    #[test]
    fn test_new_preset_is_flat() {
        let preset = EqualizerPreset::new("Flat", true);
        assert!(preset.is_flat());
        assert!(preset.is_read_only());
        assert!(!preset.is_manual());
        assert_eq!(preset.display_name(), "Flat");
    }

    #[test]
    fn test_manual_preset() {
        let preset = EqualizerPreset::manual();
        assert!(preset.is_manual());
        assert!(!preset.is_read_only());
    }

    #[test]
    fn test_with_gains_clamps() {
        let mut gains = [0.0; BAND_COUNT];
        gains[0] = 50.0;
        let preset = EqualizerPreset::with_gains("Loud", gains, true);
        assert_eq!(preset.band(0), Some(24.0));
    }

    #[test]
    fn test_set_band_notifies() {
        let preset = EqualizerPreset::new("Rock", true);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let _sub = preset.subscribe(move |change| seen_clone.lock().push(change));

        assert!(preset.set_band(4, 3.0).unwrap());
        assert_eq!(preset.band(4), Some(3.0));
        assert_eq!(*seen.lock(), vec![BandChange { band: 4, gain_db: 3.0 }]);
    }

    #[test]
    fn test_set_band_same_value_is_silent() {
        let preset = EqualizerPreset::new("Flat", true);
        let seen = Arc::new(Mutex::new(0));
        let seen_clone = Arc::clone(&seen);
        let _sub = preset.subscribe(move |_| *seen_clone.lock() += 1);

        assert!(!preset.set_band(0, 0.0).unwrap());
        assert_eq!(*seen.lock(), 0);
    }

    #[test]
    fn test_set_band_invalid_index() {
        let preset = EqualizerPreset::manual();
        assert!(matches!(
            preset.set_band(10, 1.0),
            Err(PresetError::InvalidBandIndex(10))
        ));
    }

    #[test]
    fn test_listener_can_read_preset() {
        // The write lock must be released before listeners run
        let preset = Arc::new(EqualizerPreset::manual());
        let weak = Arc::downgrade(&preset);
        let seen = Arc::new(Mutex::new(String::new()));
        let seen_clone = Arc::clone(&seen);
        let _sub = preset.subscribe(move |_| {
            if let Some(p) = weak.upgrade() {
                *seen_clone.lock() = p.to_value_string();
            }
        });

        preset.set_band(1, 2.0).unwrap();
        assert_eq!(*seen.lock(), "0;2;0;0;0;0;0;0;0;0");
    }

    #[test]
    fn test_reset_notifies_changed_bands_only() {
        let mut gains = [0.0; BAND_COUNT];
        gains[2] = 4.0;
        gains[7] = -2.0;
        let preset = EqualizerPreset::with_gains(MANUAL_PRESET_NAME, gains, false);
        let count = Arc::new(Mutex::new(0));
        let count_clone = Arc::clone(&count);
        let _sub = preset.subscribe(move |_| *count_clone.lock() += 1);

        preset.reset();

        assert!(preset.is_flat());
        assert_eq!(*count.lock(), 2);
    }

    #[test]
    fn test_manual_from_value_string() {
        let preset = EqualizerPreset::manual_from_value_string("1;2;3;4;5;6;7;8;9;10").unwrap();
        assert!(preset.is_manual());
        assert_eq!(preset.band(9), Some(10.0));
        assert_eq!(preset.to_value_string(), "1;2;3;4;5;6;7;8;9;10");
    }

    #[test]
    fn test_display_name_decoupled_from_name() {
        let preset = EqualizerPreset::manual();
        preset.set_display_name("Handmatig");
        assert_eq!(preset.name(), MANUAL_PRESET_NAME);
        assert_eq!(preset.display_name(), "Handmatig");
    }

    #[test]
    fn test_dropped_subscription_stops_updates() {
        let preset = EqualizerPreset::manual();
        let sub = preset.subscribe(|_| {});
        assert_eq!(preset.subscriber_count(), 1);
        drop(sub);
        assert_eq!(preset.subscriber_count(), 0);
    }
}
