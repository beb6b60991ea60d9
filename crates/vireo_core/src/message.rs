//! Message Types for Thread Communication
//!
//! Commands flow from the coordinator -> engine thread
//! Events flow from the engine thread -> UI

use serde::{Deserialize, Serialize};

use vireo_eq::SharedPreset;

/// Commands sent to the playback engine thread
#[derive(Debug, Clone)]
pub enum Command {
    /// Make this preset handle the active one
    SwitchPreset(SharedPreset),

    /// Apply or bypass the equalizer
    SetEqualizerEnabled(bool),

    /// Request current state (triggers StateUpdate event)
    RequestState,

    /// Shutdown the engine
    Shutdown,
}

/// Events sent from the playback engine thread
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Event {
    /// The active preset handle was swapped
    PresetSwitched { name: String },

    /// Equalizer enabled state changed
    EnabledChanged { enabled: bool },

    /// Current state snapshot
    ///
    /// `gains` is read from the live preset handle, so band edits made after
    /// the switch are reflected here.
    StateUpdate {
        enabled: bool,
        preset: Option<String>,
        gains: Vec<f32>,
    },
}
