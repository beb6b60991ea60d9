//! Built-in EQ Presets

use crate::bands::BandGains;
use crate::preset::{EqualizerPreset, SharedPreset};

/// Named EQ preset with 10 band gains
pub type BuiltinPreset = (&'static str, BandGains);

/// List of built-in presets
pub const PRESETS: &[BuiltinPreset] = &[
    ("Flat", [0.0; 10]),
    ("Bass Boost", [6.0, 5.0, 3.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
    ("Treble Boost", [0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 3.0, 5.0, 6.0, 6.0]),
    ("Rock", [5.0, 4.0, 3.0, 1.0, -1.0, -1.0, 1.0, 3.0, 4.0, 5.0]),
    ("Pop", [-1.0, 0.0, 2.0, 4.0, 5.0, 4.0, 2.0, 0.0, -1.0, -1.0]),
    ("Jazz", [3.0, 2.0, 1.0, 2.0, -1.0, -1.0, 0.0, 1.0, 2.0, 3.0]),
    ("Classical", [4.0, 3.0, 2.0, 1.0, -1.0, -1.0, 0.0, 2.0, 3.0, 4.0]),
    ("Vocal", [-2.0, -1.0, 0.0, 2.0, 4.0, 4.0, 3.0, 2.0, 1.0, 0.0]),
    ("Electronic", [4.0, 3.0, 1.0, 0.0, -2.0, -2.0, 0.0, 1.0, 3.0, 4.0]),
    ("Loudness", [4.0, 3.0, 0.0, -1.0, -1.0, 0.0, 1.0, 2.0, 3.0, 4.0]),
];

/// Fresh read-only instances of every built-in preset, in table order
pub fn builtin_presets() -> Vec<SharedPreset> {
    PRESETS
        .iter()
        .map(|(name, gains)| EqualizerPreset::with_gains(*name, *gains, true).shared())
        .collect()
}

pub fn is_builtin(name: &str) -> bool {
    PRESETS.iter().any(|(builtin, _)| *builtin == name)
}
