//! Preset Error Types

use thiserror::Error;

/// Errors that can occur while editing or decoding presets
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Invalid band index: {0} (must be 0-9)")]
    InvalidBandIndex(usize),

    #[error("Band count mismatch: expected {expected}, got {got}")]
    BandCountMismatch { expected: usize, got: usize },

    #[error("Invalid band value: {0:?}")]
    InvalidValue(String),
}

/// Result type alias for preset operations
pub type PresetResult<T> = Result<T, PresetError>;
