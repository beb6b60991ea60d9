//! Core Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur in the playback engine worker
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to spawn engine thread: {0}")]
    SpawnError(String),

    #[error("Engine configuration error: {0}")]
    ConfigError(String),

    #[error("Channel send error - engine thread stopped")]
    ChannelSendError,
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised by settings stores
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not determine config path")]
    NoConfigDir,

    #[error("Settings I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors raised while loading or writing presets
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Preset I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed preset file {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid preset data: {0}")]
    Preset(#[from] vireo_eq::PresetError),

    #[error("Preset not found: {0}")]
    NotFound(String),
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors returned by coordinator operations
#[derive(Error, Debug)]
pub enum CoordinatorError {
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Preset error: {0}")]
    Preset(#[from] vireo_eq::PresetError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::ChannelSendError;
        assert!(err.to_string().contains("engine thread stopped"));

        let err = CatalogError::NotFound("Rock".into());
        assert!(err.to_string().contains("Rock"));
    }

    #[test]
    fn test_error_from_preset() {
        let preset_err = vireo_eq::PresetError::InvalidBandIndex(10);
        let err: CoordinatorError = preset_err.into();
        assert!(matches!(err, CoordinatorError::Preset(_)));
    }

    #[test]
    fn test_settings_io_error_names_path() {
        let err = SettingsError::Io {
            path: PathBuf::from("/tmp/settings.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("settings.json"));
    }
}
