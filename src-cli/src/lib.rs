//! Vireo CLI - Command line front end for the equalizer
//!
//! Every invocation restores the persisted state, applies one action through
//! the coordinator and exits. The settings file carries the state between
//! runs.

mod commands;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use vireo_core::{
    EqualizerConfig, EqualizerCoordinator, EqualizerEngine, JsonSettings, Notifier,
    PresetLibrary, PresetSource, SettingsStore,
};

// ============================================================================
// Command Line
// ============================================================================

#[derive(Debug, Parser)]
#[command(name = "vireo", version, about = "Select and edit equalizer presets")]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Action {
    /// List available presets
    List,
    /// Show the selected preset and its bands
    Show,
    /// Select a preset by name
    Select { name: String },
    /// Turn the equalizer on
    Enable,
    /// Bypass the equalizer
    Disable,
    /// Set the gain of one band (dB)
    SetBand {
        band: usize,
        #[arg(allow_negative_numbers = true)]
        gain: f32,
    },
    /// Flatten the manual preset and select it
    Reset,
    /// Save the selected preset to a file
    Export { path: PathBuf },
}

// ============================================================================
// Output Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PresetInfo {
    pub name: String,
    pub display_name: String,
    pub read_only: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BandInfo {
    pub index: usize,
    pub frequency: f32,
    pub gain_db: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateInfo {
    pub enabled: bool,
    pub preset: String,
    pub display_name: String,
    pub manual: bool,
    pub bands: Vec<BandInfo>,
}

// ============================================================================
// Application State
// ============================================================================

/// Reports export failures on stderr
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify_error(&self, title: &str, message: &str) {
        eprintln!("{}: {}", title, message);
    }
}

pub struct App {
    pub coordinator: EqualizerCoordinator<PresetLibrary>,
    pub engine: Arc<EqualizerEngine>,
}

impl App {
    /// Wire settings, catalog and engine, then restore the persisted state
    pub async fn open(config: &EqualizerConfig) -> Result<Self> {
        config.validate().map_err(anyhow::Error::msg)?;

        let settings = match &config.settings_path {
            Some(path) => JsonSettings::open(path.clone()),
            None => JsonSettings::open_default()?,
        };
        info!("Using settings file {:?}", settings.path());
        let settings: Arc<dyn SettingsStore> = Arc::new(settings);

        let engine = Arc::new(EqualizerEngine::with_config(config.engine.clone())?);
        let catalog = PresetLibrary::new(Arc::clone(&settings), config.presets_dir.clone());

        let mut coordinator = EqualizerCoordinator::new(
            catalog,
            settings,
            engine.clone(),
            config.manual_label.clone(),
        );
        if coordinator.initialize().await == PresetSource::Fallback {
            warn!("Preset catalog unavailable, only built-in presets are listed");
        }

        Ok(Self {
            coordinator,
            engine,
        })
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<EqualizerConfig> {
    match path {
        Some(path) => EqualizerConfig::from_file(path)
            .with_context(|| format!("Failed to load config {:?}", path)),
        None => Ok(EqualizerConfig::default()),
    }
}

// ============================================================================
// Entry Point
// ============================================================================

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vireo=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_ref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        let mut app = App::open(&config).await?;
        commands::execute(&mut app, &cli.action, cli.json)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_negative_gain() {
        let cli = Cli::try_parse_from(["vireo", "set-band", "3", "-4.5"]).unwrap();
        assert_eq!(cli.action, Action::SetBand { band: 3, gain: -4.5 });
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vireo", "list", "--json", "--config", "eq.json"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("eq.json")));
        assert_eq!(cli.action, Action::List);
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Some(&PathBuf::from("/nonexistent/vireo.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }
}
