//! CLI Commands - One handler per subcommand

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::debug;

use vireo_core::{Event, FixedDestination, SaveOutcome, SelectionMode, EQ_BANDS};

use crate::{Action, App, BandInfo, PresetInfo, StateInfo, StderrNotifier};

/// How long to wait for the engine to report its state
const STATE_TIMEOUT: Duration = Duration::from_millis(500);

pub fn execute(app: &mut App, action: &Action, json: bool) -> Result<()> {
    debug!("Executing {:?}", action);

    match action {
        Action::List => print_presets(&list_presets(app), json)?,
        Action::Show => {}
        Action::Select { name } => app.coordinator.select_preset_by_name(name)?,
        Action::Enable => app.coordinator.set_enabled(true),
        Action::Disable => app.coordinator.set_enabled(false),
        Action::SetBand { band, gain } => app.coordinator.set_band(*band, *gain)?,
        Action::Reset => app.coordinator.reset(),
        Action::Export { path } => {
            let dialog = FixedDestination(Some(path.clone()));
            match app.coordinator.save_to_file(&dialog, &StderrNotifier) {
                SaveOutcome::Saved(path) => println!("Saved to {}", path.display()),
                SaveOutcome::Cancelled => println!("Export cancelled"),
                SaveOutcome::Failed => bail!("Export failed"),
            }
            return Ok(());
        }
    }

    if *action != Action::List {
        print_state(&current_state(app), json)?;
        log_engine_state(app);
    }
    Ok(())
}

pub fn list_presets(app: &App) -> Vec<PresetInfo> {
    let selected = app.coordinator.selected_preset();
    app.coordinator
        .presets()
        .iter()
        .map(|preset| PresetInfo {
            name: preset.name().to_string(),
            display_name: preset.display_name(),
            read_only: preset.is_read_only(),
            selected: Arc::ptr_eq(preset, selected),
        })
        .collect()
}

pub fn current_state(app: &App) -> StateInfo {
    let preset = app.coordinator.selected_preset();
    let bands = preset
        .gains()
        .iter()
        .zip(EQ_BANDS.iter())
        .enumerate()
        .map(|(index, (gain_db, frequency))| BandInfo {
            index,
            frequency: *frequency,
            gain_db: *gain_db,
        })
        .collect();

    StateInfo {
        enabled: app.coordinator.is_enabled(),
        preset: preset.name().to_string(),
        display_name: preset.display_name(),
        manual: app.coordinator.mode() == SelectionMode::Manual,
        bands,
    }
}

fn print_presets(presets: &[PresetInfo], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(presets)?);
        return Ok(());
    }

    for preset in presets {
        let marker = if preset.selected { "*" } else { " " };
        let lock = if preset.read_only { "" } else { " (editable)" };
        println!("{} {}{}", marker, preset.display_name, lock);
    }
    Ok(())
}

fn print_state(state: &StateInfo, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state)?);
        return Ok(());
    }

    println!(
        "Equalizer {} - {}{}",
        if state.enabled { "on" } else { "off" },
        state.display_name,
        if state.manual { " (manual)" } else { "" }
    );
    for band in &state.bands {
        println!("  {:>2}  {:>7} Hz  {:+6.1} dB", band.index, band.frequency, band.gain_db);
    }
    Ok(())
}

/// Log what the playback engine has applied
fn log_engine_state(app: &App) {
    if app.engine.request_state().is_err() {
        return;
    }
    while let Some(event) = app.engine.wait_event(STATE_TIMEOUT) {
        if let Event::StateUpdate {
            enabled, preset, ..
        } = event
        {
            debug!(enabled, preset = ?preset, "Playback engine state");
            return;
        }
    }
}
