//! Playback Engine - Equalizer Handoff
//!
//! The coordinator hands presets to a [`PlaybackEngine`]. The bundled
//! [`EqualizerEngine`] runs a worker thread that owns the active preset slot:
//!
//! ```text
//!   Coordinator ──Command──▶ engine thread ──Event──▶ UI
//!                  (bounded)      │          (unbounded)
//!                                 ▼
//!                   active slot: Arc<RwLock<Option<SharedPreset>>>
//! ```
//!
//! The slot holds the same `Arc` the coordinator edits, so band changes are
//! live for the audio side without another switch.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::RwLock;
use tracing::{debug, info};

use vireo_eq::SharedPreset;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::message::{Command, Event};

/// Receives the active preset and the enabled flag
pub trait PlaybackEngine: Send + Sync {
    /// Make `preset` the active one; the engine keeps the handle
    fn switch_preset(&self, preset: SharedPreset) -> EngineResult<()>;

    fn set_equalizer_enabled(&self, enabled: bool) -> EngineResult<()>;
}

type ActiveSlot = Arc<RwLock<Option<SharedPreset>>>;

/// Worker-thread playback engine
///
/// This struct lives on the caller's thread and talks to the engine thread
/// via channels.
pub struct EqualizerEngine {
    /// Channel for sending commands to the engine thread
    command_sender: Sender<Command>,

    /// Channel for receiving events from the engine thread
    event_receiver: Receiver<Event>,

    /// Handle to the engine thread
    worker: Option<JoinHandle<()>>,

    /// Flag to signal shutdown
    shutdown_flag: Arc<AtomicBool>,

    /// Preset handle currently applied
    active: ActiveSlot,

    /// Whether the equalizer is applied
    enabled: Arc<AtomicBool>,

    config: EngineConfig,
}

impl EqualizerEngine {
    /// Create a new engine with default configuration
    pub fn new() -> EngineResult<Self> {
        Self::with_config(EngineConfig::default())
    }

    /// Create a new engine with custom configuration
    pub fn with_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate().map_err(EngineError::ConfigError)?;

        let (command_sender, command_receiver) = bounded::<Command>(config.command_capacity);
        let (event_sender, event_receiver) = unbounded::<Event>();

        let shutdown_flag = Arc::new(AtomicBool::new(false));
        let active: ActiveSlot = Arc::new(RwLock::new(None));
        let enabled = Arc::new(AtomicBool::new(false));

        // Clone for engine thread
        let shutdown_clone = Arc::clone(&shutdown_flag);
        let active_clone = Arc::clone(&active);
        let enabled_clone = Arc::clone(&enabled);
        let poll_interval = Duration::from_millis(config.poll_interval_ms);

        let worker = thread::Builder::new()
            .name("vireo-playback".into())
            .spawn(move || {
                Self::engine_thread_main(
                    command_receiver,
                    event_sender,
                    shutdown_clone,
                    active_clone,
                    enabled_clone,
                    poll_interval,
                );
            })
            .map_err(|e| EngineError::SpawnError(e.to_string()))?;

        Ok(Self {
            command_sender,
            event_receiver,
            worker: Some(worker),
            shutdown_flag,
            active,
            enabled,
            config,
        })
    }

    /// Request a state snapshot (answered with `Event::StateUpdate`)
    pub fn request_state(&self) -> EngineResult<()> {
        self.send_command(Command::RequestState)
    }

    /// Preset handle the engine thread has applied, if any
    pub fn active_preset(&self) -> Option<SharedPreset> {
        self.active.read().clone()
    }

    /// Enabled flag as applied by the engine thread
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Get next event (non-blocking)
    pub fn poll_event(&self) -> Option<Event> {
        self.event_receiver.try_recv().ok()
    }

    /// Get next event, waiting up to `timeout`
    pub fn wait_event(&self, timeout: Duration) -> Option<Event> {
        self.event_receiver.recv_timeout(timeout).ok()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Send command to engine thread
    fn send_command(&self, command: Command) -> EngineResult<()> {
        self.command_sender
            .send(command)
            .map_err(|_| EngineError::ChannelSendError)
    }

    /// Engine thread main loop
    fn engine_thread_main(
        command_receiver: Receiver<Command>,
        event_sender: Sender<Event>,
        shutdown_flag: Arc<AtomicBool>,
        active: ActiveSlot,
        enabled: Arc<AtomicBool>,
        poll_interval: Duration,
    ) {
        info!("Playback engine thread started");

        while !shutdown_flag.load(Ordering::SeqCst) {
            // Timeout so the shutdown flag is checked periodically
            let command = match command_receiver.recv_timeout(poll_interval) {
                Ok(command) => command,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            };

            match command {
                Command::SwitchPreset(preset) => {
                    let name = preset.name().to_string();
                    let previous = active.write().replace(preset);
                    debug!(
                        "Switched preset {:?} -> '{}'",
                        previous.as_ref().map(|p| p.name().to_string()),
                        name
                    );
                    let _ = event_sender.send(Event::PresetSwitched { name });
                }
                Command::SetEqualizerEnabled(value) => {
                    enabled.store(value, Ordering::SeqCst);
                    debug!("Equalizer {}", if value { "enabled" } else { "disabled" });
                    let _ = event_sender.send(Event::EnabledChanged { enabled: value });
                }
                Command::RequestState => {
                    let slot = active.read();
                    let _ = event_sender.send(Event::StateUpdate {
                        enabled: enabled.load(Ordering::SeqCst),
                        preset: slot.as_ref().map(|p| p.name().to_string()),
                        gains: slot.as_ref().map(|p| p.gains().to_vec()).unwrap_or_default(),
                    });
                }
                Command::Shutdown => break,
            }
        }

        info!("Playback engine thread shutting down");
    }
}

impl PlaybackEngine for EqualizerEngine {
    fn switch_preset(&self, preset: SharedPreset) -> EngineResult<()> {
        self.send_command(Command::SwitchPreset(preset))
    }

    fn set_equalizer_enabled(&self, enabled: bool) -> EngineResult<()> {
        self.send_command(Command::SetEqualizerEnabled(enabled))
    }
}

impl Drop for EqualizerEngine {
    fn drop(&mut self) {
        // Signal shutdown
        self.shutdown_flag.store(true, Ordering::SeqCst);

        // Send shutdown command
        let _ = self.command_sender.send(Command::Shutdown);

        // Wait for engine thread to finish
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}
