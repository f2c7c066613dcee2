//! Application state shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use wavestrike_core::commands::PlayerCommand;
use wavestrike_core::state::GameStateSnapshot;

use crate::game_loop::{self, LoopSettings, RunSummary};

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a running (or not yet started) game loop.
///
/// `mpsc::Sender` is wrapped in a `Mutex` so the state is `Sync` and can be
/// shared across threads that send commands.
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    /// `None` before `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous polling.
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    loop_handle: Mutex<Option<JoinHandle<RunSummary>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            loop_handle: Mutex::new(None),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a game loop has been started and not yet joined.
    pub fn is_running(&self) -> bool {
        self.loop_handle
            .lock()
            .map(|h| h.is_some())
            .unwrap_or(false)
    }

    /// Start the game loop thread if not already running.
    pub fn start(&self, settings: LoopSettings) -> Result<(), String> {
        let mut handle_lock = self.loop_handle.lock().map_err(|e| e.to_string())?;
        if handle_lock.is_some() {
            return Err("Simulation already running".into());
        }

        let (cmd_tx, handle) =
            game_loop::spawn_game_loop(settings, self.latest_snapshot.clone())
                .map_err(|e| format!("Failed to spawn game loop thread: {}", e))?;

        let mut tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;
        *tx_lock = Some(cmd_tx);
        *handle_lock = Some(handle);
        Ok(())
    }

    /// Send a player command to the simulation.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), String> {
        self.send(GameLoopCommand::PlayerCommand(command))
    }

    /// Get the latest snapshot (for polling / initial state).
    pub fn get_snapshot(&self) -> Result<Option<GameStateSnapshot>, String> {
        let lock = self.latest_snapshot.lock().map_err(|e| e.to_string())?;
        Ok(lock.clone())
    }

    /// Ask the loop to stop. It finishes its current tick first.
    pub fn shutdown(&self) -> Result<(), String> {
        self.send(GameLoopCommand::Shutdown)
    }

    /// Block until the game loop finishes and return its summary.
    pub fn wait(&self) -> Result<RunSummary, String> {
        let handle = self
            .loop_handle
            .lock()
            .map_err(|e| e.to_string())?
            .take()
            .ok_or_else(|| String::from("Simulation not started"))?;
        let summary = handle
            .join()
            .map_err(|_| String::from("Game loop thread panicked"))?;

        if let Ok(mut tx_lock) = self.command_tx.lock() {
            *tx_lock = None;
        }
        Ok(summary)
    }

    fn send(&self, command: GameLoopCommand) -> Result<(), String> {
        let tx_lock = self.command_tx.lock().map_err(|e| e.to_string())?;

        match tx_lock.as_ref() {
            Some(tx) => tx
                .send(command)
                .map_err(|e| format!("Failed to send command: {}", e)),
            None => Err("Simulation not started".into()),
        }
    }
}
