//! Game loop thread: runs the simulation engine at a fixed rate and publishes snapshots.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. The latest snapshot is stored in shared
//! state for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use serde::Serialize;

use wavestrike_core::commands::PlayerIntent;
use wavestrike_core::state::GameStateSnapshot;
use wavestrike_sim::engine::{SimConfig, SimulationEngine};

use crate::autopilot;
use crate::state::GameLoopCommand;

/// How the loop runs.
#[derive(Debug, Clone)]
pub struct LoopSettings {
    pub sim: SimConfig,
    /// Simulated (and, unless unpaced, real) time per tick.
    pub tick_interval: Duration,
    /// Stop after this many ticks.
    pub max_ticks: Option<u64>,
    /// Sleep between ticks to hold real time. Off for tests and batch runs.
    pub paced: bool,
}

/// Final state of a finished loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: u64,
    pub lives: u32,
    pub wave: u32,
    pub waves_completed: u32,
    pub run_over: bool,
}

/// Simulation clock advanced by a fixed `Duration` per tick.
///
/// Milliseconds are derived from the accumulated duration, so sub-millisecond
/// remainders carry over instead of being dropped every tick.
#[derive(Debug, Clone)]
struct FixedClock {
    step: Duration,
    elapsed: Duration,
    now_ms: u64,
}

impl FixedClock {
    fn new(step: Duration) -> Self {
        Self {
            step,
            elapsed: Duration::ZERO,
            now_ms: 0,
        }
    }

    /// Advance one tick. Returns the new time and the whole milliseconds it moved.
    fn step(&mut self) -> (u64, u64) {
        self.elapsed += self.step;
        let next = u64::try_from(self.elapsed.as_millis()).unwrap_or(u64::MAX);
        let delta = next - self.now_ms;
        self.now_ms = next;
        (next, delta)
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle yielding the run summary.
pub fn spawn_game_loop(
    settings: LoopSettings,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<RunSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("wavestrike-game-loop".into())
        .spawn(move || run_game_loop(settings, cmd_rx, &latest_snapshot))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the run is over, the tick limit, a Shutdown
/// command or channel disconnect.
fn run_game_loop(
    settings: LoopSettings,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> RunSummary {
    let tuning = settings.sim.tuning.clone();
    let mut engine = SimulationEngine::new(settings.sim);
    let mut clock = FixedClock::new(settings.tick_interval);
    let mut intent = PlayerIntent::default();
    let mut ticks = 0;
    let mut last = GameStateSnapshot::default();
    let mut next_tick_time = Instant::now();

    tracing::info!(tick_interval = ?settings.tick_interval, max_ticks = ?settings.max_ticks, "Game loop started");

    'outer: loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    tracing::debug!(?cmd, "Command received");
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => break 'outer,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => break 'outer,
            }
        }

        // 2. Advance one tick on a fixed-step clock
        let (now_ms, delta_ms) = clock.step();
        let snapshot = engine.tick(now_ms, delta_ms, &intent);
        ticks += 1;

        for event in &snapshot.events {
            tracing::debug!(?event, tick = snapshot.time.tick, "Game event");
        }

        // 3. Next intent from what the player can see now
        intent = autopilot::steer(&snapshot, &tuning);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        let done = snapshot.run_over || settings.max_ticks.is_some_and(|max| ticks >= max);
        last = snapshot;
        if done {
            break;
        }

        // 5. Sleep until next tick
        if settings.paced {
            next_tick_time += settings.tick_interval;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > settings.tick_interval * 2 {
                // Too far behind, reset to avoid catch-up spiral
                next_tick_time = now;
            }
        }
    }

    let summary = RunSummary {
        ticks,
        score: last.score,
        lives: last.lives,
        wave: last.wave.index,
        waves_completed: last.wave.index.saturating_sub(1),
        run_over: last.run_over,
    };
    tracing::info!(?summary, "Game loop stopped");
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavestrike_core::commands::PlayerCommand;

    fn batch(max_ticks: u64) -> LoopSettings {
        LoopSettings {
            sim: SimConfig::default(),
            tick_interval: Duration::from_millis(16),
            max_ticks: Some(max_ticks),
            paced: false,
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Pause))
            .unwrap();
        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Restart))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::PlayerCommand(PlayerCommand::Pause)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::PlayerCommand(PlayerCommand::Restart)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_fixed_clock_keeps_fractional_milliseconds() {
        let mut clock = FixedClock::new(crate::config::tick_interval(60));
        let mut total_delta = 0;
        let mut now = 0;
        for _ in 0..600 {
            let (t, delta) = clock.step();
            assert!(delta == 16 || delta == 17, "unexpected step {delta}");
            total_delta += delta;
            now = t;
        }
        // 600 ticks at 60 Hz is ten seconds, within a millisecond.
        assert!((9_999..=10_000).contains(&now), "clock drifted to {now} ms");
        assert_eq!(total_delta, now);
    }

    #[test]
    fn test_loop_stops_at_tick_limit() {
        let latest = Arc::new(Mutex::new(None));
        let (_tx, handle) = spawn_game_loop(batch(300), latest.clone()).unwrap();
        let summary = handle.join().unwrap();

        assert_eq!(summary.ticks, 300);
        assert_eq!(summary.wave, 1);
        let snap = latest.lock().unwrap().clone().expect("snapshot published");
        assert_eq!(snap.time.tick, 300);
        assert_eq!(snap.time.now_ms, 300 * 16);
    }

    #[test]
    fn test_fixed_step_runs_are_reproducible() {
        let run = || {
            let latest = Arc::new(Mutex::new(None));
            let (_tx, handle) = spawn_game_loop(batch(2_000), latest.clone()).unwrap();
            let summary = handle.join().unwrap();
            let snap = latest.lock().unwrap().clone();
            (summary, snap)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_shutdown_stops_loop() {
        let latest = Arc::new(Mutex::new(None));
        let settings = LoopSettings {
            max_ticks: None,
            paced: true,
            ..batch(0)
        };
        let (tx, handle) = spawn_game_loop(settings, latest).unwrap();
        std::thread::sleep(Duration::from_millis(50));
        tx.send(GameLoopCommand::Shutdown).unwrap();
        let summary = handle.join().unwrap();
        assert!(summary.ticks > 0);
        assert!(!summary.run_over);
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        let intent = PlayerIntent::new(0, 0, true);
        for i in 1..=600 {
            engine.tick(i * 16, 16, &intent);
        }

        let snapshot = engine.tick(601 * 16, 16, &intent);
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }
}
