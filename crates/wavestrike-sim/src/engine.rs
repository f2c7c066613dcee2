//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the simulation context, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless
//! (no rendering or input dependency), enabling deterministic testing.

use std::collections::VecDeque;

use wavestrike_core::commands::{PlayerCommand, PlayerIntent};
use wavestrike_core::state::GameStateSnapshot;
use wavestrike_core::tuning::Tuning;
use wavestrike_core::types::Millis;

use crate::context::SimContext;
use crate::scheduler::ScheduledAction;
use crate::session::{PlayerState, WaveState};
use crate::store::EntityStore;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed + same inputs = same simulation.
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns the entity store and all run state.
pub struct SimulationEngine {
    ctx: SimContext,
    paused: bool,
    command_queue: VecDeque<PlayerCommand>,
}

impl SimulationEngine {
    /// Create a new simulation engine, ready for its first tick.
    pub fn new(config: SimConfig) -> Self {
        let mut engine = Self {
            ctx: SimContext::new(config.tuning, config.seed),
            paused: false,
            command_queue: VecDeque::new(),
        };
        engine.reset();
        engine
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation to wall-clock `now_ms` and return the resulting
    /// snapshot. `delta_ms` is the wall time since the previous tick.
    pub fn tick(
        &mut self,
        now_ms: Millis,
        delta_ms: Millis,
        intent: &PlayerIntent,
    ) -> GameStateSnapshot {
        self.process_commands();

        if self.paused {
            self.ctx.time.pause_for(delta_ms);
        } else if !self.ctx.run_over {
            self.ctx.time.advance(now_ms);
            self.run_systems(&intent.clamped(), delta_ms);
        }

        let events = std::mem::take(&mut self.ctx.events);
        systems::snapshot::build_snapshot(&self.ctx, self.paused, events)
    }

    /// Re-initialize to a fresh run: full lives, zero score, wave 1.
    ///
    /// The clock and RNG stream carry on; the first intermission starts on
    /// the next tick.
    pub fn reset(&mut self) {
        let ctx = &mut self.ctx;
        ctx.store.clear();
        ctx.scheduler.clear();
        ctx.events.clear();
        ctx.player = PlayerState::new(&ctx.tuning);
        ctx.wave = WaveState::new(&ctx.tuning);
        ctx.run_over = false;
        self.paused = false;

        let player = world_setup::spawn_player(&mut ctx.store, &ctx.tuning);
        ctx.player.entity = Some(player);
        let now = ctx.now();
        ctx.scheduler.schedule(now, ScheduledAction::EnterIntermission);

        tracing::info!(at = now, lives = ctx.player.lives, "Run reset");
    }

    pub fn is_run_over(&self) -> bool {
        self.ctx.run_over
    }

    pub fn player(&self) -> &PlayerState {
        &self.ctx.player
    }

    /// Get a read-only reference to the entity store.
    pub fn store(&self) -> &EntityStore {
        &self.ctx.store
    }

    /// Mutable context access for tests that stage exact situations.
    #[cfg(test)]
    pub fn context_mut(&mut self) -> &mut SimContext {
        &mut self.ctx
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => self.set_paused(true),
            PlayerCommand::Resume => self.set_paused(false),
            PlayerCommand::TogglePause => self.set_paused(!self.paused),
            PlayerCommand::Restart => self.reset(),
        }
    }

    fn set_paused(&mut self, paused: bool) {
        if self.paused == paused || self.ctx.run_over {
            return;
        }
        self.paused = paused;
        tracing::info!(paused, at = self.ctx.now(), "Pause toggled");
    }

    /// Run all systems in order.
    fn run_systems(&mut self, intent: &PlayerIntent, delta_ms: Millis) {
        let ctx = &mut self.ctx;
        let now = ctx.now();

        // 1. Invulnerability expiry
        systems::combat::refresh_invulnerability(&mut ctx.player, now);
        // 2. Due scheduled actions, split between director and spawner
        let (transitions, spawns): (Vec<_>, Vec<_>) = ctx
            .scheduler
            .drain_due(now)
            .into_iter()
            .partition(ScheduledAction::is_wave_transition);
        // 3. Wave director (phase changes, wave timer)
        systems::wave_director::run(ctx, &transitions);
        // 4. Spawner (enemy events, pickups)
        systems::spawner::run(ctx, &spawns);
        // 5. Enemy and player fire
        systems::weapons::run(ctx, intent);
        // 6. Movement integration
        systems::movement::run(ctx, intent, delta_ms);
        // 7. Collision resolution
        systems::collision::run(ctx);
        // 8. Cleanup (deferred despawns)
        systems::cleanup::run(ctx);
    }
}
