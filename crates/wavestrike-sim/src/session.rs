//! Per-run player and wave state.
//!
//! Stored in `SimContext`, NOT as ECS entities. The player's ship is an
//! entity; its lives, score and invulnerability live here.

use hecs::Entity;

use wavestrike_core::enums::WavePhase;
use wavestrike_core::tuning::Tuning;
use wavestrike_core::types::Millis;

/// Player status for the current run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// The player's ship. `None` once the run is over.
    pub entity: Option<Entity>,
    /// Remaining lives, 0..=max_lives.
    pub lives: u32,
    pub invulnerable: bool,
    /// End of the current invulnerability window.
    pub invulnerable_until: Millis,
    pub score: u64,
    /// Time of the last player shot.
    pub last_shot_at: Option<Millis>,
}

impl PlayerState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            entity: None,
            lives: tuning.max_lives,
            invulnerable: false,
            invulnerable_until: 0,
            score: 0,
            last_shot_at: None,
        }
    }
}

/// Wave director state.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveState {
    /// 1-based wave number.
    pub index: u32,
    pub duration_ms: Millis,
    pub phase: WavePhase,
    /// When the current wave went active.
    pub started_at: Millis,
    /// Deadline of the pending phase change while not active.
    pub phase_deadline: Option<Millis>,
    /// Last enemy spawn event this wave. `None` = spawn on the next tick.
    pub last_enemy_spawn: Option<Millis>,
    /// A pickup spawn is scheduled or live for this wave.
    pub pickup_scheduled: bool,
}

impl WaveState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            index: 1,
            duration_ms: tuning.first_wave_duration_ms,
            phase: WavePhase::Intermission,
            started_at: 0,
            phase_deadline: None,
            last_enemy_spawn: None,
            pickup_scheduled: false,
        }
    }

    /// Waves fully completed so far.
    pub fn completed(&self) -> u32 {
        self.index.saturating_sub(1)
    }

    /// Time left in the active wave.
    pub fn remaining_ms(&self, now: Millis) -> Millis {
        if self.phase.is_combat() {
            self.started_at.saturating_add(self.duration_ms).saturating_sub(now)
        } else {
            0
        }
    }

    /// Time until the pending phase change (intermission countdown).
    pub fn intermission_remaining_ms(&self, now: Millis) -> Millis {
        match (self.phase.is_combat(), self.phase_deadline) {
            (false, Some(deadline)) => deadline.saturating_sub(now),
            _ => 0,
        }
    }
}
