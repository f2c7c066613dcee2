//! Game state snapshot: the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Extents, Millis, Position, SimTime};

/// Complete game state handed to the presentation layer after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub entities: Vec<EntityView>,
    pub score: u64,
    pub lives: u32,
    pub wave: WaveView,
    pub paused: bool,
    pub run_over: bool,
    /// Events raised during this tick, in emission order.
    pub events: Vec<GameEvent>,
}

/// A visible entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    /// Stable handle for the entity's lifetime (hecs entity bits).
    pub id: u64,
    pub kind: EntityKind,
    pub position: Position,
    pub extents: Extents,
    /// Projectile owner, if this is a projectile.
    pub owner: Option<Owner>,
    /// Enemy pattern, if this is an enemy.
    pub pattern: Option<PatternKind>,
    /// Player is inside its invulnerability window and should blink.
    pub blinking: bool,
}

/// Wave progress for HUD display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveView {
    pub index: u32,
    pub phase: WavePhase,
    pub duration_ms: Millis,
    /// Time left in the current wave while active.
    pub remaining_ms: Millis,
    /// Time until the wave goes active while in intermission.
    pub intermission_remaining_ms: Millis,
}

impl GameStateSnapshot {
    /// Count visible entities of a kind.
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }
}
