//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Discriminator for the four kinds of simulation entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
    Pickup,
}

/// Who fired a projectile. Decides its direction and which pairs it collides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// Enemy movement pattern chosen at spawn time, with its per-enemy state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MovementPattern {
    /// Falls straight down.
    Straight,
    /// Weaves around `initial_x` while falling slowly.
    Sinusoidal { initial_x: f64, phase: f64 },
    /// Moves diagonally and bounces off a side inset at most once.
    Diagonal { direction: f64, has_bounced: bool },
}

/// Which pattern generator a spawn event uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    Straight,
    Sinusoidal,
    Diagonal,
}

/// Wave director state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    /// Wave announcement; no combat, player hidden.
    #[default]
    Intermission,
    /// Spawning and combat enabled.
    Active,
    /// Wave just completed; bonus shown before the next announcement.
    ///
    /// Part of the intermission as far as combat goes: field cleared, player
    /// hidden and unable to collect pickups.
    Bonus,
}

impl WavePhase {
    pub fn is_combat(&self) -> bool {
        matches!(self, WavePhase::Active)
    }
}

impl MovementPattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            MovementPattern::Straight => PatternKind::Straight,
            MovementPattern::Sinusoidal { .. } => PatternKind::Sinusoidal,
            MovementPattern::Diagonal { .. } => PatternKind::Diagonal,
        }
    }
}
