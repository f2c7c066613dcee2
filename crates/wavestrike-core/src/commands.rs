//! Player input and commands sent from the frontend to the simulation.
//!
//! Intent is sampled every tick; commands are queued for processing at the
//! next tick boundary.

use serde::{Deserialize, Serialize};

/// Per-tick movement and fire intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIntent {
    /// -1 = left, 0 = none, 1 = right.
    pub move_x: i8,
    /// -1 = up, 0 = none, 1 = down.
    pub move_y: i8,
    pub firing: bool,
}

impl PlayerIntent {
    pub fn new(move_x: i8, move_y: i8, firing: bool) -> Self {
        Self {
            move_x: move_x.clamp(-1, 1),
            move_y: move_y.clamp(-1, 1),
            firing,
        }
    }

    /// Intent with axes forced into {-1, 0, 1}.
    pub fn clamped(&self) -> Self {
        Self::new(self.move_x, self.move_y, self.firing)
    }
}

/// Session-level player actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Pause if running, resume if paused.
    TogglePause,
    /// Start a fresh run (lives, score and waves reset).
    Restart,
}
