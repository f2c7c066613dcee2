//! Events emitted by the simulation for presentation, audio and UI feedback.

use serde::{Deserialize, Serialize};

/// Gameplay events, drained into each tick's snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// An enemy was destroyed; presentation plays an explosion here.
    EnemyDestroyed { x: f64, y: f64 },
    /// The player lost a life.
    PlayerHit { lives: u32 },
    /// The player collected a first-aid pickup.
    PickupCollected { lives: u32 },
    /// Intermission began; the wave title is shown.
    WaveAnnounced { index: u32 },
    /// The wave went active.
    WaveStarted { index: u32 },
    /// The wave ran its full duration.
    WaveCompleted { index: u32, bonus: u64 },
    /// The player ran out of lives. Terminal for the run.
    RunOver { score: u64, waves_completed: u32 },
}
