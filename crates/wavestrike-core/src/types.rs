//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Simulation timestamp in milliseconds.
pub type Millis = u64;

/// 2D position in playfield units. x grows right, y grows down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Half-width and half-height of an axis-aligned bounding box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Extents {
    pub half_w: f64,
    pub half_h: f64,
}

/// Simulation time tracking.
///
/// `now_ms` is the simulation clock: the caller's wall clock minus the
/// total time spent paused. All deadlines are expressed on this clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulated (unpaused) ticks.
    pub tick: u64,
    /// Current simulation clock in milliseconds.
    pub now_ms: Millis,
    /// Total wall-clock milliseconds spent paused.
    pub paused_ms: Millis,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }
}

impl Extents {
    pub fn new(half_w: f64, half_h: f64) -> Self {
        Self { half_w, half_h }
    }

    /// Extents of a `w` x `h` box.
    pub fn from_size(w: f64, h: f64) -> Self {
        Self {
            half_w: w / 2.0,
            half_h: h / 2.0,
        }
    }
}

impl SimTime {
    /// Map a caller wall-clock timestamp onto the simulation clock.
    pub fn sim_now(&self, wall_ms: Millis) -> Millis {
        wall_ms.saturating_sub(self.paused_ms)
    }

    /// Advance to the given wall-clock timestamp while running.
    /// The simulation clock never moves backwards.
    pub fn advance(&mut self, wall_ms: Millis) {
        self.tick += 1;
        self.now_ms = self.now_ms.max(self.sim_now(wall_ms));
    }

    /// Account for a paused tick of `delta_ms` wall-clock milliseconds.
    pub fn pause_for(&mut self, delta_ms: Millis) {
        self.paused_ms += delta_ms;
    }
}
