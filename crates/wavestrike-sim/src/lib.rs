//! Simulation engine for WAVESTRIKE.
//!
//! Owns the hecs ECS world, runs the wave/combat systems once per tick,
//! and produces GameStateSnapshots for the presentation layer.

pub mod context;
pub mod engine;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use wavestrike_core as core;
