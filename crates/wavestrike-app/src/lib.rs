//! WAVESTRIKE headless runner.
//!
//! This crate wires the simulation into a fixed-rate game loop thread,
//! drives it with an autopilot intent source and exposes a small handle
//! for sending commands and polling snapshots.

pub mod autopilot;
pub mod config;
pub mod game_loop;
pub mod state;

pub use wavestrike_core as core;
