//! Systems that operate on the simulation context each tick.
//!
//! Systems are plain functions over `&mut SimContext` (or `&SimContext` for
//! read-only). They do not own state; all state lives in the context.

pub mod cleanup;
pub mod collision;
pub mod combat;
pub mod movement;
pub mod snapshot;
pub mod spawner;
pub mod wave_director;
pub mod weapons;
