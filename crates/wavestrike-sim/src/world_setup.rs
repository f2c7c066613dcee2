//! Entity spawn factories.
//!
//! Creates the player, enemies, projectiles and pickups with their
//! component bundles.

use hecs::Entity;

use wavestrike_core::components::*;
use wavestrike_core::enums::*;
use wavestrike_core::tuning::Tuning;
use wavestrike_core::types::{Millis, Position};

use crate::store::EntityStore;

/// Spawn the player's ship at its start position. It starts hidden; the
/// wave director shows it when the first wave goes active.
pub fn spawn_player(store: &mut EntityStore, tuning: &Tuning) -> Entity {
    store.add((
        PlayerShip,
        Position::new(tuning.player_start_x, tuning.player_start_y),
        Bounds {
            extents: tuning.player_bounds,
        },
        Active(false),
    ))
}

/// Spawn an enemy above the playfield. Its shot cooldown starts now.
pub fn spawn_enemy(
    store: &mut EntityStore,
    tuning: &Tuning,
    x: f64,
    pattern: MovementPattern,
    now: Millis,
) -> Entity {
    store.add((
        Enemy {
            pattern,
            last_shot_at: now,
        },
        Position::new(x, tuning.enemy_spawn_y),
        Bounds {
            extents: tuning.enemy_bounds,
        },
        Active(true),
    ))
}

/// Spawn a projectile at `position`.
pub fn spawn_projectile(
    store: &mut EntityStore,
    tuning: &Tuning,
    position: Position,
    owner: Owner,
) -> Entity {
    store.add((
        Projectile { owner },
        position,
        Bounds {
            extents: tuning.projectile_bounds,
        },
        Active(true),
    ))
}

/// Spawn a first-aid pickup. The spawner schedules its expiry.
pub fn spawn_pickup(store: &mut EntityStore, tuning: &Tuning, position: Position) -> Entity {
    store.add((
        Pickup,
        position,
        Bounds {
            extents: tuning.pickup_bounds,
        },
        Active(true),
    ))
}
