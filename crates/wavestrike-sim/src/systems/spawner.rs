//! Spawner system: enemy spawn events and first-aid pickups.
//!
//! Enemy spawn events fire on the first active tick of a wave and then on a
//! fixed interval; each picks one of three pattern generators. A wave gets
//! at most one pickup, scheduled at wave start if the player is hurt.

use hecs::Entity;
use rand::Rng;

use wavestrike_core::enums::{EntityKind, MovementPattern, PatternKind, WavePhase};
use wavestrike_core::types::Position;

use crate::context::SimContext;
use crate::scheduler::ScheduledAction;
use crate::world_setup;

/// Handle due spawn actions, then fire the interval spawn if it is due.
pub fn run(ctx: &mut SimContext, due: &[ScheduledAction]) {
    for action in due {
        match *action {
            ScheduledAction::SpawnEnemy { wave, x, pattern } => {
                spawn_staggered(ctx, wave, x, pattern);
            }
            ScheduledAction::SpawnPickup { wave } => try_spawn_pickup(ctx, wave),
            ScheduledAction::ExpirePickup { pickup } => expire_pickup(ctx, pickup),
            _ => {}
        }
    }

    if ctx.wave.phase != WavePhase::Active {
        return;
    }

    let now = ctx.now();
    let interval_due = match ctx.wave.last_enemy_spawn {
        None => true,
        Some(last) => now.saturating_sub(last) >= ctx.tuning.enemy_spawn_interval_ms,
    };
    if interval_due {
        ctx.wave.last_enemy_spawn = Some(now);
        let kind = match ctx.rng.gen_range(0..3) {
            0 => PatternKind::Diagonal,
            1 => PatternKind::Sinusoidal,
            _ => PatternKind::Straight,
        };
        spawn_group(ctx, kind);
    }
}

/// Run one spawn event with the given generator.
pub fn spawn_group(ctx: &mut SimContext, kind: PatternKind) {
    let now = ctx.now();
    match kind {
        PatternKind::Diagonal => {
            let direction = if ctx.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            let pattern = MovementPattern::Diagonal {
                direction,
                has_bounced: false,
            };
            let x = ctx.tuning.diagonal_spawn_x;
            world_setup::spawn_enemy(&mut ctx.store, &ctx.tuning, x, pattern, now);

            for i in 1..ctx.tuning.diagonal_formation_size {
                ctx.scheduler.schedule(
                    now.saturating_add(ctx.tuning.diagonal_stagger_ms * u64::from(i)),
                    ScheduledAction::SpawnEnemy {
                        wave: ctx.wave.index,
                        x,
                        pattern,
                    },
                );
            }
        }
        PatternKind::Sinusoidal => {
            let x = random_spawn_x(ctx);
            let pattern = MovementPattern::Sinusoidal {
                initial_x: x,
                phase: 0.0,
            };
            world_setup::spawn_enemy(&mut ctx.store, &ctx.tuning, x, pattern, now);
        }
        PatternKind::Straight => {
            let x = random_spawn_x(ctx);
            world_setup::spawn_enemy(
                &mut ctx.store,
                &ctx.tuning,
                x,
                MovementPattern::Straight,
                now,
            );
        }
    }

    tracing::debug!(wave = ctx.wave.index, pattern = ?kind, at = now, "Enemy spawn");
}

/// Schedule this wave's pickup if the player is hurt and none is pending.
pub fn schedule_pickup(ctx: &mut SimContext) {
    if ctx.wave.pickup_scheduled || ctx.player.lives >= ctx.tuning.max_lives {
        return;
    }
    let delay = ctx
        .rng
        .gen_range(ctx.tuning.pickup_delay_min_ms..=ctx.tuning.pickup_delay_max_ms);
    let at = ctx.now().saturating_add(delay);
    ctx.scheduler.schedule(
        at,
        ScheduledAction::SpawnPickup {
            wave: ctx.wave.index,
        },
    );
    ctx.wave.pickup_scheduled = true;
    tracing::debug!(wave = ctx.wave.index, at, "Pickup scheduled");
}

fn spawn_staggered(ctx: &mut SimContext, wave: u32, x: f64, pattern: MovementPattern) {
    // Formation members left over from an ended wave are dropped.
    if wave != ctx.wave.index || ctx.wave.phase != WavePhase::Active {
        return;
    }
    let now = ctx.now();
    world_setup::spawn_enemy(&mut ctx.store, &ctx.tuning, x, pattern, now);
}

fn try_spawn_pickup(ctx: &mut SimContext, wave: u32) {
    if wave != ctx.wave.index
        || ctx.wave.phase != WavePhase::Active
        || ctx.player.lives >= ctx.tuning.max_lives
        || ctx.store.count(EntityKind::Pickup) > 0
    {
        tracing::trace!(wave, "Pickup spawn skipped");
        return;
    }

    let t = &ctx.tuning;
    let position = Position::new(
        ctx.rng.gen_range(t.pickup_min_x..=t.pickup_max_x),
        ctx.rng.gen_range(t.pickup_min_y..=t.pickup_max_y),
    );
    let now = ctx.now();
    let pickup = world_setup::spawn_pickup(&mut ctx.store, &ctx.tuning, position);
    ctx.scheduler.schedule(
        now.saturating_add(ctx.tuning.pickup_lifetime_ms),
        ScheduledAction::ExpirePickup { pickup },
    );
    tracing::debug!(wave, x = position.x, y = position.y, "Pickup spawned");
}

fn expire_pickup(ctx: &mut SimContext, pickup: Entity) {
    if ctx.store.kind_of(pickup) != Some(EntityKind::Pickup) {
        return;
    }
    if ctx.store.remove(pickup) {
        ctx.wave.pickup_scheduled = false;
        tracing::debug!("Pickup expired");
    }
}

fn random_spawn_x(ctx: &mut SimContext) -> f64 {
    ctx.rng
        .gen_range(ctx.tuning.enemy_spawn_min_x..=ctx.tuning.enemy_spawn_max_x)
}
