//! Movement system.
//!
//! Enemies and projectiles step a fixed amount per tick. The player moves by
//! velocity scaled with the tick's wall-clock delta and is clamped to the
//! playfield. Anything that leaves the vertical bounds is removed.

use glam::DVec2;

use wavestrike_core::commands::PlayerIntent;
use wavestrike_core::components::{Active, Bounds, Enemy, Projectile};
use wavestrike_core::enums::{MovementPattern, Owner};
use wavestrike_core::tuning::Tuning;
use wavestrike_core::types::{Millis, Position};

use crate::context::SimContext;

/// Advance every active entity by one tick.
pub fn run(ctx: &mut SimContext, intent: &PlayerIntent, delta_ms: Millis) {
    move_player(ctx, intent, delta_ms);
    move_enemies(ctx);
    move_projectiles(ctx);
}

/// Advance one enemy along its pattern.
///
/// Sinusoidal phase steps per tick, not per millisecond, so the weave
/// tightens at higher tick rates.
pub fn step_pattern(pattern: &mut MovementPattern, pos: &mut Position, tuning: &Tuning) {
    match pattern {
        MovementPattern::Straight => {
            pos.y += tuning.enemy_speed;
        }
        MovementPattern::Sinusoidal { initial_x, phase } => {
            *phase += tuning.enemy_sinusoidal_frequency;
            pos.x = *initial_x + phase.sin() * tuning.enemy_sinusoidal_amplitude;
            pos.y += tuning.enemy_sinusoidal_speed;
        }
        MovementPattern::Diagonal {
            direction,
            has_bounced,
        } => {
            pos.x += tuning.enemy_speed * *direction;
            pos.y += tuning.enemy_speed;

            let inset = tuning.diagonal_bounce_inset;
            if !*has_bounced && (pos.x <= inset || pos.x >= tuning.world_width - inset) {
                *direction = -*direction;
                *has_bounced = true;
            }
        }
    }
}

/// Player velocity (units/s) for an intent. Diagonals are scaled by 1/sqrt(2).
pub fn player_velocity(intent: &PlayerIntent, speed: f64) -> DVec2 {
    let mut dir = DVec2::new(intent.move_x as f64, intent.move_y as f64);
    if intent.move_x != 0 && intent.move_y != 0 {
        dir *= std::f64::consts::FRAC_1_SQRT_2;
    }
    dir * speed
}

fn move_player(ctx: &mut SimContext, intent: &PlayerIntent, delta_ms: Millis) {
    let Some(player) = ctx.player.entity else {
        return;
    };
    if !ctx.store.is_active(player) {
        return;
    }

    let tuning = &ctx.tuning;
    let velocity = player_velocity(intent, tuning.player_speed);
    let dt = delta_ms as f64 / 1000.0;

    let world = ctx.store.world_mut();
    let Ok((pos, bounds)) = world.query_one_mut::<(&mut Position, &Bounds)>(player) else {
        return;
    };
    let e = bounds.extents;
    let next = pos.as_dvec2() + velocity * dt;
    // max/min rather than clamp: an oversized box pins to the far edge instead of panicking.
    pos.x = next.x.max(e.half_w).min(tuning.world_width - e.half_w);
    pos.y = next.y.max(e.half_h).min(tuning.world_height - e.half_h);
}

fn move_enemies(ctx: &mut SimContext) {
    let tuning = &ctx.tuning;
    let mut off_field = Vec::new();

    for (entity, (enemy, pos, active)) in ctx
        .store
        .world_mut()
        .query_mut::<(&mut Enemy, &mut Position, &Active)>()
    {
        if !active.0 {
            continue;
        }
        step_pattern(&mut enemy.pattern, pos, tuning);
        if pos.y > tuning.enemy_remove_y {
            off_field.push(entity);
        }
    }

    for entity in off_field {
        ctx.store.remove(entity);
    }
}

fn move_projectiles(ctx: &mut SimContext) {
    let tuning = &ctx.tuning;
    let mut off_field = Vec::new();

    for (entity, (projectile, pos, active)) in ctx
        .store
        .world_mut()
        .query_mut::<(&Projectile, &mut Position, &Active)>()
    {
        if !active.0 {
            continue;
        }
        let gone = match projectile.owner {
            Owner::Player => {
                pos.y -= tuning.player_projectile_speed;
                pos.y < tuning.player_projectile_remove_y
            }
            Owner::Enemy => {
                pos.y += tuning.enemy_projectile_speed;
                pos.y > tuning.enemy_projectile_remove_y
            }
        };
        if gone {
            off_field.push(entity);
        }
    }

    for entity in off_field {
        ctx.store.remove(entity);
    }
}
