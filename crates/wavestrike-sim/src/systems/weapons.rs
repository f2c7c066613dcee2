//! Weapons system: enemy and player firing.
//!
//! Both only fire while a wave is active. Enemies fire straight down on a
//! fixed cooldown; the player fires straight up while the fire intent is held.

use hecs::Entity;

use wavestrike_core::commands::PlayerIntent;
use wavestrike_core::components::{Active, Enemy};
use wavestrike_core::enums::Owner;
use wavestrike_core::types::Position;

use crate::context::SimContext;
use crate::world_setup;

pub fn run(ctx: &mut SimContext, intent: &PlayerIntent) {
    if !ctx.wave.phase.is_combat() {
        return;
    }
    enemy_fire(ctx);
    player_fire(ctx, intent);
}

fn enemy_fire(ctx: &mut SimContext) {
    let now = ctx.now();
    let cooldown = ctx.tuning.enemy_shot_cooldown_ms;

    let mut muzzles: Vec<(Entity, Position)> = Vec::new();
    for (entity, (enemy, pos, active)) in ctx
        .store
        .world_mut()
        .query_mut::<(&mut Enemy, &Position, &Active)>()
    {
        if active.0 && now.saturating_sub(enemy.last_shot_at) >= cooldown {
            enemy.last_shot_at = now;
            muzzles.push((entity, *pos));
        }
    }
    muzzles.sort_by_key(|(e, _)| e.id());

    let offset = ctx.tuning.enemy_muzzle_offset;
    for (_, pos) in muzzles {
        world_setup::spawn_projectile(
            &mut ctx.store,
            &ctx.tuning,
            Position::new(pos.x, pos.y + offset),
            Owner::Enemy,
        );
    }
}

fn player_fire(ctx: &mut SimContext, intent: &PlayerIntent) {
    if !intent.firing {
        return;
    }
    let Some(player) = ctx.player.entity else {
        return;
    };
    if !ctx.store.is_active(player) {
        return;
    }

    let now = ctx.now();
    let ready = ctx
        .player
        .last_shot_at
        .map_or(true, |last| now.saturating_sub(last) >= ctx.tuning.player_shot_cooldown_ms);
    if !ready {
        return;
    }

    let Ok(pos) = ctx.store.world().get::<&Position>(player).map(|p| *p) else {
        return;
    };
    ctx.player.last_shot_at = Some(now);
    world_setup::spawn_projectile(
        &mut ctx.store,
        &ctx.tuning,
        Position::new(pos.x, pos.y - ctx.tuning.player_muzzle_offset),
        Owner::Player,
    );
    tracing::trace!(x = pos.x, y = pos.y, at = now, "Player fired");
}
