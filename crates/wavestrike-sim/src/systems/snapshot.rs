//! Snapshot system: queries the entity store and builds a complete GameStateSnapshot.
//!
//! This system is read-only and never modifies the world.

use hecs::Entity;

use wavestrike_core::components::{Enemy, Projectile};
use wavestrike_core::enums::{EntityKind, Owner};
use wavestrike_core::events::GameEvent;
use wavestrike_core::state::*;

use crate::context::SimContext;
use crate::systems::combat;

/// Build a complete GameStateSnapshot from the current context.
pub fn build_snapshot(ctx: &SimContext, paused: bool, events: Vec<GameEvent>) -> GameStateSnapshot {
    let now = ctx.now();

    GameStateSnapshot {
        time: ctx.time,
        entities: build_entities(ctx),
        score: ctx.player.score,
        lives: ctx.player.lives,
        wave: WaveView {
            index: ctx.wave.index,
            phase: ctx.wave.phase,
            duration_ms: ctx.wave.duration_ms,
            remaining_ms: ctx.wave.remaining_ms(now),
            intermission_remaining_ms: ctx.wave.intermission_remaining_ms(now),
        },
        paused,
        run_over: ctx.run_over,
        events,
    }
}

/// Active entities grouped by kind, each group in ascending id order.
fn build_entities(ctx: &SimContext) -> Vec<EntityView> {
    let blinking = combat::is_invulnerable(&ctx.player, ctx.now());
    let mut views = Vec::new();

    for kind in [
        EntityKind::Player,
        EntityKind::Enemy,
        EntityKind::Projectile,
        EntityKind::Pickup,
    ] {
        ctx.store.for_each(kind, |entity, position, extents| {
            views.push(EntityView {
                id: entity.to_bits().get(),
                kind,
                position,
                extents,
                owner: owner_of(ctx, entity),
                pattern: ctx
                    .store
                    .world()
                    .get::<&Enemy>(entity)
                    .ok()
                    .map(|e| e.pattern.kind()),
                blinking: kind == EntityKind::Player && blinking,
            });
        });
    }

    views
}

fn owner_of(ctx: &SimContext, entity: Entity) -> Option<Owner> {
    ctx.store
        .world()
        .get::<&Projectile>(entity)
        .ok()
        .map(|p| p.owner)
}
