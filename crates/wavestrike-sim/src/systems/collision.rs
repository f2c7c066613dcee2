//! Collision resolver: axis-aligned overlap tests between entity pairs.
//!
//! Pairs are resolved in a fixed order, each side in ascending entity id:
//! player projectile x enemy, enemy projectile x player, player x enemy,
//! player x pickup. A removed entity is inactive for the rest of the tick,
//! so nothing is consumed twice.

use hecs::Entity;

use wavestrike_core::components::Projectile;
use wavestrike_core::enums::{EntityKind, Owner};
use wavestrike_core::events::GameEvent;
use wavestrike_core::types::{Extents, Position};

use crate::context::SimContext;
use crate::systems::combat::{self, HitOutcome};

/// An entity's box at the start of resolution.
#[derive(Debug, Clone, Copy)]
struct Collider {
    entity: Entity,
    position: Position,
    extents: Extents,
}

/// AABB overlap. Touching edges do not overlap.
pub fn overlaps(a: Position, a_ext: Extents, b: Position, b_ext: Extents) -> bool {
    (a.x - b.x).abs() < a_ext.half_w + b_ext.half_w
        && (a.y - b.y).abs() < a_ext.half_h + b_ext.half_h
}

pub fn run(ctx: &mut SimContext) {
    if ctx.run_over {
        return;
    }

    projectiles_vs_enemies(ctx);

    let Some(player) = player_collider(ctx) else {
        return;
    };
    enemy_fire_vs_player(ctx, &player);
    if ctx.run_over {
        return;
    }
    enemies_vs_player(ctx, &player);
    if ctx.run_over {
        return;
    }
    pickups_vs_player(ctx, &player);
}

fn projectiles_vs_enemies(ctx: &mut SimContext) {
    let shots = projectiles(ctx, Owner::Player);
    let enemies = colliders(ctx, EntityKind::Enemy);

    for shot in &shots {
        for enemy in &enemies {
            if !ctx.store.is_active(enemy.entity) {
                continue;
            }
            if !overlaps(shot.position, shot.extents, enemy.position, enemy.extents) {
                continue;
            }
            ctx.store.remove(shot.entity);
            ctx.store.remove(enemy.entity);
            let points = combat::award_enemy_kill(&mut ctx.player, &ctx.tuning);
            tracing::debug!(x = enemy.position.x, y = enemy.position.y, points, "Enemy destroyed");
            ctx.emit(GameEvent::EnemyDestroyed {
                x: enemy.position.x,
                y: enemy.position.y,
            });
            break;
        }
    }
}

fn enemy_fire_vs_player(ctx: &mut SimContext, player: &Collider) {
    for shot in projectiles(ctx, Owner::Enemy) {
        if !overlaps(shot.position, shot.extents, player.position, player.extents) {
            continue;
        }
        ctx.store.remove(shot.entity);
        hit_player(ctx);
        if ctx.run_over {
            return;
        }
    }
}

fn enemies_vs_player(ctx: &mut SimContext, player: &Collider) {
    for enemy in colliders(ctx, EntityKind::Enemy) {
        if !ctx.store.is_active(enemy.entity) {
            continue;
        }
        if !overlaps(enemy.position, enemy.extents, player.position, player.extents) {
            continue;
        }
        // Ramming destroys the enemy only if the hit lands.
        if !combat::is_invulnerable(&ctx.player, ctx.now()) {
            ctx.store.remove(enemy.entity);
            ctx.emit(GameEvent::EnemyDestroyed {
                x: enemy.position.x,
                y: enemy.position.y,
            });
        }
        hit_player(ctx);
        if ctx.run_over {
            return;
        }
    }
}

fn pickups_vs_player(ctx: &mut SimContext, player: &Collider) {
    for pickup in colliders(ctx, EntityKind::Pickup) {
        if !overlaps(pickup.position, pickup.extents, player.position, player.extents) {
            continue;
        }
        if !combat::collect_pickup(&mut ctx.player, &ctx.tuning) {
            continue;
        }
        ctx.store.remove(pickup.entity);
        ctx.wave.pickup_scheduled = false;
        tracing::debug!(lives = ctx.player.lives, "Pickup collected");
        ctx.emit(GameEvent::PickupCollected {
            lives: ctx.player.lives,
        });
    }
}

fn hit_player(ctx: &mut SimContext) {
    let now = ctx.now();
    match combat::apply_player_hit(&mut ctx.player, now, &ctx.tuning) {
        HitOutcome::Ignored => {}
        HitOutcome::Damaged => {
            tracing::debug!(lives = ctx.player.lives, at = now, "Player hit");
            ctx.emit(GameEvent::PlayerHit {
                lives: ctx.player.lives,
            });
        }
        HitOutcome::Killed => {
            ctx.emit(GameEvent::PlayerHit { lives: 0 });
            end_run(ctx);
        }
    }
}

/// Terminal transition: despawn the player and freeze the run.
fn end_run(ctx: &mut SimContext) {
    if let Some(player) = ctx.player.entity.take() {
        ctx.store.remove(player);
    }
    ctx.run_over = true;

    let waves_completed = ctx.wave.completed();
    tracing::info!(
        score = ctx.player.score,
        waves_completed,
        wave = ctx.wave.index,
        "Run over"
    );
    ctx.emit(GameEvent::RunOver {
        score: ctx.player.score,
        waves_completed,
    });
}

fn player_collider(ctx: &SimContext) -> Option<Collider> {
    let entity = ctx.player.entity?;
    if !ctx.store.is_active(entity) {
        return None;
    }
    colliders(ctx, EntityKind::Player)
        .into_iter()
        .find(|c| c.entity == entity)
}

fn colliders(ctx: &SimContext, kind: EntityKind) -> Vec<Collider> {
    let mut out = Vec::new();
    ctx.store.for_each(kind, |entity, position, extents| {
        out.push(Collider {
            entity,
            position,
            extents,
        });
    });
    out
}

fn projectiles(ctx: &SimContext, owner: Owner) -> Vec<Collider> {
    let world = ctx.store.world();
    colliders(ctx, EntityKind::Projectile)
        .into_iter()
        .filter(|c| {
            world
                .get::<&Projectile>(c.entity)
                .map(|p| p.owner == owner)
                .unwrap_or(false)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavestrike_core::enums::{MovementPattern, WavePhase};
    use wavestrike_core::tuning::Tuning;

    use crate::world_setup;

    fn arena() -> SimContext {
        let mut ctx = SimContext::new(Tuning::default(), 5);
        ctx.wave.phase = WavePhase::Active;
        let player = world_setup::spawn_player(&mut ctx.store, &ctx.tuning);
        ctx.store.set_active(player, true);
        ctx.player.entity = Some(player);
        ctx
    }

    fn enemy_at(ctx: &mut SimContext, x: f64, y: f64) -> Entity {
        let e = world_setup::spawn_enemy(
            &mut ctx.store,
            &ctx.tuning,
            x,
            MovementPattern::Straight,
            0,
        );
        if let Ok(mut pos) = ctx.store.world().get::<&mut Position>(e) {
            pos.y = y;
        }
        e
    }

    fn shot_at(ctx: &mut SimContext, x: f64, y: f64, owner: Owner) -> Entity {
        world_setup::spawn_projectile(&mut ctx.store, &ctx.tuning, Position::new(x, y), owner)
    }

    #[test]
    fn test_overlap_is_strict() {
        let e = Extents::new(10.0, 10.0);
        assert!(overlaps(Position::new(0.0, 0.0), e, Position::new(19.9, 0.0), e));
        assert!(!overlaps(Position::new(0.0, 0.0), e, Position::new(20.0, 0.0), e));
        assert!(!overlaps(Position::new(0.0, 0.0), e, Position::new(0.0, 25.0), e));
    }

    #[test]
    fn test_shot_kills_enemy_once() {
        let mut ctx = arena();
        let enemy = enemy_at(&mut ctx, 200.0, 300.0);
        let a = shot_at(&mut ctx, 200.0, 305.0, Owner::Player);
        let b = shot_at(&mut ctx, 202.0, 310.0, Owner::Player);

        run(&mut ctx);

        assert!(!ctx.store.is_active(enemy));
        assert!(!ctx.store.is_active(a));
        assert!(ctx.store.is_active(b), "Second shot has nothing left to hit");
        assert_eq!(ctx.player.score, 50);
        assert_eq!(
            ctx.events,
            vec![GameEvent::EnemyDestroyed { x: 200.0, y: 300.0 }]
        );
    }

    #[test]
    fn test_enemy_shot_damages_player() {
        let mut ctx = arena();
        let shot = shot_at(&mut ctx, 240.0, 750.0, Owner::Enemy);
        run(&mut ctx);
        assert!(!ctx.store.is_active(shot));
        assert_eq!(ctx.player.lives, 2);
        assert_eq!(ctx.events, vec![GameEvent::PlayerHit { lives: 2 }]);
    }

    #[test]
    fn test_ram_while_invulnerable_spares_enemy() {
        let mut ctx = arena();
        ctx.player.invulnerable = true;
        ctx.player.invulnerable_until = 1_000;
        let enemy = enemy_at(&mut ctx, 240.0, 750.0);

        run(&mut ctx);

        assert!(ctx.store.is_active(enemy));
        assert_eq!(ctx.player.lives, 3);
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn test_ram_destroys_enemy_and_costs_life() {
        let mut ctx = arena();
        let enemy = enemy_at(&mut ctx, 240.0, 745.0);
        run(&mut ctx);
        assert!(!ctx.store.is_active(enemy));
        assert_eq!(ctx.player.lives, 2);
        assert_eq!(ctx.player.score, 0, "Ramming scores nothing");
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut ctx = arena();
        ctx.player.lives = 1;
        ctx.wave.index = 3;
        let player = ctx.player.entity.unwrap();
        shot_at(&mut ctx, 240.0, 750.0, Owner::Enemy);
        let spare = shot_at(&mut ctx, 240.0, 752.0, Owner::Enemy);

        run(&mut ctx);

        assert!(ctx.run_over);
        assert_eq!(ctx.player.entity, None);
        assert!(!ctx.store.is_active(player));
        assert!(ctx.store.is_active(spare), "Resolution stops at run over");
        assert_eq!(
            ctx.events,
            vec![
                GameEvent::PlayerHit { lives: 0 },
                GameEvent::RunOver {
                    score: 0,
                    waves_completed: 2
                },
            ]
        );
    }

    #[test]
    fn test_pickup_ignored_at_full_lives() {
        let mut ctx = arena();
        let pickup =
            world_setup::spawn_pickup(&mut ctx.store, &ctx.tuning, Position::new(240.0, 750.0));
        run(&mut ctx);
        assert!(ctx.store.is_active(pickup));
        assert_eq!(ctx.player.lives, 3);

        ctx.player.lives = 2;
        ctx.wave.pickup_scheduled = true;
        run(&mut ctx);
        assert!(!ctx.store.is_active(pickup));
        assert_eq!(ctx.player.lives, 3);
        assert!(!ctx.wave.pickup_scheduled);
        assert_eq!(ctx.events, vec![GameEvent::PickupCollected { lives: 3 }]);
    }

    #[test]
    fn test_inactive_player_skips_player_pairs() {
        let mut ctx = arena();
        let player = ctx.player.entity.unwrap();
        ctx.store.set_active(player, false);
        shot_at(&mut ctx, 240.0, 750.0, Owner::Enemy);
        run(&mut ctx);
        assert_eq!(ctx.player.lives, 3);
    }
}
