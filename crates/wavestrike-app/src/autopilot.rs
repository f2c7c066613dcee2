//! Autopilot: a stand-in for input polling in the headless runner.
//!
//! Computes the next tick's intent from the latest snapshot: dodge enemy
//! fire directly overhead, otherwise chase a pickup when hurt, otherwise
//! line up under the lowest enemy. Always holds fire.

use wavestrike_core::commands::PlayerIntent;
use wavestrike_core::enums::{EntityKind, Owner, WavePhase};
use wavestrike_core::state::{EntityView, GameStateSnapshot};
use wavestrike_core::tuning::Tuning;

/// Horizontal distance treated as "lined up".
const DEADZONE: f64 = 4.0;
/// How far above the player an incoming shot counts as a threat.
const DANGER_RANGE: f64 = 140.0;

pub fn steer(snapshot: &GameStateSnapshot, tuning: &Tuning) -> PlayerIntent {
    if snapshot.run_over || snapshot.paused || snapshot.wave.phase != WavePhase::Active {
        return PlayerIntent::default();
    }
    let Some(player) = find(snapshot, EntityKind::Player) else {
        return PlayerIntent::default();
    };
    let (px, py) = (player.position.x, player.position.y);

    if let Some(shot) = incoming_shot(snapshot, player) {
        let away = if shot.position.x > px { -1 } else { 1 };
        return PlayerIntent::new(away, 0, true);
    }

    if snapshot.lives < tuning.max_lives {
        if let Some(pickup) = find(snapshot, EntityKind::Pickup) {
            return PlayerIntent::new(
                axis(pickup.position.x - px),
                axis(pickup.position.y - py),
                true,
            );
        }
    }

    let target_x = snapshot
        .entities
        .iter()
        .filter(|e| e.kind == EntityKind::Enemy && e.position.y < py)
        .max_by(|a, b| a.position.y.total_cmp(&b.position.y))
        .map_or(tuning.player_start_x, |e| e.position.x);

    PlayerIntent::new(
        axis(target_x - px),
        axis(tuning.player_start_y - py),
        true,
    )
}

fn find(snapshot: &GameStateSnapshot, kind: EntityKind) -> Option<&EntityView> {
    snapshot.entities.iter().find(|e| e.kind == kind)
}

fn incoming_shot<'a>(snapshot: &'a GameStateSnapshot, player: &EntityView) -> Option<&'a EntityView> {
    let lane = player.extents.half_w * 1.5;
    snapshot.entities.iter().find(|e| {
        e.owner == Some(Owner::Enemy)
            && (e.position.x - player.position.x).abs() < lane
            && (0.0..DANGER_RANGE).contains(&(player.position.y - e.position.y))
    })
}

fn axis(delta: f64) -> i8 {
    if delta > DEADZONE {
        1
    } else if delta < -DEADZONE {
        -1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wavestrike_core::types::{Extents, Position};

    fn view(kind: EntityKind, x: f64, y: f64, owner: Option<Owner>) -> EntityView {
        EntityView {
            id: 1,
            kind,
            position: Position::new(x, y),
            extents: Extents::new(16.0, 16.0),
            owner,
            pattern: None,
            blinking: false,
        }
    }

    fn active(entities: Vec<EntityView>, lives: u32) -> GameStateSnapshot {
        let mut snap = GameStateSnapshot {
            entities,
            lives,
            ..Default::default()
        };
        snap.wave.phase = WavePhase::Active;
        snap
    }

    #[test]
    fn test_idle_outside_active_wave() {
        let snap = GameStateSnapshot::default();
        assert_eq!(steer(&snap, &Tuning::default()), PlayerIntent::default());
    }

    #[test]
    fn test_lines_up_under_lowest_enemy() {
        let snap = active(
            vec![
                view(EntityKind::Player, 240.0, 750.0, None),
                view(EntityKind::Enemy, 100.0, 50.0, None),
                view(EntityKind::Enemy, 300.0, 200.0, None),
            ],
            3,
        );
        let intent = steer(&snap, &Tuning::default());
        assert_eq!(intent, PlayerIntent::new(1, 0, true));
    }

    #[test]
    fn test_dodges_shot_overhead() {
        let snap = active(
            vec![
                view(EntityKind::Player, 240.0, 750.0, None),
                view(EntityKind::Projectile, 245.0, 680.0, Some(Owner::Enemy)),
                view(EntityKind::Enemy, 300.0, 200.0, None),
            ],
            3,
        );
        assert_eq!(steer(&snap, &Tuning::default()).move_x, -1);
    }

    #[test]
    fn test_chases_pickup_when_hurt() {
        let entities = vec![
            view(EntityKind::Player, 240.0, 750.0, None),
            view(EntityKind::Pickup, 100.0, 400.0, None),
        ];
        let hurt = steer(&active(entities.clone(), 2), &Tuning::default());
        assert_eq!(hurt, PlayerIntent::new(-1, -1, true));

        let healthy = steer(&active(entities, 3), &Tuning::default());
        assert_eq!(healthy, PlayerIntent::new(0, 0, true));
    }
}
