//! Combat rules: damage, scoring and invulnerability timing.
//!
//! Stateless functions over `PlayerState`. The collision resolver and the
//! wave director call these; they never touch the entity store.

use wavestrike_core::tuning::Tuning;
use wavestrike_core::types::Millis;

use crate::session::PlayerState;

/// Result of a hit on the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Player was invulnerable (or already dead); nothing changed.
    Ignored,
    /// A life was lost and the invulnerability window started.
    Damaged,
    /// The last life was lost. Terminal for the run.
    Killed,
}

/// Whether the player is inside an invulnerability window at `now`.
pub fn is_invulnerable(player: &PlayerState, now: Millis) -> bool {
    player.invulnerable && now < player.invulnerable_until
}

/// Clear the invulnerability flag once its window has elapsed.
pub fn refresh_invulnerability(player: &mut PlayerState, now: Millis) {
    if player.invulnerable && now >= player.invulnerable_until {
        player.invulnerable = false;
    }
}

/// Apply one hit to the player.
pub fn apply_player_hit(player: &mut PlayerState, now: Millis, tuning: &Tuning) -> HitOutcome {
    if player.lives == 0 || is_invulnerable(player, now) {
        return HitOutcome::Ignored;
    }

    player.lives -= 1;
    player.invulnerable = true;
    player.invulnerable_until = now.saturating_add(tuning.invulnerability_ms);

    if player.lives == 0 {
        HitOutcome::Killed
    } else {
        HitOutcome::Damaged
    }
}

/// Score an enemy destroyed by player fire. Returns the points awarded.
pub fn award_enemy_kill(player: &mut PlayerState, tuning: &Tuning) -> u64 {
    player.score = player.score.saturating_add(tuning.enemy_kill_score);
    tuning.enemy_kill_score
}

/// Score a completed wave. Returns the points awarded.
pub fn award_wave_bonus(player: &mut PlayerState, tuning: &Tuning) -> u64 {
    player.score = player.score.saturating_add(tuning.wave_bonus_score);
    tuning.wave_bonus_score
}

/// Restore one life from a pickup. False (and no change) at full lives.
pub fn collect_pickup(player: &mut PlayerState, tuning: &Tuning) -> bool {
    if player.lives == 0 || player.lives >= tuning.max_lives {
        return false;
    }
    player.lives += 1;
    true
}
