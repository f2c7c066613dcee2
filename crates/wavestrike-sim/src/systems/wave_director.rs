//! Wave director: the Intermission -> Active -> Bonus -> Intermission cycle.
//!
//! Phase changes that happen after a delay go through the scheduler; the
//! end of an active wave is detected here every tick.

use wavestrike_core::enums::{EntityKind, WavePhase};
use wavestrike_core::events::GameEvent;

use crate::context::SimContext;
use crate::scheduler::ScheduledAction;
use crate::systems::{combat, spawner};

/// Apply due wave transitions, then check the active wave's timer.
pub fn run(ctx: &mut SimContext, due: &[ScheduledAction]) {
    for action in due {
        match *action {
            ScheduledAction::EnterIntermission => enter_intermission(ctx),
            ScheduledAction::BeginWave { wave } => {
                if wave == ctx.wave.index && ctx.wave.phase == WavePhase::Intermission {
                    begin_wave(ctx);
                }
            }
            _ => {}
        }
    }

    if ctx.wave.phase == WavePhase::Active
        && ctx.now().saturating_sub(ctx.wave.started_at) >= ctx.wave.duration_ms
    {
        complete_wave(ctx);
    }
}

/// Clear the field, hide the player and announce the current wave.
pub fn enter_intermission(ctx: &mut SimContext) {
    clear_field(ctx);
    hide_player(ctx);

    let deadline = ctx.now().saturating_add(ctx.tuning.intermission_ms);
    ctx.wave.phase = WavePhase::Intermission;
    ctx.wave.phase_deadline = Some(deadline);
    ctx.scheduler.schedule(
        deadline,
        ScheduledAction::BeginWave {
            wave: ctx.wave.index,
        },
    );

    tracing::info!(
        wave = ctx.wave.index,
        duration_ms = ctx.wave.duration_ms,
        starts_at = deadline,
        "Wave announced"
    );
    ctx.emit(GameEvent::WaveAnnounced {
        index: ctx.wave.index,
    });
}

/// Make the current wave active.
pub fn begin_wave(ctx: &mut SimContext) {
    let now = ctx.now();
    ctx.wave.phase = WavePhase::Active;
    ctx.wave.started_at = now;
    ctx.wave.phase_deadline = None;
    ctx.wave.last_enemy_spawn = None;
    ctx.wave.pickup_scheduled = false;

    if let Some(player) = ctx.player.entity {
        ctx.store.set_active(player, true);
    }

    spawner::schedule_pickup(ctx);

    tracing::info!(wave = ctx.wave.index, at = now, "Wave started");
    ctx.emit(GameEvent::WaveStarted {
        index: ctx.wave.index,
    });
}

/// End the active wave: bonus, escalate, and schedule the next intermission.
pub fn complete_wave(ctx: &mut SimContext) {
    clear_field(ctx);
    hide_player(ctx);

    let completed = ctx.wave.index;
    let bonus = combat::award_wave_bonus(&mut ctx.player, &ctx.tuning);
    ctx.emit(GameEvent::WaveCompleted {
        index: completed,
        bonus,
    });

    ctx.wave.index += 1;
    ctx.wave.duration_ms = ctx.wave.duration_ms.saturating_add(ctx.tuning.wave_duration_step_ms);
    ctx.wave.phase = WavePhase::Bonus;

    let deadline = ctx.now().saturating_add(ctx.tuning.bonus_delay_ms);
    ctx.wave.phase_deadline = Some(deadline);
    ctx.scheduler.schedule(deadline, ScheduledAction::EnterIntermission);

    tracing::info!(
        wave = completed,
        bonus,
        score = ctx.player.score,
        next_duration_ms = ctx.wave.duration_ms,
        "Wave completed"
    );
}

/// Remove every enemy and projectile.
fn clear_field(ctx: &mut SimContext) {
    let enemies = ctx.store.clear_kind(EntityKind::Enemy);
    let projectiles = ctx.store.clear_kind(EntityKind::Projectile);
    if enemies + projectiles > 0 {
        tracing::debug!(enemies, projectiles, "Field cleared");
    }
}

fn hide_player(ctx: &mut SimContext) {
    if let Some(player) = ctx.player.entity {
        ctx.store.set_active(player, false);
    }
}
