//! Data-driven gameplay tuning.
//!
//! Every gameplay constant the systems read lives here, with defaults taken
//! from [`crate::constants`]. Tuning can be loaded from JSON; missing fields
//! keep their defaults.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::Extents;

/// Errors raised while loading or validating a tuning file.
#[derive(Debug)]
pub enum ConfigError {
    /// The tuning file could not be read.
    Io(std::io::Error),
    /// The tuning file is not valid JSON for [`Tuning`].
    Parse(serde_json::Error),
    /// A field holds a value the simulation cannot run with.
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read tuning file: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse tuning file: {e}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "invalid tuning value for `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Gameplay tuning. Speeds marked "per tick" are applied once per simulated
/// tick regardless of its length; everything else is in milliseconds or
/// units per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world_width: f64,
    pub world_height: f64,
    pub player_start_x: f64,
    pub player_start_y: f64,

    pub max_lives: u32,
    pub player_speed: f64,
    pub player_shot_cooldown_ms: u64,
    pub invulnerability_ms: u64,
    pub player_muzzle_offset: f64,

    /// Per tick.
    pub enemy_speed: f64,
    /// Per tick.
    pub enemy_sinusoidal_speed: f64,
    pub enemy_sinusoidal_amplitude: f64,
    /// Radians per tick.
    pub enemy_sinusoidal_frequency: f64,
    pub diagonal_bounce_inset: f64,
    pub enemy_spawn_y: f64,
    pub enemy_spawn_min_x: f64,
    pub enemy_spawn_max_x: f64,
    pub diagonal_spawn_x: f64,
    pub diagonal_formation_size: u32,
    pub diagonal_stagger_ms: u64,
    pub enemy_spawn_interval_ms: u64,
    pub enemy_shot_cooldown_ms: u64,
    pub enemy_muzzle_offset: f64,
    pub enemy_remove_y: f64,

    /// Per tick.
    pub player_projectile_speed: f64,
    /// Per tick.
    pub enemy_projectile_speed: f64,
    pub player_projectile_remove_y: f64,
    pub enemy_projectile_remove_y: f64,

    pub player_bounds: Extents,
    pub enemy_bounds: Extents,
    pub projectile_bounds: Extents,
    pub pickup_bounds: Extents,

    pub pickup_delay_min_ms: u64,
    pub pickup_delay_max_ms: u64,
    pub pickup_lifetime_ms: u64,
    pub pickup_min_x: f64,
    pub pickup_max_x: f64,
    pub pickup_min_y: f64,
    pub pickup_max_y: f64,

    pub first_wave_duration_ms: u64,
    pub wave_duration_step_ms: u64,
    pub intermission_ms: u64,
    pub bonus_delay_ms: u64,

    pub enemy_kill_score: u64,
    pub wave_bonus_score: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            player_start_x: PLAYER_START_X,
            player_start_y: PLAYER_START_Y,

            max_lives: MAX_LIVES,
            player_speed: PLAYER_SPEED,
            player_shot_cooldown_ms: PLAYER_SHOT_COOLDOWN_MS,
            invulnerability_ms: INVULNERABILITY_MS,
            player_muzzle_offset: PLAYER_MUZZLE_OFFSET,

            enemy_speed: ENEMY_SPEED,
            enemy_sinusoidal_speed: ENEMY_SINUSOIDAL_SPEED,
            enemy_sinusoidal_amplitude: ENEMY_SINUSOIDAL_AMPLITUDE,
            enemy_sinusoidal_frequency: ENEMY_SINUSOIDAL_FREQUENCY,
            diagonal_bounce_inset: DIAGONAL_BOUNCE_INSET,
            enemy_spawn_y: ENEMY_SPAWN_Y,
            enemy_spawn_min_x: ENEMY_SPAWN_MIN_X,
            enemy_spawn_max_x: ENEMY_SPAWN_MAX_X,
            diagonal_spawn_x: DIAGONAL_SPAWN_X,
            diagonal_formation_size: DIAGONAL_FORMATION_SIZE,
            diagonal_stagger_ms: DIAGONAL_STAGGER_MS,
            enemy_spawn_interval_ms: ENEMY_SPAWN_INTERVAL_MS,
            enemy_shot_cooldown_ms: ENEMY_SHOT_COOLDOWN_MS,
            enemy_muzzle_offset: ENEMY_MUZZLE_OFFSET,
            enemy_remove_y: ENEMY_REMOVE_Y,

            player_projectile_speed: PLAYER_PROJECTILE_SPEED,
            enemy_projectile_speed: ENEMY_PROJECTILE_SPEED,
            player_projectile_remove_y: PLAYER_PROJECTILE_REMOVE_Y,
            enemy_projectile_remove_y: ENEMY_PROJECTILE_REMOVE_Y,

            player_bounds: Extents::from_size(PLAYER_SIZE.0, PLAYER_SIZE.1),
            enemy_bounds: Extents::from_size(ENEMY_SIZE.0, ENEMY_SIZE.1),
            projectile_bounds: Extents::from_size(PROJECTILE_SIZE.0, PROJECTILE_SIZE.1),
            pickup_bounds: Extents::from_size(PICKUP_SIZE.0, PICKUP_SIZE.1),

            pickup_delay_min_ms: PICKUP_DELAY_MIN_MS,
            pickup_delay_max_ms: PICKUP_DELAY_MAX_MS,
            pickup_lifetime_ms: PICKUP_LIFETIME_MS,
            pickup_min_x: PICKUP_MIN_X,
            pickup_max_x: PICKUP_MAX_X,
            pickup_min_y: PICKUP_MIN_Y,
            pickup_max_y: PICKUP_MAX_Y,

            first_wave_duration_ms: FIRST_WAVE_DURATION_MS,
            wave_duration_step_ms: WAVE_DURATION_STEP_MS,
            intermission_ms: INTERMISSION_MS,
            bonus_delay_ms: BONUS_DELAY_MS,

            enemy_kill_score: ENEMY_KILL_SCORE,
            wave_bonus_score: WAVE_BONUS_SCORE,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }

        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("player_speed", self.player_speed)?;
        positive("enemy_speed", self.enemy_speed)?;
        positive("enemy_sinusoidal_speed", self.enemy_sinusoidal_speed)?;
        positive("player_projectile_speed", self.player_projectile_speed)?;
        positive("enemy_projectile_speed", self.enemy_projectile_speed)?;

        if self.max_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "max_lives",
                reason: "must be at least 1".into(),
            });
        }
        if self.first_wave_duration_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "first_wave_duration_ms",
                reason: "must be non-zero".into(),
            });
        }
        if self.enemy_spawn_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "enemy_spawn_interval_ms",
                reason: "must be non-zero".into(),
            });
        }
        if self.pickup_delay_min_ms > self.pickup_delay_max_ms {
            return Err(ConfigError::Invalid {
                field: "pickup_delay_min_ms",
                reason: format!(
                    "must not exceed pickup_delay_max_ms ({})",
                    self.pickup_delay_max_ms
                ),
            });
        }
        if self.enemy_spawn_min_x > self.enemy_spawn_max_x {
            return Err(ConfigError::Invalid {
                field: "enemy_spawn_min_x",
                reason: "must not exceed enemy_spawn_max_x".into(),
            });
        }
        if self.pickup_min_x > self.pickup_max_x {
            return Err(ConfigError::Invalid {
                field: "pickup_min_x",
                reason: "must not exceed pickup_max_x".into(),
            });
        }
        if self.pickup_min_y > self.pickup_max_y {
            return Err(ConfigError::Invalid {
                field: "pickup_min_y",
                reason: "must not exceed pickup_max_y".into(),
            });
        }

        for (field, bounds) in [
            ("player_bounds", self.player_bounds),
            ("enemy_bounds", self.enemy_bounds),
            ("projectile_bounds", self.projectile_bounds),
            ("pickup_bounds", self.pickup_bounds),
        ] {
            self.check_bounds(field, bounds)?;
        }

        for (field, value) in [
            ("player_shot_cooldown_ms", self.player_shot_cooldown_ms),
            ("invulnerability_ms", self.invulnerability_ms),
            ("diagonal_stagger_ms", self.diagonal_stagger_ms),
            ("enemy_spawn_interval_ms", self.enemy_spawn_interval_ms),
            ("enemy_shot_cooldown_ms", self.enemy_shot_cooldown_ms),
            ("pickup_delay_max_ms", self.pickup_delay_max_ms),
            ("pickup_lifetime_ms", self.pickup_lifetime_ms),
            ("first_wave_duration_ms", self.first_wave_duration_ms),
            ("wave_duration_step_ms", self.wave_duration_step_ms),
            ("intermission_ms", self.intermission_ms),
            ("bonus_delay_ms", self.bonus_delay_ms),
        ] {
            if value > MAX_TIMER_MS {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must not exceed {MAX_TIMER_MS} ms, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Extents must be finite, non-negative and fit inside the playfield.
    fn check_bounds(&self, field: &'static str, bounds: Extents) -> Result<(), ConfigError> {
        let (w, h) = (bounds.half_w, bounds.half_h);
        if !(w.is_finite() && h.is_finite() && w >= 0.0 && h >= 0.0) {
            return Err(ConfigError::Invalid {
                field,
                reason: format!("half extents must be finite and non-negative, got {w} x {h}"),
            });
        }
        if w * 2.0 > self.world_width || h * 2.0 > self.world_height {
            return Err(ConfigError::Invalid {
                field,
                reason: format!(
                    "size {} x {} does not fit the {} x {} playfield",
                    w * 2.0,
                    h * 2.0,
                    self.world_width,
                    self.world_height
                ),
            });
        }
        Ok(())
    }
}
