//! Simulation constants and default tuning parameters.
//!
//! These are the defaults for [`crate::tuning::Tuning`]. Systems read the
//! tuning values, never these constants directly.

/// Nominal tick rate of the reference runner (Hz).
pub const TICK_RATE: u32 = 60;

// --- Playfield ---

/// Playfield width in world units.
pub const WORLD_WIDTH: f64 = 480.0;

/// Playfield height in world units.
pub const WORLD_HEIGHT: f64 = 800.0;

/// Player spawn position.
pub const PLAYER_START_X: f64 = 240.0;
pub const PLAYER_START_Y: f64 = 750.0;

// --- Player ---

/// Lives at the start of a run, also the maximum.
pub const MAX_LIVES: u32 = 3;

/// Player top speed (units per second).
pub const PLAYER_SPEED: f64 = 320.0;

/// Minimum time between player shots (ms).
pub const PLAYER_SHOT_COOLDOWN_MS: u64 = 200;

/// Invulnerability window after a hit (ms).
pub const INVULNERABILITY_MS: u64 = 1000;

/// Vertical offset of a fresh player projectile from the ship center.
pub const PLAYER_MUZZLE_OFFSET: f64 = 20.0;

// --- Enemies ---

/// Vertical speed of Straight and Diagonal enemies (units per tick).
pub const ENEMY_SPEED: f64 = 0.5;

/// Vertical speed of Sinusoidal enemies (units per tick).
pub const ENEMY_SINUSOIDAL_SPEED: f64 = 0.25;

/// Horizontal swing of Sinusoidal enemies (units).
pub const ENEMY_SINUSOIDAL_AMPLITUDE: f64 = 50.0;

/// Phase increment per tick for Sinusoidal enemies (radians).
pub const ENEMY_SINUSOIDAL_FREQUENCY: f64 = 0.01;

/// Diagonal enemies bounce when x crosses this inset from either side.
pub const DIAGONAL_BOUNCE_INSET: f64 = 20.0;

/// Enemy spawn height (above the visible playfield).
pub const ENEMY_SPAWN_Y: f64 = -50.0;

/// Horizontal spawn range for single-enemy patterns.
pub const ENEMY_SPAWN_MIN_X: f64 = 120.0;
pub const ENEMY_SPAWN_MAX_X: f64 = 360.0;

/// Horizontal spawn position of Diagonal formations.
pub const DIAGONAL_SPAWN_X: f64 = 240.0;

/// Ships per Diagonal formation.
pub const DIAGONAL_FORMATION_SIZE: u32 = 5;

/// Delay between ships of a Diagonal formation (ms).
pub const DIAGONAL_STAGGER_MS: u64 = 200;

/// Interval between enemy spawn events (ms).
pub const ENEMY_SPAWN_INTERVAL_MS: u64 = 3000;

/// Minimum time between shots of one enemy (ms).
pub const ENEMY_SHOT_COOLDOWN_MS: u64 = 2000;

/// Vertical offset of a fresh enemy projectile from the ship center.
pub const ENEMY_MUZZLE_OFFSET: f64 = 20.0;

/// Enemies are removed once y exceeds this.
pub const ENEMY_REMOVE_Y: f64 = 850.0;

// --- Projectiles ---

/// Player projectile speed (units per tick, upward).
pub const PLAYER_PROJECTILE_SPEED: f64 = 8.0;

/// Enemy projectile speed (units per tick, downward). Six times slower.
pub const ENEMY_PROJECTILE_SPEED: f64 = PLAYER_PROJECTILE_SPEED / 6.0;

/// Player projectiles are removed once y drops below this.
pub const PLAYER_PROJECTILE_REMOVE_Y: f64 = -16.0;

/// Enemy projectiles are removed once y exceeds this.
pub const ENEMY_PROJECTILE_REMOVE_Y: f64 = 816.0;

// --- Bounding boxes (full sizes) ---

pub const PLAYER_SIZE: (f64, f64) = (32.0, 32.0);
pub const ENEMY_SIZE: (f64, f64) = (32.0, 32.0);
pub const PROJECTILE_SIZE: (f64, f64) = (6.0, 16.0);
pub const PICKUP_SIZE: (f64, f64) = (24.0, 24.0);

// --- Pickups ---

/// Earliest and latest pickup spawn delay into a wave (ms).
pub const PICKUP_DELAY_MIN_MS: u64 = 2000;
pub const PICKUP_DELAY_MAX_MS: u64 = 8000;

/// Pickup lifetime if not collected (ms).
pub const PICKUP_LIFETIME_MS: u64 = 5000;

/// Pickup spawn area.
pub const PICKUP_MIN_X: f64 = 40.0;
pub const PICKUP_MAX_X: f64 = 440.0;
pub const PICKUP_MIN_Y: f64 = 100.0;
pub const PICKUP_MAX_Y: f64 = 700.0;

// --- Waves ---

/// Duration of the first wave (ms).
pub const FIRST_WAVE_DURATION_MS: u64 = 10_000;

/// Duration added after each completed wave (ms).
pub const WAVE_DURATION_STEP_MS: u64 = 5_000;

/// Announcement delay before a wave goes active (ms).
pub const INTERMISSION_MS: u64 = 3_000;

/// Bonus display delay between wave completion and the next intermission (ms).
pub const BONUS_DELAY_MS: u64 = 2_000;

// --- Scoring ---

/// Score for destroying an enemy with a projectile.
pub const ENEMY_KILL_SCORE: u64 = 50;

/// Score for completing a wave.
pub const WAVE_BONUS_SCORE: u64 = 500;

// --- Limits ---

/// Upper bound for any tuned timer (ms). One hour.
pub const MAX_TIMER_MS: u64 = 3_600_000;
