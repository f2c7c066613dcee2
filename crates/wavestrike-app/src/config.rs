use std::{
    env,
    path::{Path, PathBuf},
    time::Duration,
};

use wavestrike_core::constants::TICK_RATE;
use wavestrike_core::tuning::Tuning;
use wavestrike_sim::engine::SimConfig;

// Runner settings (not gameplay tuning).

pub fn seed() -> u64 {
    env::var("WAVESTRIKE_SEED")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(42)
}

pub fn tuning_path() -> Option<PathBuf> {
    env::var_os("WAVESTRIKE_TUNING").map(PathBuf::from)
}

pub fn tick_hz() -> u32 {
    env::var("WAVESTRIKE_TICK_HZ")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|hz| *hz > 0)
        .unwrap_or(TICK_RATE)
}

/// Wall-clock run limit. `WAVESTRIKE_RUN_SECS=0` runs until the run is over.
pub fn run_duration() -> Option<Duration> {
    let secs = env::var("WAVESTRIKE_RUN_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(120);
    (secs > 0).then(|| Duration::from_secs(secs))
}

pub fn tick_interval(hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(hz.max(1)))
}

/// Load tuning from `path`, falling back to defaults on any error.
pub fn load_tuning(path: Option<&Path>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match Tuning::load(path) {
        Ok(tuning) => {
            tracing::info!(path = %path.display(), "Loaded tuning");
            tuning
        }
        Err(error) => {
            tracing::error!(path = %path.display(), %error, "Invalid tuning file, using defaults");
            Tuning::default()
        }
    }
}

pub fn sim_config() -> SimConfig {
    SimConfig {
        seed: seed(),
        tuning: load_tuning(tuning_path().as_deref()),
    }
}
