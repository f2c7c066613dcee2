use std::process::ExitCode;

use wavestrike_app::config;
use wavestrike_app::game_loop::LoopSettings;
use wavestrike_app::state::AppState;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() -> ExitCode {
    init_tracing();

    let sim = config::sim_config();
    let hz = config::tick_hz();
    let tick_interval = config::tick_interval(hz);
    let max_ticks = config::run_duration()
        .map(|limit| (limit.as_nanos() / tick_interval.as_nanos().max(1)) as u64);
    tracing::info!(seed = sim.seed, hz, ?max_ticks, "Starting WAVESTRIKE");

    let state = AppState::new();
    let settings = LoopSettings {
        sim,
        tick_interval,
        max_ticks,
        paced: true,
    };
    if let Err(error) = state.start(settings) {
        tracing::error!(%error, "Could not start simulation");
        return ExitCode::FAILURE;
    }

    match state.wait() {
        Ok(summary) => {
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{json}"),
                Err(error) => tracing::error!(%error, "Could not serialize run summary"),
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "Simulation ended abnormally");
            ExitCode::FAILURE
        }
    }
}
