//! Headless runner: load a level, drop the ball, log the run.
//!
//! Usage: `chalkline [level.json]` — with no argument the built-in classic
//! level is used. Log output is controlled through `RUST_LOG`.

use std::process::ExitCode;

use chalkline::consts::TICK_MS;
use chalkline::sim::{GameState, Level, tick};

/// Give up on a run that has not reached the goal after two minutes of
/// simulated time.
const MAX_RUN_TICKS: u64 = 2 * 60 * 1000 / TICK_MS;

fn load_level(path: &str) -> Result<Level, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

fn main() -> ExitCode {
    env_logger::init();

    let level = match std::env::args().nth(1) {
        Some(path) => match load_level(&path) {
            Ok(level) => {
                log::info!("loaded level from {path} ({} segments)", level.segments.len());
                level
            }
            Err(e) => {
                log::error!("failed to load level {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Level::classic(),
    };

    let mut state = GameState::new(level);
    while !state.goal && state.time_ticks < MAX_RUN_TICKS {
        tick(&mut state);
    }

    if state.goal {
        log::info!(
            "goal reached in {} ms, ball at ({:.2}, {:.2})",
            state.time_ms(),
            state.ball.pos.x,
            state.ball.pos.y
        );
    } else {
        log::warn!(
            "no goal within {} ms, ball at ({:.2}, {:.2})",
            state.time_ms(),
            state.ball.pos.x,
            state.ball.pos.y
        );
    }

    ExitCode::SUCCESS
}
