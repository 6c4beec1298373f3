//! Fairway headless demo: plays a short round with a scripted golfer on a
//! Rapier course and logs every shot.
//!
//! Run with: `cargo run -p fairway-game -- --holes 2 --log-level debug`

mod course;
mod game;
mod game_loop;
mod hole;
mod presentation;
mod script;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use fairway_config::{CliArgs, Config, ConfigError, default_config_dir};
use tracing::{error, info};

use crate::game::{Game, RoundSummary};
use crate::game_loop::GameLoop;

/// Frame time fed to the loop. Deliberately not a multiple of the fixed step
/// so the accumulator carries remainders the way a windowed build would.
const FRAME_SECONDS: f64 = 1.0 / 50.0;

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (config, log_dir) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            fairway_log::init_logging(None, false, None);
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    fairway_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    info!("Fairway headless round");
    info!(
        "Holes: {} | Fixed rate: {} Hz | Time limit: {:.0}s | Max force: {:.0}",
        config.sim.holes,
        config.sim.effective_hz(),
        config.sim.max_sim_seconds,
        config.swing.max_force
    );

    let summary = run(&config);
    report(&summary);
    ExitCode::SUCCESS
}

/// Loads `config.ron` (creating it on first run) and applies CLI overrides.
fn load_config(args: &CliArgs) -> Result<(Config, PathBuf), RunError> {
    let config_dir = match args.config.clone() {
        Some(dir) => dir,
        None => default_config_dir()?,
    };
    let mut config = Config::load_or_create(&config_dir)?;
    config.apply_cli_overrides(args);
    Ok((config, config_dir.join("logs")))
}

fn run(config: &Config) -> RoundSummary {
    let mut game = Game::new(config);
    let mut game_loop = GameLoop::new(config.sim.effective_hz());

    while !game.is_finished() {
        game_loop.tick(FRAME_SECONDS, &mut game);
    }

    info!(
        frames = game_loop.frame_count(),
        steps = game_loop.update_count(),
        sim_time = game_loop.total_sim_time(),
        "loop stopped"
    );
    game.summary()
}

fn report(summary: &RoundSummary) {
    for card in &summary.cards {
        let result = if card.holed { "holed" } else { "conceded" };
        info!("Hole {}: {} strokes ({result})", card.number, card.strokes);
    }
    let total: u32 = summary.cards.iter().map(|c| c.strokes).sum();
    info!(
        "Round {:?} after {:.1}s: {} strokes, {} penalties",
        summary.end, summary.sim_seconds, total, summary.penalties
    );
    info!(
        "Swings: {} | Sound cues: {} | Camera resets: {}",
        summary.swings, summary.cues_played, summary.camera_resets
    );
}
