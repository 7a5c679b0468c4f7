//! Demo game runner for the Tycoon engine.
//!
//! Seats listed in `TYCOON_HUMAN_SEATS` are played at the console; every
//! other seat is played by the rule engine, which falls back to the console
//! when it meets a menu it has no rule for. Logs go to stderr so they never
//! interleave with narration on stdout.
//!
//! ```text
//! RunnerConfig (env) --> GameConfig (YAML) --> Table --> Game::run
//! ```

mod config;
mod error;
mod game;
mod rule_engine;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tycoon_core::{Dice, GameConfig, RandomDice, Table};

use crate::config::RunnerConfig;
use crate::game::{Game, seat_channels};

/// Application entry point.
///
/// Initializes logging, loads configuration, seats the participants, and
/// plays one game.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the game aborts.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("tycoon-runner starting");

    let config = RunnerConfig::from_env()?;
    let game_config = match &config.config_path {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };
    info!(
        participants = game_config.participants.len(),
        positions = game_config.board.positions.len(),
        human_seats = ?config.human_seats,
        dice_seed = ?config.dice_seed,
        max_rounds = game_config.rules.max_rounds,
        "configuration loaded"
    );

    let dice: Box<dyn Dice> = match config.dice_seed {
        Some(seed) => Box::new(RandomDice::new(StdRng::seed_from_u64(seed))),
        None => Box::new(RandomDice::new(rand::rng())),
    };
    let channels = seat_channels(
        &config,
        game_config.participants.iter().map(String::as_str),
    );
    let table = Table::from_config(&game_config, channels, dice)?;

    let mut game = Game::new(table, game_config.rules.max_rounds);
    match game.run() {
        Ok(report) => {
            game.table().verify_conservation()?;
            info!(
                rounds_played = report.rounds_played,
                standings = ?report.standings,
                "tycoon-runner finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "game aborted");
            Err(e.into())
        }
    }
}
