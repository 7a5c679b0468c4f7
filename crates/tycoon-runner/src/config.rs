//! Runner configuration loaded from environment variables.

use std::path::PathBuf;

use crate::error::RunnerError;

/// Complete runner configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// YAML game configuration. Defaults apply when absent.
    pub config_path: Option<PathBuf>,
    /// Seed for reproducible dice. Entropy-seeded when absent.
    pub dice_seed: Option<u64>,
    /// Seats played at the console. Every other seat is automated.
    pub human_seats: Vec<usize>,
    /// History entries kept per automated seat.
    pub history_capacity: usize,
    /// Mirror automated seats' narration to stdout.
    pub echo: bool,
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `TYCOON_CONFIG` -- path to the game YAML
    /// - `TYCOON_DICE_SEED` -- u64 seed for the dice
    /// - `TYCOON_HUMAN_SEATS` -- comma separated seat numbers (default none)
    /// - `TYCOON_HISTORY_CAPACITY` -- per-agent history size (default 256)
    /// - `TYCOON_ECHO` -- echo automated seats (default `true`)
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RunnerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = lookup("TYCOON_CONFIG")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let dice_seed = lookup("TYCOON_DICE_SEED")
            .map(|seed| {
                seed.trim()
                    .parse::<u64>()
                    .map_err(|e| RunnerError::Config(format!("invalid TYCOON_DICE_SEED: {e}")))
            })
            .transpose()?;

        let human_seats = lookup("TYCOON_HUMAN_SEATS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|seat| !seat.is_empty())
            .map(|seat| {
                seat.parse::<usize>()
                    .map_err(|e| RunnerError::Config(format!("invalid TYCOON_HUMAN_SEATS: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let history_capacity: usize = lookup("TYCOON_HISTORY_CAPACITY")
            .unwrap_or_else(|| "256".to_owned())
            .trim()
            .parse()
            .map_err(|e| RunnerError::Config(format!("invalid TYCOON_HISTORY_CAPACITY: {e}")))?;
        if history_capacity == 0 {
            return Err(RunnerError::Config(String::from(
                "TYCOON_HISTORY_CAPACITY must be at least 1",
            )));
        }

        let echo: bool = lookup("TYCOON_ECHO")
            .unwrap_or_else(|| "true".to_owned())
            .trim()
            .parse()
            .map_err(|e| RunnerError::Config(format!("invalid TYCOON_ECHO: {e}")))?;

        Ok(Self {
            config_path,
            dice_seed,
            human_seats,
            history_capacity,
            echo,
        })
    }
}
