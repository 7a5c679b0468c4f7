//! Error types for the game runner.

use tycoon_core::{ConfigError, EngineError};

/// Errors that can stop the runner.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// An environment variable is malformed.
    #[error("config error: {0}")]
    Config(String),

    /// The game configuration file could not be loaded.
    #[error(transparent)]
    GameConfig(#[from] ConfigError),

    /// The engine failed in a way the round loop cannot recover from.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
