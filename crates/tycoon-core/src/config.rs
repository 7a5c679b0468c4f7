//! Game configuration loaded from YAML.
//!
//! Every section and field has a default, so an empty document (or no
//! document at all) yields a playable four-participant game on a twenty
//! position board:
//!
//! ```yaml
//! participants: [Alpha, Beta, Gamma, Delta]
//! economy:
//!   starting_balance: 200
//! board:
//!   positions:
//!     - { acquirable: false }
//!     - { acquirable: true, base_value: 15 }
//! rules:
//!   release_position: 0
//!   max_bad_input: 20
//!   max_rounds: 30
//! ```

use std::path::Path;

use serde::Deserialize;

use tycoon_textio::DEFAULT_MAX_BAD_INPUT;
use tycoon_types::{Participant, ParticipantIndex, Position, PositionIndex};

use crate::board::Board;
use crate::error::EngineError;
use crate::roster::Roster;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The document parsed but describes an unplayable game.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Participant names in seating order.
    #[serde(default = "default_participants")]
    pub participants: Vec<String>,

    /// Money settings.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Board layout.
    #[serde(default)]
    pub board: BoardConfig,

    /// Turn rules.
    #[serde(default)]
    pub rules: RulesConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            participants: default_participants(),
            economy: EconomyConfig::default(),
            board: BoardConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if the game it describes is unplayable.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] or [`ConfigError::Invalid`].
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the cross-field constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.participants.is_empty() {
            return Err(ConfigError::Invalid(String::from("no participants")));
        }
        if self.participants.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::Invalid(String::from("blank participant name")));
        }
        if self.economy.starting_balance < 0 {
            return Err(ConfigError::Invalid(String::from("negative starting balance")));
        }
        if self.board.positions.is_empty() {
            return Err(ConfigError::Invalid(String::from("board has no positions")));
        }
        if let Some((index, _)) = self
            .board
            .positions
            .iter()
            .enumerate()
            .find(|(_, p)| p.acquirable && p.base_value < 0)
        {
            return Err(ConfigError::Invalid(format!(
                "position {index} has a negative base value"
            )));
        }
        if self.rules.release_position >= self.board.positions.len() {
            return Err(ConfigError::Invalid(format!(
                "release position {} is off the board",
                self.rules.release_position
            )));
        }
        if self.rules.max_bad_input == 0 {
            return Err(ConfigError::Invalid(String::from("max_bad_input must be at least 1")));
        }
        Ok(())
    }

    /// Build the board described by `board.positions`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTable`] if there are no positions.
    pub fn build_board(&self) -> Result<Board, EngineError> {
        let positions = self
            .board
            .positions
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let index = PositionIndex::new(index);
                if p.acquirable {
                    Position::acquirable(index, p.base_value)
                } else {
                    Position::neutral(index)
                }
            })
            .collect();
        Board::new(positions)
    }

    /// Seat every configured participant at position 0 with the starting
    /// balance.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTable`] if there are no participants.
    pub fn build_roster(&self) -> Result<Roster, EngineError> {
        let participants = self
            .participants
            .iter()
            .enumerate()
            .map(|(index, name)| {
                Participant::new(
                    ParticipantIndex::new(index),
                    name.clone(),
                    self.economy.starting_balance,
                    PositionIndex::new(0),
                )
            })
            .collect();
        Roster::new(participants)
    }

    /// Where a released prisoner is placed.
    pub const fn release_position(&self) -> PositionIndex {
        PositionIndex::new(self.rules.release_position)
    }
}

/// Money settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EconomyConfig {
    /// Balance every participant starts with.
    #[serde(default = "default_starting_balance")]
    pub starting_balance: i64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_balance: default_starting_balance(),
        }
    }
}

/// Board layout, in position order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardConfig {
    /// One entry per position. Index in the list is the position index.
    #[serde(default = "default_positions")]
    pub positions: Vec<PositionConfig>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            positions: default_positions(),
        }
    }
}

/// One board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PositionConfig {
    /// Whether the position can be held.
    #[serde(default = "default_true")]
    pub acquirable: bool,

    /// Base value. Ignored for neutral positions.
    #[serde(default)]
    pub base_value: i64,
}

/// Turn rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RulesConfig {
    /// Position a prisoner is moved to on release.
    #[serde(default)]
    pub release_position: usize,

    /// Consecutive unrecognized menu responses tolerated.
    #[serde(default = "default_max_bad_input")]
    pub max_bad_input: u32,

    /// Upper bound on rounds played by the runner.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            release_position: 0,
            max_bad_input: default_max_bad_input(),
            max_rounds: default_max_rounds(),
        }
    }
}

/// Positions on the default board.
const DEFAULT_BOARD_SIZE: usize = 20;

fn default_participants() -> Vec<String> {
    ["Alpha", "Beta", "Gamma", "Delta"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_starting_balance() -> i64 {
    200
}

const fn default_true() -> bool {
    true
}

const fn default_max_bad_input() -> u32 {
    DEFAULT_MAX_BAD_INPUT
}

const fn default_max_rounds() -> u32 {
    30
}

/// Position 0 and every fifth position are neutral. The rest are worth
/// `15 + 5 * index`.
fn default_positions() -> Vec<PositionConfig> {
    let mut base_value: i64 = 10;
    (0..DEFAULT_BOARD_SIZE)
        .map(|index| {
            base_value = base_value.saturating_add(5);
            let acquirable = index.checked_rem(5) != Some(0);
            PositionConfig {
                acquirable,
                base_value: if acquirable { base_value } else { 0 },
            }
        })
        .collect()
}
