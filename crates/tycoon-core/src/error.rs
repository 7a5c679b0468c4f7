//! Error types for the turn engine.

use tycoon_bank::{BankError, JournalAnomaly};
use tycoon_textio::{ChannelError, MenuError};
use tycoon_types::{ParticipantIndex, PositionIndex};

/// Errors that can surface from a minigame or a turn.
///
/// Bank, menu, and channel failures are fatal for the interaction in
/// progress and are propagated unchanged to the caller of the turn.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A transaction refused to run or fact derivation failed.
    #[error(transparent)]
    Bank(#[from] BankError),

    /// Menu construction failed or the participant exhausted their retries.
    #[error(transparent)]
    Menu(#[from] MenuError),

    /// A participant's channel failed.
    #[error(transparent)]
    Channel(#[from] ChannelError),

    /// No participant sits at this index.
    #[error("unknown participant {0}")]
    UnknownParticipant(ParticipantIndex),

    /// The board has no position at this index.
    #[error("unknown position {0}")]
    UnknownPosition(PositionIndex),

    /// Two distinct participants were required but the same one was given.
    #[error("participant {0} cannot transact with itself")]
    SameParticipant(ParticipantIndex),

    /// The incarceration roll was started for a participant who is free.
    #[error("participant {0} is not incarcerated")]
    NotIncarcerated(ParticipantIndex),

    /// A menu action ran before the action it depends on.
    #[error("menu action {action} ran before {requires}")]
    OutOfOrder {
        /// The action that ran.
        action: &'static str,
        /// What had to happen first.
        requires: &'static str,
    },

    /// A scripted dice source ran out of rolls.
    #[error("no more scripted dice rolls")]
    DiceExhausted,

    /// The table was assembled from inconsistent parts.
    #[error("invalid table: {0}")]
    InvalidTable(String),

    /// Money appeared or vanished outside of recorded transactions.
    #[error("conservation check failed: {0}")]
    Conservation(JournalAnomaly),
}
