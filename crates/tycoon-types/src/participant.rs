//! Participants: the players sitting at the table.

use serde::{Deserialize, Serialize};

use crate::ids::{ParticipantIndex, PositionIndex};

/// Immutable identity of a participant, fixed at game setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    /// Display name.
    pub name: String,
    /// Seat number in the roster.
    pub index: ParticipantIndex,
}

/// Mutable status of a participant.
///
/// Only the bank's transaction functions write to these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStatus {
    /// Money on hand.
    pub balance: i64,
    /// Current board position.
    pub position: PositionIndex,
    /// Whether the participant is serving time and must roll to escape.
    pub incarcerated: bool,
    /// Whether the participant still takes turns.
    pub active: bool,
}

/// A participant record: identity plus status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Identity (never changes).
    pub info: ParticipantInfo,
    /// Status (changed by transactions).
    pub status: ParticipantStatus,
}

impl Participant {
    /// Create an active, free participant at `position` holding `balance`.
    pub const fn new(
        index: ParticipantIndex,
        name: String,
        balance: i64,
        position: PositionIndex,
    ) -> Self {
        Self {
            info: ParticipantInfo { name, index },
            status: ParticipantStatus {
                balance,
                position,
                incarcerated: false,
                active: true,
            },
        }
    }

    /// Seat number shortcut.
    pub const fn index(&self) -> ParticipantIndex {
        self.info.index
    }

    /// Display name shortcut.
    pub fn name(&self) -> &str {
        &self.info.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_participant_is_active_and_free() {
        let p = Participant::new(
            ParticipantIndex::new(1),
            String::from("Beta"),
            200,
            PositionIndex::new(0),
        );
        assert!(p.status.active);
        assert!(!p.status.incarcerated);
        assert_eq!(p.status.balance, 200);
        assert_eq!(p.name(), "Beta");
        assert_eq!(p.index(), ParticipantIndex::new(1));
    }
}
