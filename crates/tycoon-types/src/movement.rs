//! Dice rolls and movement sessions.
//!
//! A [`MovementSession`] is created when a pre-move roll completes, advanced
//! one step at a time while the participant walks, and discarded once every
//! step has been consumed.

use serde::{Deserialize, Serialize};

use crate::ids::ParticipantIndex;

/// The outcome of rolling two six-sided dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// First die, in `1..=6`.
    pub first: u8,
    /// Second die, in `1..=6`.
    pub second: u8,
}

impl DiceRoll {
    /// Build a roll from two die faces.
    pub const fn new(first: u8, second: u8) -> Self {
        Self { first, second }
    }

    /// Sum of both dice.
    pub fn total(self) -> u32 {
        u32::from(self.first).saturating_add(u32::from(self.second))
    }

    /// Whether both dice show the same face.
    pub const fn is_double(self) -> bool {
        self.first == self.second
    }
}

impl core::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}, {}", self.first, self.second)
    }
}

/// Fixed facts about a movement session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementInfo {
    /// Round in which the roll happened.
    pub round: u32,
    /// Participant who is moving.
    pub participant: ParticipantIndex,
    /// Total steps granted by the roll.
    pub total_steps: u32,
}

/// Progress through a movement session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementStatus {
    /// Steps consumed so far.
    pub steps_taken: u32,
}

/// A participant's pending walk across the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementSession {
    /// Fixed facts.
    pub info: MovementInfo,
    /// Progress.
    pub status: MovementStatus,
}

impl MovementSession {
    /// Start a session from a completed pre-move roll.
    pub fn from_roll(round: u32, participant: ParticipantIndex, roll: DiceRoll) -> Self {
        Self {
            info: MovementInfo {
                round,
                participant,
                total_steps: roll.total(),
            },
            status: MovementStatus::default(),
        }
    }

    /// Steps still to walk.
    pub const fn remaining(&self) -> u32 {
        self.info.total_steps.saturating_sub(self.status.steps_taken)
    }

    /// Whether every step has been consumed.
    pub const fn is_finished(&self) -> bool {
        self.status.steps_taken >= self.info.total_steps
    }

    /// Consume one step. Returns `false` once the session is already finished.
    pub const fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        self.status.steps_taken = self.status.steps_taken.saturating_add(1);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_detection() {
        assert!(DiceRoll::new(4, 4).is_double());
        assert!(!DiceRoll::new(3, 5).is_double());
        assert_eq!(DiceRoll::new(3, 5).total(), 8);
    }

    #[test]
    fn session_consumes_exactly_total_steps() {
        let mut session =
            MovementSession::from_roll(2, ParticipantIndex::new(0), DiceRoll::new(2, 1));
        assert_eq!(session.remaining(), 3);

        let mut walked = 0_u32;
        while session.step() {
            walked = walked.saturating_add(1);
        }

        assert_eq!(walked, 3);
        assert!(session.is_finished());
        assert_eq!(session.remaining(), 0);
        assert!(!session.step());
    }
}
