//! The roster: participants in seating order.

use tracing::info;

use tycoon_types::{Participant, ParticipantIndex};

use crate::error::EngineError;

/// Owns every [`Participant`]. Participants are never added or removed
/// once a game starts; they are only marked inactive.
#[derive(Debug, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Wrap a list of participants.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTable`] if the list is empty or a
    /// participant's index does not match its seat.
    pub fn new(participants: Vec<Participant>) -> Result<Self, EngineError> {
        if participants.is_empty() {
            return Err(EngineError::InvalidTable(String::from("roster is empty")));
        }
        for (seat, participant) in participants.iter().enumerate() {
            if participant.index().get() != seat {
                return Err(EngineError::InvalidTable(format!(
                    "participant {} seated at {seat}",
                    participant.index()
                )));
            }
        }
        Ok(Self { participants })
    }

    /// Number of seats.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Always false; a roster has at least one participant.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// All participants in seating order.
    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    /// Look up a participant.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownParticipant`] for an empty seat.
    pub fn get(&self, index: ParticipantIndex) -> Result<&Participant, EngineError> {
        self.participants
            .get(index.get())
            .ok_or(EngineError::UnknownParticipant(index))
    }

    /// Look up a participant for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownParticipant`] for an empty seat.
    pub fn get_mut(&mut self, index: ParticipantIndex) -> Result<&mut Participant, EngineError> {
        self.participants
            .get_mut(index.get())
            .ok_or(EngineError::UnknownParticipant(index))
    }

    /// Borrow two distinct participants mutably at once, in argument order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SameParticipant`] if `a == b`, or
    /// [`EngineError::UnknownParticipant`] if either seat is empty.
    pub fn pair_mut(
        &mut self,
        a: ParticipantIndex,
        b: ParticipantIndex,
    ) -> Result<(&mut Participant, &mut Participant), EngineError> {
        if a == b {
            return Err(EngineError::SameParticipant(a));
        }
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let len = self.participants.len();
        if high.get() >= len {
            return Err(EngineError::UnknownParticipant(high));
        }

        let (head, tail) = self.participants.split_at_mut(high.get());
        let first = head
            .get_mut(low.get())
            .ok_or(EngineError::UnknownParticipant(low))?;
        let second = tail
            .first_mut()
            .ok_or(EngineError::UnknownParticipant(high))?;

        if a < b {
            Ok((first, second))
        } else {
            Ok((second, first))
        }
    }

    /// Participants still playing.
    pub fn active_count(&self) -> usize {
        self.participants.iter().filter(|p| p.status.active).count()
    }

    /// Take a participant out of the game. Their holdings stay on the board.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownParticipant`] for an empty seat.
    pub fn deactivate(&mut self, index: ParticipantIndex) -> Result<(), EngineError> {
        let participant = self.get_mut(index)?;
        if participant.status.active {
            participant.status.active = false;
            info!(participant = %index, name = %participant.info.name, "participant left the game");
        }
        Ok(())
    }

    /// Sum of every participant's balance.
    ///
    /// # Errors
    ///
    /// Returns a bank overflow error if the sum does not fit.
    pub fn total_balance(&self) -> Result<i64, EngineError> {
        self.participants
            .iter()
            .try_fold(0_i64, |total, p| total.checked_add(p.status.balance))
            .ok_or_else(|| {
                EngineError::Bank(tycoon_bank::BankError::ArithmeticOverflow {
                    context: "roster balance total",
                })
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tycoon_types::PositionIndex;

    use super::*;

    fn roster() -> Roster {
        Roster::new(
            ["Alpha", "Beta", "Gamma"]
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    Participant::new(
                        ParticipantIndex::new(i),
                        String::from(*name),
                        100,
                        PositionIndex::new(0),
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn pair_mut_preserves_argument_order() {
        let mut roster = roster();
        let (a, b) = roster
            .pair_mut(ParticipantIndex::new(2), ParticipantIndex::new(0))
            .unwrap();
        assert_eq!(a.name(), "Gamma");
        assert_eq!(b.name(), "Alpha");
        a.status.balance = 1;
        b.status.balance = 2;
        assert_eq!(roster.get(ParticipantIndex::new(2)).unwrap().status.balance, 1);
        assert_eq!(roster.get(ParticipantIndex::new(0)).unwrap().status.balance, 2);
    }

    #[test]
    fn pair_mut_rejects_same_or_missing_seat() {
        let mut roster = roster();
        assert!(matches!(
            roster.pair_mut(ParticipantIndex::new(1), ParticipantIndex::new(1)),
            Err(EngineError::SameParticipant(_))
        ));
        assert!(matches!(
            roster.pair_mut(ParticipantIndex::new(1), ParticipantIndex::new(7)),
            Err(EngineError::UnknownParticipant(_))
        ));
    }

    #[test]
    fn deactivate_lowers_active_count() {
        let mut roster = roster();
        assert_eq!(roster.active_count(), 3);
        roster.deactivate(ParticipantIndex::new(1)).unwrap();
        roster.deactivate(ParticipantIndex::new(1)).unwrap();
        assert_eq!(roster.active_count(), 2);
    }

    #[test]
    fn total_balance_sums_seats() {
        assert_eq!(roster().total_balance().unwrap(), 300);
    }
}
