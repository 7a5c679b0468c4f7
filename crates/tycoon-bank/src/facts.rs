//! The land-fact snapshot taken when a participant arrives at a position.
//!
//! [`LandFacts`] is a plain value. It copies every balance, flag, and price
//! it needs at construction time, so later mutation of a participant or a
//! position never changes a snapshot that already exists. All four derived
//! booleans are computed from that single read:
//!
//! | Field | Rule |
//! |-------|------|
//! | `can_acquire_now` | no holder AND balance >= value |
//! | `must_pay_fee` | holder present AND holder != arriver AND holder not incarcerated |
//! | `can_pay_fee_now` | `must_pay_fee` AND balance >= fee |
//! | `will_be_incarcerated` | `must_pay_fee` AND NOT `can_pay_fee_now` |
//!
//! A holder who is incarcerated waives the fee.

use serde::{Deserialize, Serialize};

use tycoon_types::{Participant, ParticipantIndex, Position, PositionIndex};

use crate::BankError;

/// What the snapshot recorded about the position's holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderFacts {
    /// Holder's seat.
    pub index: ParticipantIndex,
    /// Holder's display name.
    pub name: String,
    /// Whether the holder was incarcerated at snapshot time.
    pub incarcerated: bool,
}

/// Immutable facts about one arrival event at an acquirable position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandFacts {
    /// The arriving participant.
    pub participant: ParticipantIndex,
    /// The position arrived at.
    pub position: PositionIndex,
    /// The holder, if the position was held.
    pub holder: Option<HolderFacts>,
    /// Whether the holder is the arriving participant.
    pub holder_is_participant: bool,
    /// Current land value.
    pub value: i64,
    /// Fee a visitor owes the holder.
    pub fee: i64,
    /// Arriving participant's balance at snapshot time.
    pub balance: i64,
    /// The position is unheld and the participant can afford it.
    pub can_acquire_now: bool,
    /// Another, free participant holds the position.
    pub must_pay_fee: bool,
    /// A fee is due and the participant can cover it.
    pub can_pay_fee_now: bool,
    /// A fee is due and the participant cannot cover it.
    pub will_be_incarcerated: bool,
}

/// The discriminated branch a caller takes over a [`LandFacts`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrivalOutcome {
    /// The arriving participant already holds the position.
    HeldBySelf,
    /// The position is unheld and affordable.
    OfferAcquisition,
    /// The position is unheld but the participant cannot afford it.
    Unaffordable,
    /// Another participant holds it but is incarcerated, so no fee is due.
    FeeWaived,
    /// A fee is due and will be paid.
    PayFee,
    /// A fee is due, cannot be paid, and the participant goes to prison.
    Incarceration,
}

impl LandFacts {
    /// Derive the snapshot for `participant` arriving at `position`.
    ///
    /// `holder` must be the participant recorded as the position's holder
    /// (or `None` when unheld).
    ///
    /// # Errors
    ///
    /// Returns [`BankError::NotAcquirable`] for a neutral position; callers
    /// branch on acquirability before asking for facts. Returns
    /// [`BankError::HolderMismatch`] if `holder` does not match the position.
    pub fn derive(
        participant: &Participant,
        position: &Position,
        holder: Option<&Participant>,
    ) -> Result<Self, BankError> {
        if !position.info.acquirable {
            return Err(BankError::NotAcquirable(position.index()));
        }

        let supplied = holder.map(Participant::index);
        if supplied != position.status.holder {
            return Err(BankError::HolderMismatch {
                position: position.index(),
                recorded: position.status.holder,
                supplied,
            });
        }

        let value = position.current_value();
        let fee = position.fee();
        let balance = participant.status.balance;

        let holder = holder.map(|h| HolderFacts {
            index: h.index(),
            name: h.info.name.clone(),
            incarcerated: h.status.incarcerated,
        });
        let holder_is_participant = holder
            .as_ref()
            .is_some_and(|h| h.index == participant.index());

        let can_acquire_now = holder.is_none() && balance >= value;
        let must_pay_fee = holder
            .as_ref()
            .is_some_and(|h| !holder_is_participant && !h.incarcerated);
        let can_pay_fee_now = must_pay_fee && balance >= fee;
        let will_be_incarcerated = must_pay_fee && !can_pay_fee_now;

        Ok(Self {
            participant: participant.index(),
            position: position.index(),
            holder,
            holder_is_participant,
            value,
            fee,
            balance,
            can_acquire_now,
            must_pay_fee,
            can_pay_fee_now,
            will_be_incarcerated,
        })
    }

    /// Holder's display name, if held.
    pub fn holder_name(&self) -> Option<&str> {
        self.holder.as_ref().map(|h| h.name.as_str())
    }

    /// Branch over the snapshot.
    pub const fn outcome(&self) -> ArrivalOutcome {
        if self.can_acquire_now {
            ArrivalOutcome::OfferAcquisition
        } else if self.can_pay_fee_now {
            ArrivalOutcome::PayFee
        } else if self.will_be_incarcerated {
            ArrivalOutcome::Incarceration
        } else if self.holder.is_none() {
            ArrivalOutcome::Unaffordable
        } else if self.holder_is_participant {
            ArrivalOutcome::HeldBySelf
        } else {
            ArrivalOutcome::FeeWaived
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn participant(index: usize, balance: i64) -> Participant {
        Participant::new(
            ParticipantIndex::new(index),
            format!("P{index}"),
            balance,
            PositionIndex::new(3),
        )
    }

    fn land(base: i64, holder: Option<usize>) -> Position {
        let mut position = Position::acquirable(PositionIndex::new(3), base);
        position.status.holder = holder.map(ParticipantIndex::new);
        position
    }

    #[test]
    fn unheld_affordable_offers_acquisition() {
        let arriver = participant(0, 100);
        let facts = LandFacts::derive(&arriver, &land(15, None), None).unwrap();
        assert!(facts.can_acquire_now);
        assert!(!facts.must_pay_fee);
        assert_eq!(facts.value, 15);
        assert_eq!(facts.outcome(), ArrivalOutcome::OfferAcquisition);
    }

    #[test]
    fn unheld_unaffordable_has_neither_flag() {
        let arriver = participant(0, 10);
        let facts = LandFacts::derive(&arriver, &land(15, None), None).unwrap();
        assert!(!facts.can_acquire_now);
        assert!(!facts.must_pay_fee);
        assert_eq!(facts.outcome(), ArrivalOutcome::Unaffordable);
    }

    #[test]
    fn held_by_self_has_neither_flag() {
        let arriver = participant(0, 100);
        let facts = LandFacts::derive(&arriver, &land(15, Some(0)), Some(&arriver)).unwrap();
        assert!(facts.holder_is_participant);
        assert!(!facts.can_acquire_now);
        assert!(!facts.must_pay_fee);
        assert_eq!(facts.outcome(), ArrivalOutcome::HeldBySelf);
    }

    #[test]
    fn insufficient_balance_means_incarceration() {
        let arriver = participant(0, 1);
        let holder = participant(1, 5);
        let facts = LandFacts::derive(&arriver, &land(20, Some(1)), Some(&holder)).unwrap();
        assert_eq!(facts.fee, 2);
        assert!(facts.must_pay_fee);
        assert!(!facts.can_pay_fee_now);
        assert!(facts.will_be_incarcerated);
        assert_eq!(facts.outcome(), ArrivalOutcome::Incarceration);
    }

    #[test]
    fn fee_is_compared_against_fee_not_value() {
        // Balance covers the fee (2) but not the value (20).
        let arriver = participant(0, 10);
        let holder = participant(1, 5);
        let facts = LandFacts::derive(&arriver, &land(20, Some(1)), Some(&holder)).unwrap();
        assert!(facts.can_pay_fee_now);
        assert_eq!(facts.outcome(), ArrivalOutcome::PayFee);
    }

    #[test]
    fn incarcerated_holder_waives_fee() {
        let arriver = participant(0, 0);
        let mut holder = participant(1, 5);
        holder.status.incarcerated = true;
        let facts = LandFacts::derive(&arriver, &land(20, Some(1)), Some(&holder)).unwrap();
        assert!(!facts.must_pay_fee);
        assert!(!facts.will_be_incarcerated);
        assert_eq!(facts.outcome(), ArrivalOutcome::FeeWaived);
    }

    #[test]
    fn neutral_position_is_rejected() {
        let arriver = participant(0, 100);
        let result = LandFacts::derive(&arriver, &Position::neutral(PositionIndex::new(0)), None);
        assert_eq!(result, Err(BankError::NotAcquirable(PositionIndex::new(0))));
    }

    #[test]
    fn wrong_holder_is_rejected() {
        let arriver = participant(0, 100);
        let stranger = participant(2, 100);
        let result = LandFacts::derive(&arriver, &land(20, Some(1)), Some(&stranger));
        assert!(matches!(result, Err(BankError::HolderMismatch { .. })));
    }

    #[test]
    fn snapshot_is_a_value_not_a_view() {
        let mut arriver = participant(0, 100);
        let facts = LandFacts::derive(&arriver, &land(15, None), None).unwrap();
        arriver.status.balance = 0;
        assert_eq!(facts.balance, 100);
        assert!(facts.can_acquire_now);
    }

    proptest! {
        #[test]
        fn acquisition_and_fee_are_mutually_exclusive(
            balance in 0_i64..500,
            base in 0_i64..300,
            holder in prop::option::of(0_usize..3),
            holder_incarcerated in any::<bool>(),
        ) {
            let arriver = participant(0, balance);
            let mut holders = [participant(0, balance), participant(1, 50), participant(2, 50)];
            for h in &mut holders[1..] {
                h.status.incarcerated = holder_incarcerated;
            }
            let holder_ref = holder.and_then(|i| holders.get(i));
            let facts = LandFacts::derive(&arriver, &land(base, holder), holder_ref);
            prop_assert!(facts.is_ok());
            let facts = facts.unwrap();

            prop_assert!(!(facts.can_acquire_now && facts.must_pay_fee));
            if facts.will_be_incarcerated {
                prop_assert!(facts.must_pay_fee);
                prop_assert!(!facts.can_pay_fee_now);
            }
            if facts.holder_is_participant {
                prop_assert!(!facts.can_acquire_now && !facts.must_pay_fee);
            }
        }
    }
}
