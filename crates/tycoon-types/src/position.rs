//! Board positions and their valuation rules.
//!
//! An acquirable position can be held by one participant at a time and
//! charges a fee to other participants who land on it. Neutral positions
//! (start, prison, and the like) are never held and never charge a fee.
//!
//! # Valuation
//!
//! ```text
//! current_value  = max(0, (base + value_adjustment) * (100 + demand_adjustment) / 100)
//! disposal_value = base / 2
//! fee            = max(1, current_value / 10)
//! ```
//!
//! All divisions are integer divisions.

use serde::{Deserialize, Serialize};

use crate::ids::{ParticipantIndex, PositionIndex};

/// Immutable identity of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionInfo {
    /// Location on the board.
    pub index: PositionIndex,
    /// Whether the position supports ownership and fee collection.
    pub acquirable: bool,
    /// Base land value before adjustments.
    pub base_value: i64,
}

/// Mutable status of a position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionStatus {
    /// Current holder, if any.
    pub holder: Option<ParticipantIndex>,
    /// Additive adjustment applied to the base value.
    pub value_adjustment: i64,
    /// Additive demand adjustment, in percent.
    pub demand_adjustment: i64,
}

/// A board position: identity plus status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Identity (never changes).
    pub info: PositionInfo,
    /// Status (holder changes only through an acquisition).
    pub status: PositionStatus,
}

impl Position {
    /// Create an unheld acquirable position.
    pub fn acquirable(index: PositionIndex, base_value: i64) -> Self {
        Self {
            info: PositionInfo {
                index,
                acquirable: true,
                base_value,
            },
            status: PositionStatus::default(),
        }
    }

    /// Create a neutral position that can never be acquired.
    pub fn neutral(index: PositionIndex) -> Self {
        Self {
            info: PositionInfo {
                index,
                acquirable: false,
                base_value: 0,
            },
            status: PositionStatus::default(),
        }
    }

    /// Location shortcut.
    pub const fn index(&self) -> PositionIndex {
        self.info.index
    }

    /// Current land value with value and demand adjustments applied.
    ///
    /// Never negative.
    pub fn current_value(&self) -> i64 {
        let adjusted = self
            .info
            .base_value
            .saturating_add(self.status.value_adjustment);
        let demand_pct = 100_i64.saturating_add(self.status.demand_adjustment);
        (adjusted.saturating_mul(demand_pct) / 100).max(0)
    }

    /// Value recovered when the position is disposed of (mortgaged).
    pub const fn disposal_value(&self) -> i64 {
        self.info.base_value / 2
    }

    /// Fee charged to a visiting participant. Always at least 1.
    pub fn fee(&self) -> i64 {
        (self.current_value() / 10).max(1)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn at(base: i64, value_adjustment: i64, demand_adjustment: i64) -> Position {
        let mut position = Position::acquirable(PositionIndex::new(1), base);
        position.status.value_adjustment = value_adjustment;
        position.status.demand_adjustment = demand_adjustment;
        position
    }

    #[test]
    fn unadjusted_value_is_base() {
        assert_eq!(at(15, 0, 0).current_value(), 15);
        assert_eq!(at(20, 0, 0).fee(), 2);
    }

    #[test]
    fn adjustments_apply_before_demand() {
        // (40 + 10) * 150 / 100 = 75
        assert_eq!(at(40, 10, 50).current_value(), 75);
        assert_eq!(at(40, 10, 50).fee(), 7);
    }

    #[test]
    fn demand_uses_integer_division() {
        // 33 * 101 / 100 = 33.33 -> 33
        assert_eq!(at(33, 0, 1).current_value(), 33);
    }

    #[test]
    fn cheap_land_still_charges_one() {
        assert_eq!(at(5, 0, 0).fee(), 1);
        assert_eq!(at(0, 0, 0).fee(), 1);
    }

    #[test]
    fn collapsed_demand_never_goes_negative() {
        assert_eq!(at(50, 0, -150).current_value(), 0);
        assert_eq!(at(50, 0, -150).fee(), 1);
    }

    #[test]
    fn disposal_is_half_base() {
        assert_eq!(at(15, 100, 100).disposal_value(), 7);
        assert_eq!(at(20, 0, 0).disposal_value(), 10);
    }

    #[test]
    fn neutral_position_is_not_acquirable() {
        let position = Position::neutral(PositionIndex::new(0));
        assert!(!position.info.acquirable);
        assert_eq!(position.status.holder, None);
    }

    proptest! {
        #[test]
        fn fee_is_always_at_least_one(
            base in -10_000_i64..10_000,
            value_adjustment in -10_000_i64..10_000,
            demand_adjustment in -500_i64..500,
        ) {
            prop_assert!(at(base, value_adjustment, demand_adjustment).fee() >= 1);
        }
    }
}
