//! Land-fact derivation, guarded transactions, and bookkeeping for the
//! Tycoon engine.
//!
//! Every state change a participant can cause by landing on a position goes
//! through this crate, and every one of them follows the same shape:
//!
//! 1. [`LandFacts::derive`] takes a pure snapshot of everything needed to
//!    decide what is possible (ownership, affordability, fee due).
//! 2. The caller branches on the snapshot ([`LandFacts::outcome`]).
//! 3. The matching transaction function ([`acquire`], [`pay_fee`],
//!    [`incarcerate`], [`release`]) checks that the snapshot field guarding
//!    it is true, mutates state, and hands back a [`Receipt`].
//! 4. The caller appends the receipt to the [`Journal`].
//!
//! A transaction called with its guard false is a logic defect in the
//! caller. It is reported as [`BankError::PreconditionViolated`] and must
//! not be swallowed.
//!
//! # Modules
//!
//! - [`facts`] -- The [`LandFacts`] snapshot and [`ArrivalOutcome`] branch.
//! - [`transaction`] -- Guarded mutators and [`Receipt`].
//! - [`journal`] -- Append-only [`Journal`] with a conservation check.

pub mod facts;
pub mod journal;
pub mod transaction;

// Re-export primary types at crate root.
pub use facts::{ArrivalOutcome, HolderFacts, LandFacts};
pub use journal::{ConservationResult, Journal, JournalAnomaly};
pub use transaction::{Receipt, TransactionKind, acquire, incarcerate, pay_fee, release};

use tycoon_types::{ParticipantIndex, PositionIndex};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised by fact derivation and transaction functions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BankError {
    /// A transaction was invoked while the guard that should have gated the
    /// call was false. This is a logic defect in the caller.
    #[error("precondition violated in {transaction}: {guard}")]
    PreconditionViolated {
        /// The transaction function that refused to run.
        transaction: &'static str,
        /// The guard that did not hold.
        guard: &'static str,
    },

    /// Land facts were requested for a position that cannot be acquired.
    #[error("position {0} is not acquirable")]
    NotAcquirable(PositionIndex),

    /// The holder passed to fact derivation is not the position's holder.
    #[error("position {position} is held by {recorded:?}, but {supplied:?} was supplied")]
    HolderMismatch {
        /// The position whose facts were requested.
        position: PositionIndex,
        /// The holder recorded on the position.
        recorded: Option<ParticipantIndex>,
        /// The holder passed by the caller.
        supplied: Option<ParticipantIndex>,
    },

    /// A balance computation overflowed.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// What was being computed.
        context: &'static str,
    },
}
