//! Guarded transaction functions.
//!
//! Each function checks the [`LandFacts`] field that should have gated the
//! call, then applies exactly its documented mutation and returns a
//! [`Receipt`]. None of them perform I/O. A false guard means the caller's
//! branch logic is wrong, so the function refuses with
//! [`BankError::PreconditionViolated`] and leaves state untouched.
//!
//! | Function | Guard | Mutation |
//! |----------|-------|----------|
//! | [`acquire`] | `can_acquire_now` | balance -= value (destroyed), holder = participant |
//! | [`pay_fee`] | `can_pay_fee_now` | payer -= fee, holder += fee, together |
//! | [`incarcerate`] | `will_be_incarcerated` | incarcerated = true |
//! | [`release`] | incarcerated AND double | incarcerated = false, position = release position |

use serde::{Deserialize, Serialize};
use tracing::info;

use tycoon_types::{DiceRoll, Participant, ParticipantIndex, Position, PositionIndex};

use crate::BankError;
use crate::facts::LandFacts;

// ---------------------------------------------------------------------------
// Receipt
// ---------------------------------------------------------------------------

/// The category of a committed transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// A participant bought a position; the price left the game.
    Acquire,
    /// A visitor paid a fee to a holder.
    PayFee,
    /// A visitor who could not pay was sent to prison.
    Incarcerate,
    /// A prisoner rolled a double and walked free.
    Release,
}

/// Record of one committed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// What happened.
    pub kind: TransactionKind,
    /// Round in which it happened.
    pub round: u32,
    /// Participant whose balance was debited (or who was affected).
    pub from: ParticipantIndex,
    /// Participant whose balance was credited, if any.
    pub to: Option<ParticipantIndex>,
    /// Position involved, if any.
    pub position: Option<PositionIndex>,
    /// Money moved. Zero for flag-only transactions.
    pub amount: i64,
}

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// Fail with a precondition violation unless `holds`.
const fn guard(
    holds: bool,
    transaction: &'static str,
    guard: &'static str,
) -> Result<(), BankError> {
    if holds {
        Ok(())
    } else {
        Err(BankError::PreconditionViolated { transaction, guard })
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Buy `position` for `participant` at the value recorded in `facts`.
///
/// The price is removed from the game; it is not credited to anyone.
///
/// # Errors
///
/// Returns [`BankError::PreconditionViolated`] unless `facts.can_acquire_now`
/// holds for this participant and position, and the position is still
/// unheld. A second call with the same snapshot is therefore rejected.
pub fn acquire(
    round: u32,
    participant: &mut Participant,
    position: &mut Position,
    facts: &LandFacts,
) -> Result<Receipt, BankError> {
    const NAME: &str = "acquire";
    guard(facts.can_acquire_now, NAME, "can_acquire_now")?;
    guard(facts.participant == participant.index(), NAME, "snapshot participant")?;
    guard(facts.position == position.index(), NAME, "snapshot position")?;
    guard(position.status.holder.is_none(), NAME, "position is unheld")?;

    let balance = participant
        .status
        .balance
        .checked_sub(facts.value)
        .ok_or(BankError::ArithmeticOverflow {
            context: "acquisition debit",
        })?;
    guard(balance >= 0, NAME, "balance covers value")?;

    participant.status.balance = balance;
    position.status.holder = Some(participant.index());

    info!(
        round,
        participant = %participant.index(),
        position = %position.index(),
        amount = facts.value,
        "position acquired"
    );

    Ok(Receipt {
        kind: TransactionKind::Acquire,
        round,
        from: participant.index(),
        to: None,
        position: Some(position.index()),
        amount: facts.value,
    })
}

/// Move `facts.fee` from `payer` to `holder`.
///
/// Both new balances are computed before either is written, so no reader
/// ever observes one side of the transfer without the other.
///
/// # Errors
///
/// Returns [`BankError::PreconditionViolated`] unless `facts.can_pay_fee_now`
/// holds and `payer`/`holder` are the participants the snapshot names.
pub fn pay_fee(
    round: u32,
    payer: &mut Participant,
    holder: &mut Participant,
    facts: &LandFacts,
) -> Result<Receipt, BankError> {
    const NAME: &str = "pay_fee";
    guard(facts.can_pay_fee_now, NAME, "can_pay_fee_now")?;
    guard(facts.participant == payer.index(), NAME, "snapshot payer")?;
    guard(
        facts.holder.as_ref().is_some_and(|h| h.index == holder.index()),
        NAME,
        "snapshot holder",
    )?;
    guard(payer.index() != holder.index(), NAME, "payer is not holder")?;

    let payer_balance = payer
        .status
        .balance
        .checked_sub(facts.fee)
        .ok_or(BankError::ArithmeticOverflow { context: "fee debit" })?;
    let holder_balance = holder
        .status
        .balance
        .checked_add(facts.fee)
        .ok_or(BankError::ArithmeticOverflow { context: "fee credit" })?;
    guard(payer_balance >= 0, NAME, "balance covers fee")?;

    payer.status.balance = payer_balance;
    holder.status.balance = holder_balance;

    info!(
        round,
        payer = %payer.index(),
        holder = %holder.index(),
        amount = facts.fee,
        "fee paid"
    );

    Ok(Receipt {
        kind: TransactionKind::PayFee,
        round,
        from: payer.index(),
        to: Some(holder.index()),
        position: Some(facts.position),
        amount: facts.fee,
    })
}

/// Send `participant` to prison for failing to pay a fee.
///
/// # Errors
///
/// Returns [`BankError::PreconditionViolated`] unless
/// `facts.will_be_incarcerated` holds for this participant.
pub fn incarcerate(
    round: u32,
    participant: &mut Participant,
    facts: &LandFacts,
) -> Result<Receipt, BankError> {
    const NAME: &str = "incarcerate";
    guard(facts.will_be_incarcerated, NAME, "will_be_incarcerated")?;
    guard(facts.participant == participant.index(), NAME, "snapshot participant")?;

    participant.status.incarcerated = true;

    info!(
        round,
        participant = %participant.index(),
        position = %facts.position,
        fee = facts.fee,
        "participant incarcerated"
    );

    Ok(Receipt {
        kind: TransactionKind::Incarcerate,
        round,
        from: participant.index(),
        to: facts.holder.as_ref().map(|h| h.index),
        position: Some(facts.position),
        amount: 0,
    })
}

/// Free an incarcerated participant who rolled a double and move them to
/// `release_position`.
///
/// # Errors
///
/// Returns [`BankError::PreconditionViolated`] unless the participant is
/// incarcerated and `roll` is a double.
pub fn release(
    round: u32,
    participant: &mut Participant,
    roll: DiceRoll,
    release_position: PositionIndex,
) -> Result<Receipt, BankError> {
    const NAME: &str = "release";
    guard(participant.status.incarcerated, NAME, "participant is incarcerated")?;
    guard(roll.is_double(), NAME, "roll is a double")?;

    participant.status.incarcerated = false;
    participant.status.position = release_position;

    info!(
        round,
        participant = %participant.index(),
        position = %release_position,
        "participant released"
    );

    Ok(Receipt {
        kind: TransactionKind::Release,
        round,
        from: participant.index(),
        to: None,
        position: Some(release_position),
        amount: 0,
    })
}
