//! Narration.
//!
//! Report functions only send text. They never change state, and the ones
//! that describe a transaction take its [`Receipt`], so they cannot run
//! before it has committed. Balances are read from the table at call time,
//! which is after the mutation.

use tycoon_bank::{LandFacts, Receipt};
use tycoon_types::{DiceRoll, ParticipantIndex};

use crate::error::EngineError;
use crate::table::Table;

fn name(table: &Table, participant: ParticipantIndex) -> Result<String, EngineError> {
    Ok(table.roster().get(participant)?.info.name.clone())
}

fn balance(table: &Table, participant: ParticipantIndex) -> Result<i64, EngineError> {
    Ok(table.roster().get(participant)?.status.balance)
}

fn tell_all(
    table: &mut Table,
    participant: ParticipantIndex,
    lines: &[String],
) -> Result<(), EngineError> {
    for line in lines {
        table.tell(participant, line)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Movement
// ---------------------------------------------------------------------------

/// Announce where a participant finished walking.
pub fn arrived(table: &mut Table, participant: ParticipantIndex) -> Result<(), EngineError> {
    let name = name(table, participant)?;
    let position = table.roster().get(participant)?.status.position;
    table.announce(&format!("Player {name} is now at square {position}."))
}

/// Arrival at a position that cannot be held.
pub fn special_position(
    table: &mut Table,
    participant: ParticipantIndex,
) -> Result<(), EngineError> {
    table.tell(participant, "You've arrived at a special square.")
}

// ---------------------------------------------------------------------------
// Arrival at acquirable land
// ---------------------------------------------------------------------------

/// Arrival at land the participant already holds.
pub fn held_by_self(table: &mut Table, participant: ParticipantIndex) -> Result<(), EngineError> {
    table.tell(participant, "You own this land.")
}

/// Arrival at unheld land the participant cannot afford.
pub fn unaffordable(table: &mut Table, facts: &LandFacts) -> Result<(), EngineError> {
    tell_all(
        table,
        facts.participant,
        &[
            format!("Its current land value is {}.", facts.value),
            String::from("You do not have the money to buy this land."),
        ],
    )
}

/// Arrival at land whose holder is in prison.
pub fn fee_waived(table: &mut Table, facts: &LandFacts) -> Result<(), EngineError> {
    let holder = facts.holder_name().unwrap_or_default().to_owned();
    tell_all(
        table,
        facts.participant,
        &[
            format!("This land is owned by {holder}."),
            String::from("The owner is in prison, so no rent is due."),
        ],
    )
}

/// The acquisition prompt.
pub fn acquisition_offer(table: &mut Table, facts: &LandFacts) -> Result<(), EngineError> {
    table.tell(facts.participant, "You can buy this land. Do you want to?")
}

/// Status, value, and the participant's money.
pub fn land_info(table: &mut Table, facts: &LandFacts) -> Result<(), EngineError> {
    let status = match facts.holder_name() {
        None => String::from("This land can be purchased and isn't owned yet."),
        Some(holder) => format!("This land is owned by {holder}."),
    };
    let money = balance(table, facts.participant)?;
    tell_all(
        table,
        facts.participant,
        &[
            status,
            format!("Its current land value is {}.", facts.value),
            format!("You have {money} dollars."),
        ],
    )
}

/// What the land would earn its holder.
pub fn rent_estimate(table: &mut Table, facts: &LandFacts) -> Result<(), EngineError> {
    let visited = facts.fee.saturating_mul(10);
    tell_all(
        table,
        facts.participant,
        &[
            String::from("Based on current estimates, it would generate:"),
            format!("... {} per turn, if not visited, and", facts.fee),
            format!("... {visited} per turn, if visited by another player."),
        ],
    )
}

/// Confirmation after [`tycoon_bank::acquire`] committed.
pub fn acquired(table: &mut Table, receipt: &Receipt) -> Result<(), EngineError> {
    let square = receipt.position.map_or_else(String::new, |p| p.to_string());
    let money = balance(table, receipt.from)?;
    tell_all(
        table,
        receipt.from,
        &[
            String::from("I hear you say yes."),
            format!("Square {square} is now yours."),
            format!("You now have {money} dollars."),
        ],
    )
}

/// Acknowledgement of a declined acquisition.
pub fn declined(table: &mut Table, participant: ParticipantIndex) -> Result<(), EngineError> {
    table.tell(
        participant,
        "What a careful decision. May your wisdom grow each day.",
    )
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

/// Who holds the land and what the visit costs.
pub fn fee_due(table: &mut Table, facts: &LandFacts) -> Result<(), EngineError> {
    let holder = facts.holder_name().unwrap_or_default().to_owned();
    tell_all(
        table,
        facts.participant,
        &[
            format!("This land is owned by {holder}."),
            format!("You must pay rent, which is {}.", facts.fee),
        ],
    )
}

/// Both sides of a committed fee payment.
pub fn fee_paid(table: &mut Table, receipt: &Receipt) -> Result<(), EngineError> {
    let payer_name = name(table, receipt.from)?;
    let money = balance(table, receipt.from)?;
    table.tell(receipt.from, &format!("You now have {money} dollars."))?;
    if let Some(holder) = receipt.to {
        table.tell(
            holder,
            &format!(
                "Player {payer_name} has paid you {} dollars of rent.",
                receipt.amount
            ),
        )?;
    }
    Ok(())
}

/// Both sides of a committed incarceration, plus a table-wide notice.
pub fn incarcerated(
    table: &mut Table,
    receipt: &Receipt,
    facts: &LandFacts,
) -> Result<(), EngineError> {
    let payer_name = name(table, receipt.from)?;
    table.tell(
        receipt.from,
        "Unfortunately, you don't have the money to pay rent, therefore you are now in prison.",
    )?;
    if let Some(holder) = receipt.to {
        table.tell(
            holder,
            &format!(
                "Player {payer_name} was unable to pay the rent of {} dollars, and was sent to prison.",
                facts.fee
            ),
        )?;
    }
    table.announce(&format!("Player {payer_name} was sent to prison."))
}

// ---------------------------------------------------------------------------
// Rolls
// ---------------------------------------------------------------------------

/// Prompt before the pre-move roll.
pub fn pre_move_prompt(
    table: &mut Table,
    participant: ParticipantIndex,
) -> Result<(), EngineError> {
    let name = name(table, participant)?;
    table.tell(participant, &format!("Player {name}, please roll the dice."))
}

/// Result of the pre-move roll.
pub fn pre_move_roll(
    table: &mut Table,
    participant: ParticipantIndex,
    roll: DiceRoll,
) -> Result<(), EngineError> {
    let name = name(table, participant)?;
    table.tell(
        participant,
        &format!(
            "{name}, you rolled {roll}, so you will walk {} squares.",
            roll.total()
        ),
    )
}

/// Prompt before the incarceration roll, plus a table-wide notice.
pub fn prison_prompt(table: &mut Table, participant: ParticipantIndex) -> Result<(), EngineError> {
    let name = name(table, participant)?;
    table.announce(&format!("Player {name} was in prison."))?;
    table.tell(
        participant,
        &format!("{name}, please roll the dice. If you roll a double, you can get out of prison."),
    )
}

/// Result of an incarceration roll that released the participant.
pub fn released(table: &mut Table, receipt: &Receipt, roll: DiceRoll) -> Result<(), EngineError> {
    let name = name(table, receipt.from)?;
    let position = table.roster().get(receipt.from)?.status.position;
    tell_all(
        table,
        receipt.from,
        &[
            format!("{name}, you rolled {roll}."),
            format!(
                "Because you rolled a double, you can now get out of prison, and will start at square {position}."
            ),
        ],
    )
}

/// Result of an incarceration roll that changed nothing.
pub fn still_incarcerated(
    table: &mut Table,
    participant: ParticipantIndex,
    roll: DiceRoll,
) -> Result<(), EngineError> {
    let name = name(table, participant)?;
    tell_all(
        table,
        participant,
        &[
            format!("{name}, you rolled {roll}."),
            String::from("Because you did not roll a double, you will remain in prison."),
        ],
    )
}

// ---------------------------------------------------------------------------
// Banking
// ---------------------------------------------------------------------------

/// One line per held position: index, current value, disposal value.
pub fn owned_properties(
    table: &mut Table,
    participant: ParticipantIndex,
) -> Result<(), EngineError> {
    let lines: Vec<String> = table
        .board()
        .held_by(participant)
        .map(|position| {
            format!(
                "Location {:>3} : land value {:>4}, mortgage value: {:>4}",
                position.index().get(),
                position.current_value(),
                position.disposal_value()
            )
        })
        .collect();
    if lines.is_empty() {
        return table.tell(participant, "You do not own any land.");
    }
    tell_all(table, participant, &lines)
}
