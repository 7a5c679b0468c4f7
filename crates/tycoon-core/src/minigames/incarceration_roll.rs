//! The roll to get out of prison.
//!
//! Offers only `RTD`. A double releases the participant to the release
//! position; anything else leaves every record as it was.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tycoon_bank::Receipt;
use tycoon_textio::{CommandHandler, Menu, MenuItem, TextChannel};
use tycoon_types::{DiceRoll, ParticipantIndex};

use crate::error::EngineError;
use crate::report;
use crate::table::Table;

/// How an incarceration roll ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncarcerationOutcome {
    /// A double was rolled and the participant is free.
    Released {
        /// The roll.
        roll: DiceRoll,
    },
    /// No double; nothing changed.
    StillIncarcerated {
        /// The roll.
        roll: DiceRoll,
    },
}

/// Committed actions of the incarceration menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncarcerationAction {
    /// Roll the dice.
    Roll,
    /// Release the participant if the roll was a double.
    Release,
    /// Narrate the roll and its consequence.
    ReportRoll,
}

/// Let an incarcerated `participant` try to roll a double.
///
/// # Errors
///
/// Returns [`EngineError::NotIncarcerated`] for a free participant, and
/// propagates menu, channel, dice, and bank failures.
pub fn run_incarceration_roll(
    table: &mut Table,
    participant: ParticipantIndex,
) -> Result<IncarcerationOutcome, EngineError> {
    if !table.roster().get(participant)?.status.incarcerated {
        return Err(EngineError::NotIncarcerated(participant));
    }

    let menu = Menu::new(vec![MenuItem::new(
        "RTD",
        "Roll The Dice",
        vec![
            IncarcerationAction::Roll,
            IncarcerationAction::Release,
            IncarcerationAction::ReportRoll,
        ],
    )])?;

    report::prison_prompt(table, participant)?;

    let max_bad_input = table.rules().max_bad_input;
    let mut handler = IncarcerationHandler {
        table,
        participant,
        pending: None,
        receipt: None,
        outcome: None,
    };
    loop {
        menu.present(&mut handler, max_bad_input)?;
        if let Some(outcome) = handler.outcome {
            debug!(participant = %participant, outcome = ?outcome, "incarceration roll finished");
            return Ok(outcome);
        }
    }
}

struct IncarcerationHandler<'t> {
    table: &'t mut Table,
    participant: ParticipantIndex,
    pending: Option<DiceRoll>,
    receipt: Option<Receipt>,
    outcome: Option<IncarcerationOutcome>,
}

impl IncarcerationHandler<'_> {
    fn rolled(&self, action: &'static str) -> Result<DiceRoll, EngineError> {
        self.pending.ok_or(EngineError::OutOfOrder {
            action,
            requires: "a roll",
        })
    }
}

impl CommandHandler<IncarcerationAction> for IncarcerationHandler<'_> {
    type Error = EngineError;

    fn channel(&mut self) -> Result<&mut dyn TextChannel, EngineError> {
        self.table.seat(self.participant)
    }

    fn execute(&mut self, action: &IncarcerationAction) -> Result<(), EngineError> {
        match action {
            IncarcerationAction::Roll => {
                self.pending = Some(self.table.roll()?);
                Ok(())
            }
            IncarcerationAction::Release => {
                let roll = self.rolled("release")?;
                if roll.is_double() {
                    self.receipt = Some(self.table.commit_release(self.participant, roll)?);
                    self.outcome = Some(IncarcerationOutcome::Released { roll });
                } else {
                    self.outcome = Some(IncarcerationOutcome::StillIncarcerated { roll });
                }
                Ok(())
            }
            IncarcerationAction::ReportRoll => match self.outcome {
                Some(IncarcerationOutcome::Released { roll }) => {
                    let receipt = self.receipt.clone().ok_or(EngineError::OutOfOrder {
                        action: "report release",
                        requires: "a committed release",
                    })?;
                    report::released(self.table, &receipt, roll)
                }
                Some(IncarcerationOutcome::StillIncarcerated { roll }) => {
                    report::still_incarcerated(self.table, self.participant, roll)
                }
                None => Err(EngineError::OutOfOrder {
                    action: "report roll",
                    requires: "a release decision",
                }),
            },
        }
    }
}
