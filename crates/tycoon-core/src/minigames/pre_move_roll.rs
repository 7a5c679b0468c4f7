//! The roll before walking.
//!
//! Offers `RTD` and `BS`. Banking is a detour: it runs to completion and the
//! roll prompt comes back unchanged. Only a roll ends the minigame.

use tracing::debug;

use tycoon_textio::{CommandHandler, Menu, MenuItem, TextChannel};
use tycoon_types::{DiceRoll, MovementSession, ParticipantIndex};

use crate::error::EngineError;
use crate::minigames::banking::run_banking_services;
use crate::report;
use crate::table::Table;

/// Committed actions of the pre-move menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreMoveAction {
    /// Roll the dice and open a movement session.
    Roll,
    /// Narrate the roll.
    ReportRoll,
    /// Enter banking services.
    Banking,
}

/// Prompt `participant` to roll and return the movement session the roll
/// produced.
///
/// # Errors
///
/// Propagates menu exhaustion, channel failures, and dice failures.
pub fn run_pre_move_roll(
    table: &mut Table,
    participant: ParticipantIndex,
) -> Result<MovementSession, EngineError> {
    let menu = Menu::new(vec![
        MenuItem::new(
            "RTD",
            "Roll The Dice",
            vec![PreMoveAction::Roll, PreMoveAction::ReportRoll],
        ),
        MenuItem::new("BS", "Bank Services", vec![PreMoveAction::Banking]),
    ])?;

    report::pre_move_prompt(table, participant)?;

    let max_bad_input = table.rules().max_bad_input;
    let mut handler = PreMoveHandler {
        table,
        participant,
        roll: None,
        session: None,
    };
    loop {
        let key = menu.present(&mut handler, max_bad_input)?;
        debug!(participant = %participant, key, "pre-move menu choice");
        if let Some(session) = handler.session.take() {
            return Ok(session);
        }
    }
}

struct PreMoveHandler<'t> {
    table: &'t mut Table,
    participant: ParticipantIndex,
    roll: Option<DiceRoll>,
    session: Option<MovementSession>,
}

impl CommandHandler<PreMoveAction> for PreMoveHandler<'_> {
    type Error = EngineError;

    fn channel(&mut self) -> Result<&mut dyn TextChannel, EngineError> {
        self.table.seat(self.participant)
    }

    fn execute(&mut self, action: &PreMoveAction) -> Result<(), EngineError> {
        match action {
            PreMoveAction::Roll => {
                let roll = self.table.roll()?;
                let session =
                    MovementSession::from_roll(self.table.round(), self.participant, roll);
                debug!(
                    participant = %self.participant,
                    steps = session.info.total_steps,
                    "movement session opened"
                );
                self.roll = Some(roll);
                self.session = Some(session);
                Ok(())
            }
            PreMoveAction::ReportRoll => {
                let roll = self.roll.ok_or(EngineError::OutOfOrder {
                    action: "report roll",
                    requires: "a roll",
                })?;
                report::pre_move_roll(self.table, self.participant, roll)
            }
            PreMoveAction::Banking => run_banking_services(self.table, self.participant),
        }
    }
}
