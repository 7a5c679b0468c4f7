//! Banking services.
//!
//! Navigation only: nothing here moves money. The main menu (`MS`, `Q`)
//! leads to the mortgage menu (`LOP`, `Q`), which lists held land with its
//! current and disposal values. Either menu loops until `Q`.
//!
//! Banking can be entered from inside another minigame. It only reads the
//! table, so whatever the caller had pending is still pending afterwards.

use tracing::debug;

use tycoon_textio::{CommandHandler, Menu, MenuItem, TextChannel};
use tycoon_types::ParticipantIndex;

use crate::error::EngineError;
use crate::report;
use crate::table::Table;

/// Committed actions of the banking menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankingAction {
    /// Enter the mortgage menu.
    Mortgage,
    /// List held land.
    ListOwned,
    /// Leave the current menu.
    Leave,
}

/// Run the banking menu for `participant` until they quit.
///
/// # Errors
///
/// Propagates menu exhaustion and channel failures.
pub fn run_banking_services(
    table: &mut Table,
    participant: ParticipantIndex,
) -> Result<(), EngineError> {
    let menu = Menu::new(vec![
        MenuItem::new("MS", "Mortgage Services", vec![BankingAction::Mortgage]),
        MenuItem::new("Q", "Quit / return to main menu", vec![BankingAction::Leave]),
    ])?;
    debug!(participant = %participant, "entering banking services");
    run_until_leave(table, participant, &menu)
}

fn run_mortgage_services(
    table: &mut Table,
    participant: ParticipantIndex,
) -> Result<(), EngineError> {
    let menu = Menu::new(vec![
        MenuItem::new("LOP", "List Owned Properties", vec![BankingAction::ListOwned]),
        MenuItem::new("Q", "Quit / return to main menu", vec![BankingAction::Leave]),
    ])?;
    debug!(participant = %participant, "entering mortgage services");
    run_until_leave(table, participant, &menu)
}

fn run_until_leave(
    table: &mut Table,
    participant: ParticipantIndex,
    menu: &Menu<BankingAction>,
) -> Result<(), EngineError> {
    let max_bad_input = table.rules().max_bad_input;
    let mut handler = BankingHandler {
        table,
        participant,
        leave: false,
    };
    while !handler.leave {
        menu.present(&mut handler, max_bad_input)?;
    }
    Ok(())
}

struct BankingHandler<'t> {
    table: &'t mut Table,
    participant: ParticipantIndex,
    leave: bool,
}

impl CommandHandler<BankingAction> for BankingHandler<'_> {
    type Error = EngineError;

    fn channel(&mut self) -> Result<&mut dyn TextChannel, EngineError> {
        self.table.seat(self.participant)
    }

    fn execute(&mut self, action: &BankingAction) -> Result<(), EngineError> {
        match action {
            BankingAction::Mortgage => run_mortgage_services(self.table, self.participant),
            BankingAction::ListOwned => report::owned_properties(self.table, self.participant),
            BankingAction::Leave => {
                self.leave = true;
                Ok(())
            }
        }
    }
}
