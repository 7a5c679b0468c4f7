//! Arrival resolution.
//!
//! Runs once per arrival event. The facts are snapshotted first; the
//! snapshot's [`ArrivalOutcome`] picks the branch:
//!
//! - unheld and affordable: the acquisition menu (`LI`, `REI`, `ALP`, `DLP`)
//!   until the participant accepts or declines,
//! - held by someone else who is free: the fee menu (`LI`, `RI`, `C`) until
//!   the participant continues, at which point the fee is paid or, if it
//!   cannot be, the participant is incarcerated. There is no choice about
//!   which.
//! - everything else: a single report and no transaction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use tycoon_bank::{ArrivalOutcome, BankError, LandFacts, Receipt};
use tycoon_textio::{CommandHandler, Menu, MenuItem, TextChannel};
use tycoon_types::ParticipantIndex;

use crate::error::EngineError;
use crate::report;
use crate::table::Table;

/// How an arrival event ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrivalResolution {
    /// The position cannot be held.
    Neutral,
    /// The participant already holds it.
    HeldBySelf,
    /// Unheld, but too expensive.
    Unaffordable,
    /// The holder is in prison.
    FeeWaived,
    /// The participant bought it.
    Acquired {
        /// Price paid.
        value: i64,
    },
    /// The participant passed on buying it.
    Declined,
    /// The participant paid the holder.
    FeePaid {
        /// Amount paid.
        fee: i64,
    },
    /// The participant could not pay and went to prison.
    Incarcerated {
        /// Amount that was due.
        fee: i64,
    },
}

/// Committed actions of the arrival menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalAction {
    /// Show land status, value, and balance.
    LandInfo,
    /// Show what the land would earn.
    RentEstimate,
    /// Show who holds the land and the fee.
    RentInfo,
    /// Buy the land.
    Acquire,
    /// Narrate the purchase.
    ReportAcquired,
    /// Pass on the land.
    Decline,
    /// Narrate the refusal.
    ReportDeclined,
    /// Pay the fee, or go to prison if it cannot be paid.
    Settle,
    /// Narrate the settlement to both parties.
    ReportSettled,
}

/// Resolve the arrival of `participant` at their current position.
///
/// # Errors
///
/// Propagates menu exhaustion, channel failures, and bank precondition
/// violations.
pub fn run_arrival(
    table: &mut Table,
    participant: ParticipantIndex,
) -> Result<ArrivalResolution, EngineError> {
    let Some(facts) = table.land_facts(participant)? else {
        report::special_position(table, participant)?;
        return Ok(ArrivalResolution::Neutral);
    };

    let outcome = facts.outcome();
    debug!(
        participant = %participant,
        position = %facts.position,
        outcome = ?outcome,
        "arrival facts derived"
    );

    match outcome {
        ArrivalOutcome::HeldBySelf => {
            report::held_by_self(table, participant)?;
            Ok(ArrivalResolution::HeldBySelf)
        }
        ArrivalOutcome::Unaffordable => {
            report::unaffordable(table, &facts)?;
            Ok(ArrivalResolution::Unaffordable)
        }
        ArrivalOutcome::FeeWaived => {
            report::fee_waived(table, &facts)?;
            Ok(ArrivalResolution::FeeWaived)
        }
        ArrivalOutcome::OfferAcquisition => {
            report::acquisition_offer(table, &facts)?;
            let menu = acquisition_menu()?;
            resolve(table, facts, &menu)
        }
        ArrivalOutcome::PayFee | ArrivalOutcome::Incarceration => {
            report::fee_due(table, &facts)?;
            let menu = fee_menu()?;
            resolve(table, facts, &menu)
        }
    }
}

fn acquisition_menu() -> Result<Menu<ArrivalAction>, EngineError> {
    Ok(Menu::new(vec![
        MenuItem::new("LI", "Land Info", vec![ArrivalAction::LandInfo]),
        MenuItem::new("REI", "Rent Estimate Info", vec![ArrivalAction::RentEstimate]),
        MenuItem::new(
            "ALP",
            "Accept Land Purchase",
            vec![ArrivalAction::Acquire, ArrivalAction::ReportAcquired],
        ),
        MenuItem::new(
            "DLP",
            "Decline Land Purchase",
            vec![ArrivalAction::Decline, ArrivalAction::ReportDeclined],
        ),
    ])?)
}

fn fee_menu() -> Result<Menu<ArrivalAction>, EngineError> {
    Ok(Menu::new(vec![
        MenuItem::new("LI", "Land Info", vec![ArrivalAction::LandInfo]),
        MenuItem::new("RI", "Rent Info", vec![ArrivalAction::RentInfo]),
        MenuItem::new(
            "C",
            "Continue",
            vec![ArrivalAction::Settle, ArrivalAction::ReportSettled],
        ),
    ])?)
}

/// Present `menu` until an action settles the arrival.
fn resolve(
    table: &mut Table,
    facts: LandFacts,
    menu: &Menu<ArrivalAction>,
) -> Result<ArrivalResolution, EngineError> {
    let max_bad_input = table.rules().max_bad_input;
    let mut handler = ArrivalHandler {
        table,
        facts,
        receipt: None,
        resolution: None,
    };
    loop {
        let key = menu.present(&mut handler, max_bad_input)?;
        debug!(key, "arrival menu choice");
        if let Some(resolution) = handler.resolution {
            return Ok(resolution);
        }
    }
}

struct ArrivalHandler<'t> {
    table: &'t mut Table,
    facts: LandFacts,
    receipt: Option<Receipt>,
    resolution: Option<ArrivalResolution>,
}

impl ArrivalHandler<'_> {
    fn committed(&self, action: &'static str) -> Result<Receipt, EngineError> {
        self.receipt.clone().ok_or(EngineError::OutOfOrder {
            action,
            requires: "a committed transaction",
        })
    }
}

impl CommandHandler<ArrivalAction> for ArrivalHandler<'_> {
    type Error = EngineError;

    fn channel(&mut self) -> Result<&mut dyn TextChannel, EngineError> {
        self.table.seat(self.facts.participant)
    }

    fn execute(&mut self, action: &ArrivalAction) -> Result<(), EngineError> {
        match action {
            ArrivalAction::LandInfo => report::land_info(self.table, &self.facts),
            ArrivalAction::RentEstimate => report::rent_estimate(self.table, &self.facts),
            ArrivalAction::RentInfo => report::fee_due(self.table, &self.facts),
            ArrivalAction::Acquire => {
                let receipt = self.table.commit_acquire(&self.facts)?;
                self.resolution = Some(ArrivalResolution::Acquired {
                    value: receipt.amount,
                });
                self.receipt = Some(receipt);
                Ok(())
            }
            ArrivalAction::ReportAcquired => {
                let receipt = self.committed("report acquisition")?;
                report::acquired(self.table, &receipt)
            }
            ArrivalAction::Decline => {
                // Declining has no effect on state yet.
                self.resolution = Some(ArrivalResolution::Declined);
                Ok(())
            }
            ArrivalAction::ReportDeclined => report::declined(self.table, self.facts.participant),
            ArrivalAction::Settle => {
                let (receipt, resolution) = match self.facts.outcome() {
                    ArrivalOutcome::PayFee => (
                        self.table.commit_pay_fee(&self.facts)?,
                        ArrivalResolution::FeePaid { fee: self.facts.fee },
                    ),
                    ArrivalOutcome::Incarceration => (
                        self.table.commit_incarcerate(&self.facts)?,
                        ArrivalResolution::Incarcerated { fee: self.facts.fee },
                    ),
                    _ => {
                        return Err(BankError::PreconditionViolated {
                            transaction: "settle",
                            guard: "must_pay_fee",
                        }
                        .into());
                    }
                };
                self.resolution = Some(resolution);
                self.receipt = Some(receipt);
                Ok(())
            }
            ArrivalAction::ReportSettled => {
                let receipt = self.committed("report settlement")?;
                match self.resolution {
                    Some(ArrivalResolution::FeePaid { .. }) => {
                        report::fee_paid(self.table, &receipt)
                    }
                    Some(ArrivalResolution::Incarcerated { .. }) => {
                        report::incarcerated(self.table, &receipt, &self.facts)
                    }
                    _ => Err(EngineError::OutOfOrder {
                        action: "report settlement",
                        requires: "a settled fee",
                    }),
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;
    use tycoon_textio::{ChannelHub, ScriptedChannel};
    use tycoon_types::{Participant, Position, PositionIndex};

    use super::*;
    use crate::board::Board;
    use crate::config::RulesConfig;
    use crate::dice::ScriptedDice;
    use crate::roster::Roster;

    const P0: ParticipantIndex = ParticipantIndex::new(0);

    /// Two seats on a board of one neutral square and one worth 20.
    /// Seat 0 answers `ALP` then `C`, standing on square 1.
    fn table(balances: [i64; 2], holder: Option<usize>, holder_jailed: bool) -> Table {
        let mut land = Position::acquirable(PositionIndex::new(1), 20);
        land.status.holder = holder.map(ParticipantIndex::new);
        let board = Board::new(vec![Position::neutral(PositionIndex::new(0)), land]).unwrap();

        let mut participants: Vec<Participant> = balances
            .iter()
            .enumerate()
            .map(|(i, balance)| {
                Participant::new(
                    ParticipantIndex::new(i),
                    format!("P{i}"),
                    *balance,
                    PositionIndex::new(1),
                )
            })
            .collect();
        if let Some(h) = holder.and_then(|h| participants.get_mut(h)) {
            h.status.incarcerated = holder_jailed && h.index() != P0;
        }

        let mut hub = ChannelHub::new();
        hub.add(Box::new(ScriptedChannel::new(["ALP", "C"])));
        hub.add(Box::new(ScriptedChannel::default()));

        Table::new(
            board,
            Roster::new(participants).unwrap(),
            hub,
            Box::new(ScriptedDice::new([])),
            RulesConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn settlement_report_requires_a_settled_fee() {
        let mut table = table([100, 100], None, false);
        let facts = table.land_facts(P0).unwrap().unwrap();
        let receipt = table.commit_acquire(&facts).unwrap();
        let mut handler = ArrivalHandler {
            table: &mut table,
            facts,
            receipt: Some(receipt),
            resolution: Some(ArrivalResolution::Acquired { value: 20 }),
        };

        let result = handler.execute(&ArrivalAction::ReportSettled);

        assert!(matches!(
            result,
            Err(EngineError::OutOfOrder {
                action: "report settlement",
                ..
            })
        ));
    }

    proptest! {
        #[test]
        fn arrival_conserves_money(
            balances in prop::array::uniform2(0_i64..60),
            holder in prop::option::of(0_usize..2),
            holder_jailed in any::<bool>(),
        ) {
            let mut table = table(balances, holder, holder_jailed);
            let opening = table.roster().total_balance().unwrap();

            let resolution = run_arrival(&mut table, P0).unwrap();

            let closing = table.roster().total_balance().unwrap();
            let destroyed = match resolution {
                ArrivalResolution::Acquired { value } => value,
                _ => 0,
            };
            prop_assert_eq!(Some(closing), opening.checked_sub(destroyed));
            prop_assert!(table.verify_conservation().is_ok());
        }
    }
}
