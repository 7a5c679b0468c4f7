//! One participant's turn.
//!
//! A free participant rolls, walks, and resolves the arrival. An
//! incarcerated one only gets the incarceration roll; a release ends the
//! turn at the release position. Every turn ends with a conservation check
//! against the journal.

use serde::{Deserialize, Serialize};
use tracing::info;

use tycoon_types::{ParticipantIndex, PositionIndex};

use crate::error::EngineError;
use crate::minigames::{
    ArrivalResolution, IncarcerationOutcome, run_arrival, run_incarceration_roll,
    run_pre_move_roll,
};
use crate::movement::walk;
use crate::table::Table;

/// What happened during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnSummary {
    /// The participant is no longer playing.
    Skipped,
    /// The participant started the turn in prison.
    Imprisoned(IncarcerationOutcome),
    /// The participant rolled, walked, and arrived.
    Moved {
        /// Steps walked.
        steps: u32,
        /// Where the walk ended.
        to: PositionIndex,
        /// How the arrival was resolved.
        resolution: ArrivalResolution,
    },
}

/// Play one turn for `participant`.
///
/// # Errors
///
/// Everything fatal in a minigame is propagated as is, as is a failed
/// conservation check.
pub fn run_turn(
    table: &mut Table,
    participant: ParticipantIndex,
) -> Result<TurnSummary, EngineError> {
    let status = &table.roster().get(participant)?.status;
    let (active, incarcerated) = (status.active, status.incarcerated);
    if !active {
        return Ok(TurnSummary::Skipped);
    }

    let summary = if incarcerated {
        TurnSummary::Imprisoned(run_incarceration_roll(table, participant)?)
    } else {
        let mut session = run_pre_move_roll(table, participant)?;
        let to = walk(table, &mut session)?;
        let resolution = run_arrival(table, participant)?;
        TurnSummary::Moved {
            steps: session.info.total_steps,
            to,
            resolution,
        }
    };

    table.verify_conservation()?;
    info!(
        round = table.round(),
        participant = %participant,
        summary = ?summary,
        "turn finished"
    );
    Ok(summary)
}
