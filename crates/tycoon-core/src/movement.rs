//! Walking the board.

use tracing::debug;

use tycoon_types::{MovementSession, PositionIndex};

use crate::error::EngineError;
use crate::report;
use crate::table::Table;

/// Consume every step of `session`, moving its participant one position
/// per step and wrapping past the last position, then announce where they
/// stopped. Arrival resolution is left to the caller.
///
/// # Errors
///
/// Propagates unknown-index and channel failures.
pub fn walk(
    table: &mut Table,
    session: &mut MovementSession,
) -> Result<PositionIndex, EngineError> {
    let participant = session.info.participant;
    let from = table.roster().get(participant)?.status.position;

    let mut position = from;
    while session.step() {
        position = table.board().next(position);
    }
    table.place(participant, position)?;

    debug!(
        participant = %participant,
        from = %from,
        to = %position,
        steps = session.info.total_steps,
        "walk finished"
    );
    report::arrived(table, participant)?;
    Ok(position)
}
