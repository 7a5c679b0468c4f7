//! The board: every position in walking order.

use tycoon_types::{ParticipantIndex, Position, PositionIndex};

use crate::error::EngineError;

/// Owns every [`Position`]. The engine reads positions through it and
/// never constructs them itself.
#[derive(Debug, Clone)]
pub struct Board {
    positions: Vec<Position>,
}

impl Board {
    /// Wrap a list of positions.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTable`] if the list is empty or a
    /// position's index does not match its place in the list.
    pub fn new(positions: Vec<Position>) -> Result<Self, EngineError> {
        if positions.is_empty() {
            return Err(EngineError::InvalidTable(String::from("board has no positions")));
        }
        for (slot, position) in positions.iter().enumerate() {
            if position.index().get() != slot {
                return Err(EngineError::InvalidTable(format!(
                    "position {} stored in slot {slot}",
                    position.index()
                )));
            }
        }
        Ok(Self { positions })
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; a board has at least one position.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Look up a position.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownPosition`] if off the board.
    pub fn get(&self, index: PositionIndex) -> Result<&Position, EngineError> {
        self.positions
            .get(index.get())
            .ok_or(EngineError::UnknownPosition(index))
    }

    /// Look up a position for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownPosition`] if off the board.
    pub fn get_mut(&mut self, index: PositionIndex) -> Result<&mut Position, EngineError> {
        self.positions
            .get_mut(index.get())
            .ok_or(EngineError::UnknownPosition(index))
    }

    /// Every position index, in walking order.
    pub fn indices(&self) -> impl Iterator<Item = PositionIndex> + '_ {
        self.positions.iter().map(Position::index)
    }

    /// Positions held by `participant`, in walking order.
    pub fn held_by(&self, participant: ParticipantIndex) -> impl Iterator<Item = &Position> {
        self.positions
            .iter()
            .filter(move |p| p.status.holder == Some(participant))
    }

    /// The position one step past `from`, wrapping at the end of the board.
    pub fn next(&self, from: PositionIndex) -> PositionIndex {
        let next = from.get().saturating_add(1);
        if next >= self.positions.len() {
            PositionIndex::new(0)
        } else {
            PositionIndex::new(next)
        }
    }
}
