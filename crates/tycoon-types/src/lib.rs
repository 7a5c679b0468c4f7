//! Shared type definitions for the Tycoon board-trading engine.
//!
//! This crate holds the data model every other crate agrees on. Records are
//! split into an immutable `info` half (identity fixed at setup) and a
//! mutable `status` half (changed only by the bank's transaction functions).
//!
//! # Modules
//!
//! - [`ids`] -- Typed index wrappers for participants and positions
//! - [`participant`] -- Participant identity and status
//! - [`position`] -- Board positions and their valuation rules
//! - [`movement`] -- Dice rolls and movement sessions

pub mod ids;
pub mod movement;
pub mod participant;
pub mod position;

// Re-export all public types at crate root for convenience.
pub use ids::{ParticipantIndex, PositionIndex};
pub use movement::{DiceRoll, MovementInfo, MovementSession, MovementStatus};
pub use participant::{Participant, ParticipantInfo, ParticipantStatus};
pub use position::{Position, PositionInfo, PositionStatus};
