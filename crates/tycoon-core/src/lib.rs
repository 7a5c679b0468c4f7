//! Turn engine for the Tycoon board-trading game.
//!
//! This crate wires the bank's snapshot-and-transaction model to the text
//! menu protocol. A turn is played on a [`Table`], which owns the board,
//! the roster, one channel per seat, the dice, and the transaction journal:
//!
//! 1. [`run_pre_move_roll`] (or [`run_incarceration_roll`] for a prisoner)
//! 2. [`movement::walk`]
//! 3. [`run_arrival`]: snapshot, branch, transaction, report
//!
//! [`run_turn`] strings these together. Iterating rounds and seats is left
//! to the caller.
//!
//! # Modules
//!
//! - [`config`] -- YAML [`GameConfig`].
//! - [`board`] -- [`Board`] of positions.
//! - [`roster`] -- [`Roster`] of participants.
//! - [`dice`] -- [`Dice`] trait, random and scripted sources.
//! - [`table`] -- [`Table`] and the journaled `commit_*` mutators.
//! - [`report`] -- Narration sent over participant channels.
//! - [`minigames`] -- Arrival, pre-move roll, incarceration roll, banking.
//! - [`movement`] -- Walking a movement session.
//! - [`turn`] -- [`run_turn`].
//! - [`error`] -- [`EngineError`].

pub mod board;
pub mod config;
pub mod dice;
pub mod error;
pub mod minigames;
pub mod movement;
pub mod report;
pub mod roster;
pub mod table;
pub mod turn;

// Re-export primary types at crate root.
pub use board::Board;
pub use config::{BoardConfig, ConfigError, EconomyConfig, GameConfig, PositionConfig, RulesConfig};
pub use dice::{Dice, RandomDice, ScriptedDice};
pub use error::EngineError;
pub use minigames::{
    ArrivalResolution, IncarcerationOutcome, run_arrival, run_banking_services,
    run_incarceration_roll, run_pre_move_roll,
};
pub use roster::Roster;
pub use table::Table;
pub use turn::{TurnSummary, run_turn};
