//! Dice sources.
//!
//! The engine asks a [`Dice`] for a two-die roll and treats the result as
//! opaque. Seeding is the caller's business.

use std::collections::VecDeque;

use rand::Rng;

use tycoon_types::DiceRoll;

use crate::error::EngineError;

/// A source of two-die rolls.
pub trait Dice {
    /// Roll two six-sided dice.
    fn roll(&mut self) -> Result<DiceRoll, EngineError>;
}

/// Uniform dice backed by any [`Rng`].
#[derive(Debug, Clone)]
pub struct RandomDice<R> {
    rng: R,
}

impl<R: Rng> RandomDice<R> {
    /// Roll with `rng`.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Dice for RandomDice<R> {
    fn roll(&mut self) -> Result<DiceRoll, EngineError> {
        Ok(DiceRoll::new(
            self.rng.random_range(1..=6),
            self.rng.random_range(1..=6),
        ))
    }
}

/// Dice that replay a fixed sequence, for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<DiceRoll>,
}

impl ScriptedDice {
    /// Replay `rolls` in order.
    pub fn new(rolls: impl IntoIterator<Item = (u8, u8)>) -> Self {
        Self {
            rolls: rolls
                .into_iter()
                .map(|(first, second)| DiceRoll::new(first, second))
                .collect(),
        }
    }

    /// Rolls not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self) -> Result<DiceRoll, EngineError> {
        self.rolls.pop_front().ok_or(EngineError::DiceExhausted)
    }
}
