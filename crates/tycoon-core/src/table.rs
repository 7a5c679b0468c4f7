//! The table: every collaborator a turn needs, in one place.
//!
//! A [`Table`] owns the board, the roster, one channel per seat, the dice,
//! and the transaction journal. Minigames borrow it mutably for the length
//! of one interaction; nothing else touches game state while they run.
//!
//! The `commit_*` methods are the only path from a minigame to the bank's
//! transaction functions. Each one borrows exactly the records the
//! transaction needs, runs it, and appends the receipt to the journal.

use tracing::debug;

use tycoon_bank::{
    ConservationResult, Journal, LandFacts, Receipt, acquire, incarcerate, pay_fee, release,
};
use tycoon_textio::{ChannelHub, TextChannel};
use tycoon_types::{DiceRoll, ParticipantIndex, PositionIndex};

use crate::board::Board;
use crate::config::{GameConfig, RulesConfig};
use crate::dice::Dice;
use crate::error::EngineError;
use crate::roster::Roster;

/// Shared game state for one game.
pub struct Table {
    board: Board,
    roster: Roster,
    channels: ChannelHub,
    dice: Box<dyn Dice>,
    journal: Journal,
    rules: RulesConfig,
    round: u32,
    opening_total: i64,
}

impl core::fmt::Debug for Table {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("positions", &self.board.len())
            .field("participants", &self.roster.len())
            .field("round", &self.round)
            .field("journal_entries", &self.journal.len())
            .finish_non_exhaustive()
    }
}

impl Table {
    /// Assemble a table. Seat `i` of `channels` belongs to participant `i`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTable`] if the channel count differs
    /// from the roster size or the release position is off the board.
    pub fn new(
        board: Board,
        roster: Roster,
        channels: ChannelHub,
        dice: Box<dyn Dice>,
        rules: RulesConfig,
    ) -> Result<Self, EngineError> {
        if channels.len() != roster.len() {
            return Err(EngineError::InvalidTable(format!(
                "{} channels for {} participants",
                channels.len(),
                roster.len()
            )));
        }
        if rules.release_position >= board.len() {
            return Err(EngineError::InvalidTable(format!(
                "release position {} is off the board",
                rules.release_position
            )));
        }
        let opening_total = roster.total_balance()?;
        Ok(Self {
            board,
            roster,
            channels,
            dice,
            journal: Journal::new(),
            rules,
            round: 0,
            opening_total,
        })
    }

    /// Assemble a table from configuration.
    ///
    /// # Errors
    ///
    /// See [`Table::new`].
    pub fn from_config(
        config: &GameConfig,
        channels: ChannelHub,
        dice: Box<dyn Dice>,
    ) -> Result<Self, EngineError> {
        Self::new(
            config.build_board()?,
            config.build_roster()?,
            channels,
            dice,
            config.rules,
        )
    }

    /// The board.
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The roster.
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    /// The roster, for the round loop's bookkeeping (deactivation).
    pub const fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Every committed transaction so far.
    pub const fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Turn rules.
    pub const fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// Current round, zero-based.
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Set the round stamped on new movement sessions and receipts.
    pub const fn set_round(&mut self, round: u32) {
        self.round = round;
    }

    /// The channel of one participant.
    ///
    /// # Errors
    ///
    /// Returns a channel error if the seat does not exist.
    pub fn seat(
        &mut self,
        participant: ParticipantIndex,
    ) -> Result<&mut dyn TextChannel, EngineError> {
        Ok(self.channels.seat(participant.get())?)
    }

    /// Send one line to one participant.
    ///
    /// # Errors
    ///
    /// Propagates channel failures.
    pub fn tell(&mut self, participant: ParticipantIndex, text: &str) -> Result<(), EngineError> {
        self.seat(participant)?.send(text)?;
        Ok(())
    }

    /// Send one line to every participant.
    ///
    /// # Errors
    ///
    /// Propagates channel failures.
    pub fn announce(&mut self, text: &str) -> Result<(), EngineError> {
        self.channels.broadcast().send(text)?;
        Ok(())
    }

    /// Roll the dice.
    ///
    /// # Errors
    ///
    /// Propagates dice failures.
    pub fn roll(&mut self) -> Result<DiceRoll, EngineError> {
        let roll = self.dice.roll()?;
        debug!(first = roll.first, second = roll.second, "dice rolled");
        Ok(roll)
    }

    /// Move a participant without resolving the arrival.
    ///
    /// # Errors
    ///
    /// Returns an unknown-index error for either argument.
    pub fn place(
        &mut self,
        participant: ParticipantIndex,
        position: PositionIndex,
    ) -> Result<(), EngineError> {
        self.board.get(position)?;
        self.roster.get_mut(participant)?.status.position = position;
        Ok(())
    }

    /// Snapshot the facts for `participant` at their current position.
    ///
    /// Returns `Ok(None)` for a neutral position; facts only exist for
    /// acquirable ones.
    ///
    /// # Errors
    ///
    /// Returns an unknown-index error if the participant, their position,
    /// or the recorded holder is missing.
    pub fn land_facts(
        &self,
        participant: ParticipantIndex,
    ) -> Result<Option<LandFacts>, EngineError> {
        let arriving = self.roster.get(participant)?;
        let position = self.board.get(arriving.status.position)?;
        if !position.info.acquirable {
            return Ok(None);
        }
        let holder = position
            .status
            .holder
            .map(|index| self.roster.get(index))
            .transpose()?;
        Ok(Some(LandFacts::derive(arriving, position, holder)?))
    }

    /// Run [`acquire`] for the snapshot and journal the receipt.
    ///
    /// # Errors
    ///
    /// Propagates the bank's precondition check.
    pub fn commit_acquire(&mut self, facts: &LandFacts) -> Result<Receipt, EngineError> {
        let participant = self.roster.get_mut(facts.participant)?;
        let position = self.board.get_mut(facts.position)?;
        let receipt = acquire(self.round, participant, position, facts)?;
        self.journal.record(receipt.clone());
        Ok(receipt)
    }

    /// Run [`pay_fee`] for the snapshot and journal the receipt.
    ///
    /// # Errors
    ///
    /// Propagates the bank's precondition check. A snapshot without a
    /// holder fails that check.
    pub fn commit_pay_fee(&mut self, facts: &LandFacts) -> Result<Receipt, EngineError> {
        let Some(holder) = facts.holder.as_ref().map(|h| h.index) else {
            return Err(tycoon_bank::BankError::PreconditionViolated {
                transaction: "pay_fee",
                guard: "snapshot holder",
            }
            .into());
        };
        let (payer, holder) = self.roster.pair_mut(facts.participant, holder)?;
        let receipt = pay_fee(self.round, payer, holder, facts)?;
        self.journal.record(receipt.clone());
        Ok(receipt)
    }

    /// Run [`incarcerate`] for the snapshot and journal the receipt.
    ///
    /// # Errors
    ///
    /// Propagates the bank's precondition check.
    pub fn commit_incarcerate(&mut self, facts: &LandFacts) -> Result<Receipt, EngineError> {
        let participant = self.roster.get_mut(facts.participant)?;
        let receipt = incarcerate(self.round, participant, facts)?;
        self.journal.record(receipt.clone());
        Ok(receipt)
    }

    /// Run [`release`] with the configured release position and journal
    /// the receipt.
    ///
    /// # Errors
    ///
    /// Propagates the bank's precondition check.
    pub fn commit_release(
        &mut self,
        participant: ParticipantIndex,
        roll: DiceRoll,
    ) -> Result<Receipt, EngineError> {
        let release_position = PositionIndex::new(self.rules.release_position);
        let participant = self.roster.get_mut(participant)?;
        let receipt = release(self.round, participant, roll, release_position)?;
        self.journal.record(receipt.clone());
        Ok(receipt)
    }

    /// Check that every unit of money is accounted for by the journal.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Conservation`] on a mismatch.
    pub fn verify_conservation(&self) -> Result<(), EngineError> {
        let current_total = self.roster.total_balance()?;
        match self.journal.verify_conservation(self.opening_total, current_total) {
            ConservationResult::Balanced => Ok(()),
            ConservationResult::Anomaly(anomaly) => Err(EngineError::Conservation(anomaly)),
        }
    }
}
