//! The round loop.
//!
//! Plays rounds until fewer than two participants are active or the round
//! limit is reached. Within a round every seat takes one turn in order.
//!
//! A seat whose input fails (retries exhausted, console closed, or an
//! automated seat with no answer) leaves the game; the round continues with
//! the remaining seats. Any other engine error ends the game.

use tracing::{info, warn};

use tycoon_core::{EngineError, Table, TurnSummary, run_turn};
use tycoon_textio::{
    AgentChannel, ChannelError, ChannelHub, ConsoleChannel, MenuError, TextChannel,
};
use tycoon_types::{Participant, ParticipantIndex};

use crate::config::RunnerConfig;
use crate::error::RunnerError;
use crate::rule_engine::RuleDecider;

/// Final position of one participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// Display name.
    pub name: String,
    /// Money on hand.
    pub balance: i64,
    /// Positions held.
    pub holdings: usize,
    /// Whether the participant was still playing.
    pub active: bool,
}

/// Summary of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameReport {
    /// Rounds fully played.
    pub rounds_played: u32,
    /// Every participant, in seating order.
    pub standings: Vec<Standing>,
}

/// Drives a [`Table`] round by round.
#[derive(Debug)]
pub struct Game {
    table: Table,
    max_rounds: u32,
}

impl Game {
    /// A game over `table` lasting at most `max_rounds` rounds.
    pub const fn new(table: Table, max_rounds: u32) -> Self {
        Self { table, max_rounds }
    }

    /// The table, for inspection after a run.
    pub const fn table(&self) -> &Table {
        &self.table
    }

    /// Play until the game is over.
    pub fn run(&mut self) -> Result<GameReport, RunnerError> {
        let seats: Vec<ParticipantIndex> =
            self.table.roster().iter().map(Participant::index).collect();
        let mut rounds_played: u32 = 0;

        while rounds_played < self.max_rounds && self.is_playing() {
            self.table.set_round(rounds_played);
            let round = rounds_played.saturating_add(1);
            info!(round, "round started");

            for &participant in &seats {
                if !self.is_playing() {
                    break;
                }
                self.play_turn(round, participant)?;
            }
            rounds_played = round;
        }

        let report = self.report(rounds_played)?;
        info!(
            rounds_played,
            active = self.table.roster().active_count(),
            transactions = self.table.journal().len(),
            "game over"
        );
        Ok(report)
    }

    fn is_playing(&self) -> bool {
        self.table.roster().active_count() >= 2
    }

    fn play_turn(&mut self, round: u32, participant: ParticipantIndex) -> Result<(), RunnerError> {
        let seat = self.table.roster().get(participant)?;
        if !seat.status.active {
            return Ok(());
        }
        let banner = format!(
            "round {round}, player {}, name {}",
            participant.get().saturating_add(1),
            seat.info.name
        );
        self.table.announce(&banner)?;

        match run_turn(&mut self.table, participant) {
            Ok(TurnSummary::Skipped) => Ok(()),
            Ok(summary) => {
                info!(round, participant = %participant, summary = ?summary, "turn played");
                Ok(())
            }
            Err(e) if is_seat_failure(&e) => {
                warn!(participant = %participant, error = %e, "seat failed; leaving the game");
                self.table.roster_mut().deactivate(participant)?;
                let name = self.table.roster().get(participant)?.info.name.clone();
                self.table.announce(&format!("Player {name} has left the game."))?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn report(&mut self, rounds_played: u32) -> Result<GameReport, RunnerError> {
        let standings: Vec<Standing> = self
            .table
            .roster()
            .iter()
            .map(|p| Standing {
                name: p.info.name.clone(),
                balance: p.status.balance,
                holdings: self.table.board().held_by(p.index()).count(),
                active: p.status.active,
            })
            .collect();

        self.table
            .announce(&format!("Game over after {rounds_played} rounds."))?;
        for standing in &standings {
            self.table.announce(&format!(
                "{}: {} dollars, {} squares",
                standing.name, standing.balance, standing.holdings
            ))?;
        }
        Ok(GameReport {
            rounds_played,
            standings,
        })
    }
}

/// Failures that belong to one seat's input rather than to the game.
fn is_seat_failure(error: &EngineError) -> bool {
    matches!(
        error,
        EngineError::Menu(
            MenuError::RetryExhausted { .. }
                | MenuError::Channel(ChannelError::InputClosed | ChannelError::NoDecision)
        ) | EngineError::Channel(ChannelError::InputClosed | ChannelError::NoDecision)
    )
}

/// One channel per participant: the console for human seats, a
/// rule-driven agent for the rest.
pub fn seat_channels<'a>(
    config: &RunnerConfig,
    names: impl IntoIterator<Item = &'a str>,
) -> ChannelHub {
    let mut hub = ChannelHub::new();
    for (seat, name) in names.into_iter().enumerate() {
        let channel: Box<dyn TextChannel> = if config.human_seats.contains(&seat) {
            Box::new(ConsoleChannel::with_prefix(name))
        } else {
            let decider = RuleDecider::with_fallback(Box::new(ConsoleChannel::with_prefix(name)));
            let agent = AgentChannel::new(Box::new(decider), config.history_capacity);
            if config.echo {
                Box::new(agent.with_echo(ConsoleChannel::with_prefix(name)))
            } else {
                Box::new(agent)
            }
        };
        hub.add(channel);
    }
    hub
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tycoon_core::{GameConfig, ScriptedDice};
    use tycoon_textio::ScriptedChannel;

    use super::*;

    fn automated_hub(seats: usize) -> ChannelHub {
        let mut hub = ChannelHub::new();
        for _ in 0..seats {
            hub.add(Box::new(AgentChannel::new(Box::new(RuleDecider::default()), 64)));
        }
        hub
    }

    fn two_player_config(max_rounds: u32) -> GameConfig {
        let mut config = GameConfig::parse("participants: [Ann, Bo]").unwrap();
        config.rules.max_rounds = max_rounds;
        config
    }

    #[test]
    fn automated_game_runs_to_the_round_limit() {
        let config = two_player_config(3);
        let rolls = [(1, 2), (2, 2), (3, 1), (1, 1), (2, 3), (4, 1)];
        let table =
            Table::from_config(&config, automated_hub(2), Box::new(ScriptedDice::new(rolls)))
                .unwrap();
        let mut game = Game::new(table, config.rules.max_rounds);

        let report = game.run().unwrap();

        assert_eq!(report.rounds_played, 3);
        assert_eq!(report.standings.len(), 2);
        assert!(report.standings.iter().all(|s| s.active));
        // Ann walks 3, 4, then 5 squares and buys 3 (30), 7 (50), and 12 (75).
        let ann = report.standings.first().unwrap();
        assert_eq!(ann.holdings, 3);
        assert_eq!(ann.balance, 45);
        game.table().verify_conservation().unwrap();
    }

    #[test]
    fn failing_seat_leaves_and_the_game_ends() {
        let config = two_player_config(5);
        let mut hub = ChannelHub::new();
        hub.add(Box::new(ScriptedChannel::new(["nope"; 20])));
        hub.add(Box::new(AgentChannel::new(Box::new(RuleDecider::default()), 64)));
        let table = Table::from_config(&config, hub, Box::new(ScriptedDice::new([]))).unwrap();
        let mut game = Game::new(table, config.rules.max_rounds);

        let report = game.run().unwrap();

        assert_eq!(report.rounds_played, 1);
        assert!(!report.standings.first().unwrap().active);
        assert_eq!(game.table().roster().active_count(), 1);
    }

    #[test]
    fn dice_failure_ends_the_game_with_an_error() {
        let config = two_player_config(5);
        let table =
            Table::from_config(&config, automated_hub(2), Box::new(ScriptedDice::new([])))
                .unwrap();
        let mut game = Game::new(table, config.rules.max_rounds);

        assert!(matches!(
            game.run(),
            Err(RunnerError::Engine(EngineError::DiceExhausted))
        ));
    }

    #[test]
    fn seat_failures_are_told_apart_from_game_failures() {
        assert!(is_seat_failure(&EngineError::Menu(MenuError::RetryExhausted {
            attempts: 20
        })));
        assert!(is_seat_failure(&EngineError::Channel(ChannelError::InputClosed)));
        assert!(!is_seat_failure(&EngineError::DiceExhausted));
    }
}
