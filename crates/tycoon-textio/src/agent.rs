//! Automated participants.
//!
//! An [`AgentChannel`] records every line sent to its seat in an
//! [`InteractionHistory`] and, when asked for input, hands that history to a
//! [`Decider`]. The decider's answer is recorded too, so the history always
//! reflects the full conversation.

use tracing::debug;

use crate::channel::{ConsoleChannel, TextChannel};
use crate::error::ChannelError;
use crate::history::InteractionHistory;

/// Chooses a response by inspecting the interaction history.
pub trait Decider {
    /// Produce the next response line.
    fn decide(&mut self, history: &InteractionHistory) -> Result<String, ChannelError>;
}

impl<F> Decider for F
where
    F: FnMut(&InteractionHistory) -> Result<String, ChannelError>,
{
    fn decide(&mut self, history: &InteractionHistory) -> Result<String, ChannelError> {
        self(history)
    }
}

/// A channel driven by a [`Decider`] instead of a person.
pub struct AgentChannel {
    history: InteractionHistory,
    decider: Box<dyn Decider>,
    echo: Option<ConsoleChannel>,
}

impl core::fmt::Debug for AgentChannel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AgentChannel")
            .field("history", &self.history.len())
            .field("echo", &self.echo.is_some())
            .finish_non_exhaustive()
    }
}

impl AgentChannel {
    /// An agent keeping at most `capacity` history entries.
    pub fn new(decider: Box<dyn Decider>, capacity: usize) -> Self {
        Self {
            history: InteractionHistory::new(capacity),
            decider,
            echo: None,
        }
    }

    /// Mirror every line, including the agent's own responses, to `console`.
    #[must_use]
    pub fn with_echo(mut self, console: ConsoleChannel) -> Self {
        self.echo = Some(console);
        self
    }

    /// Everything exchanged so far.
    pub const fn history(&self) -> &InteractionHistory {
        &self.history
    }
}

impl TextChannel for AgentChannel {
    fn send(&mut self, text: &str) -> Result<(), ChannelError> {
        self.history.record_output(text);
        if let Some(echo) = self.echo.as_mut() {
            echo.send(text)?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, ChannelError> {
        let response = self.decider.decide(&self.history)?;
        debug!(response = %response, "agent responded");
        self.history.record_input(response.as_str());
        if let Some(echo) = self.echo.as_mut() {
            echo.send(&format!("> {response}"))?;
        }
        Ok(response)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::history::{Direction, TailQuery};
    use crate::menu::{MENU_ITEMS_BEGIN, MENU_ITEMS_END};

    fn first_key(history: &InteractionHistory) -> Result<String, ChannelError> {
        history
            .last_menu_block()
            .and_then(|block| block.keys().first().map(|k| (*k).to_owned()))
            .ok_or(ChannelError::NoDecision)
    }

    #[test]
    fn agent_answers_from_last_menu() {
        let mut agent = AgentChannel::new(Box::new(first_key), 32);
        agent.send(MENU_ITEMS_BEGIN).unwrap();
        agent.send("[[RTD]] : Roll The Dice").unwrap();
        agent.send(MENU_ITEMS_END).unwrap();

        assert_eq!(agent.read_line().unwrap(), "RTD");
    }

    #[test]
    fn responses_are_recorded_as_inputs() {
        let always_quit = |_: &InteractionHistory| -> Result<String, ChannelError> {
            Ok(String::from("Q"))
        };
        let mut agent = AgentChannel::new(Box::new(always_quit), 8);
        agent.send("hello").unwrap();
        agent.read_line().unwrap();

        let last = agent.history().iter().last().unwrap();
        assert_eq!(last.direction, Direction::Input);
        assert_eq!(agent.history().tail(TailQuery::default()), ["hello", "Q"]);
    }

    #[test]
    fn decider_failure_propagates() {
        let mut agent = AgentChannel::new(Box::new(first_key), 8);
        assert!(matches!(agent.read_line(), Err(ChannelError::NoDecision)));
    }
}
