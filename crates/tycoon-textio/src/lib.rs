//! Text channels, interaction history, and the menu protocol for the Tycoon
//! engine.
//!
//! Every exchange with a participant is a line of text. Humans type at a
//! console, tests feed a script, and automated participants answer through
//! a [`Decider`] that reads the [`InteractionHistory`] of everything their
//! seat has seen.
//!
//! # Modules
//!
//! - [`channel`] -- The [`TextChannel`] trait, console and scripted
//!   channels, and the [`ChannelHub`] that owns one channel per seat.
//! - [`history`] -- Bounded [`InteractionHistory`] with tail and
//!   last-menu-block queries.
//! - [`agent`] -- [`AgentChannel`] and the [`Decider`] trait.
//! - [`menu`] -- Menu definitions and the dispatcher.
//! - [`error`] -- [`ChannelError`] and [`MenuError`].
//!
//! # Menu protocol
//!
//! The literals below are read by automated consumers and must not change:
//!
//! ```text
//! [[MENU_ITEMS_BEGIN]]
//! [[RTD]] : Roll The Dice
//! [[BS]] : Bank Services
//! [[MENU_ITEMS_END]]
//! ```
//!
//! An unrecognized response is answered with `[[BAD_INPUT]]`; the twentieth
//! consecutive one with `[[BAD_INPUT_COUNT_EXCEED]]`, after which the
//! dispatcher gives up with [`MenuError::RetryExhausted`].

pub mod agent;
pub mod channel;
pub mod error;
pub mod history;
pub mod menu;

// Re-export primary types at crate root.
pub use agent::{AgentChannel, Decider};
pub use channel::{Broadcast, ChannelHub, ConsoleChannel, ScriptedChannel, TextChannel};
pub use error::{ChannelError, MenuError};
pub use history::{Direction, HistoryEntry, InteractionHistory, MenuBlock, TailQuery};
pub use menu::{
    BAD_INPUT, BAD_INPUT_COUNT_EXCEED, CommandHandler, DEFAULT_MAX_BAD_INPUT, MENU_ITEMS_BEGIN,
    MENU_ITEMS_END, Menu, MenuItem,
};
