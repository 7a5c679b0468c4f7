//! Line-oriented text channels.
//!
//! A [`TextChannel`] carries narration out to a participant and reads one
//! response line back. The [`ChannelHub`] owns one channel per seat and
//! exposes a write-only [`Broadcast`] view that reaches all of them.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::ChannelError;

/// Marker printed before a prefixed console channel blocks on input.
pub const READLINE_START: &str = "[[READLINE_START]]";

/// Marker printed after a prefixed console channel finished reading.
pub const READLINE_FINISH: &str = "[[READLINE_FINISH]]";

/// A bidirectional, line-oriented text channel.
pub trait TextChannel {
    /// Send one line of text.
    fn send(&mut self, text: &str) -> Result<(), ChannelError>;

    /// Block until one line of input is available and return it without
    /// its trailing newline.
    fn read_line(&mut self) -> Result<String, ChannelError>;
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

/// A channel on the process's standard input and output.
#[derive(Debug, Clone, Default)]
pub struct ConsoleChannel {
    prefix: Option<String>,
    auto_enter: bool,
}

impl ConsoleChannel {
    /// An unprefixed console.
    pub const fn new() -> Self {
        Self {
            prefix: None,
            auto_enter: false,
        }
    }

    /// A console whose every line starts with `[[name]]`.
    ///
    /// Prefixed consoles announce reads with [`READLINE_START`] and
    /// [`READLINE_FINISH`] so several seats can share one terminal.
    pub fn with_prefix(name: &str) -> Self {
        Self {
            prefix: Some(format!("[[{name}]]")),
            auto_enter: false,
        }
    }

    /// Answer every read with an empty line instead of reading stdin.
    #[must_use]
    pub const fn auto_enter(mut self, auto_enter: bool) -> Self {
        self.auto_enter = auto_enter;
        self
    }

    fn format_line(&self, text: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix} {text}"),
            None => text.to_owned(),
        }
    }
}

impl TextChannel for ConsoleChannel {
    fn send(&mut self, text: &str) -> Result<(), ChannelError> {
        let line = self.format_line(text);
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{line}")?;
        stdout.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, ChannelError> {
        if self.auto_enter {
            return Ok(String::new());
        }
        let announce = self.prefix.is_some();
        if announce {
            self.send(READLINE_START)?;
        }
        let mut line = String::new();
        let read = std::io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Err(ChannelError::InputClosed);
        }
        if announce {
            self.send(READLINE_FINISH)?;
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }
}

// ---------------------------------------------------------------------------
// Scripted
// ---------------------------------------------------------------------------

/// A channel that answers from a queue and records everything sent to it.
///
/// Used by tests and by replays of recorded games.
#[derive(Debug, Clone, Default)]
pub struct ScriptedChannel {
    responses: VecDeque<String>,
    sent: Vec<String>,
}

impl ScriptedChannel {
    /// A channel that will answer with `responses`, in order.
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            sent: Vec::new(),
        }
    }

    /// Queue another response.
    pub fn push_response(&mut self, response: impl Into<String>) {
        self.responses.push_back(response.into());
    }

    /// Every line sent so far.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// Responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl TextChannel for ScriptedChannel {
    fn send(&mut self, text: &str) -> Result<(), ChannelError> {
        self.sent.push(text.to_owned());
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, ChannelError> {
        self.responses.pop_front().ok_or(ChannelError::ScriptExhausted)
    }
}

// ---------------------------------------------------------------------------
// Hub and broadcast
// ---------------------------------------------------------------------------

/// One channel per seat, addressed by zero-based seat number.
#[derive(Default)]
pub struct ChannelHub {
    seats: Vec<Box<dyn TextChannel>>,
}

impl core::fmt::Debug for ChannelHub {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ChannelHub")
            .field("seats", &self.seats.len())
            .finish()
    }
}

impl ChannelHub {
    /// An empty hub.
    pub const fn new() -> Self {
        Self { seats: Vec::new() }
    }

    /// Register the channel for the next seat and return its seat number.
    pub fn add(&mut self, channel: Box<dyn TextChannel>) -> usize {
        self.seats.push(channel);
        self.seats.len().saturating_sub(1)
    }

    /// Number of seats.
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether no seat is registered.
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// The channel for `seat`.
    pub fn seat(&mut self, seat: usize) -> Result<&mut dyn TextChannel, ChannelError> {
        match self.seats.get_mut(seat) {
            Some(channel) => Ok(channel.as_mut()),
            None => Err(ChannelError::UnknownSeat(seat)),
        }
    }

    /// A write-only view reaching every seat.
    pub fn broadcast(&mut self) -> Broadcast<'_> {
        Broadcast {
            seats: &mut self.seats,
        }
    }
}

/// Write-only channel reaching every seat of a [`ChannelHub`].
pub struct Broadcast<'a> {
    seats: &'a mut [Box<dyn TextChannel>],
}

impl TextChannel for Broadcast<'_> {
    fn send(&mut self, text: &str) -> Result<(), ChannelError> {
        for seat in self.seats.iter_mut() {
            seat.send(text)?;
        }
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, ChannelError> {
        Err(ChannelError::BroadcastRead)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    /// A scripted channel whose log stays readable after it is boxed.
    #[derive(Clone, Default)]
    struct SharedLog(Rc<RefCell<Vec<String>>>);

    impl TextChannel for SharedLog {
        fn send(&mut self, text: &str) -> Result<(), ChannelError> {
            self.0.borrow_mut().push(text.to_owned());
            Ok(())
        }

        fn read_line(&mut self) -> Result<String, ChannelError> {
            Err(ChannelError::ScriptExhausted)
        }
    }

    #[test]
    fn scripted_channel_answers_in_order() {
        let mut channel = ScriptedChannel::new(["a", "b"]);
        assert_eq!(channel.read_line().unwrap(), "a");
        assert_eq!(channel.read_line().unwrap(), "b");
        assert!(matches!(channel.read_line(), Err(ChannelError::ScriptExhausted)));
    }

    #[test]
    fn broadcast_reaches_every_seat() {
        let first = SharedLog::default();
        let second = SharedLog::default();
        let mut hub = ChannelHub::new();
        hub.add(Box::new(first.clone()));
        hub.add(Box::new(second.clone()));

        hub.broadcast().send("Player Alpha was in prison.").unwrap();

        assert_eq!(first.0.borrow().as_slice(), ["Player Alpha was in prison."]);
        assert_eq!(second.0.borrow().as_slice(), ["Player Alpha was in prison."]);
    }

    #[test]
    fn broadcast_cannot_be_read() {
        let mut hub = ChannelHub::new();
        hub.add(Box::new(ScriptedChannel::new(["x"])));
        assert!(matches!(
            hub.broadcast().read_line(),
            Err(ChannelError::BroadcastRead)
        ));
    }

    #[test]
    fn unknown_seat_is_an_error() {
        let mut hub = ChannelHub::new();
        assert!(matches!(hub.seat(2), Err(ChannelError::UnknownSeat(2))));
    }

    #[test]
    fn prefixed_console_formats_lines() {
        let console = ConsoleChannel::with_prefix("Alpha");
        assert_eq!(console.format_line("hello"), "[[Alpha]] hello");
        assert_eq!(ConsoleChannel::new().format_line("hello"), "hello");
    }

    #[test]
    fn auto_enter_console_returns_empty_line() {
        let mut console = ConsoleChannel::new().auto_enter(true);
        assert_eq!(console.read_line().unwrap(), "");
    }
}
