//! Error types for channels and the menu dispatcher.

/// Errors raised while sending to or reading from a channel.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The underlying terminal or stream failed.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input stream reached end of file.
    #[error("input stream closed")]
    InputClosed,

    /// `read_line` was called on the broadcast channel, which has no reader.
    #[error("the broadcast channel cannot be read from")]
    BroadcastRead,

    /// A scripted channel ran out of queued responses.
    #[error("scripted channel has no responses left")]
    ScriptExhausted,

    /// No channel is registered for the seat.
    #[error("no channel for seat {0}")]
    UnknownSeat(usize),

    /// An automated decider found no rule and has no fallback.
    #[error("decider could not choose a response")]
    NoDecision,
}

/// Errors raised while building or presenting a menu.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    /// A menu must offer at least one item.
    #[error("menu has no items")]
    Empty,

    /// An item key is blank.
    #[error("menu item key is empty")]
    EmptyKey,

    /// An item label is blank.
    #[error("menu item {key} has an empty label")]
    EmptyLabel {
        /// Key of the offending item.
        key: String,
    },

    /// Two keys collide after case folding.
    #[error("duplicate menu key {key}")]
    DuplicateKey {
        /// The colliding key, uppercased.
        key: String,
    },

    /// Too many consecutive unrecognized responses.
    #[error("[[BAD_INPUT_COUNT_EXCEED]] after {attempts} bad responses")]
    RetryExhausted {
        /// Number of bad responses received.
        attempts: u32,
    },

    /// The channel failed while presenting the menu.
    #[error(transparent)]
    Channel(#[from] ChannelError),
}
