//! Menu definitions and the dispatcher.
//!
//! A [`Menu`] is a list of [`MenuItem`]s, each bundling a short key, a
//! label, and the ordered actions to commit when it is chosen. Actions are
//! plain values (usually a small enum owned by the caller); the dispatcher
//! never interprets them. It hands each one, in order, to the caller's
//! [`CommandHandler`] once a valid choice has been read.
//!
//! The dispatcher has no notion of "cancel". Whether a chosen key ends an
//! interaction is decided by the caller's own loop.

use tracing::{debug, warn};

use crate::channel::TextChannel;
use crate::error::MenuError;

/// Opens the block of menu options.
pub const MENU_ITEMS_BEGIN: &str = "[[MENU_ITEMS_BEGIN]]";

/// Closes the block of menu options.
pub const MENU_ITEMS_END: &str = "[[MENU_ITEMS_END]]";

/// Sent after every unrecognized response.
pub const BAD_INPUT: &str = "[[BAD_INPUT]]";

/// Sent once before the dispatcher gives up.
pub const BAD_INPUT_COUNT_EXCEED: &str = "[[BAD_INPUT_COUNT_EXCEED]]";

/// Consecutive unrecognized responses tolerated before giving up.
pub const DEFAULT_MAX_BAD_INPUT: u32 = 20;

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem<A> {
    key: String,
    label: String,
    actions: Vec<A>,
}

impl<A> MenuItem<A> {
    /// An option that commits `actions`, in order, when chosen.
    pub fn new(key: impl Into<String>, label: impl Into<String>, actions: Vec<A>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            actions,
        }
    }

    /// The key as it is displayed.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Human-readable description.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Actions committed when chosen.
    pub fn actions(&self) -> &[A] {
        &self.actions
    }
}

/// Executes the actions of a chosen [`MenuItem`] and supplies the channel
/// the menu is presented on.
pub trait CommandHandler<A> {
    /// Error type of the handler. Menu failures convert into it.
    type Error: From<MenuError>;

    /// The channel of the participant being asked.
    fn channel(&mut self) -> Result<&mut dyn TextChannel, Self::Error>;

    /// Commit one action.
    fn execute(&mut self, action: &A) -> Result<(), Self::Error>;
}

/// A validated set of options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu<A> {
    items: Vec<MenuItem<A>>,
}

impl<A> Menu<A> {
    /// Validate and build a menu.
    ///
    /// # Errors
    ///
    /// Fails if there are no items, a key or label is blank, or two keys
    /// are equal ignoring case.
    pub fn new(items: Vec<MenuItem<A>>) -> Result<Self, MenuError> {
        if items.is_empty() {
            return Err(MenuError::Empty);
        }

        let mut seen: Vec<String> = Vec::with_capacity(items.len());
        for item in &items {
            let folded = item.key.trim().to_uppercase();
            if folded.is_empty() {
                return Err(MenuError::EmptyKey);
            }
            if item.label.trim().is_empty() {
                return Err(MenuError::EmptyLabel {
                    key: item.key.clone(),
                });
            }
            if seen.contains(&folded) {
                return Err(MenuError::DuplicateKey { key: folded });
            }
            seen.push(folded);
        }

        Ok(Self { items })
    }

    /// The options, in display order.
    pub fn items(&self) -> &[MenuItem<A>] {
        &self.items
    }

    /// Position of the item whose key matches an already normalized choice.
    fn find(&self, choice: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.key.trim().to_uppercase() == choice)
    }

    /// Print the options on `channel` and read responses until one matches
    /// a key. Returns the index of the chosen item.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::RetryExhausted`] on the `max_bad_input`-th
    /// consecutive unrecognized response, and [`MenuError::Channel`] if the
    /// channel fails.
    pub fn choose(
        &self,
        channel: &mut dyn TextChannel,
        max_bad_input: u32,
    ) -> Result<usize, MenuError> {
        let max_bad_input = max_bad_input.max(1);

        channel.send(MENU_ITEMS_BEGIN)?;
        for item in &self.items {
            channel.send(&format!("[[{}]] : {}", item.key, item.label))?;
        }
        channel.send(MENU_ITEMS_END)?;
        debug!(options = self.items.len(), "menu presented");

        let mut bad_inputs: u32 = 0;
        loop {
            let choice = channel.read_line()?.trim().to_uppercase();
            if let Some(index) = self.find(&choice) {
                return Ok(index);
            }

            channel.send(BAD_INPUT)?;
            bad_inputs = bad_inputs.saturating_add(1);
            warn!(choice = %choice, bad_inputs, "unrecognized menu response");

            if bad_inputs >= max_bad_input {
                channel.send(BAD_INPUT_COUNT_EXCEED)?;
                warn!(bad_inputs, "menu retry limit reached");
                return Err(MenuError::RetryExhausted {
                    attempts: bad_inputs,
                });
            }
        }
    }

    /// Present the menu on the handler's channel, then commit every action
    /// of the chosen item in order. Returns the chosen key.
    ///
    /// # Errors
    ///
    /// Propagates menu failures (converted into `H::Error`) and the first
    /// error returned by an action. Actions after a failing one are not run.
    pub fn present<H>(&self, handler: &mut H, max_bad_input: u32) -> Result<&str, H::Error>
    where
        H: CommandHandler<A>,
    {
        let index = {
            let channel = handler.channel()?;
            self.choose(channel, max_bad_input)?
        };
        let item = self.items.get(index).ok_or(MenuError::Empty)?;
        debug!(key = %item.key, actions = item.actions.len(), "menu choice committed");

        for action in &item.actions {
            handler.execute(action)?;
        }
        Ok(item.key.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::channel::ScriptedChannel;
    use crate::error::ChannelError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Step {
        Roll,
        Report,
        Fail,
    }

    #[derive(Debug, thiserror::Error)]
    enum TestError {
        #[error(transparent)]
        Menu(#[from] MenuError),
        #[error("action failed")]
        Action,
    }

    struct Recorder {
        channel: ScriptedChannel,
        executed: Vec<Step>,
    }

    impl Recorder {
        fn new(responses: &[&str]) -> Self {
            Self {
                channel: ScriptedChannel::new(responses.iter().copied()),
                executed: Vec::new(),
            }
        }
    }

    impl CommandHandler<Step> for Recorder {
        type Error = TestError;

        fn channel(&mut self) -> Result<&mut dyn TextChannel, TestError> {
            Ok(&mut self.channel)
        }

        fn execute(&mut self, action: &Step) -> Result<(), TestError> {
            if *action == Step::Fail {
                return Err(TestError::Action);
            }
            self.executed.push(*action);
            Ok(())
        }
    }

    fn roll_menu() -> Menu<Step> {
        Menu::new(vec![
            MenuItem::new("RTD", "Roll The Dice", vec![Step::Roll, Step::Report]),
            MenuItem::new("BS", "Bank Services", vec![]),
        ])
        .unwrap()
    }

    #[test]
    fn prints_protocol_block() {
        let mut recorder = Recorder::new(&["rtd"]);
        let menu = roll_menu();
        menu.present(&mut recorder, DEFAULT_MAX_BAD_INPUT).unwrap();

        assert_eq!(
            recorder.channel.sent(),
            [
                MENU_ITEMS_BEGIN,
                "[[RTD]] : Roll The Dice",
                "[[BS]] : Bank Services",
                MENU_ITEMS_END,
            ]
        );
    }

    #[test]
    fn choice_is_trimmed_and_case_folded() {
        let mut recorder = Recorder::new(&["  rtd \t"]);
        let menu = roll_menu();
        let key = menu.present(&mut recorder, DEFAULT_MAX_BAD_INPUT).unwrap();
        assert_eq!(key, "RTD");
    }

    #[test]
    fn actions_run_in_order() {
        let mut recorder = Recorder::new(&["RTD"]);
        let menu = roll_menu();
        menu.present(&mut recorder, DEFAULT_MAX_BAD_INPUT).unwrap();
        assert_eq!(recorder.executed, [Step::Roll, Step::Report]);
    }

    #[test]
    fn item_without_actions_still_returns_key() {
        let mut recorder = Recorder::new(&["bs"]);
        let menu = roll_menu();
        let key = menu.present(&mut recorder, DEFAULT_MAX_BAD_INPUT).unwrap();
        assert_eq!(key, "BS");
        assert!(recorder.executed.is_empty());
    }

    #[test]
    fn bad_input_is_reported_then_retried() {
        let mut recorder = Recorder::new(&["roll", "", "RTD"]);
        let menu = roll_menu();
        menu.present(&mut recorder, DEFAULT_MAX_BAD_INPUT).unwrap();

        let bad = recorder.channel.sent().iter().filter(|l| *l == BAD_INPUT).count();
        assert_eq!(bad, 2);
    }

    #[test]
    fn nineteen_bad_inputs_are_tolerated() {
        let mut responses = vec!["nope"; 19];
        responses.push("RTD");
        let mut recorder = Recorder::new(&responses);

        let menu = roll_menu();

        let key = menu.present(&mut recorder, DEFAULT_MAX_BAD_INPUT).unwrap();

        assert_eq!(key, "RTD");
        assert!(!recorder.channel.sent().iter().any(|l| l == BAD_INPUT_COUNT_EXCEED));
    }

    #[test]
    fn twentieth_bad_input_exhausts_retries() {
        let mut responses = vec!["nope"; 20];
        responses.push("RTD");
        let mut recorder = Recorder::new(&responses);

        let menu = roll_menu();

        let result = menu.present(&mut recorder, DEFAULT_MAX_BAD_INPUT);

        assert!(matches!(
            result,
            Err(TestError::Menu(MenuError::RetryExhausted { attempts: 20 }))
        ));
        assert_eq!(recorder.channel.remaining(), 1);
        assert_eq!(
            recorder.channel.sent().last().map(String::as_str),
            Some(BAD_INPUT_COUNT_EXCEED)
        );
        assert!(recorder.executed.is_empty());
    }

    #[test]
    fn failing_action_stops_the_sequence() {
        let menu = Menu::new(vec![MenuItem::new(
            "X",
            "Explode",
            vec![Step::Roll, Step::Fail, Step::Report],
        )])
        .unwrap();
        let mut recorder = Recorder::new(&["x"]);

        let result = menu.present(&mut recorder, DEFAULT_MAX_BAD_INPUT);

        assert!(matches!(result, Err(TestError::Action)));
        assert_eq!(recorder.executed, [Step::Roll]);
    }

    #[test]
    fn exhausted_script_surfaces_channel_error() {
        let mut recorder = Recorder::new(&[]);
        let menu = roll_menu();
        let result = menu.present(&mut recorder, DEFAULT_MAX_BAD_INPUT);
        assert!(matches!(
            result,
            Err(TestError::Menu(MenuError::Channel(ChannelError::ScriptExhausted)))
        ));
    }

    #[test]
    fn duplicate_keys_are_rejected_ignoring_case() {
        let result = Menu::new(vec![
            MenuItem::new("Q", "Quit", vec![Step::Report]),
            MenuItem::new("q", "Quit again", vec![]),
        ]);
        assert!(matches!(result, Err(MenuError::DuplicateKey { key }) if key == "Q"));
    }

    #[test]
    fn blank_labels_and_keys_are_rejected() {
        assert!(matches!(
            Menu::new(vec![MenuItem::new("A", "  ", Vec::<Step>::new())]),
            Err(MenuError::EmptyLabel { .. })
        ));
        assert!(matches!(
            Menu::new(vec![MenuItem::new(" ", "Label", Vec::<Step>::new())]),
            Err(MenuError::EmptyKey)
        ));
        assert!(matches!(Menu::<Step>::new(vec![]), Err(MenuError::Empty)));
    }
}
