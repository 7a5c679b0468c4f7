//! Rule-based decider for automated seats.
//!
//! Reads the last menu block in the seat's history and answers with the
//! first rule whose key is on offer. Rules are checked in priority order,
//! so a menu offering both `RTD` and `ALP` is answered with `RTD`. When no
//! rule matches, the question is handed to a fallback channel (usually a
//! person at the console).

use tracing::{debug, warn};

use tycoon_textio::{ChannelError, Decider, InteractionHistory, TextChannel};

/// Keys the decider knows how to answer, highest priority first.
const RULES: &[(&str, &str)] = &[
    ("RTD", "roll the dice"),
    ("ALP", "accept land purchase"),
    ("C", "continue"),
    ("Q", "leave submenu"),
];

/// Answers menus by fixed priority, deferring to a fallback channel.
///
/// The default decider has no fallback, so an unmatched menu is an error.
#[derive(Default)]
pub struct RuleDecider {
    fallback: Option<Box<dyn TextChannel>>,
}

impl RuleDecider {
    /// A decider that asks `fallback` when no rule matches.
    pub fn with_fallback(fallback: Box<dyn TextChannel>) -> Self {
        Self {
            fallback: Some(fallback),
        }
    }
}

impl Decider for RuleDecider {
    fn decide(&mut self, history: &InteractionHistory) -> Result<String, ChannelError> {
        if let Some(block) = history.last_menu_block() {
            if let Some((key, rule)) = RULES.iter().find(|(key, _)| block.offers(key)) {
                debug!(key, rule, "rule fired");
                return Ok((*key).to_owned());
            }
            debug!(offered = ?block.keys(), "no rule matched");
        }

        let Some(fallback) = self.fallback.as_mut() else {
            warn!("no rule matched and no fallback channel");
            return Err(ChannelError::NoDecision);
        };
        if let Some(block) = history.last_menu_block() {
            for line in block.lines() {
                fallback.send(line)?;
            }
        }
        fallback.read_line()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use tycoon_textio::{MENU_ITEMS_BEGIN, MENU_ITEMS_END, ScriptedChannel};

    use super::*;

    fn history(options: &[&str]) -> InteractionHistory {
        let mut history = InteractionHistory::new(32);
        history.record_output("Player Alpha, please roll the dice.");
        history.record_output(MENU_ITEMS_BEGIN);
        for key in options {
            history.record_output(format!("[[{key}]] : option"));
        }
        history.record_output(MENU_ITEMS_END);
        history
    }

    struct Shared(Rc<RefCell<ScriptedChannel>>);

    impl TextChannel for Shared {
        fn send(&mut self, text: &str) -> Result<(), ChannelError> {
            self.0.borrow_mut().send(text)
        }

        fn read_line(&mut self) -> Result<String, ChannelError> {
            self.0.borrow_mut().read_line()
        }
    }

    #[test]
    fn roll_beats_purchase() {
        let mut decider = RuleDecider::default();
        assert_eq!(decider.decide(&history(&["ALP", "RTD"])).unwrap(), "RTD");
    }

    #[test]
    fn each_minigame_menu_has_an_answer() {
        let mut decider = RuleDecider::default();
        assert_eq!(decider.decide(&history(&["RTD", "BS"])).unwrap(), "RTD");
        assert_eq!(
            decider.decide(&history(&["LI", "REI", "ALP", "DLP"])).unwrap(),
            "ALP"
        );
        assert_eq!(decider.decide(&history(&["LI", "RI", "C"])).unwrap(), "C");
        assert_eq!(decider.decide(&history(&["MS", "Q"])).unwrap(), "Q");
        assert_eq!(decider.decide(&history(&["LOP", "Q"])).unwrap(), "Q");
    }

    #[test]
    fn unmatched_menu_without_fallback_is_an_error() {
        let mut decider = RuleDecider::default();
        assert!(matches!(
            decider.decide(&history(&["LI", "DLP"])),
            Err(ChannelError::NoDecision)
        ));
        assert!(matches!(
            decider.decide(&InteractionHistory::new(4)),
            Err(ChannelError::NoDecision)
        ));
    }

    #[test]
    fn unmatched_menu_goes_to_fallback() {
        let shared = Rc::new(RefCell::new(ScriptedChannel::new(["DLP"])));
        let mut decider = RuleDecider::with_fallback(Box::new(Shared(Rc::clone(&shared))));

        assert_eq!(decider.decide(&history(&["LI", "DLP"])).unwrap(), "DLP");
        let shown = shared.borrow().sent().to_vec();
        assert_eq!(shown.first().map(String::as_str), Some(MENU_ITEMS_BEGIN));
        assert!(shown.iter().any(|l| l == "[[DLP]] : option"));
    }
}
