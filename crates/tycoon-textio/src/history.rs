//! Bounded record of everything exchanged with one seat.
//!
//! Automated deciders replay this log to work out which menu they are
//! looking at. The log is a ring buffer: once `capacity` entries are held,
//! the oldest entry is dropped for every new one.

use std::collections::VecDeque;

use crate::menu::{MENU_ITEMS_BEGIN, MENU_ITEMS_END};

/// Which way a history entry travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Text sent to the participant.
    Output,
    /// A response read from the participant.
    Input,
}

/// One line of the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Output or input.
    pub direction: Direction,
    /// The line itself.
    pub text: String,
}

/// Parameters for [`InteractionHistory::tail`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TailQuery {
    /// Maximum number of entries returned.
    pub max_count: usize,
    /// Include text sent to the participant.
    pub include_outputs: bool,
    /// Include responses read from the participant.
    pub include_inputs: bool,
}

impl Default for TailQuery {
    fn default() -> Self {
        Self {
            max_count: 50,
            include_outputs: true,
            include_inputs: true,
        }
    }
}

/// The lines of the most recent menu, from `[[MENU_ITEMS_BEGIN]]` through
/// `[[MENU_ITEMS_END]]` inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBlock {
    lines: Vec<String>,
}

impl MenuBlock {
    /// Raw lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Option keys in the order they were offered.
    pub fn keys(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|line| {
                let rest = line.strip_prefix("[[")?;
                let (key, _label) = rest.split_once("]] : ")?;
                Some(key)
            })
            .collect()
    }

    /// Whether the block offers `key`, ignoring case.
    pub fn offers(&self, key: &str) -> bool {
        self.keys().iter().any(|k| k.eq_ignore_ascii_case(key))
    }
}

/// Ring buffer of [`HistoryEntry`] values for one seat.
#[derive(Debug, Clone)]
pub struct InteractionHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl InteractionHistory {
    /// A history holding at most `capacity` entries (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a line sent to the participant.
    pub fn record_output(&mut self, text: impl Into<String>) {
        self.push(Direction::Output, text.into());
    }

    /// Record a response read from the participant.
    pub fn record_input(&mut self, text: impl Into<String>) {
        self.push(Direction::Input, text.into());
    }

    fn push(&mut self, direction: Direction, text: String) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry { direction, text });
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded (or everything was evicted).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries held.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// All held entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The trailing window of entries matching `query`, oldest first.
    pub fn tail(&self, query: TailQuery) -> Vec<&str> {
        let mut selected: Vec<&str> = self
            .entries
            .iter()
            .rev()
            .filter(|entry| match entry.direction {
                Direction::Output => query.include_outputs,
                Direction::Input => query.include_inputs,
            })
            .take(query.max_count)
            .map(|entry| entry.text.as_str())
            .collect();
        selected.reverse();
        selected
    }

    /// The most recent menu block.
    ///
    /// Scans backwards for the last `[[MENU_ITEMS_END]]`, then collects
    /// output lines until the matching `[[MENU_ITEMS_BEGIN]]`. If the begin
    /// marker was already evicted, the surviving part of the block is
    /// returned. Returns `None` when no end marker is held.
    pub fn last_menu_block(&self) -> Option<MenuBlock> {
        let mut lines: Vec<String> = Vec::new();
        let mut inside = false;

        for entry in self.entries.iter().rev() {
            if entry.direction != Direction::Output {
                continue;
            }
            if !inside {
                if entry.text.contains(MENU_ITEMS_END) {
                    inside = true;
                    lines.push(entry.text.clone());
                }
                continue;
            }
            lines.push(entry.text.clone());
            if entry.text.contains(MENU_ITEMS_BEGIN) {
                break;
            }
        }

        if !inside {
            return None;
        }
        lines.reverse();
        Some(MenuBlock { lines })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn with_menu(history: &mut InteractionHistory, keys: &[(&str, &str)]) {
        history.record_output(MENU_ITEMS_BEGIN);
        for (key, label) in keys {
            history.record_output(format!("[[{key}]] : {label}"));
        }
        history.record_output(MENU_ITEMS_END);
    }

    #[test]
    fn ring_buffer_evicts_oldest() {
        let mut history = InteractionHistory::new(3);
        for line in ["a", "b", "c", "d"] {
            history.record_output(line);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.tail(TailQuery::default()), ["b", "c", "d"]);
    }

    #[test]
    fn capacity_is_at_least_one() {
        let mut history = InteractionHistory::new(0);
        assert_eq!(history.capacity(), 1);
        history.record_output("a");
        history.record_input("b");
        assert_eq!(history.len(), history.capacity());
        assert_eq!(history.tail(TailQuery::default()), ["b"]);
    }

    #[test]
    fn tail_filters_by_direction_and_count() {
        let mut history = InteractionHistory::new(10);
        history.record_output("prompt");
        history.record_input("RTD");
        history.record_output("you rolled 3, 4");

        let inputs = history.tail(TailQuery {
            include_outputs: false,
            ..TailQuery::default()
        });
        assert_eq!(inputs, ["RTD"]);

        let last_two = history.tail(TailQuery {
            max_count: 2,
            ..TailQuery::default()
        });
        assert_eq!(last_two, ["RTD", "you rolled 3, 4"]);
    }

    #[test]
    fn last_menu_block_picks_most_recent_menu() {
        let mut history = InteractionHistory::new(50);
        with_menu(&mut history, &[("ALP", "Accept Land Purchase")]);
        history.record_input("ALP");
        history.record_output("Square 3 is now yours.");
        with_menu(&mut history, &[("RTD", "Roll The Dice"), ("BS", "Bank Services")]);
        history.record_output("[[BAD_INPUT]]");

        let block = history.last_menu_block().unwrap();
        assert_eq!(block.keys(), ["RTD", "BS"]);
        assert!(block.offers("bs"));
        assert!(!block.offers("ALP"));
        assert_eq!(block.lines().first().map(String::as_str), Some(MENU_ITEMS_BEGIN));
        assert_eq!(block.lines().last().map(String::as_str), Some(MENU_ITEMS_END));
    }

    #[test]
    fn no_menu_means_no_block() {
        let mut history = InteractionHistory::new(5);
        history.record_output("hello");
        assert!(history.last_menu_block().is_none());
    }

    #[test]
    fn truncated_block_returns_surviving_lines() {
        let mut history = InteractionHistory::new(3);
        with_menu(&mut history, &[("LI", "Land Info"), ("RI", "Rent Info"), ("C", "Continue")]);

        let block = history.last_menu_block().unwrap();
        assert_eq!(block.keys(), ["RI", "C"]);
    }
}
