//! Bounded event log.
//!
//! The serial prints of the original firmware become a ring buffer of
//! bounded lines: UI dialogs push noteworthy events (directory changes,
//! deletions, capture errors) and the shell decides what to do with them.
//! Old lines are dropped when the buffer is full.

use core::fmt::{self, Write};

use heapless::{Deque, String};

/// Lines kept in the ring buffer.
pub const LOG_LINES: usize = 16;

/// Maximum characters per line; longer messages are truncated.
pub const LOG_LINE_LEN: usize = 48;

/// Ring buffer of recent UI events.
pub struct EventLog {
    buffer: Deque<String<LOG_LINE_LEN>, LOG_LINES>,
}

impl EventLog {
    pub const fn new() -> Self {
        Self { buffer: Deque::new() }
    }

    /// Push a line, dropping the oldest one if the buffer is full.
    pub fn push(&mut self, msg: &str) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }
        let mut line: String<LOG_LINE_LEN> = String::new();
        for c in msg.chars().take(LOG_LINE_LEN) {
            if line.push(c).is_err() {
                break;
            }
        }
        self.buffer.push_back(line).ok();
    }

    /// Push a formatted line: `log.pushf(format_args!("deleted {name}"))`.
    /// Output past the line budget is truncated.
    pub fn pushf(&mut self, args: fmt::Arguments<'_>) {
        if self.buffer.is_full() {
            self.buffer.pop_front();
        }
        let mut line: String<LOG_LINE_LEN> = String::new();
        write!(line, "{args}").ok();
        self.buffer.push_back(line).ok();
    }

    /// Iterate over logged lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.buffer.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_iterate_oldest_first() {
        let mut log = EventLog::new();
        assert!(log.is_empty());
        log.push("first");
        log.push("second");
        let mut it = log.iter();
        assert_eq!(it.next(), Some("first"));
        assert_eq!(it.next(), Some("second"));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn overflow_drops_oldest() {
        let mut log = EventLog::new();
        for i in 0..=LOG_LINES {
            log.pushf(format_args!("line {i}"));
        }
        assert_eq!(log.len(), LOG_LINES);
        assert_eq!(log.iter().next(), Some("line 1"));
    }

    #[test]
    fn long_lines_truncate() {
        let mut log = EventLog::new();
        let long = "x".repeat(LOG_LINE_LEN * 2);
        log.push(&long);
        assert_eq!(log.iter().next().unwrap().len(), LOG_LINE_LEN);
    }
}
