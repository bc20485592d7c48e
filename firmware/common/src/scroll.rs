//! Horizontal text marquee.
//!
//! Long strings are revealed one character per tick with a pause at both
//! ends: start-pause, scroll until the tail (plus a few columns of slack)
//! is visible, end-pause, reset, repeat. Strings that fit their column
//! never move. Each scrolled row owns one [`Scroller`]; the owner resets
//! it whenever the underlying selection changes.

use crate::config::{SCROLL_PAUSE_TICKS, SCROLL_SLACK, SCROLL_TICK_MS};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    StartPause(u8),
    Running,
    EndPause(u8),
}

/// Per-row marquee state.
pub struct Scroller {
    offset: usize,
    phase: Phase,
    last_tick_ms: u64,
}

impl Scroller {
    pub const fn new(now: u64) -> Self {
        Self {
            offset: 0,
            phase: Phase::StartPause(SCROLL_PAUSE_TICKS),
            last_tick_ms: now,
        }
    }

    /// Current character offset to render from.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Restart the cycle (the selection changed).
    pub fn reset(&mut self, now: u64) {
        self.offset = 0;
        self.phase = Phase::StartPause(SCROLL_PAUSE_TICKS);
        self.last_tick_ms = now;
    }

    /// Advance the marquee for a string of `len` characters shown in a
    /// `visible`-column window. Returns true when the offset changed and
    /// the row needs a redraw.
    pub fn step(&mut self, now: u64, len: usize, visible: usize) -> bool {
        if len <= visible {
            // Short strings render from 0 forever.
            return false;
        }
        if now.saturating_sub(self.last_tick_ms) < SCROLL_TICK_MS {
            return false;
        }
        self.last_tick_ms = now;
        match self.phase {
            Phase::StartPause(n) => {
                let n = n - 1;
                self.phase = if n == 0 { Phase::Running } else { Phase::StartPause(n) };
                false
            }
            Phase::Running => {
                self.offset += 1;
                if self.offset + visible >= len + SCROLL_SLACK {
                    self.phase = Phase::EndPause(SCROLL_PAUSE_TICKS);
                }
                true
            }
            Phase::EndPause(n) => {
                let n = n - 1;
                if n == 0 {
                    self.offset = 0;
                    self.phase = Phase::StartPause(SCROLL_PAUSE_TICKS);
                    true
                } else {
                    self.phase = Phase::EndPause(n);
                    false
                }
            }
        }
    }
}

/// The visible window of `text` at `offset`, at most `visible` characters.
pub fn window(text: &str, offset: usize, visible: usize) -> impl Iterator<Item = char> + '_ {
    text.chars().skip(offset).take(visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(s: &mut Scroller, t: &mut u64, len: usize, visible: usize) -> bool {
        *t += SCROLL_TICK_MS;
        s.step(*t, len, visible)
    }

    #[test]
    fn short_strings_never_scroll() {
        let mut s = Scroller::new(0);
        let mut t = 0;
        for _ in 0..50 {
            assert!(!tick(&mut s, &mut t, 8, 10));
            assert_eq!(s.offset(), 0);
        }
    }

    #[test]
    fn no_advance_between_ticks() {
        let mut s = Scroller::new(0);
        assert!(!s.step(SCROLL_TICK_MS / 2, 30, 10));
        assert_eq!(s.offset(), 0);
    }

    #[test]
    fn full_cycle_length_and_shape() {
        // L=20, W=10: max offset is L - W + slack, cycle is that many
        // advances plus both pauses.
        let len = 20;
        let visible = 10;
        let max_offset = len - visible + SCROLL_SLACK;
        let mut s = Scroller::new(0);
        let mut t = 0u64;

        let mut offsets = std::vec::Vec::new();
        let mut ticks = 0;
        loop {
            tick(&mut s, &mut t, len, visible);
            ticks += 1;
            offsets.push(s.offset());
            if ticks > 1 && s.offset() == 0 {
                break;
            }
        }

        // Non-decreasing until the reset at the very end.
        for pair in offsets[..offsets.len() - 1].windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert_eq!(*offsets[..offsets.len() - 1].iter().max().unwrap(), max_offset);
        assert_eq!(ticks, max_offset + 2 * SCROLL_PAUSE_TICKS as usize);
    }

    #[test]
    fn reset_restarts_start_pause() {
        let mut s = Scroller::new(0);
        let mut t = 0u64;
        for _ in 0..6 {
            tick(&mut s, &mut t, 30, 10);
        }
        assert!(s.offset() > 0);
        s.reset(t);
        assert_eq!(s.offset(), 0);
        // Start pause holds the offset at zero again.
        for _ in 0..SCROLL_PAUSE_TICKS {
            assert!(!tick(&mut s, &mut t, 30, 10));
            assert_eq!(s.offset(), 0);
        }
    }

    #[test]
    fn window_clamps_to_string() {
        let shown: std::string::String = window("abcdef", 4, 10).collect();
        assert_eq!(shown, "ef");
    }
}
