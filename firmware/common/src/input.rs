//! Button abstraction and hold-to-accelerate tracking.
//!
//! Debouncing happens below this interface; the engine only sees a level
//! query and a one-shot edge event per button. [`HoldTracker`] turns the
//! level into auto-repeat once a direction button has been held long
//! enough, which is what makes long lists scrollable without hammering
//! the button.

use crate::config::HOLD_TO_ACCEL_MS;

/// The four physical buttons of the camera.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Button {
    Up,
    Down,
    Select,
    Shutter,
}

/// Debounced button input.
pub trait ButtonPad {
    /// Current level: true while the button is held down.
    fn is_held(&mut self, button: Button) -> bool;

    /// Edge event: true once per physical press, consumed on read.
    fn just_pressed(&mut self, button: Button) -> bool;
}

/// Accumulates continuous hold time across polls.
///
/// Feed it the combined held level of the direction buttons every poll;
/// once the accumulated hold passes [`HOLD_TO_ACCEL_MS`] the caller treats
/// the held level as a repeated move event at the polling rate.
pub struct HoldTracker {
    held_ms: u64,
    last_sample: Option<u64>,
}

impl HoldTracker {
    pub const fn new() -> Self {
        Self { held_ms: 0, last_sample: None }
    }

    /// Record the current held level at time `now`.
    pub fn sample(&mut self, held: bool, now: u64) {
        if held {
            if let Some(last) = self.last_sample {
                self.held_ms += now.saturating_sub(last);
            }
            self.last_sample = Some(now);
        } else {
            self.held_ms = 0;
            self.last_sample = None;
        }
    }

    /// True once the hold has lasted past the acceleration threshold.
    pub fn accelerating(&self) -> bool {
        self.held_ms > HOLD_TO_ACCEL_MS
    }
}

impl Default for HoldTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_accel_before_threshold() {
        let mut hold = HoldTracker::new();
        hold.sample(true, 0);
        hold.sample(true, HOLD_TO_ACCEL_MS / 2);
        assert!(!hold.accelerating());
    }

    #[test]
    fn accel_after_continuous_hold() {
        let mut hold = HoldTracker::new();
        hold.sample(true, 0);
        hold.sample(true, 300);
        hold.sample(true, 600);
        assert!(hold.accelerating());
    }

    #[test]
    fn release_resets_accumulated_time() {
        let mut hold = HoldTracker::new();
        hold.sample(true, 0);
        hold.sample(true, 400);
        hold.sample(false, 450);
        hold.sample(true, 500);
        hold.sample(true, 900);
        assert!(!hold.accelerating());
        hold.sample(true, 1100);
        assert!(hold.accelerating());
    }

    #[test]
    fn first_sample_counts_nothing() {
        let mut hold = HoldTracker::new();
        hold.sample(true, 5000);
        assert!(!hold.accelerating());
    }
}
