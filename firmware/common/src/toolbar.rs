//! Bottom status bar.
//!
//! One text line at the bottom of the panel, outside the dialog box. In
//! clock mode it shows `YYYY/MM/DD HH:MM` on the left and the battery
//! percentage on the right; a transient message replaces both until its
//! expiry, then the bar reverts on its own. Redraws are throttled to one
//! per second unless something marked the bar dirty.

use core::fmt::Write as _;

use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use crate::battery::Battery;
use crate::clock::Clock;
use crate::colors::{BAR_BG, BAR_FG};
use crate::config::{
    BOTTOM_TEXT_MAX, CHAR_H, CHAR_W, SCREEN_HEIGHT, SCREEN_WIDTH, TOOLBAR_THROTTLE_MS,
    UNLIMITED_MS,
};
use crate::gui::CameraGui;
use crate::input::ButtonPad;
use crate::storage::Storage;
use crate::ticker::Ticker;

/// What the bar is currently showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BarMode {
    Clock,
    Transient,
}

struct Transient {
    text: String<BOTTOM_TEXT_MAX>,
    expire_at_ms: u64,
}

/// Toolbar state: draw throttle plus an optional expiring message.
pub struct BottomBar {
    last_draw_ms: u64,
    dirty: bool,
    transient: Option<Transient>,
}

impl BottomBar {
    pub const fn new() -> Self {
        Self { last_draw_ms: 0, dirty: true, transient: None }
    }

    /// Show `text` for `duration_ms` (truncated to the line budget).
    /// [`UNLIMITED_MS`] disables the auto-revert. Marks the bar dirty so
    /// the next draw happens regardless of the throttle.
    pub fn set_text(&mut self, text: &str, duration_ms: u64, now: u64) {
        let mut line: String<BOTTOM_TEXT_MAX> = String::new();
        for c in text.chars().take(BOTTOM_TEXT_MAX) {
            line.push(c).ok();
        }
        let expire_at_ms = if duration_ms == UNLIMITED_MS {
            UNLIMITED_MS
        } else {
            now.saturating_add(duration_ms)
        };
        self.transient = Some(Transient { text: line, expire_at_ms });
        self.dirty = true;
    }

    /// Expire a stale transient message. Called before every draw check.
    pub fn poll(&mut self, now: u64) {
        if let Some(t) = &self.transient
            && t.expire_at_ms != UNLIMITED_MS
            && now > t.expire_at_ms
        {
            self.transient = None;
            self.dirty = true;
        }
    }

    pub fn mode(&self) -> BarMode {
        if self.transient.is_some() { BarMode::Transient } else { BarMode::Clock }
    }

    pub fn transient_text(&self) -> Option<&str> {
        self.transient.as_ref().map(|t| t.text.as_str())
    }

    pub fn should_draw(&self, now: u64, force: bool) -> bool {
        force || self.dirty || now.saturating_sub(self.last_draw_ms) >= TOOLBAR_THROTTLE_MS
    }

    pub fn mark_drawn(&mut self, now: u64) {
        self.last_draw_ms = now;
        self.dirty = false;
    }
}

impl Default for BottomBar {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, S, C, P, T, B> CameraGui<D, S, C, P, T, B>
where
    D: DrawTarget<Color = Rgb565>,
    S: Storage,
    C: Clock,
    P: ButtonPad,
    T: Ticker,
    B: Battery,
{
    /// Redraw the bottom strip if forced, dirty, or a throttle interval
    /// has elapsed.
    pub fn draw_bottom_toolbar(&mut self, force: bool) {
        let now = self.ticker.now_ms();
        self.toolbar.poll(now);
        if !self.toolbar.should_draw(now, force) {
            return;
        }
        self.toolbar.mark_drawn(now);

        let style = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(BAR_FG)
            .background_color(BAR_BG)
            .build();
        let y = SCREEN_HEIGHT as i32 - CHAR_H;

        // Pad to the full budget so a longer previous message is always
        // overwritten.
        let mut line: String<{ BOTTOM_TEXT_MAX + 1 }> = String::new();
        match self.toolbar.transient_text() {
            Some(text) => {
                line.push_str(text).ok();
            }
            None => {
                let t = self.clock.now();
                write!(
                    line,
                    "{:04}/{:02}/{:02} {:02}:{:02}",
                    t.year, t.month, t.day, t.hour, t.minute
                )
                .ok();
            }
        }
        while line.push(' ').is_ok() {}
        Text::with_baseline(line.as_str(), Point::new(0, y), style, Baseline::Top)
            .draw(&mut self.display)
            .ok();

        if self.toolbar.mode() == BarMode::Clock {
            let mut pct: String<8> = String::new();
            write!(pct, "{}%", self.batt_percent()).ok();
            let x = SCREEN_WIDTH as i32 - CHAR_W * pct.len() as i32;
            Text::with_baseline(pct.as_str(), Point::new(x, y), style, Baseline::Top)
                .draw(&mut self.display)
                .ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_expires_back_to_clock() {
        let mut bar = BottomBar::new();
        bar.set_text("x", 3000, 1000);
        bar.poll(4000);
        assert_eq!(bar.mode(), BarMode::Transient);
        bar.poll(4001);
        assert_eq!(bar.mode(), BarMode::Clock);
        // Expiry marks the bar dirty so the revert draws immediately.
        assert!(bar.should_draw(4001, false));
    }

    #[test]
    fn unlimited_message_never_expires() {
        let mut bar = BottomBar::new();
        bar.set_text("saving...", UNLIMITED_MS, 0);
        bar.poll(u64::MAX - 1);
        assert_eq!(bar.mode(), BarMode::Transient);
    }

    #[test]
    fn set_text_bypasses_throttle() {
        let mut bar = BottomBar::new();
        bar.mark_drawn(1000);
        assert!(!bar.should_draw(1001, false));
        bar.set_text("hi", 1000, 1001);
        assert!(bar.should_draw(1001, false));
    }

    #[test]
    fn throttle_allows_periodic_redraw() {
        let mut bar = BottomBar::new();
        bar.mark_drawn(0);
        assert!(!bar.should_draw(TOOLBAR_THROTTLE_MS - 1, false));
        assert!(bar.should_draw(TOOLBAR_THROTTLE_MS, false));
        assert!(bar.should_draw(1, true));
    }

    #[test]
    fn long_text_truncates_to_budget() {
        let mut bar = BottomBar::new();
        let long = "a very long status message that cannot possibly fit";
        bar.set_text(long, 1000, 0);
        assert_eq!(bar.transient_text().unwrap().len(), BOTTOM_TEXT_MAX);
    }
}
