//! The GUI context: every hardware collaborator in one place.
//!
//! The original firmware reached its display, SD card, RTC and buttons
//! through shared global handles; here they are explicit fields of
//! [`CameraGui`], so the whole engine runs against fakes on the host.
//! Each dialog (menu, explorer, editor, ...) is an `impl` block on this
//! context in its own module; this module holds construction and the
//! drawing primitives the dialogs share.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle,
};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use crate::battery::{self, Battery};
use crate::clock::Clock;
use crate::colors::{BOX_COLOR, TEXT_COLOR};
use crate::config::{
    BOX_COLS, BOX_H, BOX_W, BOX_X, BOX_Y, CHAR_H, CHAR_W, FONT_X, MOVE_THROTTLE_MS, SCROLLBAR_W,
    SCROLLBAR_X, TITLE_Y,
};
use crate::cursor::ListCursor;
use crate::input::ButtonPad;
use crate::scroll;
use crate::storage::Storage;
use crate::ticker::Ticker;
use crate::toolbar::BottomBar;
use crate::trace::EventLog;

/// One fixed-width dialog row: leading space, optional marker column,
/// text window, space padding out to `cols` plus one trailing blank so a
/// previously longer string is fully overwritten.
pub(crate) fn format_row(
    text: &str,
    offset: usize,
    cols: usize,
    marker: Option<char>,
) -> String<{ BOX_COLS + 2 }> {
    let mut line: String<{ BOX_COLS + 2 }> = String::new();
    line.push(' ').ok();
    if let Some(m) = marker {
        line.push(m).ok();
        line.push(' ').ok();
    }
    let mut written = 0;
    for c in scroll::window(text, offset, cols) {
        line.push(c).ok();
        written += 1;
    }
    while written <= cols {
        line.push(' ').ok();
        written += 1;
    }
    line
}

/// The UI engine bound to its collaborators.
pub struct CameraGui<D, S, C, P, T, B> {
    pub display: D,
    pub storage: S,
    pub clock: C,
    pub pad: P,
    pub ticker: T,
    pub battery: B,
    pub(crate) toolbar: BottomBar,
    pub log: EventLog,
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
    pub fn new(display: D, storage: S, clock: C, pad: P, ticker: T, battery: B) -> Self {
        Self {
            display,
            storage,
            clock,
            pad,
            ticker,
            battery,
            toolbar: BottomBar::new(),
            log: EventLog::new(),
        }
    }

    /// Battery charge for the toolbar, 0..=100.
    pub fn batt_percent(&mut self) -> u8 {
        battery::percent_from_millivolts(self.battery.millivolts())
    }

    /// Show a transient toolbar message for `duration_ms`
    /// ([`UNLIMITED_MS`] pins it until replaced).
    pub fn set_bottom_text(&mut self, text: &str, duration_ms: u64) {
        let now = self.ticker.now_ms();
        self.toolbar.set_text(text, duration_ms, now);
    }

    // -------------------------------------------------------------------
    // Shared dialog chrome
    // -------------------------------------------------------------------

    pub(crate) fn text_style(&self, inverted: bool) -> MonoTextStyle<'static, Rgb565> {
        let (fg, bg) = if inverted { (BOX_COLOR, TEXT_COLOR) } else { (TEXT_COLOR, BOX_COLOR) };
        MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(fg)
            .background_color(bg)
            .build()
    }

    /// Rounded box filling the panel minus the fixed margins, with the
    /// dialog title on its first row.
    pub(crate) fn draw_dialog_box(&mut self, title: &str) {
        let frame = Rectangle::new(Point::new(BOX_X, BOX_Y), Size::new(BOX_W, BOX_H));
        RoundedRectangle::with_equal_corners(frame, Size::new_equal(CHAR_W as u32 + 1))
            .into_styled(PrimitiveStyle::with_fill(BOX_COLOR))
            .draw(&mut self.display)
            .ok();
        RoundedRectangle::with_equal_corners(frame, Size::new_equal(CHAR_W as u32 - 1))
            .into_styled(
                PrimitiveStyleBuilder::new()
                    .stroke_color(TEXT_COLOR)
                    .stroke_width(1)
                    .build(),
            )
            .draw(&mut self.display)
            .ok();

        let line = format_row(title, 0, BOX_COLS - 2, None);
        Text::with_baseline(
            line.as_str(),
            Point::new(FONT_X, TITLE_Y),
            self.text_style(false),
            Baseline::Top,
        )
        .draw(&mut self.display)
        .ok();
    }

    /// Draw one list row at visual position `row` below `list_y`.
    pub(crate) fn draw_list_row(
        &mut self,
        list_y: i32,
        row: usize,
        text: &str,
        scroll_offset: usize,
        cols: usize,
        selected: bool,
        marker: Option<char>,
    ) {
        let line = format_row(text, scroll_offset, cols, marker);
        let y = list_y + CHAR_H * row as i32;
        Text::with_baseline(
            line.as_str(),
            Point::new(FONT_X, y),
            self.text_style(selected),
            Baseline::Top,
        )
        .draw(&mut self.display)
        .ok();
    }

    /// Proportional scrollbar along the right edge of the list area.
    pub(crate) fn draw_scrollbar(&mut self, list_y: i32, cursor: &ListCursor) {
        let track_h = (cursor.page() as i32 * CHAR_H) as u32;
        let count = cursor.count().max(1) as i32;
        let top = cursor.offset().min(cursor.count().saturating_sub(cursor.page())) as i32;
        let thumb_y = list_y + top * track_h as i32 / count;
        let thumb_h = (cursor.page() as i32 * track_h as i32 / count).max(1) as u32;

        Rectangle::new(Point::new(SCROLLBAR_X, list_y), Size::new(SCROLLBAR_W, track_h))
            .into_styled(PrimitiveStyle::with_fill(BOX_COLOR))
            .draw(&mut self.display)
            .ok();
        Rectangle::new(Point::new(SCROLLBAR_X, thumb_y), Size::new(SCROLLBAR_W, thumb_h))
            .into_styled(PrimitiveStyle::with_fill(TEXT_COLOR))
            .draw(&mut self.display)
            .ok();
    }

    /// Enforce the minimum interval between selection moves.
    pub(crate) fn wait_move_throttle(&mut self, last_moved: u64) {
        while self.ticker.now_ms().saturating_sub(last_moved) < MOVE_THROTTLE_MS {
            self.ticker.delay_ms(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_fixed_width() {
        let a = format_row("short", 0, 20, None);
        let b = format_row("a considerably longer entry name", 0, 20, None);
        assert_eq!(a.len(), b.len());
        assert_eq!(a.len(), 1 + 20 + 1);
    }

    #[test]
    fn row_window_honors_scroll_offset() {
        let line = format_row("abcdefghij", 3, 5, None);
        assert_eq!(line.as_str(), " defgh ");
    }

    #[test]
    fn marker_costs_two_columns() {
        let plain = format_row("x", 0, 10, None);
        let marked = format_row("x", 0, 10, Some('*'));
        assert_eq!(marked.len(), plain.len() + 2);
        assert!(marked.starts_with(" * "));
    }
}
