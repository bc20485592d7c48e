//! Date/time editor.
//!
//! Two-mode dialog over the live RTC. Navigate mode moves an underline
//! across the six clock fields plus Save and Cancel; select toggles edit
//! mode, where up/down step the focused field directly on the clock (no
//! buffered copy, so an observer of [`Clock`] sees each step as it
//! happens). Save keeps whatever the clock now reads; Cancel rewinds to
//! the value at entry advanced by the real time spent inside the dialog,
//! so an abandoned edit costs no drift. Rendering re-reads the clock
//! every frame and redraws on a short max-wait, which keeps the seconds
//! field ticking while the dialog idles.

use core::fmt::Write as _;

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use profont::PROFONT_14_POINT;

use crate::battery::Battery;
use crate::clock::{Clock, DateTime};
use crate::colors::{BOX_COLOR, TEXT_COLOR};
use crate::config::{BOX_COLS, CHAR_H, EDITOR_MAX_WAIT_MS, FONT_X, MENU_LIST_Y};
use crate::gui::CameraGui;
use crate::input::{Button, ButtonPad, HoldTracker};
use crate::storage::Storage;
use crate::ticker::Ticker;

/// Focus positions of the editor, in cycling order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum EditField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Save,
    Cancel,
}

impl EditField {
    const ORDER: [Self; 8] = [
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Save,
        Self::Cancel,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|&f| f == self).unwrap_or(0)
    }

    pub(crate) fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub(crate) fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn editable(self) -> bool {
        !matches!(self, Self::Save | Self::Cancel)
    }

    /// Character span of the field within its line: `(offset, len)`.
    /// Date line is `YYYY/MM/DD`, time line is `HH:MM:SS`.
    fn span(self) -> (usize, usize) {
        match self {
            Self::Year => (0, 4),
            Self::Month => (5, 2),
            Self::Day => (8, 2),
            Self::Hour => (0, 2),
            Self::Minute => (3, 2),
            Self::Second => (6, 2),
            Self::Save | Self::Cancel => (0, 0),
        }
    }

    fn on_date_line(self) -> bool {
        matches!(self, Self::Year | Self::Month | Self::Day)
    }
}

/// Step one clock field by `delta`, normalizing through the calendar.
/// Stepping the day/hour/minute/second shifts real seconds (so the rest
/// of the timestamp carries over); stepping the year or month clamps the
/// day into the target month instead.
pub(crate) fn step_field(t: DateTime, field: EditField, delta: i8) -> DateTime {
    match field {
        EditField::Year => t.step_year(delta),
        EditField::Month => t.step_month(delta),
        EditField::Day => t.add_seconds(i64::from(delta) * 86_400),
        EditField::Hour => t.add_seconds(i64::from(delta) * 3_600),
        EditField::Minute => t.add_seconds(i64::from(delta) * 60),
        EditField::Second => t.add_seconds(i64::from(delta)),
        EditField::Save | EditField::Cancel => t,
    }
}

/// The clock value a cancelled edit rewinds to: the entry snapshot plus
/// the wall time spent in the dialog.
pub(crate) fn cancelled_time(snapshot: DateTime, elapsed_ms: u64) -> DateTime {
    snapshot.add_seconds((elapsed_ms / 1000) as i64)
}

const EDIT_FONT: MonoFont<'static> = PROFONT_14_POINT;

impl<D, S, C, P, T, B> CameraGui<D, S, C, P, T, B>
where
    D: DrawTarget<Color = Rgb565>,
    S: Storage,
    C: Clock,
    P: ButtonPad,
    T: Ticker,
    B: Battery,
{
    /// Edit the RTC in place. Returns true when the user saved, false
    /// when they cancelled (the clock is rewound as if never touched).
    pub fn change_rtc_time(&mut self) -> bool {
        let snapshot = self.clock.now();
        let t0 = self.ticker.now_ms();

        self.draw_dialog_box("Set date & time");

        let mut focus = EditField::Year;
        let mut editing = false;
        let mut hold = HoldTracker::new();
        let mut last_moved = t0;

        loop {
            self.draw_editor_fields(focus, editing);
            self.wait_move_throttle(last_moved);

            let deadline = self.ticker.now_ms() + EDITOR_MAX_WAIT_MS;
            loop {
                self.draw_bottom_toolbar(false);

                let now = self.ticker.now_ms();
                let up_held = self.pad.is_held(Button::Up);
                let down_held = self.pad.is_held(Button::Down);
                hold.sample(up_held || down_held, now);

                if self.pad.just_pressed(Button::Up) || (up_held && hold.accelerating()) {
                    if editing {
                        let stepped = step_field(self.clock.now(), focus, 1);
                        self.clock.adjust(stepped);
                    } else {
                        focus = focus.prev();
                    }
                    break;
                }
                if self.pad.just_pressed(Button::Down) || (down_held && hold.accelerating()) {
                    if editing {
                        let stepped = step_field(self.clock.now(), focus, -1);
                        self.clock.adjust(stepped);
                    } else {
                        focus = focus.next();
                    }
                    break;
                }
                if self.pad.just_pressed(Button::Select) {
                    if editing {
                        editing = false;
                    } else {
                        match focus {
                            EditField::Save => return true,
                            EditField::Cancel => {
                                let elapsed = self.ticker.now_ms().saturating_sub(t0);
                                self.clock.adjust(cancelled_time(snapshot, elapsed));
                                return false;
                            }
                            field if field.editable() => editing = true,
                            _ => {}
                        }
                    }
                    break;
                }
                if now >= deadline {
                    // Redraw anyway so the seconds field ticks.
                    break;
                }
                self.ticker.delay_ms(1);
            }
            last_moved = self.ticker.now_ms();
        }
    }

    fn editor_style(&self, inverted: bool) -> MonoTextStyle<'static, Rgb565> {
        let (fg, bg) = if inverted { (BOX_COLOR, TEXT_COLOR) } else { (TEXT_COLOR, BOX_COLOR) };
        MonoTextStyleBuilder::new()
            .font(&EDIT_FONT)
            .text_color(fg)
            .background_color(bg)
            .build()
    }

    fn draw_editor_fields(&mut self, focus: EditField, editing: bool) {
        let t = self.clock.now();
        let cw = EDIT_FONT.character_size.width as i32;
        let ch = EDIT_FONT.character_size.height as i32;
        let date_y = MENU_LIST_Y;
        let time_y = date_y + ch + CHAR_H / 2;
        let buttons_y = time_y + ch + CHAR_H / 2;

        let mut date: String<10> = String::new();
        write!(date, "{:04}/{:02}/{:02}", t.year, t.month, t.day).ok();
        let mut time: String<8> = String::new();
        write!(time, "{:02}:{:02}:{:02}", t.hour, t.minute, t.second).ok();

        for (text, y, on_this_line) in [
            (date.as_str(), date_y, focus.on_date_line()),
            (time.as_str(), time_y, focus.editable() && !focus.on_date_line()),
        ] {
            Text::with_baseline(
                text,
                Point::new(FONT_X, y),
                self.editor_style(false),
                Baseline::Top,
            )
            .draw(&mut self.display)
            .ok();

            // Clear the underline strip, then underline the focused field.
            Rectangle::new(
                Point::new(FONT_X, y + ch),
                Size::new((text.len() as i32 * cw) as u32, 1),
            )
            .into_styled(PrimitiveStyle::with_fill(BOX_COLOR))
            .draw(&mut self.display)
            .ok();

            if on_this_line {
                let (off, len) = focus.span();
                let x = FONT_X + off as i32 * cw;
                if editing {
                    Text::with_baseline(
                        &text[off..off + len],
                        Point::new(x, y),
                        self.editor_style(true),
                        Baseline::Top,
                    )
                    .draw(&mut self.display)
                    .ok();
                }
                Rectangle::new(Point::new(x, y + ch), Size::new((len as i32 * cw) as u32, 1))
                    .into_styled(PrimitiveStyle::with_fill(TEXT_COLOR))
                    .draw(&mut self.display)
                    .ok();
            }
        }

        self.draw_list_row(buttons_y, 0, "Save", 0, BOX_COLS - 2, focus == EditField::Save, None);
        self.draw_list_row(
            buttons_y,
            1,
            "Cancel",
            0,
            BOX_COLS - 2,
            focus == EditField::Cancel,
            None,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button::*;
    use crate::testutil::{test_gui_with, FakeClock, MemStorage, Script};

    fn base() -> DateTime {
        DateTime::new(2023, 6, 15, 10, 30, 0)
    }

    #[test]
    fn focus_cycles_and_wraps() {
        assert_eq!(EditField::Year.prev(), EditField::Cancel);
        assert_eq!(EditField::Cancel.next(), EditField::Year);
        let mut f = EditField::Year;
        for _ in 0..EditField::ORDER.len() {
            f = f.next();
        }
        assert_eq!(f, EditField::Year);
    }

    #[test]
    fn stepping_each_field() {
        let t = base();
        assert_eq!(step_field(t, EditField::Year, 1).year, 2024);
        assert_eq!(step_field(t, EditField::Month, -1).month, 5);
        assert_eq!(step_field(t, EditField::Day, 1).day, 16);
        assert_eq!(step_field(t, EditField::Hour, -1).hour, 9);
        assert_eq!(step_field(t, EditField::Minute, 1).minute, 31);
        assert_eq!(step_field(t, EditField::Second, 1).second, 1);
    }

    #[test]
    fn day_step_carries_into_next_month() {
        let t = DateTime::new(2023, 6, 30, 23, 0, 0);
        let u = step_field(t, EditField::Day, 1);
        assert_eq!((u.month, u.day, u.hour), (7, 1, 23));
    }

    #[test]
    fn save_commits_the_stepped_clock() {
        // Focus minute, edit, +1, leave edit, move to Save, select.
        let script = Script::presses(&[
            Down, Down, Down, Down, Select, Up, Select, Down, Down, Select,
        ]);
        let mut gui = test_gui_with(script, MemStorage::new(), FakeClock::at(base()));
        assert!(gui.change_rtc_time());
        assert_eq!(gui.clock.now.minute, 31);
    }

    #[test]
    fn cancel_restores_snapshot_plus_elapsed() {
        // Edit the minute twice, then walk to Cancel and select it.
        let script = Script::presses(&[
            Down, Down, Down, Down, Select, Up, Up, Select, Down, Down, Down, Select,
        ]);
        let mut gui = test_gui_with(script, MemStorage::new(), FakeClock::at(base()));
        assert!(!gui.change_rtc_time());

        // The rewind target is the entry value advanced by the simulated
        // time the dialog consumed.
        let expected = cancelled_time(base(), gui.ticker.now_ms());
        assert_eq!(gui.clock.now, expected);
        assert_ne!(gui.clock.now.minute, 32);
    }

    #[test]
    fn cancelled_time_keeps_snapshot_when_instant() {
        assert_eq!(cancelled_time(base(), 999), base());
        assert_eq!(cancelled_time(base(), 2000).second, 2);
    }
}
