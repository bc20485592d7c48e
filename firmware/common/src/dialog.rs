//! Modal message box.
//!
//! Used for boot failures ("Couldn't find SD card") and informational
//! screens. Wraps the body text to the box width and blocks until the
//! select edge fires.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::battery::Battery;
use crate::clock::Clock;
use crate::config::{BOX_COLS, BOX_H, BOX_Y, CHAR_H, MENU_LIST_Y};
use crate::gui::CameraGui;
use crate::input::{Button, ButtonPad};
use crate::storage::Storage;
use crate::ticker::Ticker;

impl<D, S, C, P, T, B> CameraGui<D, S, C, P, T, B>
where
    D: DrawTarget<Color = Rgb565>,
    S: Storage,
    C: Clock,
    P: ButtonPad,
    T: Ticker,
    B: Battery,
{
    /// Show a message and block until the user acknowledges it.
    pub fn dialog(&mut self, title: &str, text: &str) {
        self.draw_dialog_box(title);

        let cols = BOX_COLS - 2;
        let body_rows = ((BOX_Y + BOX_H as i32 - MENU_LIST_Y) / CHAR_H - 1) as usize;

        // Greedy word wrap; explicit newlines start a fresh row.
        let mut row = 0;
        'wrap: for paragraph in text.split('\n') {
            let mut start = 0;
            let bytes = paragraph.as_bytes();
            while start < bytes.len() {
                if row >= body_rows {
                    break 'wrap;
                }
                let remaining = bytes.len() - start;
                let mut end = start + remaining.min(cols);
                if end < bytes.len() {
                    // Break at the last space that still fits.
                    if let Some(space) =
                        paragraph[start..end].rfind(' ').filter(|_| bytes[end] != b' ')
                    {
                        if space > 0 {
                            end = start + space;
                        }
                    }
                }
                self.draw_list_row(MENU_LIST_Y, row, paragraph[start..end].trim(), 0, cols, false, None);
                row += 1;
                start = end;
                while start < bytes.len() && bytes[start] == b' ' {
                    start += 1;
                }
            }
            if paragraph.is_empty() {
                if row >= body_rows {
                    break;
                }
                row += 1;
            }
        }

        self.draw_list_row(MENU_LIST_Y, body_rows, "[select]", 0, cols, true, None);

        loop {
            self.draw_bottom_toolbar(false);
            if self.pad.just_pressed(Button::Select) {
                return;
            }
            self.ticker.delay_ms(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::input::Button::*;
    use crate::testutil::{test_gui, Script};

    #[test]
    fn returns_on_select() {
        let mut gui = test_gui(Script::presses(&[Select]));
        gui.dialog("About", "pocketcam\nA tiny camera with a\nvery long line that needs wrapping to fit");
        // Reaching this point means the blocking loop exited on select.
    }
}
