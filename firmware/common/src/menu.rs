//! Blocking menu engine.
//!
//! Renders a titled single-select list in the dialog box and blocks until
//! the select edge fires, returning the highlighted index. Selection
//! wraps at both ends; holding a direction past the acceleration
//! threshold repeats moves at the polling rate; the highlighted row
//! marquee-scrolls when its text overflows the column budget, unselected
//! rows are truncated. A proportional scrollbar appears when the item
//! count exceeds one page; a starting-selected marker column shows which
//! entry is currently active in settings menus.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::battery::Battery;
use crate::clock::Clock;
use crate::config::{BOX_COLS, MENU_LIST_Y, MENU_PAGE_SIZE};
use crate::cursor::ListCursor;
use crate::gui::CameraGui;
use crate::input::{Button, ButtonPad, HoldTracker};
use crate::scroll::Scroller;
use crate::storage::Storage;
use crate::ticker::Ticker;

/// What ended one pass of the poll loop.
pub(crate) enum ListEvent {
    Prev,
    Next,
    Select,
    Shutter,
    Scrolled,
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
    /// Show a menu and block until an item is selected. `starting`
    /// pre-highlights an item and marks it with `*` (used by settings
    /// menus to show the active value).
    pub fn menu(&mut self, title: &str, items: &[&str], starting: Option<usize>) -> usize {
        debug_assert!(!items.is_empty());

        let mut cursor = ListCursor::new(items.len(), MENU_PAGE_SIZE);
        if let Some(index) = starting {
            cursor.jump_to(index);
        }

        let mut cols = BOX_COLS - 2;
        if cursor.overflows() {
            cols -= 1;
        }
        if starting.is_some() {
            cols -= 2;
        }

        self.draw_dialog_box(title);

        let mut scroller = Scroller::new(self.ticker.now_ms());
        let mut hold = HoldTracker::new();
        let mut last_moved = self.ticker.now_ms();

        loop {
            for index in cursor.visible() {
                let selected = index == cursor.selected();
                let offset = if selected { scroller.offset() } else { 0 };
                let marker = starting.map(|s| if s == index { '*' } else { ' ' });
                self.draw_list_row(
                    MENU_LIST_Y,
                    index - cursor.offset(),
                    items[index],
                    offset,
                    cols,
                    selected,
                    marker,
                );
            }
            if cursor.overflows() {
                self.draw_scrollbar(MENU_LIST_Y, &cursor);
            }
            self.draw_bottom_toolbar(false);

            self.wait_move_throttle(last_moved);

            let selected_len = items[cursor.selected()].len();
            match self.poll_list(&mut hold, &mut [(&mut scroller, selected_len, cols)]) {
                ListEvent::Prev => {
                    cursor.move_prev();
                    scroller.reset(self.ticker.now_ms());
                }
                ListEvent::Next => {
                    cursor.move_next();
                    scroller.reset(self.ticker.now_ms());
                }
                ListEvent::Select => return cursor.selected(),
                ListEvent::Shutter | ListEvent::Scrolled => {}
            }
            last_moved = self.ticker.now_ms();
        }
    }

    /// Spin on the button pad until something requires a redraw or a
    /// terminal action. Shared with the file explorer, which also reacts
    /// to the shutter button (the menu ignores it). `marquees` holds the
    /// active scrollers as `(scroller, text_len, cols)`; any of them
    /// advancing ends the pass.
    pub(crate) fn poll_list(
        &mut self,
        hold: &mut HoldTracker,
        marquees: &mut [(&mut Scroller, usize, usize)],
    ) -> ListEvent {
        loop {
            self.draw_bottom_toolbar(false);

            let now = self.ticker.now_ms();
            let up_held = self.pad.is_held(Button::Up);
            let down_held = self.pad.is_held(Button::Down);
            hold.sample(up_held || down_held, now);

            if self.pad.just_pressed(Button::Up) || (up_held && hold.accelerating()) {
                return ListEvent::Prev;
            }
            if self.pad.just_pressed(Button::Down) || (down_held && hold.accelerating()) {
                return ListEvent::Next;
            }
            if self.pad.just_pressed(Button::Select) {
                return ListEvent::Select;
            }
            if self.pad.just_pressed(Button::Shutter) {
                return ListEvent::Shutter;
            }
            let mut scrolled = false;
            for (scroller, len, cols) in marquees.iter_mut() {
                if scroller.step(now, *len, *cols) {
                    scrolled = true;
                }
            }
            if scrolled {
                return ListEvent::Scrolled;
            }

            self.ticker.delay_ms(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::{test_gui, Script};
    use crate::input::Button::*;

    #[test]
    fn select_returns_highlighted_index() {
        let mut gui = test_gui(Script::presses(&[Down, Down, Select]));
        let chosen = gui.menu("Main menu", &["one", "two", "three", "four"], None);
        assert_eq!(chosen, 2);
    }

    #[test]
    fn wraps_from_first_to_last() {
        let mut gui = test_gui(Script::presses(&[Up, Select]));
        let chosen = gui.menu("Main menu", &["a", "b", "c"], None);
        assert_eq!(chosen, 2);
    }

    #[test]
    fn wraps_from_last_to_first() {
        let mut gui = test_gui(Script::presses(&[Up, Down, Select]));
        let chosen = gui.menu("Main menu", &["a", "b", "c"], None);
        assert_eq!(chosen, 0);
    }

    #[test]
    fn starting_selection_is_honored() {
        let mut gui = test_gui(Script::presses(&[Select]));
        let chosen = gui.menu("Light mode", &["Auto", "Sunny", "Cloudy"], Some(1));
        assert_eq!(chosen, 1);
    }

    #[test]
    fn shutter_is_ignored_in_plain_menus() {
        let mut gui = test_gui(Script::presses(&[Shutter, Down, Select]));
        let chosen = gui.menu("Main menu", &["a", "b"], None);
        assert_eq!(chosen, 1);
    }

    #[test]
    fn long_lists_walk_past_a_page() {
        let items: std::vec::Vec<std::string::String> =
            (0..20).map(|i| std::format!("item {i}")).collect();
        let refs: std::vec::Vec<&str> = items.iter().map(|s| s.as_str()).collect();
        let mut script = std::vec::Vec::new();
        for _ in 0..12 {
            script.push(Down);
        }
        script.push(Select);
        let mut gui = test_gui(Script::presses(&script));
        assert_eq!(gui.menu("Long", &refs, None), 12);
    }
}
