//! List selection with wrap-around and minimal-scroll pagination.
//!
//! Shared by the menu engine and the file explorer. Movement wraps at
//! both ends; the page offset follows the selection with minimal-scroll
//! semantics (advance by the exact overshoot, snap up to the index), and
//! the whole cursor is a plain value so the explorer can save it across
//! nested dialogs and restore it afterwards.

/// Selection + page window over a list of `count` items.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ListCursor {
    selected: usize,
    offset: usize,
    count: usize,
    page: usize,
}

impl ListCursor {
    pub fn new(count: usize, page: usize) -> Self {
        debug_assert!(page > 0);
        Self { selected: 0, offset: 0, count, page }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Whether the list needs a scrollbar.
    pub fn overflows(&self) -> bool {
        self.count > self.page
    }

    /// Indices of the currently visible rows.
    pub fn visible(&self) -> core::ops::Range<usize> {
        self.offset..self.count.min(self.offset + self.page)
    }

    /// Move to the previous item, wrapping to the end.
    pub fn move_prev(&mut self) {
        if self.count == 0 {
            return;
        }
        self.selected = if self.selected == 0 { self.count - 1 } else { self.selected - 1 };
        self.ensure_visible();
    }

    /// Move to the next item, wrapping to the start.
    pub fn move_next(&mut self) {
        if self.count == 0 {
            return;
        }
        self.selected = if self.selected == self.count - 1 { 0 } else { self.selected + 1 };
        self.ensure_visible();
    }

    /// Jump straight to an index (clamped).
    pub fn jump_to(&mut self, index: usize) {
        self.selected = index.min(self.count.saturating_sub(1));
        self.ensure_visible();
    }

    /// Re-establish `offset <= selected < offset + page` with minimal
    /// scrolling: overflow below advances the offset by exactly the
    /// overshoot, moving above the page snaps the offset to the index.
    pub fn ensure_visible(&mut self) {
        if self.selected >= self.offset + self.page {
            self.offset += self.selected - (self.offset + self.page) + 1;
        } else if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    /// Restore a saved cursor against a list that may have shrunk.
    pub fn restore(saved: Self, count: usize, page: usize) -> Self {
        let mut out = Self { selected: saved.selected, offset: saved.offset, count, page };
        out.selected = out.selected.min(count.saturating_sub(1));
        out.offset = out.offset.min(out.selected);
        out.ensure_visible();
        out
    }

    /// Correct the cursor after the selected entry was deleted.
    ///
    /// `synthetic` is the number of fixed rows prepended to the real
    /// entries and `remaining` the number of real entries left. Deleting
    /// anything but the first real entry keeps the selection on the
    /// previous one; deleting the last file of a directory falls back
    /// onto the last synthetic row.
    pub fn clamp_after_removal(&mut self, synthetic: usize, remaining: usize) {
        self.count = synthetic + remaining;
        if self.selected > synthetic || remaining == 0 {
            self.selected = self.selected.saturating_sub(1);
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        }
        self.ensure_visible();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_both_ways() {
        let mut c = ListCursor::new(5, 3);
        c.move_prev();
        assert_eq!(c.selected(), 4);
        c.move_next();
        assert_eq!(c.selected(), 0);
    }

    #[test]
    fn pagination_is_minimal() {
        let mut c = ListCursor::new(20, 5);
        // Walk to the last visible row, then one past it.
        for _ in 0..4 {
            c.move_next();
        }
        assert_eq!((c.selected(), c.offset()), (4, 0));
        c.move_next();
        assert_eq!((c.selected(), c.offset()), (5, 1));
        c.move_next();
        assert_eq!(c.offset(), 2);
    }

    #[test]
    fn moving_above_page_snaps_offset() {
        let mut c = ListCursor::new(20, 5);
        c.jump_to(10);
        assert_eq!(c.offset(), 6);
        c.jump_to(3);
        assert_eq!(c.offset(), 3);
    }

    #[test]
    fn wrap_to_end_shows_last_page() {
        let mut c = ListCursor::new(20, 5);
        c.move_prev();
        assert_eq!(c.selected(), 19);
        assert_eq!(c.offset(), 15);
    }

    #[test]
    fn removal_keeps_position_on_previous_file() {
        // Virtual list: Exit, Up, A, B, C -> select C (index 4), delete.
        let mut c = ListCursor::new(5, 6);
        c.jump_to(4);
        c.clamp_after_removal(2, 2);
        assert_eq!(c.selected(), 3); // B
        assert_eq!(c.count(), 4);
    }

    #[test]
    fn removal_of_first_file_selects_next() {
        // Exit, Up, A, B -> select A (index 2), delete: B slides into 2.
        let mut c = ListCursor::new(4, 6);
        c.jump_to(2);
        c.clamp_after_removal(2, 1);
        assert_eq!(c.selected(), 2);
    }

    #[test]
    fn removal_of_last_file_falls_back_to_synthetic_row() {
        let mut c = ListCursor::new(3, 6);
        c.jump_to(2);
        c.clamp_after_removal(2, 0);
        assert_eq!(c.selected(), 1);
    }

    #[test]
    fn restore_clamps_against_shrunk_list() {
        let mut c = ListCursor::new(12, 5);
        c.jump_to(11);
        let restored = ListCursor::restore(c, 6, 5);
        assert_eq!(restored.selected(), 5);
        assert!(restored.offset() <= restored.selected());
        assert!(restored.selected() < restored.offset() + restored.page());
    }
}
