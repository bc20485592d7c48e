//! Stateful file explorer.
//!
//! Browses the storage tree as a virtual list: two synthetic rows
//! ("Exit", "Up a folder") followed by the visible entries of the
//! current directory, directories suffixed with `/`. Selecting a file
//! returns its absolute path together with the navigation state, so a
//! caller can run a nested dialog (say, the image viewer) and re-enter
//! the explorer exactly where the user left it. In file-options mode the
//! shutter button opens a delete flow for the highlighted file.
//!
//! Any storage error aborts the dialog: the error is logged and the
//! explorer returns as cancelled rather than presenting a listing it
//! cannot trust.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::{String, Vec};

use crate::battery::Battery;
use crate::clock::Clock;
use crate::config::{
    BOX_COLS, EXPLORER_LIST_Y, EXPLORER_PAGE_SIZE, EXPLORER_PATH_Y, NAME_MAX, NOTIFY_MS,
};
use crate::cursor::ListCursor;
use crate::gui::CameraGui;
use crate::input::{ButtonPad, HoldTracker};
use crate::menu::ListEvent;
use crate::path::PathBuf;
use crate::scroll::Scroller;
use crate::storage::{self, Storage};
use crate::ticker::Ticker;

/// Rows prepended to every directory listing.
const EXTRA_OPTIONS: [&str; 2] = ["Exit", "Up a folder"];

/// Where the explorer was when it handed a file back.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NavState {
    pub dir: PathBuf,
    pub cursor: ListCursor,
}

/// A file picked in the explorer, with the state to resume from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Chosen {
    pub path: PathBuf,
    pub state: NavState,
}

type RowText = String<{ NAME_MAX + 2 }>;

impl<D, S, C, P, T, B> CameraGui<D, S, C, P, T, B>
where
    D: DrawTarget<Color = Rgb565>,
    S: Storage,
    C: Clock,
    P: ButtonPad,
    T: Ticker,
    B: Battery,
{
    /// Browse from `start_dir` (or from `resume`) until the user picks a
    /// file or exits. `file_options` arms the shutter-button delete flow.
    pub fn file_explorer(
        &mut self,
        start_dir: &str,
        resume: Option<NavState>,
        file_options: bool,
    ) -> Option<Chosen> {
        let (mut dir, mut restore) = match resume {
            Some(state) => (state.dir, Some(state.cursor)),
            None => match PathBuf::parse(start_dir) {
                Ok(dir) => (dir, None),
                Err(_) => {
                    self.log.pushf(format_args!("explorer: bad start dir {start_dir}"));
                    return None;
                }
            },
        };

        'relist: loop {
            let entries = match storage::file_count(&mut self.storage, dir.as_str()) {
                Ok(n) => n as usize,
                Err(e) => {
                    self.log.pushf(format_args!("explorer: list {} failed: {e:?}", dir));
                    return None;
                }
            };
            let total = EXTRA_OPTIONS.len() + entries;
            let mut cursor = match restore.take() {
                Some(saved) => ListCursor::restore(saved, total, EXPLORER_PAGE_SIZE),
                None => ListCursor::new(total, EXPLORER_PAGE_SIZE),
            };

            let path_cols = BOX_COLS - 2;
            let mut cols = BOX_COLS - 2;
            if cursor.overflows() {
                cols -= 1;
            }

            self.draw_dialog_box("File explorer");

            let now = self.ticker.now_ms();
            let mut path_scroller = Scroller::new(now);
            let mut row_scroller = Scroller::new(now);
            let mut hold = HoldTracker::new();
            let mut last_moved = now;

            // Row text for the visible page, rebuilt when the page moves.
            let mut rows: Vec<RowText, EXPLORER_PAGE_SIZE> = Vec::new();
            let mut rows_offset = usize::MAX;

            loop {
                if rows_offset != cursor.offset() {
                    rows.clear();
                    for index in cursor.visible() {
                        let text = match self.entry_name(&dir, index) {
                            Ok(text) => text,
                            Err(()) => return None,
                        };
                        rows.push(text).ok();
                    }
                    rows_offset = cursor.offset();
                }

                self.draw_list_row(
                    EXPLORER_PATH_Y,
                    0,
                    dir.as_str(),
                    path_scroller.offset(),
                    path_cols,
                    false,
                    None,
                );
                for (row, text) in rows.iter().enumerate() {
                    let index = cursor.offset() + row;
                    let selected = index == cursor.selected();
                    let offset = if selected { row_scroller.offset() } else { 0 };
                    self.draw_list_row(
                        EXPLORER_LIST_Y,
                        row,
                        text.as_str(),
                        offset,
                        cols,
                        selected,
                        None,
                    );
                }
                if cursor.overflows() {
                    self.draw_scrollbar(EXPLORER_LIST_Y, &cursor);
                }
                self.draw_bottom_toolbar(false);

                self.wait_move_throttle(last_moved);

                let selected_row = cursor.selected() - cursor.offset();
                let selected_len = rows.get(selected_row).map_or(0, |t| t.len());
                let event = self.poll_list(
                    &mut hold,
                    &mut [
                        (&mut row_scroller, selected_len, cols),
                        (&mut path_scroller, dir.as_str().len(), path_cols),
                    ],
                );
                match event {
                    ListEvent::Prev => {
                        cursor.move_prev();
                        row_scroller.reset(self.ticker.now_ms());
                    }
                    ListEvent::Next => {
                        cursor.move_next();
                        row_scroller.reset(self.ticker.now_ms());
                    }
                    ListEvent::Select => match cursor.selected() {
                        0 => return None,
                        1 => {
                            dir.pop_to_parent();
                            continue 'relist;
                        }
                        index => {
                            let name = &rows[index - cursor.offset()];
                            if name.is_empty() {
                                // Listing went stale underneath us.
                                restore = Some(cursor);
                                continue 'relist;
                            }
                            if let Some(folder) = name.strip_suffix('/') {
                                if dir.join(folder).is_err() {
                                    self.set_bottom_text("Path too long", NOTIFY_MS);
                                    restore = Some(cursor);
                                }
                                continue 'relist;
                            }
                            let mut path = dir.clone();
                            if path.join(name).is_err() {
                                self.set_bottom_text("Path too long", NOTIFY_MS);
                                restore = Some(cursor);
                                continue 'relist;
                            }
                            return Some(Chosen { path, state: NavState { dir, cursor } });
                        }
                    },
                    ListEvent::Shutter => {
                        let index = cursor.selected();
                        let name = rows.get(index.wrapping_sub(cursor.offset())).cloned();
                        if let Some(name) = name
                            && file_options
                            && index >= EXTRA_OPTIONS.len()
                            && !name.is_empty()
                            && !name.ends_with('/')
                        {
                            let deleted = self.delete_flow(&dir, &name);
                            if deleted {
                                let remaining =
                                    match storage::file_count(&mut self.storage, dir.as_str()) {
                                        Ok(n) => n as usize,
                                        Err(e) => {
                                            self.log.pushf(format_args!(
                                                "explorer: relist {} failed: {e:?}",
                                                dir
                                            ));
                                            return None;
                                        }
                                    };
                                cursor.clamp_after_removal(EXTRA_OPTIONS.len(), remaining);
                            }
                            restore = Some(cursor);
                            continue 'relist;
                        }
                    }
                    ListEvent::Scrolled => {}
                }
                last_moved = self.ticker.now_ms();
            }
        }
    }

    /// Virtual-list row text: the synthetic rows, then the directory
    /// entries. An index past the end yields an empty string (the listing
    /// changed since it was counted); storage errors are logged and abort.
    fn entry_name(&mut self, dir: &PathBuf, index: usize) -> Result<RowText, ()> {
        if index < EXTRA_OPTIONS.len() {
            let mut text = RowText::new();
            text.push_str(EXTRA_OPTIONS[index]).ok();
            return Ok(text);
        }
        let entry = index - EXTRA_OPTIONS.len();
        match storage::name_from_index(&mut self.storage, dir.as_str(), entry as u32) {
            Ok(Some(name)) => Ok(name),
            Ok(None) => Ok(RowText::new()),
            Err(e) => {
                self.log.pushf(format_args!("explorer: read {} failed: {e:?}", dir));
                Err(())
            }
        }
    }

    /// Shutter-button file menu: confirm and delete the highlighted file,
    /// reporting the outcome on the toolbar. Returns whether a file was
    /// removed.
    fn delete_flow(&mut self, dir: &PathBuf, name: &str) -> bool {
        if self.menu("File options", &["Cancel", "Delete file"], None) != 1 {
            return false;
        }
        if self.menu("Delete file?", &["No", "Yes"], None) != 1 {
            return false;
        }
        let mut path = dir.clone();
        if path.join(name).is_err() {
            self.set_bottom_text("Path too long", NOTIFY_MS);
            return false;
        }
        match self.storage.remove(path.as_str()) {
            Ok(()) => {
                self.set_bottom_text("File deleted", NOTIFY_MS);
                true
            }
            Err(e) => {
                self.log.pushf(format_args!("explorer: delete {} failed: {e:?}", path));
                self.set_bottom_text("Couldn't delete file", NOTIFY_MS);
                false
            }
        }
    }
}
