//! Layout and timing constants.
//!
//! All dialog geometry is derived at compile time from the panel size and
//! the 6x10 character cell, so the row counts and column budgets used by
//! the menu and the file explorer are plain `const`s instead of per-frame
//! arithmetic. Ordering relations between the timing constants are checked
//! with `const` assertions.

// =============================================================================
// Display geometry
// =============================================================================

/// Panel width in pixels (ST7735 in landscape).
pub const SCREEN_WIDTH: u32 = 160;

/// Panel height in pixels.
pub const SCREEN_HEIGHT: u32 = 128;

/// Character cell width of the grid font (`FONT_6X10`).
pub const CHAR_W: i32 = 6;

/// Character cell height of the grid font.
pub const CHAR_H: i32 = 10;

// =============================================================================
// Dialog box geometry
// =============================================================================

/// Margin between the panel edge and the dialog box, per side.
pub const BOX_TOP_PAD: i32 = 8;
pub const BOX_RIGHT_PAD: i32 = 8;
pub const BOX_BOTTOM_PAD: i32 = 16;
pub const BOX_LEFT_PAD: i32 = 8;

pub const BOX_X: i32 = BOX_LEFT_PAD;
pub const BOX_Y: i32 = BOX_TOP_PAD;
pub const BOX_W: u32 = SCREEN_WIDTH - (BOX_LEFT_PAD + BOX_RIGHT_PAD) as u32;
pub const BOX_H: u32 = SCREEN_HEIGHT - (BOX_TOP_PAD + BOX_BOTTOM_PAD) as u32;

/// First text column inside the box (half a cell in from the border).
pub const FONT_X: i32 = BOX_X + CHAR_W / 2;

/// Total character columns available inside the box.
pub const BOX_COLS: usize = (BOX_W / CHAR_W as u32) as usize;

/// Y of the title row inside any dialog box.
pub const TITLE_Y: i32 = BOX_Y + CHAR_H;

/// Y of the first menu item row (title plus one-and-a-half cells).
pub const MENU_LIST_Y: i32 = TITLE_Y + CHAR_H * 3 / 2;

/// Item rows that fit on one menu page.
pub const MENU_PAGE_SIZE: usize = ((BOX_Y + BOX_H as i32 - MENU_LIST_Y) / CHAR_H) as usize;

/// Y of the scrolling path row in the file explorer.
pub const EXPLORER_PATH_Y: i32 = TITLE_Y + CHAR_H * 3 / 2;

/// Y of the first entry row in the file explorer (below the path row).
pub const EXPLORER_LIST_Y: i32 = EXPLORER_PATH_Y + CHAR_H * 3 / 2;

/// Entry rows that fit on one explorer page.
pub const EXPLORER_PAGE_SIZE: usize = ((BOX_Y + BOX_H as i32 - EXPLORER_LIST_Y) / CHAR_H) as usize;

/// Scrollbar track width in pixels.
pub const SCROLLBAR_W: u32 = (CHAR_W / 2) as u32;

/// X of the scrollbar track (rightmost character column of the box).
pub const SCROLLBAR_X: i32 = BOX_X + BOX_W as i32 - CHAR_W;

const _: () = assert!(MENU_PAGE_SIZE >= 4);
const _: () = assert!(EXPLORER_PAGE_SIZE >= 4);
const _: () = assert!(EXPLORER_PAGE_SIZE <= MENU_PAGE_SIZE);

// =============================================================================
// Timing
// =============================================================================

/// Marquee advance interval, one character per tick.
pub const SCROLL_TICK_MS: u64 = 200;

/// Ticks spent paused at either end of a marquee cycle.
pub const SCROLL_PAUSE_TICKS: u8 = 4;

/// Columns of slack revealed past the end of a scrolled string.
pub const SCROLL_SLACK: usize = 3;

/// Continuous hold time after which a direction button auto-repeats.
pub const HOLD_TO_ACCEL_MS: u64 = 500;

/// Minimum interval between selection moves (bounds redraw rate).
pub const MOVE_THROTTLE_MS: u64 = 50;

/// Bottom toolbar redraw throttle.
pub const TOOLBAR_THROTTLE_MS: u64 = 1000;

/// Longest the date/time editor waits before redrawing (keeps the seconds
/// field ticking while idle).
pub const EDITOR_MAX_WAIT_MS: u64 = 250;

/// Transient toolbar message duration used for status notifications.
pub const NOTIFY_MS: u64 = 3000;

const _: () = assert!(MOVE_THROTTLE_MS < HOLD_TO_ACCEL_MS);
const _: () = assert!(SCROLL_TICK_MS < TOOLBAR_THROTTLE_MS);
const _: () = assert!(EDITOR_MAX_WAIT_MS <= SCROLL_TICK_MS + 50);

// =============================================================================
// Text budgets
// =============================================================================

/// Longest directory entry name the explorer keeps (FAT long names are
/// truncated at the storage boundary, not silently overrun).
pub const NAME_MAX: usize = 64;

/// Maximum path length, including the leading slash.
pub const PATH_MAX: usize = 250;

/// Character budget of the bottom toolbar line.
pub const BOTTOM_TEXT_MAX: usize = 26;

/// Expiry sentinel: a transient toolbar message that never auto-reverts.
pub const UNLIMITED_MS: u64 = u64::MAX;

const _: () = assert!(BOTTOM_TEXT_MAX * CHAR_W as usize <= SCREEN_WIDTH as usize);
const _: () = assert!(NAME_MAX + 2 < PATH_MAX);
