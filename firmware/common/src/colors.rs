//! Color constants for the camera UI.
//!
//! The UI is monochrome-on-white inside dialogs and white-on-black for the
//! toolbar strip, matching the panel's native Rgb565 format.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

/// Dialog box fill.
pub const BOX_COLOR: Rgb565 = Rgb565::WHITE;

/// Dialog text and border color.
pub const TEXT_COLOR: Rgb565 = Rgb565::BLACK;

/// Toolbar text color.
pub const BAR_FG: Rgb565 = Rgb565::WHITE;

/// Toolbar background (also the screen background outside dialogs).
pub const BAR_BG: Rgb565 = Rgb565::BLACK;
