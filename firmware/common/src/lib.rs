//! Menu, file-explorer and status-bar engine for the pocketcam handheld
//! camera.
//!
//! This crate contains the platform-agnostic UI core shared between the
//! desktop simulator and the ESP32 hardware build:
//!
//! - [`config`]: layout and timing constants for the 160x128 panel
//! - [`input`]: button abstraction and hold-to-accelerate tracking
//! - [`clock`]: calendar time value type and RTC trait
//! - [`storage`]: filesystem trait plus directory enumeration helpers
//! - [`path`]: bounded owned path type with join/parent operations
//! - [`scroll`]: horizontal marquee for strings wider than their column
//! - [`cursor`]: wrap-around list selection with minimal-scroll paging
//! - [`menu`], [`explorer`], [`editor`], [`dialog`], [`viewer`]: the
//!   blocking UI dialogs, implemented on the [`gui::CameraGui`] context
//! - [`toolbar`]: clock/battery strip with transient messages
//! - [`camera`]: camera session contract (settings, capture errors)
//! - [`trace`]: bounded event log
//!
//! # no_std compatibility
//!
//! The crate is `no_std` and allocation-free; all strings and collections
//! are `heapless`. Everything draws through
//! `embedded_graphics::draw_target::DrawTarget<Color = Rgb565>`, so the
//! engine runs unchanged against the SDL simulator display and the SPI TFT.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod battery;
pub mod camera;
pub mod clock;
pub mod colors;
pub mod config;
pub mod cursor;
pub mod dialog;
pub mod editor;
pub mod explorer;
pub mod gui;
pub mod input;
pub mod menu;
pub mod path;
pub mod scroll;
pub mod storage;
pub mod ticker;
pub mod toolbar;
pub mod trace;
pub mod viewer;

#[cfg(test)]
pub(crate) mod testutil;

pub use clock::{Clock, DateTime};
pub use explorer::{Chosen, NavState};
pub use gui::CameraGui;
pub use path::PathBuf;
pub use input::{Button, ButtonPad};
pub use storage::{Storage, StorageError};
pub use ticker::Ticker;
