//! Shared fakes for host-side tests.
//!
//! Blocking dialogs are driven by a scripted button pad: each queued
//! press is delivered when the dialog polls that button, one event per
//! poll pass. The manual ticker advances simulated time inside
//! `delay_ms`, so throttles and marquee ticks elapse instantly.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use std::string::String;
use std::vec::Vec;

use crate::battery::Battery;
use crate::clock::{Clock, DateTime};
use crate::gui::CameraGui;
use crate::input::{Button, ButtonPad};
use crate::storage::{DirEntry, Storage, StorageError};
use crate::ticker::Ticker;

// =============================================================================
// Display
// =============================================================================

/// Accepts and discards all drawing.
pub struct NullDisplay;

impl OriginDimensions for NullDisplay {
    fn size(&self) -> Size {
        Size::new(crate::config::SCREEN_WIDTH, crate::config::SCREEN_HEIGHT)
    }
}

impl DrawTarget for NullDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, _pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        Ok(())
    }
}

// =============================================================================
// Input
// =============================================================================

/// Scripted pad: the front press is consumed when the dialog polls that
/// button; polls for other buttons see nothing.
pub struct Script {
    queue: Vec<Button>,
}

impl Script {
    pub fn presses(seq: &[Button]) -> Self {
        Self { queue: seq.to_vec() }
    }
}

impl ButtonPad for Script {
    fn is_held(&mut self, _button: Button) -> bool {
        false
    }

    fn just_pressed(&mut self, button: Button) -> bool {
        if self.queue.first() == Some(&button) {
            self.queue.remove(0);
            true
        } else {
            false
        }
    }
}

// =============================================================================
// Time
// =============================================================================

/// Simulated milliseconds; `delay_ms` advances instantly.
pub struct ManualTicker {
    now: Cell<u64>,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self { now: Cell::new(0) }
    }
}

impl Ticker for ManualTicker {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now.set(self.now.get() + u64::from(ms));
    }
}

// =============================================================================
// Clock & battery
// =============================================================================

pub struct FakeClock {
    pub now: DateTime,
}

impl FakeClock {
    pub fn at(now: DateTime) -> Self {
        Self { now }
    }
}

impl Clock for FakeClock {
    fn now(&mut self) -> DateTime {
        self.now
    }

    fn adjust(&mut self, t: DateTime) {
        self.now = t;
    }
}

pub struct FakeBattery(pub u16);

impl Battery for FakeBattery {
    fn millivolts(&mut self) -> u16 {
        self.0
    }
}

// =============================================================================
// Storage
// =============================================================================

/// In-memory filesystem with insertion-ordered enumeration.
pub struct MemStorage {
    // (absolute path, is_dir), insertion order == enumeration order.
    entries: Vec<(String, bool)>,
}

fn split_parent(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("/", path),
    }
}

impl MemStorage {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn add_dir(&mut self, path: &str) {
        self.entries.push((String::from(path), true));
    }

    pub fn add_file(&mut self, path: &str) {
        self.entries.push((String::from(path), false));
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.iter().any(|(p, _)| p == path)
    }
}

impl Storage for MemStorage {
    fn read_dir(
        &mut self,
        dir: &str,
        visit: &mut dyn FnMut(&DirEntry),
    ) -> Result<(), StorageError> {
        if dir != "/" && !self.entries.iter().any(|(p, d)| p == dir && *d) {
            return Err(StorageError::NotFound);
        }
        for (path, is_dir) in &self.entries {
            let (parent, name) = split_parent(path);
            if parent != dir {
                continue;
            }
            let mut entry_name = heapless::String::new();
            entry_name.push_str(name).ok();
            let entry = DirEntry {
                name: entry_name,
                is_dir: *is_dir,
                is_hidden: name.starts_with('.'),
            };
            visit(&entry);
        }
        Ok(())
    }

    fn remove(&mut self, path: &str) -> Result<(), StorageError> {
        let before = self.entries.len();
        self.entries.retain(|(p, is_dir)| !(p == path && !is_dir));
        if self.entries.len() == before { Err(StorageError::NotFound) } else { Ok(()) }
    }

    fn mkdir(&mut self, path: &str) -> Result<(), StorageError> {
        if !self.contains(path) {
            self.add_dir(path);
        }
        Ok(())
    }

    fn exists(&mut self, path: &str) -> bool {
        self.contains(path)
    }
}

// =============================================================================
// Context builders
// =============================================================================

pub type TestGui = CameraGui<NullDisplay, MemStorage, FakeClock, Script, ManualTicker, FakeBattery>;

pub fn test_gui(script: Script) -> TestGui {
    test_gui_with(script, MemStorage::new(), FakeClock::at(DateTime::new(2023, 1, 1, 12, 0, 0)))
}

pub fn test_gui_with(script: Script, storage: MemStorage, clock: FakeClock) -> TestGui {
    CameraGui::new(NullDisplay, storage, clock, script, ManualTicker::new(), FakeBattery(3900))
}
