//! Fake OV2640 and the raster decoder for its output.
//!
//! The simulated sensor renders an animated color-bar test pattern.
//! Frames are stored in a trivial raster format (`PCRW`, width, height,
//! RGB565 little-endian) under the same sequential filenames the
//! hardware build uses, and [`RasterDecoder`] reads them back for the
//! image viewer, downsampling captures larger than the panel.

use std::fs;
use std::path::{Path, PathBuf};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use pocketcam_gui::camera::{
    CameraSession, CameraSettings, CaptureError, ImageSize, Level, SensorId, SpecialEffect,
    frame_filename,
};
use pocketcam_gui::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use pocketcam_gui::viewer::{DecodeError, ImageDecoder};

const MAGIC: &[u8; 4] = b"PCRW";

fn dims(size: ImageSize) -> (u32, u32) {
    match size {
        ImageSize::Qqvga => (160, 120),
        ImageSize::Qcif => (176, 144),
        ImageSize::Qvga => (320, 240),
        ImageSize::Cif => (352, 288),
        ImageSize::Vga => (640, 480),
        ImageSize::Svga => (800, 600),
        ImageSize::Xga => (1024, 768),
        ImageSize::Sxga => (1280, 1024),
        ImageSize::Uxga => (1600, 1200),
    }
}

fn brightness_delta(level: Level) -> i16 {
    match level {
        Level::Minus2 => -64,
        Level::Minus1 => -32,
        Level::Zero => 0,
        Level::Plus1 => 32,
        Level::Plus2 => 64,
    }
}

/// The simulated sensor.
pub struct SimCamera {
    settings: CameraSettings,
    images_dir: PathBuf,
    next_index: u32,
    frame: u32,
}

impl SimCamera {
    /// `images_dir` is the host directory captures land in.
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            settings: CameraSettings::default(),
            images_dir: images_dir.into(),
            next_index: 1,
            frame: 0,
        }
    }

    /// What the hardware probe would read from the sensor registers.
    pub fn probe(&self) -> SensorId {
        SensorId { vid: 0x26, pid: 0x41 }
    }

    /// One test-pattern pixel: eight vertical color bars with a moving
    /// diagonal highlight, run through the brightness and special-effect
    /// settings.
    fn pattern_pixel(&self, x: u32, y: u32, w: u32, h: u32) -> Rgb565 {
        const BARS: [(u8, u8, u8); 8] = [
            (255, 255, 255),
            (255, 255, 0),
            (0, 255, 255),
            (0, 255, 0),
            (255, 0, 255),
            (255, 0, 0),
            (0, 0, 255),
            (16, 16, 16),
        ];
        let bar = (x * 8 / w.max(1)) as usize;
        let (mut r, mut g, mut b) = BARS[bar.min(7)];

        // Moving highlight so the preview visibly animates.
        let stripe = (x + y + self.frame * 3) % h.max(1);
        if stripe < h / 16 {
            r = r.saturating_add(48);
            g = g.saturating_add(48);
            b = b.saturating_add(48);
        }

        let (r, g, b) = apply_effect(self.settings.special_effect, r, g, b);
        let delta = brightness_delta(self.settings.brightness);
        let r = (i16::from(r) + delta).clamp(0, 255) as u8;
        let g = (i16::from(g) + delta).clamp(0, 255) as u8;
        let b = (i16::from(b) + delta).clamp(0, 255) as u8;
        Rgb565::new(r >> 3, g >> 2, b >> 3)
    }

    fn render(&self, w: u32, h: u32) -> Vec<Rgb565> {
        let mut pixels = Vec::with_capacity((w * h) as usize);
        for y in 0..h {
            for x in 0..w {
                pixels.push(self.pattern_pixel(x, y, w, h));
            }
        }
        pixels
    }

    /// Draw one live preview frame over the full panel.
    pub fn preview<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D) {
        let area = Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        let pixels = self.render(SCREEN_WIDTH, SCREEN_HEIGHT);
        display.fill_contiguous(&area, pixels).ok();
        self.frame = self.frame.wrapping_add(1);
    }

    fn encode(&self) -> Vec<u8> {
        let (w, h) = dims(self.settings.image_size);
        let mut out = Vec::with_capacity(8 + (w * h * 2) as usize);
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&(w as u16).to_le_bytes());
        out.extend_from_slice(&(h as u16).to_le_bytes());
        for pixel in self.render(w, h) {
            out.extend_from_slice(&pixel.into_storage().to_le_bytes());
        }
        out
    }
}

fn apply_effect(effect: SpecialEffect, r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let gray = ((u16::from(r) * 77 + u16::from(g) * 151 + u16::from(b) * 28) >> 8) as u8;
    match effect {
        SpecialEffect::Normal => (r, g, b),
        SpecialEffect::Antique => (gray.saturating_add(32), gray, gray.saturating_sub(32)),
        SpecialEffect::Bluish => (r / 2, g / 2, b.saturating_add(64)),
        SpecialEffect::Greenish => (r / 2, g.saturating_add(64), b / 2),
        SpecialEffect::Reddish => (r.saturating_add(64), g / 2, b / 2),
        SpecialEffect::BlackWhite => (gray, gray, gray),
        SpecialEffect::Negative => (255 - r, 255 - g, 255 - b),
        SpecialEffect::BlackWhiteNegative => (255 - gray, 255 - gray, 255 - gray),
    }
}

impl CameraSession for SimCamera {
    fn capture_to_memory(&mut self, dest: &mut [u8]) -> Result<usize, CaptureError> {
        let bytes = self.encode();
        if dest.len() < bytes.len() {
            return Err(CaptureError::Camera);
        }
        dest[..bytes.len()].copy_from_slice(&bytes);
        self.frame = self.frame.wrapping_add(1);
        Ok(bytes.len())
    }

    fn capture_to_disk(&mut self) -> Result<usize, CaptureError> {
        // Skip over names already on disk from earlier runs.
        loop {
            let name = frame_filename(self.next_index);
            let path = self.images_dir.join(name.as_str());
            if !path.exists() {
                let bytes = self.encode();
                fs::write(&path, &bytes).map_err(|_| CaptureError::DiskIo)?;
                self.next_index += 1;
                self.frame = self.frame.wrapping_add(1);
                return Ok(bytes.len());
            }
            self.next_index += 1;
        }
    }

    fn settings(&self) -> CameraSettings {
        self.settings
    }

    fn apply(&mut self, settings: CameraSettings) {
        self.settings = settings;
    }
}

/// Reads the simulator's raster captures back for the viewer.
pub struct RasterDecoder {
    data: Vec<u8>,
    width: u32,
    height: u32,
    step: u32,
}

impl RasterDecoder {
    pub fn open(path: &Path) -> Result<Self, DecodeError> {
        let data = fs::read(path).map_err(|_| DecodeError::Io)?;
        if data.len() < 8 || &data[..4] != MAGIC {
            return Err(DecodeError::Unsupported);
        }
        let width = u32::from(u16::from_le_bytes([data[4], data[5]]));
        let height = u32::from(u16::from_le_bytes([data[6], data[7]]));
        if width == 0 || height == 0 || data.len() != 8 + (width * height * 2) as usize {
            return Err(DecodeError::Malformed);
        }
        let step = (width.div_ceil(SCREEN_WIDTH)).max(height.div_ceil(SCREEN_HEIGHT)).max(1);
        Ok(Self { data, width, height, step })
    }

    fn pixel(&self, x: u32, y: u32) -> Rgb565 {
        let at = 8 + 2 * (y * self.width + x) as usize;
        let raw = u16::from_le_bytes([self.data[at], self.data[at + 1]]);
        Rgb565::from(RawU16::new(raw))
    }
}

impl ImageDecoder for RasterDecoder {
    fn size(&mut self) -> Size {
        Size::new((self.width / self.step).max(1), (self.height / self.step).max(1))
    }

    fn decode(
        &mut self,
        blit: &mut dyn FnMut(Rectangle, &[Rgb565]),
    ) -> Result<(), DecodeError> {
        let out_w = (self.width / self.step).max(1);
        let out_h = (self.height / self.step).max(1);
        let mut row = Vec::with_capacity(out_w as usize);
        for y in 0..out_h {
            row.clear();
            for x in 0..out_w {
                row.push(self.pixel(x * self.step, y * self.step));
            }
            blit(
                Rectangle::new(Point::new(0, y as i32), Size::new(out_w, 1)),
                &row,
            );
        }
        Ok(())
    }
}
