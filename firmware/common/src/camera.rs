//! Camera session contract.
//!
//! The OV2640 bring-up, FIFO transfer and JPEG plumbing live in the
//! shell; the engine only needs the settings record (to build its
//! settings menus) and the capture entry points with their error
//! taxonomy. Settings are applied to the sensor immediately and persisted
//! by the session across power cycles.

use core::fmt::Write as _;

use heapless::String;

/// JPEG output resolution of the OV2640.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ImageSize {
    Qqvga,  // 160x120
    Qcif,   // 176x144
    Qvga,   // 320x240
    Cif,    // 352x288
    Vga,    // 640x480
    Svga,   // 800x600
    Xga,    // 1024x768
    Sxga,   // 1280x1024
    Uxga,   // 1600x1200
}

impl ImageSize {
    pub const ALL: [Self; 9] = [
        Self::Qqvga,
        Self::Qcif,
        Self::Qvga,
        Self::Cif,
        Self::Vga,
        Self::Svga,
        Self::Xga,
        Self::Sxga,
        Self::Uxga,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Qqvga => "160x120",
            Self::Qcif => "176x144",
            Self::Qvga => "320x240",
            Self::Cif => "352x288",
            Self::Vga => "640x480",
            Self::Svga => "800x600",
            Self::Xga => "1024x768",
            Self::Sxga => "1280x1024",
            Self::Uxga => "1600x1200",
        }
    }
}

/// White balance preset.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LightMode {
    Auto,
    Sunny,
    Cloudy,
    Office,
    Home,
}

impl LightMode {
    pub const ALL: [Self; 5] = [Self::Auto, Self::Sunny, Self::Cloudy, Self::Office, Self::Home];

    pub fn label(self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::Sunny => "Sunny",
            Self::Cloudy => "Cloudy",
            Self::Office => "Office",
            Self::Home => "Home",
        }
    }
}

/// Five-step adjustment used for saturation, brightness and contrast.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Level {
    Minus2,
    Minus1,
    Zero,
    Plus1,
    Plus2,
}

impl Level {
    pub const ALL: [Self; 5] = [Self::Minus2, Self::Minus1, Self::Zero, Self::Plus1, Self::Plus2];

    pub fn label(self) -> &'static str {
        match self {
            Self::Minus2 => "-2",
            Self::Minus1 => "-1",
            Self::Zero => "0",
            Self::Plus1 => "+1",
            Self::Plus2 => "+2",
        }
    }
}

/// Hardware color effect applied by the sensor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpecialEffect {
    Normal,
    Antique,
    Bluish,
    Greenish,
    Reddish,
    BlackWhite,
    Negative,
    BlackWhiteNegative,
}

impl SpecialEffect {
    pub const ALL: [Self; 8] = [
        Self::Normal,
        Self::Antique,
        Self::Bluish,
        Self::Greenish,
        Self::Reddish,
        Self::BlackWhite,
        Self::Negative,
        Self::BlackWhiteNegative,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Antique => "Antique",
            Self::Bluish => "Bluish",
            Self::Greenish => "Greenish",
            Self::Reddish => "Reddish",
            Self::BlackWhite => "B&W",
            Self::Negative => "Negative",
            Self::BlackWhiteNegative => "B&W negative",
        }
    }
}

/// The user-adjustable sensor configuration.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CameraSettings {
    pub image_size: ImageSize,
    pub light_mode: LightMode,
    pub saturation: Level,
    pub brightness: Level,
    pub contrast: Level,
    pub special_effect: SpecialEffect,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            image_size: ImageSize::Vga,
            light_mode: LightMode::Auto,
            saturation: Level::Zero,
            brightness: Level::Zero,
            contrast: Level::Zero,
            special_effect: SpecialEffect::Normal,
        }
    }
}

/// Capture failure taxonomy.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CaptureError {
    /// FIFO oversized, empty, or larger than the destination buffer.
    Camera,
    /// The image file could not be created or written.
    DiskIo,
}

/// A configured camera producing JPEG frames.
pub trait CameraSession {
    /// Capture one frame into `dest`; returns the JPEG byte count.
    fn capture_to_memory(&mut self, dest: &mut [u8]) -> Result<usize, CaptureError>;

    /// Capture one frame straight to storage under the next sequential
    /// filename; returns the bytes written.
    fn capture_to_disk(&mut self) -> Result<usize, CaptureError>;

    fn settings(&self) -> CameraSettings;

    fn apply(&mut self, settings: CameraSettings);
}

/// Sensor identification registers.
///
/// The original firmware's presence check `(vid != 0x26) && (pid != 0x41
/// || pid != 0x42)` is a tautology on the pid side and accepted any pid;
/// the intended check is made explicit here.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SensorId {
    pub vid: u8,
    pub pid: u8,
}

impl SensorId {
    pub fn is_ov2640(self) -> bool {
        self.vid == 0x26 && (self.pid == 0x41 || self.pid == 0x42)
    }
}

/// Sequential image filename: `0000000042.jpg`.
pub fn frame_filename(index: u32) -> String<16> {
    let mut name: String<16> = String::new();
    write!(name, "{index:010}.jpg").ok();
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filenames_are_zero_padded() {
        assert_eq!(frame_filename(1).as_str(), "0000000001.jpg");
        assert_eq!(frame_filename(123456789).as_str(), "0123456789.jpg");
    }

    #[test]
    fn sensor_id_check_is_exact() {
        assert!(SensorId { vid: 0x26, pid: 0x41 }.is_ov2640());
        assert!(SensorId { vid: 0x26, pid: 0x42 }.is_ov2640());
        assert!(!SensorId { vid: 0x26, pid: 0x99 }.is_ov2640());
        assert!(!SensorId { vid: 0x7f, pid: 0x41 }.is_ov2640());
    }

    #[test]
    fn settings_default_is_valid_menu_state() {
        let s = CameraSettings::default();
        assert!(ImageSize::ALL.contains(&s.image_size));
        assert!(SpecialEffect::ALL.contains(&s.special_effect));
        assert_eq!(s.brightness, Level::Zero);
    }
}
