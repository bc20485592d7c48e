//! Full-screen image viewer.
//!
//! Decoding is the shell's business (the simulator reads its own raster
//! dumps, hardware decodes JPEG); the engine only blits whatever
//! rectangular blocks the decoder pushes and waits for the shutter edge
//! to leave. A decode failure is reported on the toolbar and the viewer
//! still waits, so a broken file never drops the user back mid-keypress.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::battery::Battery;
use crate::clock::Clock;
use crate::colors::BAR_BG;
use crate::config::{NOTIFY_MS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::gui::CameraGui;
use crate::input::{Button, ButtonPad};
use crate::storage::Storage;
use crate::ticker::Ticker;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DecodeError {
    /// Not an image this build can decode.
    Unsupported,
    /// The image data ended early or is inconsistent.
    Malformed,
    /// Reading the underlying file failed.
    Io,
}

/// Produces one image as rectangular pixel blocks.
pub trait ImageDecoder {
    /// Image dimensions in pixels.
    fn size(&mut self) -> Size;

    /// Decode the image, pushing each block through `blit` as
    /// `(area, pixels)` with pixels in row-major order.
    fn decode(
        &mut self,
        blit: &mut dyn FnMut(Rectangle, &[Rgb565]),
    ) -> Result<(), DecodeError>;
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
    /// Show one decoded image centered on a cleared panel and block until
    /// the shutter edge fires.
    pub fn image_viewer(&mut self, decoder: &mut dyn ImageDecoder) {
        self.display.clear(BAR_BG).ok();

        let size = decoder.size();
        let offset = Point::new(
            (SCREEN_WIDTH.saturating_sub(size.width) / 2) as i32,
            (SCREEN_HEIGHT.saturating_sub(size.height) / 2) as i32,
        );

        let display = &mut self.display;
        let decoded = decoder.decode(&mut |area, pixels| {
            let shifted = Rectangle::new(area.top_left + offset, area.size);
            display.fill_contiguous(&shifted, pixels.iter().copied()).ok();
        });
        if let Err(e) = decoded {
            self.log.pushf(format_args!("viewer: decode failed: {e:?}"));
            self.set_bottom_text("Couldn't decode image", NOTIFY_MS);
        }

        self.draw_bottom_toolbar(true);
        loop {
            self.draw_bottom_toolbar(false);
            if self.pad.just_pressed(Button::Shutter) {
                return;
            }
            self.ticker.delay_ms(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button::*;
    use crate::testutil::{test_gui, Script};
    use crate::toolbar::BarMode;

    struct SolidDecoder {
        blits: usize,
    }

    impl ImageDecoder for SolidDecoder {
        fn size(&mut self) -> Size {
            Size::new(4, 2)
        }

        fn decode(
            &mut self,
            blit: &mut dyn FnMut(Rectangle, &[Rgb565]),
        ) -> Result<(), DecodeError> {
            let row = [Rgb565::new(10, 20, 10); 4];
            for y in 0..2 {
                blit(
                    Rectangle::new(Point::new(0, y), Size::new(4, 1)),
                    &row,
                );
                self.blits += 1;
            }
            Ok(())
        }
    }

    struct BrokenDecoder;

    impl ImageDecoder for BrokenDecoder {
        fn size(&mut self) -> Size {
            Size::new(4, 4)
        }

        fn decode(
            &mut self,
            _blit: &mut dyn FnMut(Rectangle, &[Rgb565]),
        ) -> Result<(), DecodeError> {
            Err(DecodeError::Malformed)
        }
    }

    #[test]
    fn blits_every_block_and_exits_on_shutter() {
        let mut gui = test_gui(Script::presses(&[Shutter]));
        let mut decoder = SolidDecoder { blits: 0 };
        gui.image_viewer(&mut decoder);
        assert_eq!(decoder.blits, 2);
    }

    #[test]
    fn decode_failure_is_reported_and_still_waits() {
        let mut gui = test_gui(Script::presses(&[Shutter]));
        gui.image_viewer(&mut BrokenDecoder);
        assert_eq!(gui.toolbar.mode(), BarMode::Transient);
        assert!(!gui.log.is_empty());
    }
}
