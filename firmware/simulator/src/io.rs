//! SDL window, keyboard pad and time source behind one shared handle.
//!
//! The UI engine blocks inside nested dialog loops, so the SDL event
//! queue has to be pumped from within them or the window freezes. Both
//! the button pad and the ticker are clones of one [`IoHandle`]; every
//! `delay_ms` pumps events, latches key edges and refreshes the window,
//! which keeps the desktop build responsive no matter how deep the
//! dialogs nest. Closing the window exits the process.
//!
//! Key map: arrow up/down, Enter = select, Space = shutter.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;
use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use pocketcam_gui::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use pocketcam_gui::{Button, ButtonPad, Ticker};

/// Minimum interval between window refreshes.
const FLUSH_INTERVAL: Duration = Duration::from_millis(15);

fn key_to_button(keycode: Keycode) -> Option<Button> {
    match keycode {
        Keycode::Up => Some(Button::Up),
        Keycode::Down => Some(Button::Down),
        Keycode::Return => Some(Button::Select),
        Keycode::Space => Some(Button::Shutter),
        _ => None,
    }
}

fn index(button: Button) -> usize {
    match button {
        Button::Up => 0,
        Button::Down => 1,
        Button::Select => 2,
        Button::Shutter => 3,
    }
}

struct SimIo {
    display: SimulatorDisplay<Rgb565>,
    window: Window,
    held: [bool; 4],
    pressed: [bool; 4],
    quit: bool,
    started: Instant,
    last_flush: Instant,
}

impl SimIo {
    fn pump(&mut self) {
        for ev in self.window.events() {
            match ev {
                SimulatorEvent::Quit => self.quit = true,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    if repeat {
                        continue;
                    }
                    if let Some(b) = key_to_button(keycode) {
                        self.held[index(b)] = true;
                        self.pressed[index(b)] = true;
                    }
                }
                SimulatorEvent::KeyUp { keycode, .. } => {
                    if let Some(b) = key_to_button(keycode) {
                        self.held[index(b)] = false;
                    }
                }
                _ => {}
            }
        }
        if self.last_flush.elapsed() >= FLUSH_INTERVAL {
            self.window.update(&self.display);
            self.last_flush = Instant::now();
        }
    }
}

/// Shared pad + ticker handle; clone freely.
#[derive(Clone)]
pub struct IoHandle(Rc<RefCell<SimIo>>);

impl IoHandle {
    /// Create the window and both halves of the shared state.
    pub fn open(title: &str) -> (IoHandle, SharedDisplay) {
        let display = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
        let output_settings = OutputSettingsBuilder::new().scale(3).build();
        let window = Window::new(title, &output_settings);
        let now = Instant::now();
        let io = Rc::new(RefCell::new(SimIo {
            display,
            window,
            held: [false; 4],
            pressed: [false; 4],
            quit: false,
            started: now,
            last_flush: now,
        }));
        (IoHandle(io.clone()), SharedDisplay(io))
    }

    /// Pump events and refresh the window without sleeping. Used by the
    /// live preview loop, which paces itself.
    pub fn refresh(&mut self) {
        self.0.borrow_mut().pump();
    }

    /// Whether the window close button was pressed.
    pub fn quit_requested(&self) -> bool {
        self.0.borrow().quit
    }
}

impl ButtonPad for IoHandle {
    fn is_held(&mut self, button: Button) -> bool {
        self.0.borrow().held[index(button)]
    }

    fn just_pressed(&mut self, button: Button) -> bool {
        let mut io = self.0.borrow_mut();
        let hit = io.pressed[index(button)];
        io.pressed[index(button)] = false;
        hit
    }
}

impl Ticker for IoHandle {
    fn now_ms(&self) -> u64 {
        self.0.borrow().started.elapsed().as_millis() as u64
    }

    fn delay_ms(&mut self, ms: u32) {
        {
            let mut io = self.0.borrow_mut();
            io.pump();
            if io.quit {
                // Closing the window inside a modal dialog; nothing to
                // unwind to, so leave directly.
                std::process::exit(0);
            }
        }
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

/// The simulator framebuffer behind the same shared state.
pub struct SharedDisplay(Rc<RefCell<SimIo>>);

impl OriginDimensions for SharedDisplay {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl DrawTarget for SharedDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.0.borrow_mut().display.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.0.borrow_mut().display.fill_contiguous(area, colors)
    }
}
