//! Desktop simulator for the pocketcam firmware.
//!
//! Runs the shared UI engine against an SDL window: `./sdcard` stands in
//! for the SD card, the host clock (plus an adjustable offset) for the
//! RTC, and an animated test pattern for the OV2640. Keys: arrow
//! up/down, Enter = select, Space = shutter.

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

mod battery;
mod camera;
mod clock;
mod io;
mod storage;

use std::fmt::Write as _;
use std::thread;
use std::time::Duration;

use heapless::String;
use pocketcam_gui::camera::{
    CameraSession, CaptureError, ImageSize, Level, LightMode, SpecialEffect,
};
use pocketcam_gui::config::{BOTTOM_TEXT_MAX, NOTIFY_MS, UNLIMITED_MS};
use pocketcam_gui::{Button, ButtonPad, CameraGui, Storage};

use crate::battery::DrainBattery;
use crate::camera::{RasterDecoder, SimCamera};
use crate::clock::SystemClock;
use crate::io::{IoHandle, SharedDisplay};
use crate::storage::DirStorage;

const SDCARD_ROOT: &str = "./sdcard";
const IMAGES_DIR: &str = "/images";

/// Target frame period of the live preview.
const PREVIEW_FRAME: Duration = Duration::from_millis(33);

type Gui = CameraGui<SharedDisplay, DirStorage, SystemClock, IoHandle, IoHandle, DrainBattery>;

fn main() {
    let (mut io, display) = IoHandle::open("pocketcam");
    let storage = DirStorage::mount(SDCARD_ROOT);
    let mut gui = CameraGui::new(
        display,
        storage,
        SystemClock::new(),
        io.clone(),
        io.clone(),
        DrainBattery::new(),
    );
    gui.log.push("simulator started");

    if !gui.storage.is_mounted() || gui.storage.mkdir(IMAGES_DIR).is_err() {
        gui.log.push("boot: storage unavailable");
        gui.dialog(
            "Storage error",
            "Couldn't find the SD card.\nCheck the card and restart.",
        );
        dump_log(&gui);
        return;
    }

    let images_host = match gui.storage.resolve(IMAGES_DIR) {
        Some(dir) => dir,
        None => return,
    };
    let mut camera = SimCamera::new(images_host);
    if !camera.probe().is_ov2640() {
        gui.log.push("boot: camera probe failed");
        gui.dialog("Camera error", "Couldn't find the camera module.");
        dump_log(&gui);
        return;
    }

    // Live preview; all dialogs nest under the main menu.
    loop {
        io.refresh();
        if io.quit_requested() {
            break;
        }

        camera.preview(&mut gui.display);
        gui.draw_bottom_toolbar(true);

        if gui.pad.just_pressed(Button::Select) {
            main_menu(&mut gui, &mut camera);
        }
        if gui.pad.just_pressed(Button::Shutter) {
            take_photo(&mut gui, &mut camera);
        }
        thread::sleep(PREVIEW_FRAME);
    }
    dump_log(&gui);
}

fn main_menu(gui: &mut Gui, camera: &mut SimCamera) {
    const ITEMS: [&str; 6] = [
        "Take photo",
        "Image browser",
        "File explorer",
        "Camera settings",
        "Set date & time",
        "About",
    ];
    match gui.menu("Main menu", &ITEMS, None) {
        0 => take_photo(gui, camera),
        1 => image_browser(gui),
        2 => {
            gui.file_explorer("/", None, true);
        }
        3 => camera_settings(gui, camera),
        4 => {
            if gui.change_rtc_time() {
                gui.set_bottom_text("Clock updated", NOTIFY_MS);
                gui.log.push("rtc adjusted");
            }
        }
        5 => gui.dialog(
            "About",
            "pocketcam simulator\nUp/Down move, Enter selects,\nSpace is the shutter.",
        ),
        _ => {}
    }
}

fn take_photo(gui: &mut Gui, camera: &mut SimCamera) {
    gui.set_bottom_text("Saving photo...", UNLIMITED_MS);
    gui.draw_bottom_toolbar(true);
    match camera.capture_to_disk() {
        Ok(bytes) => {
            let mut msg: String<BOTTOM_TEXT_MAX> = String::new();
            write!(msg, "Saved {} KB", bytes.div_ceil(1024)).ok();
            gui.set_bottom_text(&msg, NOTIFY_MS);
            gui.log.pushf(format_args!("captured {bytes} bytes"));
        }
        Err(CaptureError::Camera) => {
            gui.set_bottom_text("Camera error", NOTIFY_MS);
            gui.log.push("capture: camera error");
        }
        Err(CaptureError::DiskIo) => {
            gui.set_bottom_text("Couldn't save photo", NOTIFY_MS);
            gui.log.push("capture: disk write failed");
        }
    }
}

/// Explorer in file-options mode feeding the viewer; the saved
/// navigation state re-enters the explorer on the same row after each
/// image.
fn image_browser(gui: &mut Gui) {
    let mut resume = None;
    while let Some(chosen) = gui.file_explorer(IMAGES_DIR, resume.take(), true) {
        let Some(host) = gui.storage.resolve(chosen.path.as_str()) else {
            return;
        };
        match RasterDecoder::open(&host) {
            Ok(mut decoder) => gui.image_viewer(&mut decoder),
            Err(e) => {
                gui.log.pushf(format_args!("browser: {} undecodable: {e:?}", chosen.path));
                gui.set_bottom_text("Couldn't open image", NOTIFY_MS);
            }
        }
        resume = Some(chosen.state);
    }
}

fn camera_settings(gui: &mut Gui, camera: &mut SimCamera) {
    const ITEMS: [&str; 7] = [
        "Image size",
        "Light mode",
        "Saturation",
        "Brightness",
        "Contrast",
        "Special effect",
        "Back",
    ];
    loop {
        let mut s = camera.settings();
        match gui.menu("Camera settings", &ITEMS, None) {
            0 => s.image_size = pick(gui, "Image size", &ImageSize::ALL, s.image_size, ImageSize::label),
            1 => s.light_mode = pick(gui, "Light mode", &LightMode::ALL, s.light_mode, LightMode::label),
            2 => s.saturation = pick(gui, "Saturation", &Level::ALL, s.saturation, Level::label),
            3 => s.brightness = pick(gui, "Brightness", &Level::ALL, s.brightness, Level::label),
            4 => s.contrast = pick(gui, "Contrast", &Level::ALL, s.contrast, Level::label),
            5 => {
                s.special_effect =
                    pick(gui, "Special effect", &SpecialEffect::ALL, s.special_effect, SpecialEffect::label)
            }
            _ => return,
        }
        camera.apply(s);
    }
}

/// Value menu with the active entry marked and pre-highlighted.
fn pick<T: Copy + PartialEq>(
    gui: &mut Gui,
    title: &str,
    all: &[T],
    current: T,
    label: fn(T) -> &'static str,
) -> T {
    let labels: Vec<&str> = all.iter().map(|&v| label(v)).collect();
    let start = all.iter().position(|&v| v == current);
    all[gui.menu(title, &labels, start)]
}

fn dump_log(gui: &Gui) {
    for line in gui.log.iter() {
        println!("log: {line}");
    }
}
