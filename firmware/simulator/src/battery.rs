//! Fake battery that discharges slowly while the simulator runs.

use std::time::Instant;

use pocketcam_gui::battery::Battery;

/// Millivolts at launch.
const FULL_MV: u16 = 4150;

/// Floor of the discharge ramp.
const EMPTY_MV: u16 = 3270;

/// Drain rate in millivolts per second.
const DRAIN_MV_PER_S: u64 = 2;

pub struct DrainBattery {
    started: Instant,
}

impl DrainBattery {
    pub fn new() -> Self {
        Self { started: Instant::now() }
    }
}

impl Battery for DrainBattery {
    fn millivolts(&mut self) -> u16 {
        let drained = self.started.elapsed().as_secs() * DRAIN_MV_PER_S;
        let mv = u64::from(FULL_MV).saturating_sub(drained);
        (mv as u16).max(EMPTY_MV)
    }
}
