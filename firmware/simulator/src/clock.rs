//! Host clock with an adjustable offset.
//!
//! The hardware build adjusts a battery-backed RTC; here an edit is kept
//! as a signed offset against the host clock, so the simulated RTC keeps
//! ticking between reads exactly like the real one.

use std::time::{SystemTime, UNIX_EPOCH};

use pocketcam_gui::{Clock, DateTime};

pub struct SystemClock {
    offset_secs: i64,
}

fn host_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

impl SystemClock {
    pub fn new() -> Self {
        Self { offset_secs: 0 }
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> DateTime {
        DateTime::from_unix(host_unix() + self.offset_secs)
    }

    fn adjust(&mut self, t: DateTime) {
        self.offset_secs = t.to_unix() - host_unix();
    }
}
