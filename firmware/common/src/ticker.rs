//! Millisecond time source.
//!
//! Every blocking UI loop in this crate suspends by spinning on
//! `delay_ms(1)`; this trait is the only concurrency primitive the engine
//! uses. Shells are expected to pump their event sources inside
//! `delay_ms` so the window/input stays alive while a dialog blocks.

pub trait Ticker {
    /// Monotonic milliseconds since boot.
    fn now_ms(&self) -> u64;

    /// Block for at least `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}
