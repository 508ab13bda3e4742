//! embassy-time monotonic clock
//!
//! Pair with `embassy_time::Delay`, which implements the async `DelayNs`
//! the follow sequencer suspends on.

use embassy_time::Instant;
use laserfollow_hal::Monotonic;

/// Monotonic clock backed by the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Monotonic for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
