//! Hardware configuration types
//!
//! Pin assignments for the seven follow-fixture signal lines.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of signal lines on the follow fixture
pub const FOLLOW_LINE_COUNT: usize = 7;

/// Pin configuration with optional inversion
///
/// Inverted lines are wrapped in `laserfollow_hal::ActiveLow` by the board
/// layer so the controller only ever sees logical levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
        }
    }
}

/// Pin assignments for the follow fixture
///
/// `follow`, `center` and `rapup` are outputs; the rest are inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FollowPins {
    /// Follow request output (engages the fixture)
    pub follow: PinConfig,
    /// Center request output
    pub center: PinConfig,
    /// Rapid-up request output
    pub rapup: PinConfig,
    /// Pierce position confirmation input
    pub drill_ok: PinConfig,
    /// Cut position confirmation input
    pub cut_ok: PinConfig,
    /// Returned-to-center input (not wired on current heads)
    pub back_ok: PinConfig,
    /// Fixture alarm input
    pub alarm: PinConfig,
}

impl Default for FollowPins {
    fn default() -> Self {
        Self {
            follow: PinConfig::new(10),
            center: PinConfig::new(11),
            rapup: PinConfig::new(12),
            drill_ok: PinConfig::new(13),
            cut_ok: PinConfig::new(14),
            back_ok: PinConfig::new(15),
            alarm: PinConfig::new(16),
        }
    }
}

impl FollowPins {
    /// All lines in a fixed order: outputs first, then inputs
    pub fn lines(&self) -> [PinConfig; FOLLOW_LINE_COUNT] {
        [
            self.follow,
            self.center,
            self.rapup,
            self.drill_ok,
            self.cut_ok,
            self.back_ok,
            self.alarm,
        ]
    }

    /// Find the first pin number assigned to more than one line
    pub fn first_duplicate(&self) -> Option<u8> {
        let mut seen: heapless::Vec<u8, FOLLOW_LINE_COUNT> = heapless::Vec::new();
        for line in self.lines() {
            if seen.contains(&line.pin) {
                return Some(line.pin);
            }
            // Capacity equals the line count, so this never overflows
            let _ = seen.push(line.pin);
        }
        None
    }
}
