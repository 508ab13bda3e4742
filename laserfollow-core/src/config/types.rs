//! Configuration type definitions

use super::hardware::FollowPins;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest accepted PWM carrier frequency (Hz)
pub const MIN_PWM_HZ: u32 = 1;

/// Highest accepted PWM carrier frequency (Hz)
pub const MAX_PWM_HZ: u32 = 100_000;

/// Default PWM carrier frequency (Hz)
pub const DEFAULT_PWM_HZ: u32 = 5_000;

/// Default bound on each confirmation wait (ms)
pub const DEFAULT_CONFIRM_TIMEOUT_MS: u32 = 1_000;

/// Default polling granularity for confirmation waits (µs)
pub const DEFAULT_POLL_INTERVAL_US: u32 = 1_000;

/// Default blind settle time after stop (ms)
///
/// The head has no returned-to-center feedback, so stop waits this long
/// unconditionally.
pub const DEFAULT_SETTLE_MS: u32 = 200;

/// Errors found while validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// PWM frequency outside `MIN_PWM_HZ..=MAX_PWM_HZ`
    PwmFrequencyOutOfRange(u32),
    /// Speed map maximum speed is zero
    ZeroMaxSpeed,
    /// Speed map percentage above 100
    PercentOutOfRange(u8),
    /// Poll interval is zero
    ZeroPollInterval,
    /// Poll interval longer than one of the confirmation timeouts
    PollIntervalTooLong,
    /// Pin number assigned to more than one line
    DuplicatePin(u8),
}

/// Timing of the pierce/cut handshake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FollowTiming {
    /// Maximum wait for pierce confirmation after asserting follow (ms)
    pub pierce_timeout_ms: u32,
    /// Maximum wait for cut confirmation after arming the laser (ms)
    pub cut_timeout_ms: u32,
    /// Polling granularity of both waits (µs)
    pub poll_interval_us: u32,
    /// Unconditional delay after stop (ms)
    pub settle_ms: u32,
}

impl Default for FollowTiming {
    fn default() -> Self {
        Self {
            pierce_timeout_ms: DEFAULT_CONFIRM_TIMEOUT_MS,
            cut_timeout_ms: DEFAULT_CONFIRM_TIMEOUT_MS,
            poll_interval_us: DEFAULT_POLL_INTERVAL_US,
            settle_ms: DEFAULT_SETTLE_MS,
        }
    }
}

impl FollowTiming {
    /// Worst-case time a start request can block (ms)
    pub fn worst_case_start_ms(&self) -> u32 {
        self.pierce_timeout_ms.saturating_add(self.cut_timeout_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_us == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        let shortest_ms = self.pierce_timeout_ms.min(self.cut_timeout_ms);
        if u64::from(self.poll_interval_us) > u64::from(shortest_ms) * 1_000 {
            return Err(ConfigError::PollIntervalTooLong);
        }
        Ok(())
    }
}

/// Linear spindle speed to laser duty mapping
///
/// Speed `0..=max_speed` maps onto `0..=max_percent` percent of the
/// output's full-scale duty. Speeds above `max_speed` saturate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpeedMap {
    /// Speed value that maps to `max_percent`
    pub max_speed: u32,
    /// Output percentage at `max_speed` (0-100)
    pub max_percent: u8,
}

impl Default for SpeedMap {
    /// Lasers default to 0=0% through 255=100%
    fn default() -> Self {
        Self {
            max_speed: 255,
            max_percent: 100,
        }
    }
}

impl SpeedMap {
    /// Convert a commanded speed to a duty value
    ///
    /// `max_duty` is the output's full-scale duty count. The product of
    /// three `u32`-range factors needs 128 bits; the quotient never
    /// exceeds `max_duty`.
    pub fn duty_for(&self, speed: u32, max_duty: u32) -> u32 {
        if self.max_speed == 0 {
            return 0;
        }
        let speed = u128::from(speed.min(self.max_speed));
        let numerator = speed * u128::from(max_duty) * u128::from(self.max_percent.min(100));
        let denominator = u128::from(self.max_speed) * 100;
        (numerator / denominator) as u32
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_speed == 0 {
            return Err(ConfigError::ZeroMaxSpeed);
        }
        if self.max_percent > 100 {
            return Err(ConfigError::PercentOutOfRange(self.max_percent));
        }
        Ok(())
    }
}

/// Complete laser follow-head configuration
///
/// `speed_map` and `timing` are consumed by the spindle and sequencer.
/// `pwm_hz` and `pins` are inputs for the board layer, which sets up the
/// PWM timer and claims the lines (wrapping inverted ones in `ActiveLow`)
/// before handing them to the drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LaserConfig {
    /// PWM carrier frequency (Hz), applied when the board configures the timer
    pub pwm_hz: u32,
    /// Speed to duty mapping
    pub speed_map: SpeedMap,
    /// Follow fixture pin assignments, claimed by the board
    pub pins: FollowPins,
    /// Handshake timing
    pub timing: FollowTiming,
}

impl Default for LaserConfig {
    fn default() -> Self {
        Self {
            pwm_hz: DEFAULT_PWM_HZ,
            speed_map: SpeedMap::default(),
            pins: FollowPins::default(),
            timing: FollowTiming::default(),
        }
    }
}

impl LaserConfig {
    /// Check the configuration for values the controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PWM_HZ..=MAX_PWM_HZ).contains(&self.pwm_hz) {
            return Err(ConfigError::PwmFrequencyOutOfRange(self.pwm_hz));
        }
        self.speed_map.validate()?;
        self.timing.validate()?;
        if let Some(pin) = self.pins.first_duplicate() {
            return Err(ConfigError::DuplicatePin(pin));
        }
        Ok(())
    }
}
