//! Laser duty gate
//!
//! All commanded duty passes through [`DutyGate::set_output`]. The gate:
//! - absorbs repeated writes of the same value (strict equality)
//! - holds non-zero duty back from the hardware while disarmed
//! - always lets zero through, so the beam can be forced off at any time
//!
//! # Pending duty
//!
//! A duty commanded while disarmed is recorded but not written. Arming
//! replays the recorded duty to the hardware; disarming forces the output
//! (and the recorded duty) to zero. Between them this keeps the hardware
//! at the recorded duty while armed and at zero while disarmed.
//!
//! ```ignore
//! let mut gate = DutyGate::new(pwm);
//! gate.set_output(180); // recorded, laser stays off
//! gate.arm();           // hardware now at 180
//! gate.set_output(180); // absorbed, no write
//! gate.disarm();        // hardware back to 0
//! ```

use laserfollow_hal::DutyOutput;

/// Laser output state and the hardware it drives
pub struct DutyGate<O> {
    output: O,
    /// Last duty passed to `set_output` (written or held back)
    requested: u32,
    /// Whether non-zero duty may reach the hardware
    enabled: bool,
}

impl<O: DutyOutput> DutyGate<O> {
    /// Create a disarmed gate, forcing the output off
    pub fn new(output: O) -> Self {
        let mut gate = Self {
            output,
            requested: 0,
            enabled: false,
        };
        // Ensure laser starts off
        gate.output.apply_duty(0);
        gate
    }

    /// Create a permanently usable gate for spindles without a follow head
    pub fn new_armed(output: O) -> Self {
        let mut gate = Self::new(output);
        gate.enabled = true;
        gate
    }

    /// Command a duty value
    pub fn set_output(&mut self, duty: u32) {
        // Avoid redundant hardware writes
        if duty == self.requested {
            return;
        }

        self.requested = duty;

        if self.enabled || duty == 0 {
            self.output.apply_duty(duty);
        } else {
            trace!("duty {} held until armed", duty);
        }
    }

    /// Allow duty to reach the hardware and replay the recorded duty
    pub fn arm(&mut self) {
        self.enabled = true;
        // Zero is already on the output while disarmed
        if self.requested != 0 {
            self.output.apply_duty(self.requested);
        }
    }

    /// Block duty from the hardware and force the laser off
    pub fn disarm(&mut self) {
        self.enabled = false;
        self.set_output(0);
    }

    /// Last commanded duty
    pub fn requested_duty(&self) -> u32 {
        self.requested
    }

    /// Check if non-zero duty may reach the hardware
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Duty value corresponding to full power
    pub fn max_duty(&self) -> u32 {
        self.output.max_duty()
    }

    /// Get the underlying output
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Release the underlying output
    pub fn into_inner(self) -> O {
        self.output
    }
}
