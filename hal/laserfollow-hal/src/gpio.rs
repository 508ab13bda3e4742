//! GPIO pin abstractions
//!
//! Provides traits for the digital lines of the follow fixture. Whether a
//! line is an input or an output is decided by the type implementing it,
//! so there is no runtime "set attribute" step.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Reads must be cheap and free of side effects: the controller polls
/// them once per millisecond while waiting on a confirmation.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Inverting adapter for active-low lines
///
/// Wrapping a pin makes logical "high" mean electrical low, so the
/// controller can always reason in asserted/deasserted terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLow<P>(pub P);

impl<P> ActiveLow<P> {
    /// Unwrap the inner pin
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: OutputPin> OutputPin for ActiveLow<P> {
    fn set_high(&mut self) {
        self.0.set_low();
    }

    fn set_low(&mut self) {
        self.0.set_high();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_low()
    }
}

impl<P: InputPin> InputPin for ActiveLow<P> {
    fn is_high(&self) -> bool {
        self.0.is_low()
    }
}
