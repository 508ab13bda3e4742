//! Laser duty output

/// Hardware duty-cycle output driving the laser power input
///
/// Duty is expressed in raw timer counts, `0..=max_duty()`. A write of
/// zero must always turn the beam off.
pub trait DutyOutput {
    /// Write a duty value to the hardware
    ///
    /// Values above [`max_duty`](DutyOutput::max_duty) are clamped by the
    /// implementation.
    fn apply_duty(&mut self, duty: u32);

    /// Duty value corresponding to 100% output
    fn max_duty(&self) -> u32;
}

impl<T: DutyOutput + ?Sized> DutyOutput for &mut T {
    fn apply_duty(&mut self, duty: u32) {
        (**self).apply_duty(duty);
    }

    fn max_duty(&self) -> u32 {
        (**self).max_duty()
    }
}
