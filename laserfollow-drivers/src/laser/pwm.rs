//! embedded-hal PWM channel as a laser duty output

use embedded_hal::pwm::SetDutyCycle;
use laserfollow_hal::DutyOutput;

/// Adapter from an embedded-hal PWM channel to [`DutyOutput`]
///
/// Duty above the channel's maximum is clamped. A rejected write is
/// logged and otherwise ignored: the gate has no way to recover from it.
pub struct PwmDuty<P> {
    pwm: P,
}

impl<P: SetDutyCycle> PwmDuty<P> {
    /// Wrap a PWM channel
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    /// Release the PWM channel
    pub fn into_inner(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> DutyOutput for PwmDuty<P> {
    fn apply_duty(&mut self, duty: u32) {
        let max = self.pwm.max_duty_cycle();
        let clamped = duty.min(u32::from(max)) as u16;
        if self.pwm.set_duty_cycle(clamped).is_err() {
            warn!("PWM rejected duty {}", clamped);
        }
    }

    fn max_duty(&self) -> u32 {
        u32::from(self.pwm.max_duty_cycle())
    }
}
