//! Follow fixture signal lines
//!
//! The fixture is driven through three outputs (follow, center, rapup)
//! and reports through four inputs (drill-ok, cut-ok, back-ok, alarm).
//! Only follow, drill-ok and cut-ok take part in the handshake; the other
//! lines are held or reported for status.

use laserfollow_hal::{InputPin, OutputPin};

/// Snapshot of every fixture line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SignalLevels {
    pub follow: bool,
    pub center: bool,
    pub rapup: bool,
    pub drill_ok: bool,
    pub cut_ok: bool,
    pub back_ok: bool,
    pub alarm: bool,
}

/// The seven fixture lines, owned for the lifetime of the device
pub struct FollowSignals<P, I> {
    follow: P,
    center: P,
    rapup: P,
    drill_ok: I,
    cut_ok: I,
    back_ok: I,
    alarm: I,
}

impl<P: OutputPin, I: InputPin> FollowSignals<P, I> {
    /// Take ownership of the lines and drive every output low
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        follow: P,
        center: P,
        rapup: P,
        drill_ok: I,
        cut_ok: I,
        back_ok: I,
        alarm: I,
    ) -> Self {
        let mut signals = Self {
            follow,
            center,
            rapup,
            drill_ok,
            cut_ok,
            back_ok,
            alarm,
        };
        signals.follow.set_low();
        signals.center.set_low();
        signals.rapup.set_low();
        signals
    }

    /// Engage or release the follow fixture
    pub fn set_follow(&mut self, engaged: bool) {
        self.follow.set_state(engaged);
    }

    /// Check if the follow output is asserted
    pub fn follow_asserted(&self) -> bool {
        self.follow.is_set_high()
    }

    /// Head has reached the pierce position
    pub fn pierce_confirmed(&self) -> bool {
        self.drill_ok.is_high()
    }

    /// Head has reached the cutting position
    pub fn cut_confirmed(&self) -> bool {
        self.cut_ok.is_high()
    }

    /// Head reports it is back at center
    ///
    /// Current heads do not drive this line, which is why stop settles
    /// blind instead of waiting on it.
    pub fn back_confirmed(&self) -> bool {
        self.back_ok.is_high()
    }

    /// Fixture alarm input
    pub fn alarm_active(&self) -> bool {
        self.alarm.is_high()
    }

    /// Read every line
    pub fn levels(&self) -> SignalLevels {
        SignalLevels {
            follow: self.follow.is_set_high(),
            center: self.center.is_set_high(),
            rapup: self.rapup.is_set_high(),
            drill_ok: self.drill_ok.is_high(),
            cut_ok: self.cut_ok.is_high(),
            back_ok: self.back_ok.is_high(),
            alarm: self.alarm.is_high(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::sim::Bench;

    #[test]
    fn test_new_drives_outputs_low() {
        let bench = Bench::new();
        assert!(bench.follow.get());

        let signals = bench.signals(None, None);
        assert!(!bench.follow.get());
        assert!(!bench.center.get());
        assert!(!bench.rapup.get());
        assert!(!signals.follow_asserted());
    }

    #[test]
    fn test_follow_control() {
        let bench = Bench::new();
        let mut signals = bench.signals(None, None);

        signals.set_follow(true);
        assert!(bench.follow.get());
        assert!(signals.follow_asserted());

        signals.set_follow(false);
        assert!(!bench.follow.get());
    }

    #[test]
    fn test_confirmations_follow_inputs() {
        let bench = Bench::new();
        let signals = bench.signals(Some(0), None);

        assert!(signals.pierce_confirmed());
        assert!(!signals.cut_confirmed());
        assert!(!signals.back_confirmed());
        assert!(!signals.alarm_active());
    }

    #[test]
    fn test_levels_snapshot() {
        let bench = Bench::new();
        let mut signals = bench.signals(Some(0), Some(0));
        signals.set_follow(true);

        let levels = signals.levels();
        assert!(levels.follow);
        assert!(!levels.center);
        assert!(!levels.rapup);
        assert!(levels.drill_ok);
        assert!(levels.cut_ok);
        assert!(!levels.back_ok);
        assert!(!levels.alarm);
    }
}
