//! Simulated hardware for host tests
//!
//! A shared [`SimTime`] drives the clock, the delay and the scheduled
//! inputs, so every timing assertion is exact and no test sleeps.

use core::cell::Cell;

use embedded_hal_async::delay::DelayNs;
use laserfollow_core::config::FollowTiming;
use laserfollow_core::timing::{Cancellation, NeverCancel};
use laserfollow_hal::{DutyOutput, InputPin, Monotonic, OutputPin};

use crate::laser::{DutyGate, FollowSequencer, FollowSignals};

pub struct SimTime {
    now_ns: Cell<u64>,
}

impl SimTime {
    pub fn new() -> Self {
        Self {
            now_ns: Cell::new(0),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ns.get() / 1_000_000
    }
}

pub struct SimClock<'a>(pub &'a SimTime);

impl Monotonic for SimClock<'_> {
    fn now_us(&self) -> u64 {
        self.0.now_ns.get() / 1_000
    }
}

pub struct SimDelay<'a>(pub &'a SimTime);

impl DelayNs for SimDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        let t = &self.0.now_ns;
        t.set(t.get() + u64::from(ns));
    }
}

/// Delay that advances time and then yields once to the executor
///
/// Lets a test stop polling a sequence part-way through a wait.
pub struct YieldingDelay<'a>(pub &'a SimTime);

impl DelayNs for YieldingDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        let t = &self.0.now_ns;
        t.set(t.get() + u64::from(ns));
        embassy_futures::yield_now().await;
    }
}

/// Output line backed by a shared cell
pub struct SimOutput<'a>(pub &'a Cell<bool>);

impl OutputPin for SimOutput<'_> {
    fn set_high(&mut self) {
        self.0.set(true);
    }

    fn set_low(&mut self) {
        self.0.set(false);
    }

    fn is_set_high(&self) -> bool {
        self.0.get()
    }
}

/// Input line that asserts at a fixed simulated time (or never)
pub struct SimInput<'a> {
    pub time: &'a SimTime,
    pub asserts_at_ms: Option<u64>,
}

impl InputPin for SimInput<'_> {
    fn is_high(&self) -> bool {
        self.asserts_at_ms
            .is_some_and(|at| self.time.now_ms() >= at)
    }
}

/// Duty output recording the current value and the number of writes
pub struct SimPwm<'a> {
    pub duty: &'a Cell<u32>,
    pub writes: &'a Cell<u32>,
    pub max: u32,
}

impl DutyOutput for SimPwm<'_> {
    fn apply_duty(&mut self, duty: u32) {
        self.duty.set(duty.min(self.max));
        self.writes.set(self.writes.get() + 1);
    }

    fn max_duty(&self) -> u32 {
        self.max
    }
}

/// Cancellation that fires once simulated time reaches a point
pub struct CancelAt<'a> {
    pub time: &'a SimTime,
    pub at_ms: u64,
}

impl Cancellation for CancelAt<'_> {
    fn is_cancelled(&self) -> bool {
        self.time.now_ms() >= self.at_ms
    }
}

pub type SimSequencer<'a, K = NeverCancel> =
    FollowSequencer<SimOutput<'a>, SimInput<'a>, SimClock<'a>, SimDelay<'a>, K>;

/// Complete simulated follow head: time base, lines and laser output
pub struct Bench {
    pub time: SimTime,
    pub follow: Cell<bool>,
    pub center: Cell<bool>,
    pub rapup: Cell<bool>,
    pub duty: Cell<u32>,
    pub writes: Cell<u32>,
}

impl Bench {
    pub const MAX_DUTY: u32 = 1000;

    pub fn new() -> Self {
        Self {
            time: SimTime::new(),
            // Outputs start high so tests can see initialisation drive them low
            follow: Cell::new(true),
            center: Cell::new(true),
            rapup: Cell::new(true),
            duty: Cell::new(0),
            writes: Cell::new(0),
        }
    }

    pub fn pwm(&self) -> SimPwm<'_> {
        SimPwm {
            duty: &self.duty,
            writes: &self.writes,
            max: Self::MAX_DUTY,
        }
    }

    pub fn gate(&self) -> DutyGate<SimPwm<'_>> {
        DutyGate::new(self.pwm())
    }

    fn input(&self, asserts_at_ms: Option<u64>) -> SimInput<'_> {
        SimInput {
            time: &self.time,
            asserts_at_ms,
        }
    }

    pub fn signals(
        &self,
        pierce_at_ms: Option<u64>,
        cut_at_ms: Option<u64>,
    ) -> FollowSignals<SimOutput<'_>, SimInput<'_>> {
        FollowSignals::new(
            SimOutput(&self.follow),
            SimOutput(&self.center),
            SimOutput(&self.rapup),
            self.input(pierce_at_ms),
            self.input(cut_at_ms),
            self.input(None),
            self.input(None),
        )
    }

    pub fn sequencer(&self, pierce_at_ms: Option<u64>, cut_at_ms: Option<u64>) -> SimSequencer<'_> {
        self.sequencer_with_cancel(pierce_at_ms, cut_at_ms, NeverCancel)
    }

    pub fn sequencer_with_cancel<K: Cancellation>(
        &self,
        pierce_at_ms: Option<u64>,
        cut_at_ms: Option<u64>,
        cancel: K,
    ) -> SimSequencer<'_, K> {
        FollowSequencer::new(
            self.signals(pierce_at_ms, cut_at_ms),
            SimClock(&self.time),
            SimDelay(&self.time),
            cancel,
            FollowTiming::default(),
        )
    }
}
