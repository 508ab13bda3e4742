//! Pollable wait primitive
//!
//! Polls a condition at a fixed interval until it holds, the deadline
//! passes, or the cancellation token fires. Suspension goes through an
//! async `DelayNs`, so the waiting task yields to the executor between
//! polls and the primitive can never be entered from interrupt context.
//!
//! Elapsed time is measured on a [`Monotonic`] clock, never wall time.

use embedded_hal_async::delay::DelayNs;
use laserfollow_hal::Monotonic;

use super::cancel::Cancellation;
use crate::config::DEFAULT_POLL_INTERVAL_US;

/// Result of a bounded wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WaitOutcome {
    /// Condition held
    Satisfied,
    /// Elapsed time exceeded the timeout
    Expired,
    /// Cancellation token fired
    Cancelled,
}

/// Bounded, cancellable poller
///
/// Owns the injected clock, delay and cancellation source so tests can
/// drive time deterministically.
pub struct Poller<C, D, K> {
    clock: C,
    delay: D,
    cancel: K,
    poll_interval_us: u32,
}

impl<C, D, K> Poller<C, D, K>
where
    C: Monotonic,
    D: DelayNs,
    K: Cancellation,
{
    /// Create a poller with the default 1 ms granularity
    pub fn new(clock: C, delay: D, cancel: K) -> Self {
        Self {
            clock,
            delay,
            cancel,
            poll_interval_us: DEFAULT_POLL_INTERVAL_US,
        }
    }

    /// Set the poll granularity (clamped to at least 1 µs)
    pub fn with_poll_interval_us(mut self, poll_interval_us: u32) -> Self {
        self.poll_interval_us = poll_interval_us.max(1);
        self
    }

    /// Get the poll granularity in microseconds
    pub fn poll_interval_us(&self) -> u32 {
        self.poll_interval_us
    }

    /// Get the clock
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Get the cancellation source
    pub fn cancellation(&self) -> &K {
        &self.cancel
    }

    /// Wait until `condition` holds, for at most `timeout_ms`
    ///
    /// The condition is evaluated first, then the cancellation token, then
    /// the task is suspended for one poll interval. Expiry is detected
    /// right after a suspension, once elapsed time strictly exceeds the
    /// timeout, and is reported without evaluating the condition again.
    pub async fn wait_for<F>(&mut self, timeout_ms: u32, mut condition: F) -> WaitOutcome
    where
        F: FnMut() -> bool,
    {
        let timeout_us = u64::from(timeout_ms) * 1_000;
        let started = self.clock.now_us();

        loop {
            if condition() {
                return WaitOutcome::Satisfied;
            }
            if self.cancel.is_cancelled() {
                return WaitOutcome::Cancelled;
            }

            self.delay.delay_us(self.poll_interval_us).await;

            if self.clock.elapsed_since_us(started) > timeout_us {
                return WaitOutcome::Expired;
            }
        }
    }

    /// Suspend for a fixed time, ignoring cancellation
    pub async fn settle(&mut self, ms: u32) {
        self.delay.delay_ms(ms).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timing::{CancelToken, NeverCancel};
    use core::cell::Cell;
    use embassy_futures::block_on;

    /// Simulated time base shared by clock and delay
    struct SimTime {
        now_ns: Cell<u64>,
    }

    impl SimTime {
        fn new() -> Self {
            Self { now_ns: Cell::new(0) }
        }

        fn now_ms(&self) -> u64 {
            self.now_ns.get() / 1_000_000
        }
    }

    struct SimClock<'a>(&'a SimTime);

    impl Monotonic for SimClock<'_> {
        fn now_us(&self) -> u64 {
            self.0.now_ns.get() / 1_000
        }
    }

    struct SimDelay<'a>(&'a SimTime);

    impl DelayNs for SimDelay<'_> {
        async fn delay_ns(&mut self, ns: u32) {
            let t = &self.0.now_ns;
            t.set(t.get() + u64::from(ns));
        }
    }

    /// Cancellation that fires once simulated time reaches a point
    struct CancelAt<'a> {
        time: &'a SimTime,
        at_ms: u64,
    }

    impl Cancellation for CancelAt<'_> {
        fn is_cancelled(&self) -> bool {
            self.time.now_ms() >= self.at_ms
        }
    }

    fn poller(time: &SimTime) -> Poller<SimClock<'_>, SimDelay<'_>, NeverCancel> {
        Poller::new(SimClock(time), SimDelay(time), NeverCancel)
    }

    #[test]
    fn test_satisfied_immediately() {
        let time = SimTime::new();
        let mut poller = poller(&time);

        let outcome = block_on(poller.wait_for(1000, || true));
        assert_eq!(outcome, WaitOutcome::Satisfied);
        assert_eq!(time.now_ns.get(), 0);
    }

    #[test]
    fn test_satisfied_when_condition_asserts() {
        let time = SimTime::new();
        let mut poller = poller(&time);

        let outcome = block_on(poller.wait_for(1000, || time.now_ms() >= 500));
        assert_eq!(outcome, WaitOutcome::Satisfied);
        assert_eq!(time.now_ms(), 500);
    }

    #[test]
    fn test_expires_without_extra_evaluation() {
        let time = SimTime::new();
        let mut poller = poller(&time);
        let evaluations = Cell::new(0u32);

        let outcome = block_on(poller.wait_for(1000, || {
            evaluations.set(evaluations.get() + 1);
            false
        }));

        assert_eq!(outcome, WaitOutcome::Expired);
        // Evaluated at t = 0..=1000 ms, expiry seen after the 1001st tick
        assert_eq!(evaluations.get(), 1001);
        assert_eq!(time.now_ms(), 1001);
    }

    #[test]
    fn test_condition_true_exactly_at_deadline() {
        let time = SimTime::new();
        let mut poller = poller(&time);

        let outcome = block_on(poller.wait_for(1000, || time.now_ms() >= 1000));
        assert_eq!(outcome, WaitOutcome::Satisfied);
    }

    #[test]
    fn test_zero_timeout_polls_once() {
        let time = SimTime::new();
        let mut poller = poller(&time);
        let evaluations = Cell::new(0u32);

        let outcome = block_on(poller.wait_for(0, || {
            evaluations.set(evaluations.get() + 1);
            false
        }));

        assert_eq!(outcome, WaitOutcome::Expired);
        assert_eq!(evaluations.get(), 1);
    }

    #[test]
    fn test_custom_poll_interval() {
        let time = SimTime::new();
        let mut poller = poller(&time).with_poll_interval_us(10_000);
        let evaluations = Cell::new(0u32);

        let outcome = block_on(poller.wait_for(100, || {
            evaluations.set(evaluations.get() + 1);
            false
        }));

        assert_eq!(outcome, WaitOutcome::Expired);
        assert_eq!(evaluations.get(), 11);
        assert_eq!(time.now_ms(), 110);
    }

    #[test]
    fn test_zero_poll_interval_clamped() {
        let time = SimTime::new();
        let poller = poller(&time).with_poll_interval_us(0);
        assert_eq!(poller.poll_interval_us(), 1);
    }

    #[test]
    fn test_cancelled_mid_wait() {
        let time = SimTime::new();
        let cancel = CancelAt {
            time: &time,
            at_ms: 250,
        };
        let mut poller = Poller::new(SimClock(&time), SimDelay(&time), cancel);

        let outcome = block_on(poller.wait_for(1000, || false));
        assert_eq!(outcome, WaitOutcome::Cancelled);
        assert_eq!(time.now_ms(), 250);
    }

    #[test]
    fn test_condition_wins_over_cancellation() {
        let time = SimTime::new();
        let token = CancelToken::new();
        token.cancel();
        let mut poller = Poller::new(SimClock(&time), SimDelay(&time), &token);

        let outcome = block_on(poller.wait_for(1000, || true));
        assert_eq!(outcome, WaitOutcome::Satisfied);

        let outcome = block_on(poller.wait_for(1000, || false));
        assert_eq!(outcome, WaitOutcome::Cancelled);
        assert_eq!(time.now_ns.get(), 0);
    }

    #[test]
    fn test_settle_ignores_cancellation() {
        let time = SimTime::new();
        let token = CancelToken::new();
        token.cancel();
        let mut poller = Poller::new(SimClock(&time), SimDelay(&time), &token);

        block_on(poller.settle(200));
        assert_eq!(time.now_ms(), 200);
    }
}
