//! Follow sequencer
//!
//! Coordinates the follow fixture with the laser duty gate during a
//! pierce-then-cut operation:
//!
//! ```text
//!  start():  follow ON ─► wait drill-ok ─► arm laser ─► wait cut-ok ─► Ok
//!                             │ timeout                    │ timeout
//!                             ▼                            ▼
//!                         follow OFF                 laser OFF, follow OFF
//!                       PierceTimeout                    CutTimeout
//!
//!  stop():   laser OFF ─► follow OFF ─► settle (blind) ─► Ok
//! ```
//!
//! Each wait is bounded by its timeout and by the cancellation source,
//! checked every poll tick. A cancelled wait cleans up exactly like the
//! matching timeout but reports [`FollowError::Aborted`].
//!
//! The sequencer reports failures only through its return value. Turning
//! a timeout into a system-wide fault is the caller's job (see
//! [`FollowController`](crate::spindle::FollowController)).
//!
//! # Task context
//!
//! `start` and `stop` hold the calling task for their whole duration: up
//! to both timeouts for `start`, the settle time for `stop`. They take
//! `&mut self`, so a single sequencer can never run two of them at once.
//! A `start` future dropped mid-wait leaves the phase non-idle with
//! follow asserted; `stop` recovers from any phase.

use embedded_hal_async::delay::DelayNs;
use laserfollow_core::config::FollowTiming;
use laserfollow_core::state::{FollowError, FollowEvent, FollowPhase, SequenceResult};
use laserfollow_core::timing::{Cancellation, Poller, WaitOutcome};
use laserfollow_hal::{DutyOutput, InputPin, Monotonic, OutputPin};

use super::gate::DutyGate;
use super::signals::FollowSignals;

/// Pierce/cut handshake state machine
pub struct FollowSequencer<P, I, C, D, K> {
    signals: FollowSignals<P, I>,
    poller: Poller<C, D, K>,
    timing: FollowTiming,
    phase: FollowPhase,
}

impl<P, I, C, D, K> FollowSequencer<P, I, C, D, K>
where
    P: OutputPin,
    I: InputPin,
    C: Monotonic,
    D: DelayNs,
    K: Cancellation,
{
    /// Create an idle sequencer
    pub fn new(
        signals: FollowSignals<P, I>,
        clock: C,
        delay: D,
        cancel: K,
        timing: FollowTiming,
    ) -> Self {
        let poller =
            Poller::new(clock, delay, cancel).with_poll_interval_us(timing.poll_interval_us);
        Self {
            signals,
            poller,
            timing,
            phase: FollowPhase::Idle,
        }
    }

    /// Get the current phase
    pub fn phase(&self) -> FollowPhase {
        self.phase
    }

    /// Get the fixture lines
    pub fn signals(&self) -> &FollowSignals<P, I> {
        &self.signals
    }

    /// Get the handshake timing
    pub fn timing(&self) -> &FollowTiming {
        &self.timing
    }

    fn advance(&mut self, event: FollowEvent) {
        let next = self.phase.transition(event);
        trace!("follow phase {} -> {}", self.phase, next);
        self.phase = next;
    }

    /// Release the fixture after a failed wait and return to idle
    fn fail(&mut self, error: FollowError) -> SequenceResult {
        self.signals.set_follow(false);
        self.advance(FollowEvent::WaitFailed);
        Err(error)
    }

    /// Run the pierce/cut handshake
    ///
    /// On success the laser stays armed at the duty that was commanded
    /// before the call; further modulation goes through the gate.
    pub async fn start<O: DutyOutput>(&mut self, gate: &mut DutyGate<O>) -> SequenceResult {
        if !self.phase.is_idle() {
            warn!("follow start rejected in phase {}", self.phase);
            return Err(FollowError::AlreadyRunning);
        }

        self.advance(FollowEvent::Start);
        self.signals.set_follow(true);
        debug!("follow asserted, waiting for pierce position");

        let timeout_ms = self.timing.pierce_timeout_ms;
        let signals = &self.signals;
        let outcome = self.poller.wait_for(timeout_ms, || signals.pierce_confirmed()).await;
        match outcome {
            WaitOutcome::Satisfied => {}
            WaitOutcome::Expired => {
                warn!("no pierce confirmation within {} ms", timeout_ms);
                return self.fail(FollowError::PierceTimeout);
            }
            WaitOutcome::Cancelled => {
                info!("follow aborted while waiting for pierce position");
                return self.fail(FollowError::Aborted(FollowPhase::WaitingPierce));
            }
        }

        gate.arm();
        self.advance(FollowEvent::PierceConfirmed);
        info!("pierce position reached, laser armed at duty {}", gate.requested_duty());

        let timeout_ms = self.timing.cut_timeout_ms;
        debug!("waiting for cut position");
        let signals = &self.signals;
        let outcome = self.poller.wait_for(timeout_ms, || signals.cut_confirmed()).await;
        match outcome {
            WaitOutcome::Satisfied => {
                debug!("cut position reached");
                Ok(())
            }
            WaitOutcome::Expired => {
                warn!("no cut confirmation within {} ms", timeout_ms);
                gate.disarm();
                self.fail(FollowError::CutTimeout)
            }
            WaitOutcome::Cancelled => {
                info!("follow aborted while waiting for cut position");
                gate.disarm();
                self.fail(FollowError::Aborted(FollowPhase::Cutting))
            }
        }
    }

    /// Disarm the laser, release the fixture and settle
    ///
    /// There is no returned-to-center feedback, so the settle delay is
    /// blind and unconditional. Always succeeds.
    pub async fn stop<O: DutyOutput>(&mut self, gate: &mut DutyGate<O>) -> SequenceResult {
        // Laser off first, ahead of any pending duty
        gate.disarm();
        self.signals.set_follow(false);
        self.advance(FollowEvent::StopRequested);

        debug!("follow released, settling {} ms", self.timing.settle_ms);
        self.poller.settle(self.timing.settle_ms).await;

        self.advance(FollowEvent::Settled);
        debug!("follow settled");
        Ok(())
    }
}
