//! Laser spindle
//!
//! A [`Spindle`] maps commanded speed onto laser duty through its
//! [`DutyGate`]. A follow head is an optional [`FollowStrategy`] composed
//! into the spindle; without one the gate is armed for good and follow
//! commands are refused.

pub mod controller;

pub use controller::FollowController;

use embedded_hal_async::delay::DelayNs;
use laserfollow_core::config::SpeedMap;
use laserfollow_core::state::{FollowCommand, FollowError, FollowPhase, SequenceResult};
use laserfollow_core::timing::Cancellation;
use laserfollow_hal::{DutyOutput, InputPin, Monotonic, OutputPin};

use crate::laser::{DutyGate, FollowSequencer, SignalLevels};

/// Pierce/cut interlock that a spindle delegates follow commands to
#[allow(async_fn_in_trait)]
pub trait FollowStrategy {
    /// Current phase of the handshake
    fn phase(&self) -> FollowPhase;

    /// Snapshot of the fixture lines
    fn signal_levels(&self) -> SignalLevels;

    /// Run the handshake, arming `gate` once the head is in position
    async fn start<O: DutyOutput>(&mut self, gate: &mut DutyGate<O>) -> SequenceResult;

    /// Force the laser off and release the head
    async fn stop<O: DutyOutput>(&mut self, gate: &mut DutyGate<O>) -> SequenceResult;
}

impl<P, I, C, D, K> FollowStrategy for FollowSequencer<P, I, C, D, K>
where
    P: OutputPin,
    I: InputPin,
    C: Monotonic,
    D: DelayNs,
    K: Cancellation,
{
    fn phase(&self) -> FollowPhase {
        FollowSequencer::phase(self)
    }

    fn signal_levels(&self) -> SignalLevels {
        self.signals().levels()
    }

    async fn start<O: DutyOutput>(&mut self, gate: &mut DutyGate<O>) -> SequenceResult {
        FollowSequencer::start(self, gate).await
    }

    async fn stop<O: DutyOutput>(&mut self, gate: &mut DutyGate<O>) -> SequenceResult {
        FollowSequencer::stop(self, gate).await
    }
}

/// Placeholder strategy for spindles without a follow head
///
/// Uninhabited: a `Spindle<O, NoFollow>` can never hold one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoFollow {}

impl FollowStrategy for NoFollow {
    fn phase(&self) -> FollowPhase {
        match *self {}
    }

    fn signal_levels(&self) -> SignalLevels {
        match *self {}
    }

    async fn start<O: DutyOutput>(&mut self, _gate: &mut DutyGate<O>) -> SequenceResult {
        match *self {}
    }

    async fn stop<O: DutyOutput>(&mut self, _gate: &mut DutyGate<O>) -> SequenceResult {
        match *self {}
    }
}

/// Spindle state for status reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpindleStatus {
    /// Follow phase (always `Idle` without a follow head)
    pub phase: FollowPhase,
    /// Last commanded duty
    pub requested_duty: u32,
    /// Whether commanded duty reaches the laser
    pub armed: bool,
    /// Fixture lines, if a follow head is fitted
    pub signals: Option<SignalLevels>,
}

/// Laser spindle with an optional follow head
pub struct Spindle<O, F = NoFollow> {
    gate: DutyGate<O>,
    speed_map: SpeedMap,
    follow: Option<F>,
}

impl<O: DutyOutput> Spindle<O, NoFollow> {
    /// Create a spindle without a follow head
    ///
    /// The gate is armed immediately, so speed changes reach the laser.
    pub fn new(output: O, speed_map: SpeedMap) -> Self {
        Self {
            gate: DutyGate::new_armed(output),
            speed_map,
            follow: None,
        }
    }
}

impl<O: DutyOutput, F: FollowStrategy> Spindle<O, F> {
    /// Create a spindle whose laser is interlocked with a follow head
    ///
    /// The gate starts disarmed; only a successful start arms it.
    pub fn with_follow(output: O, speed_map: SpeedMap, follow: F) -> Self {
        Self {
            gate: DutyGate::new(output),
            speed_map,
            follow: Some(follow),
        }
    }

    /// Command a spindle speed
    pub fn set_speed(&mut self, speed: u32) {
        let duty = self.speed_map.duty_for(speed, self.gate.max_duty());
        self.gate.set_output(duty);
    }

    /// Command a raw duty value
    pub fn set_duty(&mut self, duty: u32) {
        self.gate.set_output(duty);
    }

    pub fn gate(&self) -> &DutyGate<O> {
        &self.gate
    }

    pub fn speed_map(&self) -> &SpeedMap {
        &self.speed_map
    }

    pub fn follow(&self) -> Option<&F> {
        self.follow.as_ref()
    }

    pub fn has_follow(&self) -> bool {
        self.follow.is_some()
    }

    /// Laser power follows the feed rate (M4 mode)
    pub fn is_rate_adjusted(&self) -> bool {
        true
    }

    /// A laser has no spin direction; direction changes are ignored
    pub fn is_reversible(&self) -> bool {
        false
    }

    pub fn phase(&self) -> FollowPhase {
        self.follow.as_ref().map_or(FollowPhase::Idle, |f| f.phase())
    }

    /// Run a follow command
    pub async fn execute(&mut self, cmd: FollowCommand) -> SequenceResult {
        let Some(follow) = self.follow.as_mut() else {
            debug!("follow command {} without a follow head", cmd);
            return Err(FollowError::NotConfigured);
        };

        match cmd {
            FollowCommand::Start => follow.start(&mut self.gate).await,
            FollowCommand::Stop => follow.stop(&mut self.gate).await,
        }
    }

    /// Handle a legacy dwell code
    ///
    /// Codes 333 and 444 run a start or a stop and write success to
    /// `result`. Any other code (or any code on a spindle without a follow
    /// head) returns `false` with `result` untouched, and the caller should
    /// treat it as an ordinary dwell.
    ///
    /// Timeouts are not escalated here; go through
    /// [`FollowController::dispatch`] when faults must be raised.
    pub async fn dispatch(&mut self, code: u32, result: &mut bool) -> bool {
        if !self.has_follow() {
            return false;
        }
        let Some(cmd) = FollowCommand::from_legacy_code(code) else {
            return false;
        };

        *result = self.execute(cmd).await.is_ok();
        true
    }

    pub fn status(&self) -> SpindleStatus {
        SpindleStatus {
            phase: self.phase(),
            requested_duty: self.gate.requested_duty(),
            armed: self.gate.is_enabled(),
            signals: self.follow.as_ref().map(|f| f.signal_levels()),
        }
    }
}
