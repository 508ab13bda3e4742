//! Follow phase definition
//!
//! Laser arming and the follow output are a function of the current
//! phase. There is no faulted phase: every failure returns to `Idle`
//! after the laser is forced off, because the head offers no way to
//! report a distinguishable faulted state.

use super::events::FollowEvent;
use crate::safety::FaultKind;

/// Follow sequencer phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FollowPhase {
    /// Follow deasserted, laser disarmed
    #[default]
    Idle,
    /// Follow asserted, waiting for pierce confirmation
    WaitingPierce,
    /// Laser armed; cut confirmation pending or received
    Cutting,
    /// Follow deasserted, blind settle delay running
    WaitingReturn,
}

/// Reasons a follow request did not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FollowError {
    /// Pierce confirmation never asserted within the timeout
    PierceTimeout,
    /// Cut confirmation never asserted within the timeout
    CutTimeout,
    /// External cancellation during the given wait phase
    Aborted(FollowPhase),
    /// Start requested while a sequence was already in progress
    AlreadyRunning,
    /// The spindle has no follow strategy
    NotConfigured,
}

/// Outcome of a follow request; `Ok(())` means completed
pub type SequenceResult = Result<(), FollowError>;

impl FollowError {
    /// System-wide fault this error must be escalated as, if any
    ///
    /// Only the two handshake timeouts are faults. Aborts were requested
    /// by someone, and rejections leave the hardware untouched.
    pub fn fault_kind(&self) -> Option<FaultKind> {
        match self {
            FollowError::PierceTimeout | FollowError::CutTimeout => {
                Some(FaultKind::SpindleControl)
            }
            FollowError::Aborted(_) | FollowError::AlreadyRunning | FollowError::NotConfigured => {
                None
            }
        }
    }
}

impl FollowPhase {
    /// Check if laser duty may reach the hardware in this phase
    pub fn laser_armed(&self) -> bool {
        matches!(self, FollowPhase::Cutting)
    }

    /// Check if the follow output is asserted in this phase
    pub fn follow_asserted(&self) -> bool {
        matches!(self, FollowPhase::WaitingPierce | FollowPhase::Cutting)
    }

    /// Check if a new start request would be accepted
    pub fn is_idle(&self) -> bool {
        matches!(self, FollowPhase::Idle)
    }

    /// Process an event and return the next phase
    pub fn transition(self, event: FollowEvent) -> Self {
        use FollowEvent::*;
        use FollowPhase::*;

        match (self, event) {
            (Idle, Start) => WaitingPierce,

            (WaitingPierce, PierceConfirmed) => Cutting,
            (WaitingPierce, WaitFailed) => Idle,
            (Cutting, WaitFailed) => Idle,

            // Stop is accepted from any phase, including a sequence whose
            // start future was dropped mid-wait
            (_, StopRequested) => WaitingReturn,
            (WaitingReturn, Settled) => Idle,

            // Default: stay in current phase
            _ => self,
        }
    }
}
