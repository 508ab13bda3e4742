//! Tagged follow commands
//!
//! Commands arrive on their own channel, separate from timed dwells. The
//! legacy numeric codes are decoded here for callers that still multiplex
//! them onto dwell durations.

/// Legacy dwell duration that requests a follow start
pub const LEGACY_START_CODE: u32 = 333;

/// Legacy dwell duration that requests a follow stop
pub const LEGACY_STOP_CODE: u32 = 444;

/// Follow-head command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FollowCommand {
    /// Run the pierce/cut handshake
    Start,
    /// Disarm the laser and release the fixture
    Stop,
}

impl FollowCommand {
    /// Decode a legacy dwell code
    ///
    /// Returns `None` for any value that is a genuine dwell duration.
    pub fn from_legacy_code(code: u32) -> Option<Self> {
        match code {
            LEGACY_START_CODE => Some(FollowCommand::Start),
            LEGACY_STOP_CODE => Some(FollowCommand::Stop),
            _ => None,
        }
    }

    /// The legacy dwell code for this command
    pub fn legacy_code(&self) -> u32 {
        match self {
            FollowCommand::Start => LEGACY_START_CODE,
            FollowCommand::Stop => LEGACY_STOP_CODE,
        }
    }
}
