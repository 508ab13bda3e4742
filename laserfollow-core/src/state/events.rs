//! Events that trigger follow phase transitions

/// Events that can trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FollowEvent {
    /// Caller requested a pierce/cut handshake
    Start,
    /// Pierce position confirmation asserted
    PierceConfirmed,
    /// A confirmation wait expired or was cancelled
    WaitFailed,
    /// Caller requested stop
    StopRequested,
    /// Blind settle delay elapsed
    Settled,
}

impl FollowEvent {
    /// Check if this event comes from the caller rather than the hardware
    pub fn is_caller_event(&self) -> bool {
        matches!(self, FollowEvent::Start | FollowEvent::StopRequested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_events() {
        assert!(FollowEvent::Start.is_caller_event());
        assert!(FollowEvent::StopRequested.is_caller_event());
        assert!(!FollowEvent::PierceConfirmed.is_caller_event());
        assert!(!FollowEvent::WaitFailed.is_caller_event());
        assert!(!FollowEvent::Settled.is_caller_event());
    }
}
