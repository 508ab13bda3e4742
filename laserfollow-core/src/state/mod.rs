//! Follow-head state machine
//!
//! The phase machine is explicit, finite and deterministic. Hardware
//! sequencing lives in the drivers crate; this module only decides which
//! phase follows which event.

pub mod command;
pub mod events;
pub mod machine;

pub use command::{FollowCommand, LEGACY_START_CODE, LEGACY_STOP_CODE};
pub use events::FollowEvent;
pub use machine::{FollowError, FollowPhase, SequenceResult};
