//! Laser output and follow-head sequencing
//!
//! - [`DutyGate`]: the only path commanded duty takes to the hardware
//! - [`FollowSignals`]: the seven fixture lines
//! - [`FollowSequencer`]: the pierce/cut handshake
//! - [`PwmDuty`]: embedded-hal PWM channel as a duty output

pub mod follow;
pub mod gate;
pub mod pwm;
pub mod signals;

pub use follow::FollowSequencer;
pub use gate::DutyGate;
pub use pwm::PwmDuty;
pub use signals::{FollowSignals, SignalLevels};
