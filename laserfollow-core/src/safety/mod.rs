//! Fault escalation
//!
//! Faults are raised fire-and-forget: the raiser never waits on whoever
//! consumes them.

pub mod fault;

pub use fault::{FaultCounter, FaultKind, FaultSink};
