//! Bounded waits
//!
//! Every wait in the follow handshake has a deadline and a cancellation
//! token, both checked on each poll tick.

pub mod cancel;
pub mod wait;

pub use cancel::{CancelToken, Cancellation, NeverCancel};
pub use wait::{Poller, WaitOutcome};
