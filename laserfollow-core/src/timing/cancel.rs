//! Cancellation tokens

use portable_atomic::{AtomicBool, Ordering};

/// Source of an external abort request (e.g. emergency stop)
pub trait Cancellation {
    /// Check if the current wait should be abandoned
    fn is_cancelled(&self) -> bool;
}

impl<T: Cancellation + ?Sized> Cancellation for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Cancellation that never fires
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl Cancellation for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Latching cancellation flag
///
/// Once cancelled it stays cancelled until [`reset`](CancelToken::reset),
/// so every wait started while an abort is pending returns immediately.
#[derive(Debug, Default)]
pub struct CancelToken {
    flag: AtomicBool,
}

impl CancelToken {
    /// Create an uncancelled token
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
        }
    }

    /// Request cancellation of any current and future waits
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Clear a previous cancellation
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Cancellation for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
