//! Monotonic time source

/// Microsecond-resolution monotonic counter
///
/// Used only for elapsed-time comparisons, so the epoch is arbitrary.
/// It must never go backwards (no wall-clock adjustment).
pub trait Monotonic {
    /// Microseconds since an arbitrary fixed point
    fn now_us(&self) -> u64;

    /// Microseconds elapsed since `earlier`
    fn elapsed_since_us(&self, earlier: u64) -> u64 {
        self.now_us().saturating_sub(earlier)
    }
}

impl<T: Monotonic + ?Sized> Monotonic for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
