//! Fault kinds and sinks

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicU32, AtomicU8, Ordering};

/// System-wide fault conditions raised by the follow head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum FaultKind {
    /// Spindle handshake failed (pierce or cut confirmation timed out)
    SpindleControl = 1,
}

impl FaultKind {
    /// Get the kind as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a kind from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(FaultKind::SpindleControl),
            _ => None,
        }
    }
}

/// Destination for system-wide faults
///
/// `raise_fault` must not block and must be callable from any task.
pub trait FaultSink {
    /// Record a fault condition
    fn raise_fault(&self, kind: FaultKind);
}

impl<T: FaultSink + ?Sized> FaultSink for &T {
    fn raise_fault(&self, kind: FaultKind) {
        (**self).raise_fault(kind);
    }
}

/// Latest-wins fault signal, for a supervisor task to await
impl<M: RawMutex> FaultSink for Signal<M, FaultKind> {
    fn raise_fault(&self, kind: FaultKind) {
        self.signal(kind);
    }
}

/// Counting fault sink
///
/// Lock-free, so it can live in a `static` shared between tasks.
#[derive(Debug, Default)]
pub struct FaultCounter {
    raised: AtomicU32,
    last: AtomicU8,
}

impl FaultCounter {
    /// Create an empty counter
    pub const fn new() -> Self {
        Self {
            raised: AtomicU32::new(0),
            last: AtomicU8::new(0),
        }
    }

    /// Number of faults raised since creation or the last clear
    pub fn count(&self) -> u32 {
        self.raised.load(Ordering::Acquire)
    }

    /// Most recently raised fault
    pub fn last(&self) -> Option<FaultKind> {
        FaultKind::from_u8(self.last.load(Ordering::Acquire))
    }

    /// Forget all raised faults
    pub fn clear(&self) {
        self.raised.store(0, Ordering::Release);
        self.last.store(0, Ordering::Release);
    }
}

impl FaultSink for FaultCounter {
    fn raise_fault(&self, kind: FaultKind) {
        self.last.store(kind.as_u8(), Ordering::Release);
        self.raised.fetch_add(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    #[test]
    fn test_kind_roundtrip() {
        assert_eq!(
            FaultKind::from_u8(FaultKind::SpindleControl.as_u8()),
            Some(FaultKind::SpindleControl)
        );
        assert_eq!(FaultKind::from_u8(0), None);
    }

    #[test]
    fn test_counter() {
        static FAULTS: FaultCounter = FaultCounter::new();

        assert_eq!(FAULTS.count(), 0);
        assert_eq!(FAULTS.last(), None);

        FAULTS.raise_fault(FaultKind::SpindleControl);
        FAULTS.raise_fault(FaultKind::SpindleControl);
        assert_eq!(FAULTS.count(), 2);
        assert_eq!(FAULTS.last(), Some(FaultKind::SpindleControl));

        FAULTS.clear();
        assert_eq!(FAULTS.count(), 0);
        assert_eq!(FAULTS.last(), None);
    }

    #[test]
    fn test_sink_by_reference() {
        let counter = FaultCounter::new();
        let sink = &counter;
        sink.raise_fault(FaultKind::SpindleControl);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_signal_sink() {
        let signal: Signal<NoopRawMutex, FaultKind> = Signal::new();
        assert!(!signal.signaled());

        signal.raise_fault(FaultKind::SpindleControl);
        assert!(signal.signaled());
        assert_eq!(signal.try_take(), Some(FaultKind::SpindleControl));
    }
}
