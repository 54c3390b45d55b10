use std::sync::atomic::{AtomicU32, Ordering};

/// Monotonically increasing 32-bit counter used to stamp log records with
/// an allocation-order sequence number.
///
/// The counter is lock-free: concurrent callers never observe a duplicate
/// or a skipped value. On overflow it wraps around to 0, which is accepted
/// behavior rather than an error.
///
/// A lower sequence number only means the number was *allocated* earlier;
/// it says nothing about the order in which records reach a provider.
#[derive(Debug)]
pub struct SequenceCounter {
    counter: AtomicU32,
}

static GLOBAL: SequenceCounter = SequenceCounter::new();

impl SequenceCounter {
    /// Create a counter whose first [`next`](Self::next) returns 1.
    pub const fn new() -> Self {
        SequenceCounter { counter: AtomicU32::new(0) }
    }

    /// The process-wide counter shared by every logger instance.
    pub fn global() -> &'static SequenceCounter {
        &GLOBAL
    }

    /// Atomically increment the counter and return the new value.
    pub fn next(&self) -> u32 {
        self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }
}

impl Default for SequenceCounter {
    fn default() -> Self {
        SequenceCounter::new()
    }
}
