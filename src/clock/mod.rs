//! Monotonic clock abstraction.
//!
//! The timer service (`crate::timer()`) and TTL checks on envelopes need a
//! source of monotonic instants that is cheap to sample and safe to mock in
//! tests. `Clock` is the leaf dependency of the whole crate: every other
//! module either takes a `Clock` directly or receives one through
//! `ActorSystem`.

// Layer 1: Standard library imports
use std::time::{Duration, Instant};

/// A monotonic time source.
///
/// `SystemClock` is the production implementation, backed by
/// `std::time::Instant`. Tests that need deterministic timeouts can
/// implement `Clock` against a manually-advanced instant instead of
/// sleeping in wall-clock time.
pub trait Clock: Send + Sync + 'static {
    /// Returns the current instant on this clock's monotonic timeline.
    fn now(&self) -> Instant;
}

/// The default, wall-clock-backed `Clock` implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Convenience: compute the deadline `duration` from now on `clock`.
pub fn deadline_from(clock: &dyn Clock, duration: Duration) -> Instant {
    clock.now() + duration
}
