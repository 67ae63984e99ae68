/// Time sources for the per-tick budget.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

/// Monotonic time source read by the controller to enforce its budget.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock (`Instant::now`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Deterministic clock: every read advances time by a fixed step.
///
/// The controller reads the clock once when it starts processing and once
/// after each object, so with a step of `s` the n-th object finishes at
/// `n * s` elapsed. Used for replays and budget tests.
#[derive(Debug)]
pub struct StepClock {
    origin: Instant,
    step: Duration,
    reads: AtomicU32,
}

impl StepClock {
    pub fn new(step: Duration) -> Self {
        Self {
            origin: Instant::now(),
            step,
            reads: AtomicU32::new(0),
        }
    }

    /// Number of times the clock was read.
    pub fn reads(&self) -> u32 {
        self.reads.load(Ordering::Relaxed)
    }
}

impl Clock for StepClock {
    fn now(&self) -> Instant {
        let n = self.reads.fetch_add(1, Ordering::Relaxed);
        self.origin + self.step * n
    }
}
