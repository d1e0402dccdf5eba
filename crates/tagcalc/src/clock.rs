//! Injectable wall clock
//!
//! The double-clear detector and history entry ids read time through
//! [`Clock`], so tests can drive time with [`FakeClock`] instead of sleeping.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of wall-clock time in milliseconds since the Unix epoch
pub trait Clock {
    /// Current time in milliseconds since the Unix epoch
    fn now_ms(&self) -> u64;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// Fake clock for deterministic testing
///
/// Clones share the same time, so a test can keep a handle while the widget
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeClock {
    current_ms: Arc<AtomicU64>,
}

impl FakeClock {
    /// Create a fake clock at the epoch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fake clock at the given time
    #[must_use]
    pub fn at(time_ms: u64) -> Self {
        Self {
            current_ms: Arc::new(AtomicU64::new(time_ms)),
        }
    }

    /// Move time forward
    pub fn advance(&self, ms: u64) {
        self.current_ms.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jump to an absolute time (may move backwards)
    pub fn set(&self, time_ms: u64) {
        self.current_ms.store(time_ms, Ordering::SeqCst);
    }
}

impl Clock for FakeClock {
    fn now_ms(&self) -> u64 {
        self.current_ms.load(Ordering::SeqCst)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
