//! Time source abstraction
//!
//! Call start times, durations and session expiry all derive from a single
//! injectable clock so tests can pin the wall time.

use chrono::{DateTime, Utc};

/// Wall-clock time source
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
