//! System clock adapter.
//!
//! Reads UTC wall-clock time for the outer loop.  Domain code never calls
//! this directly; it receives `now` as a parameter.

use chrono::Utc;

use crate::app::ports::Clock;
use crate::sensors::Timestamp;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock that returns a fixed instant, for replays and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
