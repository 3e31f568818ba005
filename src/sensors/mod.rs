//! Sensor data model: kinds, readings and the per-kind [`SensorSnapshot`].
//!
//! A snapshot is the newest known (status, timestamp) pair for one sensor.
//! The store hands out snapshots; the risk evaluator only ever reads them.
//! A sensor that never reported is represented by [`SensorSnapshot::empty`],
//! never by an error.

pub mod door;
pub mod leak;
pub mod motion;

use core::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Wall-clock instant used for every observation and evaluation.
pub type Timestamp = DateTime<Utc>;

/// Longest status word kept.  Every vocabulary word fits comfortably;
/// anything longer is unrecognised and dropped.
pub const STATUS_CAP: usize = 16;

/// Short sensor-specific status word (`"open"`, `"active"`, `"detected"`, ...).
pub type Status = heapless::String<STATUS_CAP>;

/// Build a [`Status`] from a raw word.  Returns `None` when the word does not
/// fit in [`STATUS_CAP`] bytes.
pub fn status(word: &str) -> Option<Status> {
    let mut s = Status::new();
    s.push_str(word).ok()?;
    Some(s)
}

/// The three sensors installed in a monitored room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Door contact sensor (`open` / `closed`).
    Door,
    /// PIR motion sensor (`active` / `inactive`).
    Motion,
    /// Water leak sensor (`detected` / `clear`).
    Leak,
}

impl SensorKind {
    pub const ALL: [SensorKind; 3] = [SensorKind::Door, SensorKind::Motion, SensorKind::Leak];

    /// Stable lowercase label used in logs and replay files.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::Motion => "motion",
            Self::Leak => "leak",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single well-formed observation, as written to the sensor store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub kind: SensorKind,
    pub status: Status,
    pub observed_at: Timestamp,
}

impl Reading {
    /// Convenience constructor; `None` if `status` exceeds [`STATUS_CAP`].
    pub fn new(kind: SensorKind, status_word: &str, observed_at: Timestamp) -> Option<Self> {
        Some(Self {
            kind,
            status: status(status_word)?,
            observed_at,
        })
    }
}

/// The newest known state of one sensor.  Both fields are absent when the
/// sensor has never reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub kind: SensorKind,
    pub status: Option<Status>,
    pub observed_at: Option<Timestamp>,
}

impl SensorSnapshot {
    /// Snapshot for a sensor with no recorded reading.
    pub fn empty(kind: SensorKind) -> Self {
        Self {
            kind,
            status: None,
            observed_at: None,
        }
    }

    /// Snapshot with both fields populated.  A word longer than
    /// [`STATUS_CAP`] is dropped and the snapshot carries no status.
    pub fn observed(kind: SensorKind, status_word: &str, observed_at: Timestamp) -> Self {
        Self {
            kind,
            status: status(status_word),
            observed_at: Some(observed_at),
        }
    }

    /// True if the status equals `word`.  An absent status matches nothing.
    pub fn status_is(&self, word: &str) -> bool {
        self.status.as_deref() == Some(word)
    }

    /// Time elapsed between the observation and `now`.  Negative when the
    /// observation is stamped after `now`.  `None` when never observed.
    pub fn elapsed(&self, now: Timestamp) -> Option<TimeDelta> {
        self.observed_at.map(|t| now - t)
    }

    /// Whole seconds elapsed, truncated.  For logs only.
    pub fn elapsed_secs(&self, now: Timestamp) -> Option<i64> {
        self.elapsed(now).map(|d| d.num_seconds())
    }

    /// True if the observation lies no more than `window_secs` before `now`,
    /// compared at full timestamp precision.  A missing timestamp never
    /// satisfies the window.
    pub fn observed_within(&self, now: Timestamp, window_secs: u32) -> bool {
        let window = TimeDelta::seconds(i64::from(window_secs));
        self.elapsed(now).is_some_and(|elapsed| elapsed <= window)
    }
}

impl From<Reading> for SensorSnapshot {
    fn from(r: Reading) -> Self {
        Self {
            kind: r.kind,
            status: Some(r.status),
            observed_at: Some(r.observed_at),
        }
    }
}

/// One snapshot per sensor kind, read together from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotSet {
    pub door: SensorSnapshot,
    pub motion: SensorSnapshot,
    pub leak: SensorSnapshot,
}

impl SnapshotSet {
    /// A set in which no sensor has ever reported.
    pub fn empty() -> Self {
        Self {
            door: SensorSnapshot::empty(SensorKind::Door),
            motion: SensorSnapshot::empty(SensorKind::Motion),
            leak: SensorSnapshot::empty(SensorKind::Leak),
        }
    }

    pub fn get(&self, kind: SensorKind) -> &SensorSnapshot {
        match kind {
            SensorKind::Door => &self.door,
            SensorKind::Motion => &self.motion,
            SensorKind::Leak => &self.leak,
        }
    }
}
