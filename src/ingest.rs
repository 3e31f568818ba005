//! Ingestion poller.
//!
//! Every `poll_interval_secs` the poller asks the [`DeviceSource`] for the
//! status document of each sensor's device, turns it into a [`Reading`],
//! and appends it to the [`SensorStore`].  A device that cannot be queried
//! or returns a malformed document is skipped for this cycle; the other
//! sensors are still stored.
//!
//! Device documents follow the vendor layout:
//!
//! ```text
//! { "components": { "main": { "<capability>": { "<attribute>": {
//!     "value": "open", "timestamp": "2024-05-01T12:00:00.000Z" } } } } }
//! ```

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde_json::Value;

use crate::app::ports::{DeviceSource, SensorStore};
use crate::error::{Error, IngestError};
use crate::sensors::{Reading, SensorKind, Status, Timestamp, door, leak, motion, status};

// ═══════════════════════════════════════════════════════════════
//  Document parsing
// ═══════════════════════════════════════════════════════════════

/// Capability and attribute names for a sensor kind.
pub const fn capability(kind: SensorKind) -> (&'static str, &'static str) {
    match kind {
        SensorKind::Door => (door::CAPABILITY, door::ATTRIBUTE),
        SensorKind::Motion => (motion::CAPABILITY, motion::ATTRIBUTE),
        SensorKind::Leak => (leak::CAPABILITY, leak::ATTRIBUTE),
    }
}

/// Map a device value onto the internal vocabulary for `kind`.
pub fn normalize_status(kind: SensorKind, raw: &str) -> &str {
    match kind {
        SensorKind::Door => door::normalize(raw),
        SensorKind::Motion => motion::normalize(raw),
        SensorKind::Leak => leak::normalize(raw),
    }
}

/// Parse a device timestamp.
///
/// Accepts RFC 3339 strings and epoch seconds, either as a JSON number or a
/// numeric string.
pub fn parse_timestamp(raw: &Value) -> Option<Timestamp> {
    match raw {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .ok()
            .or_else(|| s.trim().parse::<f64>().ok().and_then(from_epoch_secs)),
        Value::Number(n) => n.as_f64().and_then(from_epoch_secs),
        _ => None,
    }
}

fn from_epoch_secs(secs: f64) -> Option<Timestamp> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

/// Turn one device status document into a [`Reading`] for `kind`.
pub fn parse_device_status(kind: SensorKind, doc: &Value) -> Result<Reading, IngestError> {
    let (cap, attr) = capability(kind);
    let node = doc
        .pointer(&format!("/components/main/{cap}/{attr}"))
        .filter(|v| v.is_object())
        .ok_or(IngestError::MissingCapability(kind))?;

    let raw_value = node
        .get("value")
        .and_then(Value::as_str)
        .ok_or(IngestError::MissingValue(kind))?;
    let raw_ts = node
        .get("timestamp")
        .filter(|v| !v.is_null())
        .ok_or(IngestError::MissingTimestamp(kind))?;

    let observed_at = parse_timestamp(raw_ts).ok_or(IngestError::InvalidTimestamp(kind))?;
    let status: Status =
        status(normalize_status(kind, raw_value)).ok_or(IngestError::StatusTooLong(kind))?;

    Ok(Reading {
        kind,
        status,
        observed_at,
    })
}

// ═══════════════════════════════════════════════════════════════
//  Poll cycle
// ═══════════════════════════════════════════════════════════════

/// What happened to one sensor during a poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Reading parsed and appended to the store.
    Stored(Reading),
    /// The device returned no document.
    Unavailable,
    /// The document was malformed or the store refused the reading.
    Failed(Error),
}

impl PollOutcome {
    pub fn reading(&self) -> Option<&Reading> {
        match self {
            Self::Stored(r) => Some(r),
            _ => None,
        }
    }
}

/// Combined result of one poll cycle across all sensors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollReport {
    pub door: PollOutcome,
    pub motion: PollOutcome,
    pub leak: PollOutcome,
}

impl PollReport {
    pub fn get(&self, kind: SensorKind) -> &PollOutcome {
        match kind {
            SensorKind::Door => &self.door,
            SensorKind::Motion => &self.motion,
            SensorKind::Leak => &self.leak,
        }
    }

    /// Status stored for `kind` this cycle, if any.
    pub fn status(&self, kind: SensorKind) -> Option<&str> {
        self.get(kind).reading().map(|r| r.status.as_str())
    }

    /// Timestamp of the last sensor stored this cycle, in poll order
    /// (door, motion, leak).
    pub fn last_observed_at(&self) -> Option<Timestamp> {
        SensorKind::ALL
            .iter()
            .rev()
            .find_map(|k| self.get(*k).reading().map(|r| r.observed_at))
    }

    /// Number of sensors stored this cycle.
    pub fn stored_count(&self) -> usize {
        SensorKind::ALL
            .iter()
            .filter(|k| self.get(**k).reading().is_some())
            .count()
    }
}

/// Fetch, parse and store one reading for `kind`.
fn poll_sensor(
    kind: SensorKind,
    source: &mut impl DeviceSource,
    store: &impl SensorStore,
) -> PollOutcome {
    let Some(doc) = source.fetch_status(kind) else {
        warn!("Poll: {} device unavailable, skipped", kind);
        return PollOutcome::Unavailable;
    };

    let reading = match parse_device_status(kind, &doc) {
        Ok(r) => r,
        Err(e) => {
            warn!("Poll: {}", e);
            return PollOutcome::Failed(e.into());
        }
    };

    match store.append(reading.clone()) {
        Ok(()) => {
            debug!("Poll: {} = {} @ {}", kind, reading.status, reading.observed_at);
            PollOutcome::Stored(reading)
        }
        Err(e) => {
            warn!("Poll: {} reading not stored: {}", kind, e);
            PollOutcome::Failed(e.into())
        }
    }
}

/// Run one poll cycle over every sensor.
pub fn poll_once(source: &mut impl DeviceSource, store: &impl SensorStore) -> PollReport {
    let report = PollReport {
        door: poll_sensor(SensorKind::Door, source, store),
        motion: poll_sensor(SensorKind::Motion, source, store),
        leak: poll_sensor(SensorKind::Leak, source, store),
    };
    info!(
        "Poll: stored {}/3 (door={:?} motion={:?} leak={:?})",
        report.stored_count(),
        report.status(SensorKind::Door),
        report.status(SensorKind::Motion),
        report.status(SensorKind::Leak),
    );
    report
}

// ═══════════════════════════════════════════════════════════════
//  Interval timer
// ═══════════════════════════════════════════════════════════════

/// Fixed-interval poll timer, advanced by the caller's loop.
pub struct Poller {
    interval_secs: u32,
    elapsed_secs: f32,
    enabled: bool,
}

impl Poller {
    pub fn new(interval_secs: u32) -> Self {
        Self {
            interval_secs,
            elapsed_secs: 0.0,
            enabled: true,
        }
    }

    pub fn interval_secs(&self) -> u32 {
        self.interval_secs
    }

    /// Change the interval.  Elapsed time carries over.
    pub fn set_interval(&mut self, interval_secs: u32) {
        self.interval_secs = interval_secs;
    }

    /// Enable or disable polling.  Disabling resets the elapsed time.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.elapsed_secs = 0.0;
        }
    }

    /// Advance the timer by `tick_secs`.  Returns `true` when a poll is due.
    pub fn tick(&mut self, tick_secs: f32) -> bool {
        if !self.enabled {
            return false;
        }
        self.elapsed_secs += tick_secs;
        if self.elapsed_secs >= self.interval_secs as f32 {
            self.elapsed_secs = 0.0;
            true
        } else {
            false
        }
    }

    /// Advance the timer and, if due, run a poll cycle.
    pub fn tick_and_poll(
        &mut self,
        tick_secs: f32,
        source: &mut impl DeviceSource,
        store: &impl SensorStore,
    ) -> Option<PollReport> {
        self.tick(tick_secs).then(|| poll_once(source, store))
    }
}
