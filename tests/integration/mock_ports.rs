//! Mock port adapters for integration tests.
//!
//! Records every emitted event and recorded risk event so tests can assert
//! on the full history of a monitoring cycle.

use std::collections::HashMap;

use chrono::{Duration, TimeZone, Utc};
use serde_json::{Value, json};

use lonewatch::app::events::AppEvent;
use lonewatch::app::ports::{DeviceSource, EventSink, RiskEventSink, StorageError};
use lonewatch::error::PersistenceError;
use lonewatch::ingest::capability;
use lonewatch::responder::RiskEvent;
use lonewatch::risk::RiskLevel;
use lonewatch::sensors::{SensorKind, Timestamp};

// ── Time helpers ─────────────────────────────────────────────

pub fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn at(secs: i64) -> Timestamp {
    t0() + Duration::seconds(secs)
}

/// Vendor-layout status document for `kind`.
pub fn device_doc(kind: SensorKind, value: &str, observed_at: Timestamp) -> Value {
    let (cap, attr) = capability(kind);
    json!({ "components": { "main": { cap: { attr: {
        "value": value,
        "timestamp": observed_at.to_rfc3339(),
    } } } } })
}

// ── ScriptedDevices ──────────────────────────────────────────

/// Device source whose documents are set by the test.  Kinds without a
/// document report as unavailable.
#[derive(Default)]
pub struct ScriptedDevices {
    docs: HashMap<SensorKind, Value>,
    pub fetches: Vec<SensorKind>,
}

#[allow(dead_code)]
impl ScriptedDevices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, kind: SensorKind, value: &str, observed_at: Timestamp) {
        self.docs.insert(kind, device_doc(kind, value, observed_at));
    }

    pub fn set_raw(&mut self, kind: SensorKind, doc: Value) {
        self.docs.insert(kind, doc);
    }

    pub fn unplug(&mut self, kind: SensorKind) {
        self.docs.remove(&kind);
    }
}

impl DeviceSource for ScriptedDevices {
    fn fetch_status(&mut self, kind: SensorKind) -> Option<Value> {
        self.fetches.push(kind);
        self.docs.get(&kind).cloned()
    }
}

// ── RecordingSink ────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<RiskEvent> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::RiskRecorded(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Risk logs ────────────────────────────────────────────────

#[derive(Default)]
pub struct VecRiskLog {
    pub events: Vec<RiskEvent>,
}

impl RiskEventSink for VecRiskLog {
    fn record_event(
        &mut self,
        level: RiskLevel,
        recorded_at: Timestamp,
    ) -> Result<RiskEvent, PersistenceError> {
        let e = RiskEvent { level, recorded_at };
        self.events.push(e);
        Ok(e)
    }
}

/// Risk log whose every write fails; counts attempts.
#[derive(Default)]
pub struct FailingRiskLog {
    pub attempts: usize,
}

impl RiskEventSink for FailingRiskLog {
    fn record_event(
        &mut self,
        _level: RiskLevel,
        _recorded_at: Timestamp,
    ) -> Result<RiskEvent, PersistenceError> {
        self.attempts += 1;
        Err(PersistenceError::Storage(StorageError::IoError))
    }
}
