//! Integration tests for the ingestion poller against the in-memory store.

use serde_json::json;

use crate::mock_ports::{ScriptedDevices, at, device_doc};

use lonewatch::adapters::memory_store::MemorySensorStore;
use lonewatch::app::ports::SensorStore;
use lonewatch::error::{Error, IngestError};
use lonewatch::ingest::{PollOutcome, poll_once};
use lonewatch::sensors::SensorKind;

#[test]
fn all_three_sensors_are_stored() {
    let mut devices = ScriptedDevices::new();
    let store = MemorySensorStore::new();
    devices.set(SensorKind::Door, "closed", at(0));
    devices.set(SensorKind::Motion, "active", at(-30));
    devices.set(SensorKind::Leak, "dry", at(-60));

    let report = poll_once(&mut devices, &store);
    assert_eq!(report.stored_count(), 3);
    assert_eq!(report.status(SensorKind::Leak), Some("clear"));
    assert_eq!(report.last_observed_at(), Some(at(-60)));

    let all = store.latest_all();
    assert!(all.door.status_is("closed"));
    assert!(all.motion.status_is("active"));
    assert!(all.leak.status_is("clear"));
}

#[test]
fn unavailable_device_is_skipped_others_stored() {
    let mut devices = ScriptedDevices::new();
    let store = MemorySensorStore::new();
    devices.set(SensorKind::Door, "open", at(0));
    devices.set(SensorKind::Leak, "wet", at(0));

    let report = poll_once(&mut devices, &store);
    assert_eq!(report.motion, PollOutcome::Unavailable);
    assert_eq!(report.stored_count(), 2);
    assert_eq!(store.len(SensorKind::Motion), 0);
    assert!(store.get_latest(SensorKind::Leak).status_is("detected"));
}

#[test]
fn malformed_timestamp_is_reported_not_stored() {
    let mut devices = ScriptedDevices::new();
    let store = MemorySensorStore::new();
    devices.set_raw(
        SensorKind::Door,
        json!({ "components": { "main": { "contactSensor": { "contact": {
            "value": "open", "timestamp": "not-a-time" } } } } }),
    );

    let report = poll_once(&mut devices, &store);
    assert_eq!(report.door, PollOutcome::Failed(Error::InvalidTimestamp(SensorKind::Door)));
    assert_eq!(store.len(SensorKind::Door), 0);
}

#[test]
fn document_for_wrong_device_is_rejected() {
    let mut devices = ScriptedDevices::new();
    let store = MemorySensorStore::new();
    devices.set_raw(SensorKind::Motion, device_doc(SensorKind::Door, "open", at(0)));

    let report = poll_once(&mut devices, &store);
    assert_eq!(
        report.motion,
        PollOutcome::Failed(Error::Ingest(IngestError::MissingCapability(SensorKind::Motion)))
    );
}

#[test]
fn stale_reading_arriving_late_does_not_replace_newer() {
    let mut devices = ScriptedDevices::new();
    let store = MemorySensorStore::new();

    devices.set(SensorKind::Door, "closed", at(0));
    poll_once(&mut devices, &store);
    devices.set(SensorKind::Door, "open", at(-100));
    poll_once(&mut devices, &store);

    let door = store.get_latest(SensorKind::Door);
    assert!(door.status_is("closed"));
    assert_eq!(store.len(SensorKind::Door), 2);
}
