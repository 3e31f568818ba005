//! Integration tests for the poll → store → evaluate → respond pipeline.

use crate::mock_ports::{FailingRiskLog, RecordingSink, ScriptedDevices, VecRiskLog, at};

use lonewatch::adapters::memory_storage::MemoryStorage;
use lonewatch::adapters::memory_store::MemorySensorStore;
use lonewatch::adapters::risk_log::StorageRiskLog;
use lonewatch::app::commands::AppCommand;
use lonewatch::app::events::AppEvent;
use lonewatch::app::service::MonitorService;
use lonewatch::config::MonitorConfig;
use lonewatch::error::PersistenceError;
use lonewatch::risk::{RiskLevel, Rule, RuleOrder};
use lonewatch::sensors::SensorKind;

fn leak_aware() -> MonitorConfig {
    MonitorConfig {
        rule_order: RuleOrder::LeakAware,
        ..MonitorConfig::default()
    }
}

/// Poll once and evaluate at `now_secs`, returning the level.
fn cycle(
    svc: &mut MonitorService,
    devices: &mut ScriptedDevices,
    store: &MemorySensorStore,
    log: &mut VecRiskLog,
    sink: &mut RecordingSink,
    now_secs: i64,
) -> RiskLevel {
    svc.poll_now(devices, store, sink);
    svc.evaluate_situation(store, log, sink, at(now_secs))
        .expect("in-memory log never fails")
        .assessment
        .level
}

#[test]
fn occupied_room_with_open_door_is_benign() {
    let mut svc = MonitorService::new(MonitorConfig::default());
    let (mut devices, store) = (ScriptedDevices::new(), MemorySensorStore::new());
    let (mut log, mut sink) = (VecRiskLog::default(), RecordingSink::new());

    devices.set(SensorKind::Door, "open", at(0));
    devices.set(SensorKind::Motion, "active", at(-300));
    devices.set(SensorKind::Leak, "wet", at(0));

    let level = cycle(&mut svc, &mut devices, &store, &mut log, &mut sink, 0);
    assert_eq!(level, RiskLevel::None);
    assert!(log.events.is_empty());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Monitoring(RiskLevel::None))), 1);
}

#[test]
fn door_just_closed_is_absence_pattern_without_event() {
    let mut svc = MonitorService::new(MonitorConfig::default());
    let (mut devices, store) = (ScriptedDevices::new(), MemorySensorStore::new());
    let (mut log, mut sink) = (VecRiskLog::default(), RecordingSink::new());

    devices.set(SensorKind::Door, "closed", at(0));
    assert_eq!(
        cycle(&mut svc, &mut devices, &store, &mut log, &mut sink, 10),
        RiskLevel::AbsencePattern
    );
    // Same store, evaluated after the confirmation window lapses.
    assert_eq!(
        svc.evaluate_situation(&store, &mut log, &mut sink, at(30)).unwrap().assessment.level,
        RiskLevel::Elevated
    );
    assert!(log.events.is_empty());
    assert_eq!(svc.cycle_count(), 2);
}

#[test]
fn preserved_order_does_not_escalate_leak() {
    let mut svc = MonitorService::new(MonitorConfig::default());
    let (mut devices, store) = (ScriptedDevices::new(), MemorySensorStore::new());
    let (mut log, mut sink) = (VecRiskLog::default(), RecordingSink::new());

    devices.set(SensorKind::Door, "closed", at(-5));
    devices.set(SensorKind::Leak, "wet", at(-1));

    assert_eq!(
        cycle(&mut svc, &mut devices, &store, &mut log, &mut sink, 0),
        RiskLevel::AbsencePattern
    );
    assert!(log.events.is_empty());
    assert!(sink.recorded().is_empty());
}

#[test]
fn leak_aware_order_records_critical_event() {
    let mut svc = MonitorService::new(leak_aware());
    let (mut devices, store) = (ScriptedDevices::new(), MemorySensorStore::new());
    let mut log = StorageRiskLog::open(MemoryStorage::new()).unwrap();
    let mut sink = RecordingSink::new();

    devices.set(SensorKind::Door, "closed", at(-5));
    devices.set(SensorKind::Motion, "inactive", at(-1200));
    devices.set(SensorKind::Leak, "wet", at(-1));

    svc.poll_now(&mut devices, &store, &mut sink);
    let outcome = svc.evaluate_situation(&store, &mut log, &mut sink, at(0)).unwrap();

    assert_eq!(outcome.assessment.rule, Rule::LeakDuringAbsence);
    let event = outcome.event.expect("level 4 must be recorded");
    assert_eq!(event.level, RiskLevel::Critical);
    assert_eq!(event.recorded_at, at(0));
    assert_eq!(log.read_all(), vec![event]);
    assert_eq!(sink.recorded(), vec![event]);
}

#[test]
fn persistence_failure_propagates_without_retry() {
    let mut svc = MonitorService::new(leak_aware());
    let (mut devices, store) = (ScriptedDevices::new(), MemorySensorStore::new());
    let mut log = FailingRiskLog::default();
    let mut sink = RecordingSink::new();

    devices.set(SensorKind::Door, "closed", at(-5));
    devices.set(SensorKind::Leak, "wet", at(-1));
    svc.poll_now(&mut devices, &store, &mut sink);

    let result = svc.evaluate_situation(&store, &mut log, &mut sink, at(0));
    assert!(matches!(result, Err(PersistenceError::Storage(_))));
    assert_eq!(log.attempts, 1, "the core must not retry");
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ResponseFailed { level: RiskLevel::Critical, .. })),
        1
    );
}

#[test]
fn lower_threshold_records_absence_pattern() {
    let cfg = MonitorConfig {
        response_threshold: 2,
        ..MonitorConfig::default()
    };
    let mut svc = MonitorService::new(cfg);
    let (mut devices, store) = (ScriptedDevices::new(), MemorySensorStore::new());
    let (mut log, mut sink) = (VecRiskLog::default(), RecordingSink::new());

    devices.set(SensorKind::Door, "closed", at(0));
    cycle(&mut svc, &mut devices, &store, &mut log, &mut sink, 5);
    assert_eq!(log.events.len(), 1);
    assert_eq!(log.events[0].level, RiskLevel::AbsencePattern);
}

#[test]
fn empty_store_evaluates_to_none() {
    let mut svc = MonitorService::new(MonitorConfig::default());
    let store = MemorySensorStore::new();
    let (mut log, mut sink) = (VecRiskLog::default(), RecordingSink::new());

    let outcome = svc.evaluate_situation(&store, &mut log, &mut sink, at(0)).unwrap();
    assert_eq!(outcome.assessment.level, RiskLevel::None);
    assert_eq!(outcome.assessment.rule, Rule::NoActionableStatus);
    assert_eq!(svc.last_assessment(), Some(outcome.assessment));
}

#[test]
fn tick_polls_and_evaluates_on_interval() {
    let mut svc = MonitorService::new(MonitorConfig::default());
    let (mut devices, store) = (ScriptedDevices::new(), MemorySensorStore::new());
    let (mut log, mut sink) = (VecRiskLog::default(), RecordingSink::new());
    devices.set(SensorKind::Door, "open", at(0));

    for s in 1..20 {
        let r = svc.tick(1.0, at(s), &mut devices, &store, &mut log, &mut sink).unwrap();
        assert!(r.is_none(), "nothing due at {s}s");
    }
    assert!(devices.fetches.is_empty());

    let outcome = svc
        .tick(1.0, at(20), &mut devices, &store, &mut log, &mut sink)
        .unwrap()
        .expect("poll due at 20s");
    assert_eq!(outcome.assessment.level, RiskLevel::Elevated);
    assert_eq!(devices.fetches.len(), 3);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::PollCompleted(_))), 1);
}

#[test]
fn paused_polling_skips_ticks() {
    let mut svc = MonitorService::new(MonitorConfig::default());
    let (mut devices, store) = (ScriptedDevices::new(), MemorySensorStore::new());
    let (mut log, mut sink) = (VecRiskLog::default(), RecordingSink::new());

    svc.handle_command(AppCommand::PausePolling, &mut sink).unwrap();
    for s in 0..60 {
        assert!(svc.tick(1.0, at(s), &mut devices, &store, &mut log, &mut sink).unwrap().is_none());
    }
    assert!(devices.fetches.is_empty());

    svc.handle_command(AppCommand::ResumePolling, &mut sink).unwrap();
    let fired = (0..20)
        .filter_map(|s| svc.tick(1.0, at(s), &mut devices, &store, &mut log, &mut sink).unwrap())
        .count();
    assert_eq!(fired, 1);
}
