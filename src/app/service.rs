//! Application service, the hexagonal core.
//!
//! [`MonitorService`] owns the configuration, the poll timer and the
//! responder.  It exposes a storage-agnostic API; all I/O flows through
//! port traits injected at call sites, making the whole cycle testable with
//! in-memory adapters.
//!
//! ```text
//!  DeviceSource ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!                   │      MonitorService       │
//!   SensorStore ◀──▶│  Poller · Risk · Respond  │──▶ RiskEventSink
//!                   └──────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::MonitorConfig;
use crate::error::{Error, PersistenceError};
use crate::ingest::{PollReport, Poller, poll_once};
use crate::responder::{Responder, RiskEvent};
use crate::risk::{Assessment, RiskWindows, assess_set};
use crate::sensors::Timestamp;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{DeviceSource, EventSink, RiskEventSink, SensorStore};

/// Result of one evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    pub assessment: Assessment,
    /// Present when the level crossed the threshold and was recorded.
    pub event: Option<RiskEvent>,
}

// ───────────────────────────────────────────────────────────────
// MonitorService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates polling, evaluation and response.
pub struct MonitorService {
    config: MonitorConfig,
    windows: RiskWindows,
    responder: Responder,
    poller: Poller,
    cycle_count: u64,
    last_assessment: Option<Assessment>,
}

impl MonitorService {
    /// Construct the service from configuration.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            windows: config.windows(),
            responder: Responder::new(config.response_threshold),
            poller: Poller::new(config.poll_interval_secs),
            config,
            cycle_count: 0,
            last_assessment: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            rule_order: self.windows.order,
            threshold: self.responder.threshold(),
        });
        info!(
            "MonitorService started (order={:?}, threshold={}, poll every {}s)",
            self.windows.order,
            self.responder.threshold(),
            self.poller.interval_secs()
        );
    }

    // ── Evaluation cycle ──────────────────────────────────────

    /// Read the newest snapshots, evaluate them at `now`, and dispatch the
    /// result.  A persistence failure is emitted as
    /// [`AppEvent::ResponseFailed`] and returned.
    pub fn evaluate_situation(
        &mut self,
        store: &impl SensorStore,
        risk_log: &mut impl RiskEventSink,
        sink: &mut impl EventSink,
        now: Timestamp,
    ) -> Result<CycleOutcome, PersistenceError> {
        self.cycle_count += 1;

        let snapshots = store.latest_all();
        let assessment = assess_set(&snapshots, now, &self.windows);
        self.last_assessment = Some(assessment);
        sink.emit(&AppEvent::Assessed(assessment));

        let level = assessment.level;
        if !self.responder.should_respond(level) {
            info!("Risk {}: {}; monitoring continues", level, assessment.rule.describe());
            sink.emit(&AppEvent::Monitoring(level));
            return Ok(CycleOutcome {
                assessment,
                event: None,
            });
        }

        warn!("Risk {}: {}", level, assessment.rule.describe());
        match self.responder.dispatch(level, now, risk_log) {
            Ok(event) => {
                if let Some(e) = &event {
                    sink.emit(&AppEvent::RiskRecorded(*e));
                }
                Ok(CycleOutcome { assessment, event })
            }
            Err(error) => {
                sink.emit(&AppEvent::ResponseFailed { level, error });
                Err(error)
            }
        }
    }

    /// Poll every device now, regardless of the timer.
    pub fn poll_now(
        &mut self,
        source: &mut impl DeviceSource,
        store: &impl SensorStore,
        sink: &mut impl EventSink,
    ) -> PollReport {
        let report = poll_once(source, store);
        sink.emit(&AppEvent::PollCompleted(report.clone()));
        report
    }

    /// Advance the poll timer by `tick_secs`.  When a poll is due, poll all
    /// devices and then run an evaluation cycle at `now`.
    ///
    /// Returns `Ok(None)` on ticks where nothing was due.
    pub fn tick(
        &mut self,
        tick_secs: f32,
        now: Timestamp,
        source: &mut impl DeviceSource,
        store: &impl SensorStore,
        risk_log: &mut impl RiskEventSink,
        sink: &mut impl EventSink,
    ) -> Result<Option<CycleOutcome>, PersistenceError> {
        let Some(report) = self.poller.tick_and_poll(tick_secs, source, store) else {
            return Ok(None);
        };
        sink.emit(&AppEvent::PollCompleted(report));
        self.evaluate_situation(store, risk_log, sink, now).map(Some)
    }

    // ── Command handling ──────────────────────────────────────

    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) -> Result<(), Error> {
        match cmd {
            AppCommand::UpdateConfig(new_config) => {
                new_config.validate().map_err(Error::Config)?;
                self.windows = new_config.windows();
                self.responder = Responder::new(new_config.response_threshold);
                self.poller.set_interval(new_config.poll_interval_secs);
                self.config = new_config;
                info!("Configuration updated at runtime");
                sink.emit(&AppEvent::ConfigUpdated);
            }
            AppCommand::PausePolling => {
                self.poller.set_enabled(false);
                sink.emit(&AppEvent::PollingEnabled(false));
            }
            AppCommand::ResumePolling => {
                self.poller.set_enabled(true);
                sink.emit(&AppEvent::PollingEnabled(true));
            }
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    /// Evaluation cycles run since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    pub fn last_assessment(&self) -> Option<Assessment> {
        self.last_assessment
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }
}
