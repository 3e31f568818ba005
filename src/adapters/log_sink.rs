//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! `log` facade.  A notification adapter (SMS, push, pager) would implement
//! the same trait.

use log::{error, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::sensors::SensorKind;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { rule_order, threshold } => {
                info!("START | order={:?} threshold={}", rule_order, threshold);
            }
            AppEvent::PollCompleted(report) => {
                info!(
                    "POLL  | door={} motion={} leak={} | last={}",
                    report.status(SensorKind::Door).unwrap_or("-"),
                    report.status(SensorKind::Motion).unwrap_or("-"),
                    report.status(SensorKind::Leak).unwrap_or("-"),
                    report
                        .last_observed_at()
                        .map_or_else(|| "-".to_string(), |t| t.to_rfc3339()),
                );
            }
            AppEvent::Assessed(a) => {
                info!("RISK  | level={} rule={:?}", a.level, a.rule);
            }
            AppEvent::Monitoring(level) => {
                info!("RISK  | level={} below threshold, monitoring", level);
            }
            AppEvent::RiskRecorded(e) => {
                warn!(
                    "ALERT | level={} recorded_at={} | emergency response activated",
                    e.level,
                    e.recorded_at.to_rfc3339()
                );
            }
            AppEvent::ResponseFailed { level, error: e } => {
                error!("ALERT | level={} NOT recorded: {} | emergency response not activated", level, e);
            }
            AppEvent::ConfigUpdated => {
                info!("CONF  | updated");
            }
            AppEvent::PollingEnabled(on) => {
                info!("POLL  | {}", if *on { "resumed" } else { "paused" });
            }
        }
    }
}
