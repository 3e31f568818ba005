//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them: log them or forward them to a
//! notification service.

use crate::error::PersistenceError;
use crate::ingest::PollReport;
use crate::responder::RiskEvent;
use crate::risk::{Assessment, RiskLevel, RuleOrder};

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The service has started.
    Started { rule_order: RuleOrder, threshold: u8 },

    /// A poll cycle finished (carries the combined status row).
    PollCompleted(PollReport),

    /// A risk evaluation finished.
    Assessed(Assessment),

    /// The level stayed below the response threshold; monitoring continues.
    Monitoring(RiskLevel),

    /// A risk event was persisted and the emergency response triggered.
    RiskRecorded(RiskEvent),

    /// A risk event should have been recorded but persistence failed.
    ResponseFailed { level: RiskLevel, error: PersistenceError },

    /// Configuration was replaced at runtime.
    ConfigUpdated,

    /// Polling was paused or resumed.
    PollingEnabled(bool),
}
