//! Responder: turns a risk level into a recorded [`RiskEvent`].
//!
//! A level at or above the response threshold is persisted through the
//! [`RiskEventSink`] port and returned so the caller can notify downstream.
//! Below the threshold nothing happens.  Persistence failures are handed
//! back to the caller untouched: no retry, no deduplication.

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::app::ports::RiskEventSink;
use crate::error::PersistenceError;
use crate::risk::RiskLevel;
use crate::sensors::Timestamp;

/// A risk level that crossed the response threshold.  Append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskEvent {
    pub level: RiskLevel,
    pub recorded_at: Timestamp,
}

/// Threshold gate in front of the risk-event sink.
#[derive(Debug, Clone, Copy)]
pub struct Responder {
    threshold: u8,
}

impl Responder {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// True if `level` would be recorded.
    pub fn should_respond(&self, level: RiskLevel) -> bool {
        level.as_u8() >= self.threshold
    }

    /// Record `level` if it meets the threshold.
    ///
    /// Returns `Ok(None)` without touching `sink` when it does not.
    pub fn dispatch(
        &self,
        level: RiskLevel,
        now: Timestamp,
        sink: &mut impl RiskEventSink,
    ) -> Result<Option<RiskEvent>, PersistenceError> {
        if !self.should_respond(level) {
            return Ok(None);
        }

        match sink.record_event(level, now) {
            Ok(event) => {
                info!("Risk {} recorded at {}; emergency response activated", level, now);
                Ok(Some(event))
            }
            Err(e) => {
                error!("Risk {} could not be recorded: {}", level, e);
                Err(e)
            }
        }
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(crate::config::MonitorConfig::default().response_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::StorageError;
    use chrono::{TimeZone, Utc};

    #[derive(Default)]
    struct VecSink {
        events: Vec<RiskEvent>,
        fail: bool,
    }

    impl RiskEventSink for VecSink {
        fn record_event(
            &mut self,
            level: RiskLevel,
            recorded_at: Timestamp,
        ) -> Result<RiskEvent, PersistenceError> {
            if self.fail {
                return Err(PersistenceError::Storage(StorageError::IoError));
            }
            let event = RiskEvent { level, recorded_at };
            self.events.push(event);
            Ok(event)
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn below_threshold_creates_nothing() {
        let responder = Responder::default();
        let mut sink = VecSink::default();
        for level in [RiskLevel::None, RiskLevel::Elevated, RiskLevel::AbsencePattern] {
            assert_eq!(responder.dispatch(level, now(), &mut sink), Ok(None));
        }
        assert!(sink.events.is_empty());
    }

    #[test]
    fn critical_level_is_recorded_with_dispatch_time() {
        let responder = Responder::default();
        let mut sink = VecSink::default();
        let event = responder
            .dispatch(RiskLevel::Critical, now(), &mut sink)
            .unwrap()
            .expect("level 4 must be recorded");
        assert_eq!(event.level, RiskLevel::Critical);
        assert_eq!(event.recorded_at, now());
        assert_eq!(sink.events, vec![event]);
    }

    #[test]
    fn repeated_dispatch_is_not_deduplicated() {
        let responder = Responder::default();
        let mut sink = VecSink::default();
        responder.dispatch(RiskLevel::Critical, now(), &mut sink).unwrap();
        responder.dispatch(RiskLevel::Critical, now(), &mut sink).unwrap();
        assert_eq!(sink.events.len(), 2);
    }

    #[test]
    fn sink_failure_propagates() {
        let responder = Responder::default();
        let mut sink = VecSink {
            fail: true,
            ..VecSink::default()
        };
        assert_eq!(
            responder.dispatch(RiskLevel::Critical, now(), &mut sink),
            Err(PersistenceError::Storage(StorageError::IoError))
        );
    }

    #[test]
    fn lower_threshold_records_level_two() {
        let responder = Responder::new(2);
        let mut sink = VecSink::default();
        assert!(responder
            .dispatch(RiskLevel::AbsencePattern, now(), &mut sink)
            .unwrap()
            .is_some());
    }
}
