//! Replay device source.
//!
//! Serves recorded device status documents, one cycle at a time, through
//! the [`DeviceSource`] port.  A recording is a JSON array:
//!
//! ```text
//! [ { "at": "2024-05-01T12:00:00Z",
//!     "door":   { "components": { "main": { "contactSensor": { ... } } } },
//!     "motion": null,
//!     "leak":   { ... } } ]
//! ```
//!
//! A missing or `null` document means the device was unavailable that cycle.

use std::collections::VecDeque;

use serde::Deserialize;
use serde_json::Value;

use crate::app::ports::DeviceSource;
use crate::sensors::{SensorKind, Timestamp};

/// One recorded poll cycle.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedCycle {
    /// Evaluation instant for this cycle.
    pub at: Timestamp,
    #[serde(default)]
    pub door: Option<Value>,
    #[serde(default)]
    pub motion: Option<Value>,
    #[serde(default)]
    pub leak: Option<Value>,
}

impl RecordedCycle {
    pub fn document(&self, kind: SensorKind) -> Option<&Value> {
        match kind {
            SensorKind::Door => self.door.as_ref(),
            SensorKind::Motion => self.motion.as_ref(),
            SensorKind::Leak => self.leak.as_ref(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ReplaySource {
    pending: VecDeque<RecordedCycle>,
    current: Option<RecordedCycle>,
}

impl ReplaySource {
    pub fn new(cycles: impl IntoIterator<Item = RecordedCycle>) -> Self {
        Self {
            pending: cycles.into_iter().collect(),
            current: None,
        }
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let cycles: Vec<RecordedCycle> = serde_json::from_str(text)?;
        Ok(Self::new(cycles))
    }

    /// Move to the next recorded cycle.  Returns its instant, or `None`
    /// once the recording is exhausted.
    pub fn advance(&mut self) -> Option<Timestamp> {
        self.current = self.pending.pop_front();
        self.current.as_ref().map(|c| c.at)
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl DeviceSource for ReplaySource {
    fn fetch_status(&mut self, kind: SensorKind) -> Option<Value> {
        self.current.as_ref()?.document(kind).cloned()
    }
}
