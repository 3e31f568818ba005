//! System configuration parameters
//!
//! All tunable parameters for the monitor.  Values can be overridden by a
//! JSON config file (see [`crate::adapters::config_file`]).

use serde::{Deserialize, Serialize};

use crate::risk::{RiskLevel, RiskWindows, RuleOrder};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // --- Risk windows ---
    /// After the door reports `closed`, how long (seconds) the close counts
    /// as a fresh confirmation.
    pub door_close_confirm_window_secs: u32,
    /// How long (seconds) a motion report counts as recent.
    pub motion_recency_window_secs: u32,
    /// Order in which the risk rules are applied.
    pub rule_order: RuleOrder,

    // --- Response ---
    /// Risk code at or above which a risk event is recorded.
    pub response_threshold: u8,

    // --- Timing ---
    /// Device poll interval (seconds).
    pub poll_interval_secs: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            door_close_confirm_window_secs: 20,
            motion_recency_window_secs: 600, // 10 min
            rule_order: RuleOrder::Preserved,

            response_threshold: 3,

            poll_interval_secs: 20,
        }
    }
}

impl MonitorConfig {
    /// The evaluator's view of this configuration.
    pub fn windows(&self) -> RiskWindows {
        RiskWindows {
            door_close_confirm_secs: self.door_close_confirm_window_secs,
            motion_recency_secs: self.motion_recency_window_secs,
            order: self.rule_order,
        }
    }

    /// Range-check every field.  Returns the name of the first offending
    /// field and the reason.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.door_close_confirm_window_secs == 0 {
            return Err("door_close_confirm_window_secs must be > 0");
        }
        if self.motion_recency_window_secs == 0 {
            return Err("motion_recency_window_secs must be > 0");
        }
        if self.poll_interval_secs == 0 {
            return Err("poll_interval_secs must be > 0");
        }
        if self.response_threshold == 0 || self.response_threshold > RiskLevel::Critical.as_u8() {
            return Err("response_threshold must be within 1..=4");
        }
        Ok(())
    }
}
