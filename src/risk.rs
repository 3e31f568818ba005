//! Risk evaluator.
//!
//! Maps the newest door, motion and leak snapshots onto a discrete
//! [`RiskLevel`].  The evaluator is a pure function: the caller supplies
//! `now`, nothing is logged or persisted here, and missing data never
//! produces an error.
//!
//! ## Decision list (first match wins)
//!
//! | # | Door     | Condition                              | Level |
//! |---|----------|----------------------------------------|-------|
//! | 1 | `open`   | motion within the recency window       | 0     |
//! | 2 | `open`   | otherwise                              | 1     |
//! | 3 | `closed` | door reported within the confirm window| 2     |
//! | 4 | `closed` | otherwise                              | 1     |
//! | 5 | `closed` | confirm window, no motion, leak        | 4 / 2 |
//! | 6 | any      | nothing actionable                     | 0     |
//!
//! Rule 5 sits behind rules 3 and 4 under [`RuleOrder::Preserved`] and
//! therefore never fires; [`RuleOrder::LeakAware`] moves it ahead of rule 3.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::sensors::{SensorSnapshot, SnapshotSet, Timestamp, door, leak};

// ───────────────────────────────────────────────────────────────
// Levels
// ───────────────────────────────────────────────────────────────

/// Discrete severity code.  Code 3 exists only as the response threshold
/// and is never produced by the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum RiskLevel {
    /// Nothing actionable, or occupancy confirmed by motion.
    None = 0,
    /// Door state without corroborating signal.
    Elevated = 1,
    /// Door just closed: the occupant is confirmed inside.
    AbsencePattern = 2,
    /// Leak while the occupant is inside and not moving.
    Critical = 4,
}

impl RiskLevel {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Parse an integer code.  Returns `None` for codes the evaluator
    /// cannot emit (including 3).
    pub const fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::None),
            1 => Some(Self::Elevated),
            2 => Some(Self::AbsencePattern),
            4 => Some(Self::Critical),
            _ => None,
        }
    }
}

impl From<RiskLevel> for u8 {
    fn from(level: RiskLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for RiskLevel {
    type Error = InvalidRiskCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_u8(code).ok_or(InvalidRiskCode(code))
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// A risk code outside {0, 1, 2, 4}.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRiskCode(pub u8);

impl fmt::Display for InvalidRiskCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid risk code {}", self.0)
    }
}

// ───────────────────────────────────────────────────────────────
// Rules
// ───────────────────────────────────────────────────────────────

/// Which entry of the decision list produced a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Door open and motion seen recently: occupied, benign use.
    OpenWithMotion,
    /// Door open with no recent motion.
    OpenWithoutMotion,
    /// Door closed inside the confirmation window.
    ClosedConfirmed,
    /// Door closed but the close is stale or unstamped.
    ClosedUnconfirmed,
    /// Door just closed, no motion, leak detected.
    LeakDuringAbsence,
    /// Door just closed, no motion, no leak.
    AbsenceWithoutLeak,
    /// No sensor carries an actionable status.
    NoActionableStatus,
}

impl Rule {
    pub const fn level(self) -> RiskLevel {
        match self {
            Self::OpenWithMotion | Self::NoActionableStatus => RiskLevel::None,
            Self::OpenWithoutMotion | Self::ClosedUnconfirmed => RiskLevel::Elevated,
            Self::ClosedConfirmed | Self::AbsenceWithoutLeak => RiskLevel::AbsencePattern,
            Self::LeakDuringAbsence => RiskLevel::Critical,
        }
    }

    pub const fn describe(self) -> &'static str {
        match self {
            Self::OpenWithMotion => "door open with motion inside the recency window; treated as normal use",
            Self::OpenWithoutMotion => "door open without recent motion",
            Self::ClosedConfirmed => "door closed inside the confirmation window",
            Self::ClosedUnconfirmed => "door closed outside the confirmation window",
            Self::LeakDuringAbsence => "door just closed, no recent motion, leak detected",
            Self::AbsenceWithoutLeak => "door just closed, no recent motion, no leak",
            Self::NoActionableStatus => "no actionable sensor status",
        }
    }
}

/// Order in which the decision list is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOrder {
    /// Rules 1–6 in listed order; the leak escalation never fires.
    #[default]
    Preserved,
    /// The leak escalation runs before the plain door-closed rules.
    LeakAware,
}

/// Time windows and rule order consumed by [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskWindows {
    pub door_close_confirm_secs: u32,
    pub motion_recency_secs: u32,
    pub order: RuleOrder,
}

impl Default for RiskWindows {
    fn default() -> Self {
        crate::config::MonitorConfig::default().windows()
    }
}

/// Outcome of one evaluation: the level and the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub level: RiskLevel,
    pub rule: Rule,
}

impl From<Rule> for Assessment {
    fn from(rule: Rule) -> Self {
        Self {
            level: rule.level(),
            rule,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Evaluation
// ───────────────────────────────────────────────────────────────

/// Compute the risk level for one set of snapshots.
pub fn evaluate(
    door: &SensorSnapshot,
    motion: &SensorSnapshot,
    leak: &SensorSnapshot,
    now: Timestamp,
    windows: &RiskWindows,
) -> RiskLevel {
    assess(door, motion, leak, now, windows).level
}

/// [`evaluate`] over a [`SnapshotSet`].
pub fn evaluate_set(set: &SnapshotSet, now: Timestamp, windows: &RiskWindows) -> RiskLevel {
    assess_set(set, now, windows).level
}

pub fn assess_set(set: &SnapshotSet, now: Timestamp, windows: &RiskWindows) -> Assessment {
    assess(&set.door, &set.motion, &set.leak, now, windows)
}

/// Like [`evaluate`], but also reports which rule fired.
pub fn assess(
    door: &SensorSnapshot,
    motion: &SensorSnapshot,
    leak: &SensorSnapshot,
    now: Timestamp,
    windows: &RiskWindows,
) -> Assessment {
    let motion_recent = motion.observed_within(now, windows.motion_recency_secs);

    // ── Rules 1–2: door open ─────────────────────────────────
    if door.status_is(door::OPEN) {
        return if motion_recent {
            Rule::OpenWithMotion.into()
        } else {
            Rule::OpenWithoutMotion.into()
        };
    }

    let closed = door.status_is(door::CLOSED);
    let close_confirmed = closed && door.observed_within(now, windows.door_close_confirm_secs);

    // ── Rule 5 (leak-aware order only) ───────────────────────
    if windows.order == RuleOrder::LeakAware && close_confirmed && !motion_recent {
        return if leak.status_is(leak::DETECTED) {
            Rule::LeakDuringAbsence.into()
        } else {
            Rule::AbsenceWithoutLeak.into()
        };
    }

    // ── Rules 3–4: door closed ───────────────────────────────
    if closed {
        return if close_confirmed {
            Rule::ClosedConfirmed.into()
        } else {
            Rule::ClosedUnconfirmed.into()
        };
    }

    // ── Rule 6 ───────────────────────────────────────────────
    Rule::NoActionableStatus.into()
}
