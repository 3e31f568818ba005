//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensor store, device API, event log, storage) implement
//! these traits.  The [`MonitorService`](super::service::MonitorService) and
//! [`Poller`](crate::ingest::Poller) consume them via generics, so the domain
//! core never touches a database or network directly.

use crate::config::MonitorConfig;
use crate::error::{PersistenceError, StoreError};
use crate::responder::RiskEvent;
use crate::risk::RiskLevel;
use crate::sensors::{Reading, SensorKind, SensorSnapshot, SnapshotSet, Timestamp};

// ───────────────────────────────────────────────────────────────
// Sensor store (driven adapter: storage ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Append-only log of readings, queried for the newest entry per sensor.
///
/// Methods take `&self`: one store is shared by the poller (writer) and the
/// monitor (reader), so implementations synchronise internally.  A single
/// read must never expose a status from one reading paired with the
/// timestamp of another.
pub trait SensorStore {
    /// Newest reading for `kind` by `observed_at`, or an empty snapshot.
    fn get_latest(&self, kind: SensorKind) -> SensorSnapshot;

    /// Newest reading for every kind, taken as one consistent read.
    ///
    /// The default makes three independent reads; stores that can do better
    /// should override it.
    fn latest_all(&self) -> SnapshotSet {
        SnapshotSet {
            door: self.get_latest(SensorKind::Door),
            motion: self.get_latest(SensorKind::Motion),
            leak: self.get_latest(SensorKind::Leak),
        }
    }

    /// Append a reading.  Older readings are kept; ordering is by timestamp,
    /// not by arrival.
    fn append(&self, reading: Reading) -> Result<(), StoreError>;
}

// ───────────────────────────────────────────────────────────────
// Risk event sink (driven adapter: domain → persistence)
// ───────────────────────────────────────────────────────────────

/// Append-only persistence for risk events.  Failures propagate to the
/// caller; the core never retries.
pub trait RiskEventSink {
    fn record_event(
        &mut self,
        level: RiskLevel,
        recorded_at: Timestamp,
    ) -> Result<RiskEvent, PersistenceError>;
}

// ───────────────────────────────────────────────────────────────
// Device source (driven adapter: device API → ingestion)
// ───────────────────────────────────────────────────────────────

/// Yields the raw status document of the device behind each sensor.
pub trait DeviceSource {
    /// `None` when the device could not be queried this cycle.
    fn fetch_status(&mut self, kind: SensorKind) -> Option<serde_json::Value>;
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: domain → logging / notification)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Wall-clock source for the outer loop.  The domain functions take `now`
/// explicitly; only adapters and the binary read a clock.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate before persisting and reject invalid
/// ranges with [`ConfigError::ValidationFailed`] rather than clamping.
pub trait ConfigPort {
    /// Returns [`MonitorConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<MonitorConfig, ConfigError>;

    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Storage port
// ───────────────────────────────────────────────────────────────

/// Namespaced key/value blob storage.  Backs the risk-event log.
///
/// Write operations MUST be atomic; no partial blobs visible to readers.
pub trait StoragePort {
    /// Read a value.  Returns the number of bytes written to `buf`.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Delete a key.  Returns `Ok(())` even if the key didn't exist.
    fn delete(&mut self, namespace: &str, key: &str) -> Result<(), StorageError>;

    fn exists(&self, namespace: &str, key: &str) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
