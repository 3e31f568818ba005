//! Unified error types for the monitor.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level cycle's error handling uniform.  All variants are `Copy` so they
//! can be carried in [`AppEvent`](crate::app::events::AppEvent)s and reports
//! without allocation.
//!
//! The risk evaluator has no error type: it is total over its inputs.

use core::fmt;

use crate::app::ports::StorageError;
use crate::sensors::SensorKind;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the monitor funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A device timestamp could not be parsed or compared.
    InvalidTimestamp(SensorKind),
    /// A device document could not be turned into a reading.
    Ingest(IngestError),
    /// The sensor store refused a read or write.
    Store(StoreError),
    /// A risk event could not be recorded.
    Persistence(PersistenceError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimestamp(kind) => write!(f, "invalid timestamp from {kind} sensor"),
            Self::Ingest(e) => write!(f, "ingest: {e}"),
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Persistence(e) => write!(f, "persistence: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Ingestion errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestError {
    /// The device document lacks the capability/attribute for this sensor.
    MissingCapability(SensorKind),
    /// The attribute exists but carries no string `value`.
    MissingValue(SensorKind),
    /// The attribute carries no `timestamp`.
    MissingTimestamp(SensorKind),
    /// The `timestamp` is neither RFC 3339 nor epoch seconds.
    InvalidTimestamp(SensorKind),
    /// The status word does not fit a [`Status`](crate::sensors::Status).
    StatusTooLong(SensorKind),
}

impl IngestError {
    pub fn kind(&self) -> SensorKind {
        match *self {
            Self::MissingCapability(k)
            | Self::MissingValue(k)
            | Self::MissingTimestamp(k)
            | Self::InvalidTimestamp(k)
            | Self::StatusTooLong(k) => k,
        }
    }
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCapability(k) => write!(f, "{k}: capability missing from device document"),
            Self::MissingValue(k) => write!(f, "{k}: attribute has no value"),
            Self::MissingTimestamp(k) => write!(f, "{k}: attribute has no timestamp"),
            Self::InvalidTimestamp(k) => write!(f, "{k}: unparseable timestamp"),
            Self::StatusTooLong(k) => write!(f, "{k}: status word too long"),
        }
    }
}

impl From<IngestError> for Error {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::InvalidTimestamp(kind) => Self::InvalidTimestamp(kind),
            other => Self::Ingest(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store cannot be reached.
    Unavailable,
    /// The store refused the reading.
    Rejected(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "sensor store unavailable"),
            Self::Rejected(why) => write!(f, "reading rejected: {why}"),
        }
    }
}

impl From<StoreError> for Error {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Persistence errors
// ---------------------------------------------------------------------------

/// Failure to record a risk event.  Never retried by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceError {
    /// The event could not be serialised.
    Encode,
    /// The persisted event count is unreadable.
    CorruptIndex,
    /// The underlying key/value storage failed.
    Storage(StorageError),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode => write!(f, "risk event encoding failed"),
            Self::CorruptIndex => write!(f, "risk log event count is corrupt"),
            Self::Storage(e) => write!(f, "risk event write failed: {e}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<StorageError> for PersistenceError {
    fn from(e: StorageError) -> Self {
        Self::Storage(e)
    }
}

impl From<PersistenceError> for Error {
    fn from(e: PersistenceError) -> Self {
        Self::Persistence(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_timestamp_ingest_error_lifts_to_top_level_variant() {
        let e: Error = IngestError::InvalidTimestamp(SensorKind::Motion).into();
        assert_eq!(e, Error::InvalidTimestamp(SensorKind::Motion));
        let e: Error = IngestError::MissingValue(SensorKind::Door).into();
        assert_eq!(e, Error::Ingest(IngestError::MissingValue(SensorKind::Door)));
    }

    #[test]
    fn persistence_error_display_names_storage_cause() {
        let e = PersistenceError::from(StorageError::Full);
        assert_eq!(e.to_string(), "risk event write failed: storage full");
    }
}
