//! Storage-backed risk-event log.
//!
//! Each [`RiskEvent`] is postcard-encoded into its own slot under the
//! `risk` namespace (`e0`, `e1`, ...).  A persisted counter records how
//! many slots are in use.  The log is append-only: there is no delete or
//! overwrite path, and a failed write leaves the counter untouched.

use core::fmt::Write as _;

use log::{info, warn};

use crate::app::ports::{RiskEventSink, StorageError, StoragePort};
use crate::error::PersistenceError;
use crate::responder::RiskEvent;
use crate::risk::RiskLevel;
use crate::sensors::Timestamp;

const RISK_NAMESPACE: &str = "risk";
const RISK_COUNT_KEY: &str = "count";
const MAX_ENTRY_BYTES: usize = 128;

pub struct StorageRiskLog<S: StoragePort> {
    storage: S,
    count: u32,
}

impl<S: StoragePort> StorageRiskLog<S> {
    /// Open the log, resuming after any events already in `storage`.
    ///
    /// Only a missing count means an empty log.  Any other read failure, or
    /// a count of the wrong size, is returned so existing slots are never
    /// overwritten.
    pub fn open(storage: S) -> Result<Self, PersistenceError> {
        let mut buf = [0u8; 8];
        let count = match storage.read(RISK_NAMESPACE, RISK_COUNT_KEY, &mut buf) {
            Ok(4) => u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            Ok(len) => {
                warn!("StorageRiskLog: event count is {} bytes, expected 4", len);
                return Err(PersistenceError::CorruptIndex);
            }
            Err(StorageError::NotFound) => 0,
            Err(e) => {
                warn!("StorageRiskLog: event count unreadable: {}", e);
                return Err(e.into());
            }
        };
        if count > 0 {
            info!("StorageRiskLog: resuming with {} recorded events", count);
        }
        Ok(Self { storage, count })
    }

    /// Number of events recorded.
    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Every recorded event, oldest first.  Slots that fail to decode are
    /// skipped with a warning.
    pub fn read_all(&self) -> Vec<RiskEvent> {
        (0..self.count)
            .filter_map(|i| {
                let mut buf = [0u8; MAX_ENTRY_BYTES];
                let len = self.storage.read(RISK_NAMESPACE, &Self::slot_key(i), &mut buf).ok()?;
                match postcard::from_bytes::<RiskEvent>(&buf[..len]) {
                    Ok(event) => Some(event),
                    Err(_) => {
                        warn!("StorageRiskLog: slot {} is corrupt, skipped", i);
                        None
                    }
                }
            })
            .collect()
    }

    /// Give the storage back (e.g. to reopen it).
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn slot_key(index: u32) -> heapless::String<16> {
        let mut s = heapless::String::new();
        let _ = write!(s, "e{}", index);
        s
    }
}

impl<S: StoragePort> RiskEventSink for StorageRiskLog<S> {
    fn record_event(
        &mut self,
        level: RiskLevel,
        recorded_at: Timestamp,
    ) -> Result<RiskEvent, PersistenceError> {
        let event = RiskEvent { level, recorded_at };
        let bytes = postcard::to_allocvec(&event).map_err(|_| PersistenceError::Encode)?;
        if bytes.len() > MAX_ENTRY_BYTES {
            return Err(PersistenceError::Encode);
        }

        let index = self.count;
        self.storage.write(RISK_NAMESPACE, &Self::slot_key(index), &bytes)?;

        let next = index.checked_add(1).ok_or(StorageError::Full)?;
        self.storage
            .write(RISK_NAMESPACE, RISK_COUNT_KEY, &next.to_le_bytes())?;
        self.count = next;
        Ok(event)
    }
}
