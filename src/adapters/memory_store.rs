//! In-memory sensor store.
//!
//! Keeps an append-only log per sensor kind.  All three logs live behind
//! one mutex, so [`SensorStore::latest_all`] is a single consistent read
//! and a poll cycle writing one kind can never be observed half-applied.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use log::debug;

use crate::app::ports::SensorStore;
use crate::error::StoreError;
use crate::sensors::{Reading, SensorKind, SensorSnapshot, SnapshotSet};

#[derive(Default)]
pub struct MemorySensorStore {
    logs: Mutex<BTreeMap<SensorKind, Vec<Reading>>>,
}

impl MemorySensorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total readings stored for `kind`.
    pub fn len(&self, kind: SensorKind) -> usize {
        self.lock().get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().values().all(Vec::is_empty)
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<SensorKind, Vec<Reading>>> {
        // A poisoned lock only means a writer panicked between pushes; every
        // stored reading is still whole.
        self.logs.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn newest(logs: &BTreeMap<SensorKind, Vec<Reading>>, kind: SensorKind) -> SensorSnapshot {
        logs.get(&kind)
            .and_then(|log| log.iter().max_by_key(|r| r.observed_at))
            .cloned()
            .map_or_else(|| SensorSnapshot::empty(kind), SensorSnapshot::from)
    }
}

impl SensorStore for MemorySensorStore {
    fn get_latest(&self, kind: SensorKind) -> SensorSnapshot {
        Self::newest(&self.lock(), kind)
    }

    fn latest_all(&self) -> SnapshotSet {
        let logs = self.lock();
        SnapshotSet {
            door: Self::newest(&logs, SensorKind::Door),
            motion: Self::newest(&logs, SensorKind::Motion),
            leak: Self::newest(&logs, SensorKind::Leak),
        }
    }

    fn append(&self, reading: Reading) -> Result<(), StoreError> {
        debug!("MemorySensorStore: {} <- {}", reading.kind, reading.status);
        self.lock().entry(reading.kind).or_default().push(reading);
        Ok(())
    }
}
