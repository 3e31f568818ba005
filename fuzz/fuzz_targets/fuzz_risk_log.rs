//! Fuzz target: `StorageRiskLog`
//!
//! Drives arbitrary sequences of risk levels and timestamps into the
//! storage-backed risk log, with a capacity derived from the input so some
//! writes fail, and verifies:
//! - No panics on full storage
//! - `read_all` returns exactly the events that were acknowledged, in order
//! - Reopening the storage resumes the same history
//!
//! cargo fuzz run fuzz_risk_log

#![no_main]

use chrono::DateTime;
use libfuzzer_sys::fuzz_target;
use lonewatch::adapters::memory_storage::MemoryStorage;
use lonewatch::adapters::risk_log::StorageRiskLog;
use lonewatch::app::ports::RiskEventSink;
use lonewatch::risk::RiskLevel;

fuzz_target!(|data: &[u8]| {
    let Some((&cap, rest)) = data.split_first() else {
        return;
    };

    let storage = MemoryStorage::with_capacity_bytes(usize::from(cap) * 4);
    let Ok(mut log) = StorageRiskLog::open(storage) else {
        return;
    };
    let mut acknowledged = Vec::new();

    for chunk in rest.chunks(5) {
        let Some(level) = RiskLevel::from_u8(chunk[0] % 5) else {
            continue;
        };
        let secs = chunk[1..]
            .iter()
            .fold(0i64, |acc, b| (acc << 8) | i64::from(*b));
        let Some(at) = DateTime::from_timestamp(secs, 0) else {
            continue;
        };
        if let Ok(event) = log.record_event(level, at) {
            acknowledged.push(event);
        }
    }

    assert_eq!(log.read_all(), acknowledged);

    let reopened = StorageRiskLog::open(log.into_storage())
        .unwrap_or_else(|e| panic!("reopen failed: {e}"));
    assert_eq!(reopened.read_all(), acknowledged);
});
