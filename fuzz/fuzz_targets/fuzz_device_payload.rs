//! Fuzz target: device status documents
//!
//! Feeds arbitrary bytes through the JSON parser and then the device
//! document parser for every sensor kind, checking:
//! - No panics on malformed documents or timestamps
//! - Accepted readings carry the requested kind
//! - Leak readings only ever use the internal vocabulary when the device
//!   said wet or dry
//!
//! cargo fuzz run fuzz_device_payload

#![no_main]

use libfuzzer_sys::fuzz_target;
use lonewatch::ingest::{parse_device_status, parse_timestamp};
use lonewatch::sensors::SensorKind;

fuzz_target!(|data: &[u8]| {
    let Ok(doc) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    for kind in SensorKind::ALL {
        if let Ok(reading) = parse_device_status(kind, &doc) {
            assert_eq!(reading.kind, kind);
            if kind == SensorKind::Leak {
                assert!(!reading.status.eq_ignore_ascii_case("wet"), "wet must normalise to detected");
                assert!(!reading.status.eq_ignore_ascii_case("dry"), "dry must normalise to clear");
            }
        }
    }

    // Bare values are also tried as timestamps.
    let _ = parse_timestamp(&doc);
});
