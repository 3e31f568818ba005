//! Water leak sensor.
//!
//! The device API reports `wet` / `dry` under the `waterSensor` capability.
//! Inside the system the vocabulary is `detected` / `clear`, so ingestion
//! maps the device words before anything is stored.

pub const CAPABILITY: &str = "waterSensor";
pub const ATTRIBUTE: &str = "water";

pub const DETECTED: &str = "detected";
pub const CLEAR: &str = "clear";

const DEVICE_WET: &str = "wet";
const DEVICE_DRY: &str = "dry";

pub fn normalize(raw: &str) -> &str {
    if raw.eq_ignore_ascii_case(DEVICE_WET) || raw.eq_ignore_ascii_case(DETECTED) {
        DETECTED
    } else if raw.eq_ignore_ascii_case(DEVICE_DRY) || raw.eq_ignore_ascii_case(CLEAR) {
        CLEAR
    } else {
        raw
    }
}
