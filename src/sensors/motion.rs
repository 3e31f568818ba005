//! PIR motion sensor.
//!
//! Only the timestamp of the latest motion report drives the risk rules;
//! the status word is kept for logging.

pub const CAPABILITY: &str = "motionSensor";
pub const ATTRIBUTE: &str = "motion";

pub const ACTIVE: &str = "active";
pub const INACTIVE: &str = "inactive";

pub fn normalize(raw: &str) -> &str {
    if raw.eq_ignore_ascii_case(ACTIVE) {
        ACTIVE
    } else if raw.eq_ignore_ascii_case(INACTIVE) {
        INACTIVE
    } else {
        raw
    }
}
