//! Door contact sensor.
//!
//! Reed switch on the door frame.  The device API reports it under the
//! `contactSensor` capability as `open` or `closed`.

/// Capability and attribute holding the contact state in a device document.
pub const CAPABILITY: &str = "contactSensor";
pub const ATTRIBUTE: &str = "contact";

pub const OPEN: &str = "open";
pub const CLOSED: &str = "closed";

/// Map a raw device value onto the door vocabulary.  Unknown values pass
/// through unchanged; the evaluator treats them as non-actionable.
pub fn normalize(raw: &str) -> &str {
    if raw.eq_ignore_ascii_case(OPEN) {
        OPEN
    } else if raw.eq_ignore_ascii_case(CLOSED) {
        CLOSED
    } else {
        raw
    }
}
