//! Timestamp layouts
//!
//! Records carry two kinds of timestamps:
//! - Absolute UTC instants (`time`), always RFC 3339 with an offset
//! - Device-local wall-clock readings (`deviceTime`), no offset
//!
//! Both are parsed with `chrono`. Naive layouts are interpreted as UTC so that
//! ordering checks have something to compare against; the offset is carried
//! separately by the record.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::constants::time::{DEVICE_TIME_FORMAT, EARLIEST_RECORD_TIME_SECONDS, RFC3339_NAME};

/// How a timestamp string is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeLayout {
    /// RFC 3339, e.g. `2024-03-01T08:15:00Z` or `2024-03-01T08:15:00.250-05:00`
    Rfc3339,
    /// A `chrono` format string without an offset, read as UTC
    Naive(&'static str),
}

impl TimeLayout {
    /// Layout of device-local timestamps
    pub const DEVICE_TIME: TimeLayout = TimeLayout::Naive(DEVICE_TIME_FORMAT);

    /// Parse `value`, returning `None` when it does not match the layout
    pub fn parse(&self, value: &str) -> Option<DateTime<Utc>> {
        match self {
            TimeLayout::Rfc3339 => DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|time| time.with_timezone(&Utc)),
            TimeLayout::Naive(format) => NaiveDateTime::parse_from_str(value, format)
                .ok()
                .map(|time| time.and_utc()),
        }
    }

    /// Layout description used in error details
    pub fn describe(&self) -> &'static str {
        match self {
            TimeLayout::Rfc3339 => RFC3339_NAME,
            TimeLayout::Naive(format) => *format,
        }
    }
}

/// Earliest plausible record time
pub fn earliest_record_time() -> DateTime<Utc> {
    DateTime::from_timestamp(EARLIEST_RECORD_TIME_SECONDS, 0).unwrap_or_default()
}
