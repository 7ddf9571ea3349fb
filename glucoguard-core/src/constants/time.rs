//! Time-Related Constants
//!
//! Durations in device records are integer milliseconds; timezone offsets are
//! integer minutes.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: i64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: i64 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: i64 = 24;

/// Milliseconds per minute.
pub const MS_PER_MINUTE: i64 = MS_PER_SECOND * SECONDS_PER_MINUTE;

/// Milliseconds per hour.
pub const MS_PER_HOUR: i64 = MS_PER_MINUTE * MINUTES_PER_HOUR;

/// Milliseconds per day.
///
/// Upper bound for schedule `start` offsets, which count from local midnight.
pub const MS_PER_DAY: i64 = MS_PER_HOUR * HOURS_PER_DAY;

// ===== TIMESTAMP LAYOUTS =====

/// Layout of device-local timestamps (no offset), in `chrono` format syntax.
///
/// Example: `2024-03-01T08:15:00`
pub const DEVICE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Human-readable name of the RFC 3339 layout, used in error details.
pub const RFC3339_NAME: &str = "RFC 3339";

/// Earliest plausible record time (2000-01-01T00:00:00Z), as Unix seconds.
///
/// Device clocks that were never set typically report dates in 1970 or 2000;
/// anything at or before this instant is treated as an unset clock.
pub const EARLIEST_RECORD_TIME_SECONDS: i64 = 946_684_800;
