//! Ordering constraints on timestamp strings
//!
//! The string is parsed once, when the validator is created. A string that
//! does not match its layout is reported there as `time-not-valid`, and the
//! ordering constraints then have nothing to compare and stay silent. "Now"
//! is read from the clock at each `*_now` call.

use chrono::{DateTime, Duration, Utc};

use super::Field;
use crate::errors;
use crate::time::TimeLayout;

/// Constraints on an optional timestamp string
#[derive(Debug, Clone)]
pub struct TimeValidator {
    field: Field,
    present: bool,
    time: Option<DateTime<Utc>>,
}

impl TimeValidator {
    pub(super) fn new(field: Field, value: Option<&str>, layout: TimeLayout) -> Self {
        let time = value.and_then(|value| {
            let parsed = layout.parse(value);
            if parsed.is_none() {
                field.report(errors::time_not_valid(value, layout.describe()));
            }
            parsed
        });
        Self {
            field,
            present: value.is_some(),
            time,
        }
    }

    /// The parsed instant, when the string was present and well formed
    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.time
    }

    /// Fails when the string is absent; a malformed string counts as present
    pub fn exists(self) -> Self {
        if !self.present {
            self.field.report(errors::value_not_exists());
        }
        self
    }

    pub fn not_exists(self) -> Self {
        if self.present {
            self.field.report(errors::value_exists());
        }
        self
    }

    /// Fails unless the time is strictly after `limit`
    pub fn after(self, limit: DateTime<Utc>) -> Self {
        if let Some(time) = self.time {
            if time <= limit {
                self.field
                    .report(errors::time_not_after(time.to_rfc3339(), limit.to_rfc3339()));
            }
        }
        self
    }

    /// Fails unless the time is strictly before `limit`
    pub fn before(self, limit: DateTime<Utc>) -> Self {
        if let Some(time) = self.time {
            if time >= limit {
                self.field
                    .report(errors::time_not_before(time.to_rfc3339(), limit.to_rfc3339()));
            }
        }
        self
    }

    /// Fails unless the time is after `now - threshold`
    pub fn after_now(self, threshold: Duration) -> Self {
        self.after(Utc::now() - threshold)
    }

    /// Fails unless the time is before `now + threshold`
    pub fn before_now(self, threshold: Duration) -> Self {
        self.before(Utc::now() + threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::errors::codes;
    use crate::time::earliest_record_time;
    use crate::validator::Validator;

    fn codes_for(check: impl FnOnce(&Validator)) -> Vec<String> {
        let context = Context::new();
        check(&Validator::new(context.clone()));
        context.errors().into_iter().map(|e| e.code).collect()
    }

    #[test]
    fn malformed_time_reported_once() {
        assert_eq!(
            codes_for(|v| {
                v.validate_string_as_time("time", Some("yesterday"), TimeLayout::Rfc3339)
                    .exists()
                    .after(earliest_record_time())
                    .before_now(Duration::days(1));
            }),
            vec![codes::TIME_NOT_VALID]
        );
    }

    #[test]
    fn ordering() {
        assert_eq!(
            codes_for(|v| {
                v.validate_string_as_time("time", Some("1999-12-31T23:59:59Z"), TimeLayout::Rfc3339)
                    .after(earliest_record_time());
            }),
            vec![codes::TIME_NOT_AFTER]
        );
        assert!(codes_for(|v| {
            v.validate_string_as_time("time", Some("2024-03-01T08:15:00Z"), TimeLayout::Rfc3339)
                .after(earliest_record_time())
                .before_now(Duration::days(1));
        })
        .is_empty());
    }

    #[test]
    fn boundary_is_exclusive() {
        assert_eq!(
            codes_for(|v| {
                v.validate_string_as_time("time", Some("2000-01-01T00:00:00Z"), TimeLayout::Rfc3339)
                    .after(earliest_record_time())
                    .before(earliest_record_time());
            }),
            vec![codes::TIME_NOT_AFTER, codes::TIME_NOT_BEFORE]
        );
    }

    #[test]
    fn far_future_fails_before_now() {
        let future = (Utc::now() + Duration::days(3)).to_rfc3339();
        assert_eq!(
            codes_for(|v| {
                v.validate_string_as_time("time", Some(&future), TimeLayout::Rfc3339)
                    .before_now(Duration::days(1))
                    .after_now(Duration::days(1));
            }),
            vec![codes::TIME_NOT_BEFORE]
        );
    }

    #[test]
    fn device_time_layout() {
        let context = Context::new();
        let validator = Validator::new(context.clone());

        let parsed = validator
            .validate_string_as_time("deviceTime", Some("2024-03-01T08:15:00"), TimeLayout::DEVICE_TIME)
            .exists();
        assert!(parsed.time().is_some());

        validator.validate_string_as_time("deviceTime", Some("2024-03-01T08:15:00Z"), TimeLayout::DEVICE_TIME);
        let recorded = context.errors();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].code, codes::TIME_NOT_VALID);
        assert!(recorded[0].detail.contains("%Y-%m-%dT%H:%M:%S"));
    }

    #[test]
    fn absent_time() {
        assert_eq!(
            codes_for(|v| {
                v.validate_string_as_time("time", None, TimeLayout::Rfc3339)
                    .exists()
                    .after(earliest_record_time());
            }),
            vec![codes::VALUE_NOT_EXISTS]
        );
    }
}
