//! Fields shared by every device record
//!
//! Each variant embeds a [`Base`] and calls its `parse` / `validate` first, so
//! base errors always precede variant errors for the same record.

use chrono::Duration;
use glucoguard_core::{
    constants::time::{MINUTES_PER_HOUR, MS_PER_HOUR},
    time::earliest_record_time,
    ObjectParser, TimeLayout, Validator,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// Longest accepted record id, in characters
pub const ID_LENGTH_MAXIMUM: usize = 64;

/// Furthest timezone offset from UTC, in minutes
pub const TIMEZONE_OFFSET_MAXIMUM: i64 = 14 * MINUTES_PER_HOUR;

/// Largest clock drift accepted, in milliseconds
pub const CLOCK_DRIFT_OFFSET_MAXIMUM: i64 = 24 * MS_PER_HOUR;

/// How far into the future a record time may lie
pub fn time_future_threshold() -> Duration {
    Duration::days(1)
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Base {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub datum_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upload_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_drift_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<Map<String, Value>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Map<String, Value>>,
}

impl Base {
    /// Parse every base field except `subType`
    pub fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.datum_type = parser.parse_string("type");
        self.id = parser.parse_string("id");
        self.user_id = parser.parse_string("userId");
        self.device_id = parser.parse_string("deviceId");
        self.upload_id = parser.parse_string("uploadId");
        self.time = parser.parse_string("time");
        self.device_time = parser.parse_string("deviceTime");
        self.timezone_offset = parser.parse_integer("timezoneOffset");
        self.conversion_offset = parser.parse_integer("conversionOffset");
        self.clock_drift_offset = parser.parse_integer("clockDriftOffset");
        self.annotations = parser.parse_object_array("annotations");
        self.payload = parser.parse_object("payload").cloned();
    }

    /// Parse `subType`, for variants that belong to a sub-typed family
    pub fn parse_sub_type(&mut self, parser: &ObjectParser<'_>) {
        self.sub_type = parser.parse_string("subType");
    }

    /// Validate base fields against the variant's own discriminators
    pub fn validate(&self, validator: &Validator, datum_type: &str, sub_type: Option<&str>) {
        validator
            .validate_string("type", self.datum_type.as_deref())
            .exists()
            .equal_to(datum_type);
        if let Some(sub_type) = sub_type {
            validator
                .validate_string("subType", self.sub_type.as_deref())
                .exists()
                .equal_to(sub_type);
        }

        validator
            .validate_string("id", self.id.as_deref())
            .length_in_range(1, ID_LENGTH_MAXIMUM);
        validator
            .validate_string("userId", self.user_id.as_deref())
            .not_empty();
        validator
            .validate_string("deviceId", self.device_id.as_deref())
            .exists()
            .not_empty();
        validator
            .validate_string("uploadId", self.upload_id.as_deref())
            .not_empty();

        validator
            .validate_string_as_time("time", self.time.as_deref(), TimeLayout::Rfc3339)
            .exists()
            .after(earliest_record_time())
            .before_now(time_future_threshold());
        validator.validate_string_as_time(
            "deviceTime",
            self.device_time.as_deref(),
            TimeLayout::DEVICE_TIME,
        );

        validator
            .validate_integer("timezoneOffset", self.timezone_offset)
            .in_range(-TIMEZONE_OFFSET_MAXIMUM, TIMEZONE_OFFSET_MAXIMUM);
        validator
            .validate_integer("clockDriftOffset", self.clock_drift_offset)
            .in_range(-CLOCK_DRIFT_OFFSET_MAXIMUM, CLOCK_DRIFT_OFFSET_MAXIMUM);
        validator.validate_object("payload", self.payload.as_ref()).not_empty();
    }
}
