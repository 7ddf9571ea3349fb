//! Basal insulin delivery: scheduled, temporary and suspended

use glucoguard_core::{
    constants::time::MS_PER_DAY, validator::FloatValidator, Datum, Normalizer, ObjectParser,
    Validator,
};
use serde::Serialize;

use crate::base::Base;

pub const TYPE: &str = "basal";
pub const SUB_TYPE_SCHEDULED: &str = "scheduled";
pub const SUB_TYPE_TEMP: &str = "temp";
pub const SUB_TYPE_SUSPEND: &str = "suspend";

/// Units per hour
pub const RATE_MAXIMUM: f64 = 100.0;
/// Multiplier of the scheduled rate
pub const PERCENT_MAXIMUM: f64 = 10.0;
pub const DURATION_MAXIMUM: i64 = 7 * MS_PER_DAY;

fn validate_rate(validator: &Validator, rate: Option<f64>) -> FloatValidator {
    validator
        .validate_float("rate", rate)
        .in_range(0.0, RATE_MAXIMUM)
}

fn validate_duration(validator: &Validator, duration: Option<i64>) {
    validator
        .validate_integer("duration", duration)
        .exists()
        .in_range(0, DURATION_MAXIMUM);
}

/// The scheduled delivery a temporary or suspended basal replaced
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suppressed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_name: Option<String>,
}

impl Suppressed {
    /// Parse the nested object at `suppressed`, if there is one
    pub fn parse(parser: &ObjectParser<'_>) -> Option<Self> {
        let suppressed = parser.child_object_parser("suppressed");
        suppressed.exists().then(|| Self {
            rate: suppressed.parse_float("rate"),
            schedule_name: suppressed.parse_string("scheduleName"),
        })
    }

    pub fn validate(&self, validator: &Validator) {
        validate_rate(validator, self.rate).exists();
        validator
            .validate_string("scheduleName", self.schedule_name.as_deref())
            .not_empty();
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scheduled {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_name: Option<String>,
}

impl Datum for Scheduled {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.base.parse(parser);
        self.base.parse_sub_type(parser);
        self.rate = parser.parse_float("rate");
        self.duration = parser.parse_integer("duration");
        self.schedule_name = parser.parse_string("scheduleName");
    }

    fn validate(&self, validator: &Validator) {
        self.base.validate(validator, TYPE, Some(SUB_TYPE_SCHEDULED));
        validate_rate(validator, self.rate).exists();
        validate_duration(validator, self.duration);
        validator
            .validate_string("scheduleName", self.schedule_name.as_deref())
            .not_empty();
    }

    fn normalize(&mut self, _normalizer: &Normalizer) {}

    datum_identity!(TYPE, Some(SUB_TYPE_SCHEDULED));
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Temp {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppressed: Option<Suppressed>,
}

impl Datum for Temp {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.base.parse(parser);
        self.base.parse_sub_type(parser);
        self.rate = parser.parse_float("rate");
        self.percent = parser.parse_float("percent");
        self.duration = parser.parse_integer("duration");
        self.suppressed = Suppressed::parse(parser);
    }

    fn validate(&self, validator: &Validator) {
        self.base.validate(validator, TYPE, Some(SUB_TYPE_TEMP));
        validate_rate(validator, self.rate);
        validator
            .validate_float("percent", self.percent)
            .in_range(0.0, PERCENT_MAXIMUM);
        validate_duration(validator, self.duration);
        if let Some(suppressed) = &self.suppressed {
            suppressed.validate(&validator.child("suppressed"));
        }
    }

    fn normalize(&mut self, _normalizer: &Normalizer) {}

    datum_identity!(TYPE, Some(SUB_TYPE_TEMP));
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Suspend {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppressed: Option<Suppressed>,
}

impl Datum for Suspend {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.base.parse(parser);
        self.base.parse_sub_type(parser);
        self.duration = parser.parse_integer("duration");
        self.suppressed = Suppressed::parse(parser);
    }

    fn validate(&self, validator: &Validator) {
        self.base.validate(validator, TYPE, Some(SUB_TYPE_SUSPEND));
        validate_duration(validator, self.duration);
        if let Some(suppressed) = &self.suppressed {
            suppressed.validate(&validator.child("suppressed"));
        }
    }

    fn normalize(&mut self, _normalizer: &Normalizer) {}

    datum_identity!(TYPE, Some(SUB_TYPE_SUSPEND));
}
