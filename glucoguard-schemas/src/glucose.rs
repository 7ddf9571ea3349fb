//! Continuous and self-monitored blood glucose readings

use glucoguard_core::{Datum, Normalizer, ObjectParser, Validator};
use serde::Serialize;

use crate::base::Base;
use crate::blood_glucose::BloodGlucose;

pub const TYPE_CBG: &str = "cbg";
pub const TYPE_SMBG: &str = "smbg";

pub const READING_METHOD_MANUAL: &str = "manual";
pub const READING_METHOD_LINKED: &str = "linked";
pub const READING_METHODS: [&str; 2] = [READING_METHOD_MANUAL, READING_METHOD_LINKED];

/// A reading from a continuous glucose monitor
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Cbg {
    #[serde(flatten)]
    pub base: Base,
    #[serde(flatten)]
    pub glucose: BloodGlucose,
}

impl Datum for Cbg {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.base.parse(parser);
        self.glucose = BloodGlucose::parse(parser);
    }

    fn validate(&self, validator: &Validator) {
        self.base.validate(validator, TYPE_CBG, None);
        self.glucose.validate(validator);
    }

    fn normalize(&mut self, normalizer: &Normalizer) {
        self.glucose.normalize(normalizer);
    }

    datum_identity!(TYPE_CBG, None);
}

/// A fingerstick meter reading
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Smbg {
    #[serde(flatten)]
    pub base: Base,
    #[serde(flatten)]
    pub glucose: BloodGlucose,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading_method: Option<String>,
}

impl Datum for Smbg {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.base.parse(parser);
        self.glucose = BloodGlucose::parse(parser);
        self.reading_method = parser.parse_string("readingMethod");
    }

    fn validate(&self, validator: &Validator) {
        self.base.validate(validator, TYPE_SMBG, None);
        self.glucose.validate(validator);
        validator
            .validate_string("readingMethod", self.reading_method.as_deref())
            .one_of(&READING_METHODS);
    }

    fn normalize(&mut self, normalizer: &Normalizer) {
        self.glucose.normalize(normalizer);
    }

    datum_identity!(TYPE_SMBG, None);
}
