//! Bolus insulin delivery: normal, square wave and dual wave
//!
//! A bolus also appears embedded inside a wizard record. Embedded boluses are
//! resolved here by [`parse_embedded`], which reads the `subType` itself
//! rather than going through the registry.

use glucoguard_core::{
    constants::time::MS_PER_DAY, errors, Datum, Normalizer, ObjectParser, Validator,
};
use serde::Serialize;

use crate::base::Base;

pub const TYPE: &str = "bolus";
pub const SUB_TYPE_NORMAL: &str = "normal";
pub const SUB_TYPE_SQUARE: &str = "square";
pub const SUB_TYPE_DUAL_SQUARE: &str = "dual/square";

/// Units of insulin
pub const AMOUNT_MAXIMUM: f64 = 100.0;
pub const DURATION_MAXIMUM: i64 = MS_PER_DAY;

fn validate_normal(validator: &Validator, normal: Option<f64>, expected_normal: Option<f64>) {
    validator
        .validate_float("normal", normal)
        .exists()
        .in_range(0.0, AMOUNT_MAXIMUM);

    let expected = validator
        .validate_float("expectedNormal", expected_normal)
        .less_than_or_equal_to(AMOUNT_MAXIMUM);
    if let Some(normal) = normal {
        expected.greater_than_or_equal_to(normal);
    }
}

fn validate_extended(validator: &Validator, extended: Option<f64>, duration: Option<i64>) {
    validator
        .validate_float("extended", extended)
        .exists()
        .in_range(0.0, AMOUNT_MAXIMUM);
    validator
        .validate_integer("duration", duration)
        .exists()
        .in_range(0, DURATION_MAXIMUM);
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Normal {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_normal: Option<f64>,
}

impl Datum for Normal {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.base.parse(parser);
        self.base.parse_sub_type(parser);
        self.normal = parser.parse_float("normal");
        self.expected_normal = parser.parse_float("expectedNormal");
    }

    fn validate(&self, validator: &Validator) {
        self.base.validate(validator, TYPE, Some(SUB_TYPE_NORMAL));
        validate_normal(validator, self.normal, self.expected_normal);
    }

    fn normalize(&mut self, _normalizer: &Normalizer) {}

    datum_identity!(TYPE, Some(SUB_TYPE_NORMAL));
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Square {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

impl Datum for Square {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.base.parse(parser);
        self.base.parse_sub_type(parser);
        self.extended = parser.parse_float("extended");
        self.duration = parser.parse_integer("duration");
    }

    fn validate(&self, validator: &Validator) {
        self.base.validate(validator, TYPE, Some(SUB_TYPE_SQUARE));
        validate_extended(validator, self.extended, self.duration);
    }

    fn normalize(&mut self, _normalizer: &Normalizer) {}

    datum_identity!(TYPE, Some(SUB_TYPE_SQUARE));
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DualSquare {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_normal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
}

impl Datum for DualSquare {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.base.parse(parser);
        self.base.parse_sub_type(parser);
        self.normal = parser.parse_float("normal");
        self.expected_normal = parser.parse_float("expectedNormal");
        self.extended = parser.parse_float("extended");
        self.duration = parser.parse_integer("duration");
    }

    fn validate(&self, validator: &Validator) {
        self.base.validate(validator, TYPE, Some(SUB_TYPE_DUAL_SQUARE));
        validate_normal(validator, self.normal, self.expected_normal);
        validate_extended(validator, self.extended, self.duration);
    }

    fn normalize(&mut self, _normalizer: &Normalizer) {}

    datum_identity!(TYPE, Some(SUB_TYPE_DUAL_SQUARE));
}

/// Construct and parse the bolus variant named by `parser`'s `subType`
///
/// Errors for a missing or unknown sub-type are recorded at `subType` beneath
/// the parser's context. A `None`-backed parser yields `None` silently.
pub fn parse_embedded(parser: &ObjectParser<'_>) -> Option<Box<dyn Datum>> {
    if !parser.exists() {
        return None;
    }
    let mut bolus: Box<dyn Datum> = match parser.parse_string("subType").as_deref() {
        Some(SUB_TYPE_NORMAL) => Box::<Normal>::default(),
        Some(SUB_TYPE_SQUARE) => Box::<Square>::default(),
        Some(SUB_TYPE_DUAL_SQUARE) => Box::<DualSquare>::default(),
        Some(other) => {
            parser
                .context()
                .append_error("subType", errors::sub_type_invalid(other));
            return None;
        }
        None => {
            if !parser.contains("subType") {
                parser
                    .context()
                    .append_error("subType", errors::value_not_exists());
            }
            return None;
        }
    };
    bolus.parse(parser);
    Some(bolus)
}
