//! Shared fixtures for engine integration tests
//!
//! Provides a small two-variant catalog exercising every parser and validator
//! entry point, plus assertion helpers over recorded errors.

#![allow(dead_code)]

use std::any::Any;

use glucoguard_core::{
    constants::time::MS_PER_DAY, time::earliest_record_time, Datum, ErrorRecord, Normalizer,
    ObjectParser, Registry, TimeLayout, Validator,
};
use serde::Serialize;
use serde_json::{Map, Value};

/// `(code, pointer)` pairs in recorded order
pub fn codes_and_pointers(errors: &[ErrorRecord]) -> Vec<(String, String)> {
    errors
        .iter()
        .map(|e| (e.code.clone(), e.pointer().unwrap_or_default().to_string()))
        .collect()
}

pub fn pair(code: &str, pointer: &str) -> (String, String) {
    (code.to_string(), pointer.to_string())
}

/// A schedule entry nested inside [`Profile`]
#[derive(Debug, Default, Clone, Serialize)]
pub struct Segment {
    pub start: Option<i64>,
    pub amount: Option<f64>,
}

impl Segment {
    fn parse(parser: &ObjectParser<'_>) -> Self {
        Self {
            start: parser.parse_integer("start"),
            amount: parser.parse_float("amount"),
        }
    }

    fn validate(&self, validator: &Validator) {
        validator
            .validate_integer("start", self.start)
            .exists()
            .in_range(0, MS_PER_DAY);
        validator
            .validate_float("amount", self.amount)
            .exists()
            .greater_than(0.0);
    }
}

/// A settings-like record with nested object and array structure
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub time: Option<String>,
    pub units: Option<String>,
    pub target: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub schedule: Option<Vec<Segment>>,
    pub payload: Option<Map<String, Value>>,
}

impl Datum for Profile {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.name = parser.parse_string("name");
        self.enabled = parser.parse_boolean("enabled");
        self.time = parser.parse_string("time");
        let glucose = parser.child_object_parser("glucose");
        self.units = glucose.parse_string("units");
        self.target = glucose.parse_float("target");
        self.tags = parser.parse_string_array("tags");
        self.schedule = parser
            .child_array_parser("schedule")
            .parse_each(Segment::parse);
        self.payload = parser.parse_object("payload").cloned();
    }

    fn validate(&self, validator: &Validator) {
        validator
            .validate_string("name", self.name.as_deref())
            .exists()
            .length_in_range(1, 32);
        validator.validate_boolean("enabled", self.enabled).exists();
        validator
            .validate_string_as_time("time", self.time.as_deref(), TimeLayout::Rfc3339)
            .exists()
            .after(earliest_record_time());

        let glucose = validator.child("glucose");
        glucose
            .validate_string("units", self.units.as_deref())
            .exists()
            .one_of(&["mmol/l", "mmol/L", "mg/dl", "mg/dL"]);
        glucose.validate_float("target", self.target).exists();

        validator
            .validate_string_array("tags", self.tags.as_deref())
            .each_one_of(&["night", "exercise", "sick"]);
        validator
            .validate_object_array("schedule", self.schedule.as_deref())
            .exists()
            .not_empty();
        if let Some(schedule) = &self.schedule {
            let schedule_validator = validator.child("schedule");
            for (index, segment) in schedule.iter().enumerate() {
                segment.validate(&schedule_validator.child(index));
            }
        }
        validator
            .validate_object("payload", self.payload.as_ref())
            .not_empty();
    }

    fn normalize(&mut self, normalizer: &Normalizer) {
        let glucose = normalizer.child("glucose");
        let bg = glucose.normalize_blood_glucose("target", self.units.as_deref());
        let (units, target) = bg.normalize_units_and_value(self.target);
        self.units = units;
        self.target = target;
    }

    fn datum_type(&self) -> &str {
        "profile"
    }

    fn sub_type(&self) -> Option<&str> {
        None
    }

    fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An alert that emits a follow-up acknowledgement when normalized
#[derive(Debug, Default, Serialize)]
pub struct Alert {
    pub sub_type: Option<String>,
    pub level: Option<i64>,
    pub acknowledged: bool,
}

impl Datum for Alert {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.sub_type = parser.parse_string("subType");
        self.level = parser.parse_integer("level");
    }

    fn validate(&self, validator: &Validator) {
        validator
            .validate_integer("level", self.level)
            .exists()
            .one_of(&[1, 2, 3]);
    }

    fn normalize(&mut self, normalizer: &Normalizer) {
        if self.level == Some(3) {
            normalizer.append_datum(Box::new(Alert {
                sub_type: self.sub_type.clone(),
                level: self.level,
                acknowledged: true,
            }));
        }
    }

    fn datum_type(&self) -> &str {
        "alert"
    }

    fn sub_type(&self) -> Option<&str> {
        self.sub_type.as_deref()
    }

    fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn profile() -> Box<dyn Datum> {
    Box::<Profile>::default()
}

fn alert() -> Box<dyn Datum> {
    Box::<Alert>::default()
}

pub fn registry() -> Registry {
    let mut registry = Registry::new();
    for (datum_type, sub_type, constructor) in [
        ("profile", None, profile as fn() -> Box<dyn Datum>),
        ("alert", Some("low"), alert),
        ("alert", Some("high"), alert),
    ] {
        if let Err(e) = registry.register(datum_type, sub_type, constructor) {
            panic!("fixture registry: {}", e);
        }
    }
    registry
}
