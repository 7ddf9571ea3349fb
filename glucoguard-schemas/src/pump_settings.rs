//! Insulin pump configuration snapshot
//!
//! Schedules are arrays of segments keyed by `start`, milliseconds since
//! local midnight. Blood glucose amounts (sensitivity, targets) are expressed
//! in `units.bg` and normalized to mmol/L together with it.

use std::collections::BTreeMap;

use glucoguard_core::{
    constants::time::MS_PER_DAY, errors, Datum, Normalizer, ObjectParser, Validator,
};
use serde::Serialize;

use crate::base::Base;
use crate::blood_glucose::{validate_units, validate_value};

pub const TYPE: &str = "pumpSettings";

pub const CARB_UNITS_GRAMS: &str = "grams";
pub const CARB_UNITS_EXCHANGES: &str = "exchanges";
pub const CARB_UNITS: [&str; 2] = [CARB_UNITS_GRAMS, CARB_UNITS_EXCHANGES];

pub const START_MAXIMUM: i64 = MS_PER_DAY;
/// Units per hour
pub const BASAL_RATE_MAXIMUM: f64 = 100.0;
/// Grams of carbohydrate per unit of insulin
pub const CARB_RATIO_MAXIMUM: f64 = 250.0;

fn validate_start(validator: &Validator, start: Option<i64>) {
    validator
        .validate_integer("start", start)
        .exists()
        .in_range(0, START_MAXIMUM);
}

/// Validate a required segment array and each of its segments
fn validate_segments<T>(
    validator: &Validator,
    reference: &str,
    segments: Option<&[T]>,
    mut validate: impl FnMut(&T, &Validator),
) {
    validator
        .validate_object_array(reference, segments)
        .exists()
        .not_empty();
    if let Some(segments) = segments {
        let parent = validator.child(reference);
        for (index, segment) in segments.iter().enumerate() {
            validate(segment, &parent.child(index));
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Units {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carb: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg: Option<String>,
}

impl Units {
    fn validate(&self, validator: &Validator) {
        validator
            .validate_string("carb", self.carb.as_deref())
            .exists()
            .one_of(&CARB_UNITS);
        validate_units(validator, "bg", self.bg.as_deref());
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct BasalSegment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

impl BasalSegment {
    fn parse(parser: &ObjectParser<'_>) -> Self {
        Self {
            start: parser.parse_integer("start"),
            rate: parser.parse_float("rate"),
        }
    }

    fn validate(&self, validator: &Validator) {
        validate_start(validator, self.start);
        validator
            .validate_float("rate", self.rate)
            .exists()
            .in_range(0.0, BASAL_RATE_MAXIMUM);
    }
}

/// Segment of a carb ratio or insulin sensitivity schedule
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct AmountSegment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl AmountSegment {
    fn parse(parser: &ObjectParser<'_>) -> Self {
        Self {
            start: parser.parse_integer("start"),
            amount: parser.parse_float("amount"),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct TargetSegment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
}

impl TargetSegment {
    fn parse(parser: &ObjectParser<'_>) -> Self {
        Self {
            start: parser.parse_integer("start"),
            low: parser.parse_float("low"),
            high: parser.parse_float("high"),
        }
    }

    fn validate(&self, validator: &Validator, bg_units: Option<&str>) {
        validate_start(validator, self.start);
        validator.validate_float("low", self.low).exists();
        validate_value(validator, "low", self.low, bg_units);

        validator.validate_float("high", self.high).exists();
        validate_value(validator, "high", self.high, bg_units);
        if let Some(low) = self.low {
            validator
                .validate_float("high", self.high)
                .greater_than_or_equal_to(low);
        }
    }

    fn normalize(&mut self, normalizer: &Normalizer, bg_units: Option<&str>) {
        self.low = normalizer
            .normalize_blood_glucose("low", bg_units)
            .normalize_value(self.low);
        self.high = normalizer
            .normalize_blood_glucose("high", bg_units)
            .normalize_value(self.high);
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PumpSettings {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<Units>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basal_schedules: Option<BTreeMap<String, Vec<BasalSegment>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carb_ratio: Option<Vec<AmountSegment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulin_sensitivity: Option<Vec<AmountSegment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_target: Option<Vec<TargetSegment>>,
}

impl PumpSettings {
    fn bg_units(&self) -> Option<&str> {
        self.units.as_ref().and_then(|units| units.bg.as_deref())
    }
}

impl Datum for PumpSettings {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.base.parse(parser);
        self.active_schedule = parser.parse_string("activeSchedule");

        let units = parser.child_object_parser("units");
        self.units = units.exists().then(|| Units {
            carb: units.parse_string("carb"),
            bg: units.parse_string("bg"),
        });

        let schedules = parser.child_object_parser("basalSchedules");
        self.basal_schedules = schedules.object().map(|object| {
            object
                .keys()
                .filter_map(|name| {
                    schedules
                        .child_array_parser(name)
                        .parse_each(BasalSegment::parse)
                        .map(|segments| (name.clone(), segments))
                })
                .collect()
        });

        self.carb_ratio = parser
            .child_array_parser("carbRatio")
            .parse_each(AmountSegment::parse);
        self.insulin_sensitivity = parser
            .child_array_parser("insulinSensitivity")
            .parse_each(AmountSegment::parse);
        self.bg_target = parser
            .child_array_parser("bgTarget")
            .parse_each(TargetSegment::parse);
    }

    fn validate(&self, validator: &Validator) {
        self.base.validate(validator, TYPE, None);
        validator
            .validate_string("activeSchedule", self.active_schedule.as_deref())
            .exists()
            .not_empty();

        match &self.units {
            Some(units) => units.validate(&validator.child("units")),
            None => validator.append_error("units", errors::value_not_exists()),
        }

        if let Some(schedules) = &self.basal_schedules {
            let schedules_validator = validator.child("basalSchedules");
            for (name, segments) in schedules {
                let schedule = schedules_validator.child(name);
                for (index, segment) in segments.iter().enumerate() {
                    segment.validate(&schedule.child(index));
                }
            }
        }

        validate_segments(validator, "carbRatio", self.carb_ratio.as_deref(), |segment, v| {
            validate_start(v, segment.start);
            v.validate_float("amount", segment.amount)
                .exists()
                .greater_than(0.0)
                .less_than_or_equal_to(CARB_RATIO_MAXIMUM);
        });

        let bg_units = self.bg_units();
        validate_segments(
            validator,
            "insulinSensitivity",
            self.insulin_sensitivity.as_deref(),
            |segment, v| {
                validate_start(v, segment.start);
                v.validate_float("amount", segment.amount).exists();
                validate_value(v, "amount", segment.amount, bg_units);
            },
        );
        validate_segments(validator, "bgTarget", self.bg_target.as_deref(), |segment, v| {
            segment.validate(v, bg_units)
        });
    }

    fn normalize(&mut self, normalizer: &Normalizer) {
        let bg_units = self.bg_units().map(str::to_string);
        let bg_units = bg_units.as_deref();

        if let Some(segments) = &mut self.insulin_sensitivity {
            let parent = normalizer.child("insulinSensitivity");
            for (index, segment) in segments.iter_mut().enumerate() {
                segment.amount = parent
                    .child(index)
                    .normalize_blood_glucose("amount", bg_units)
                    .normalize_value(segment.amount);
            }
        }
        if let Some(segments) = &mut self.bg_target {
            let parent = normalizer.child("bgTarget");
            for (index, segment) in segments.iter_mut().enumerate() {
                segment.normalize(&parent.child(index), bg_units);
            }
        }
        if let Some(units) = &mut self.units {
            units.bg = normalizer
                .child("units")
                .normalize_blood_glucose("bg", bg_units)
                .normalize_units();
        }
    }

    datum_identity!(TYPE, None);
}
