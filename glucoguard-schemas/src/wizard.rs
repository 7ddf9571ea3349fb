//! Bolus calculator (wizard) records
//!
//! A wizard record may carry the bolus it recommended as an embedded object.
//! The bolus is validated in place under `/bolus`; on normalization it is
//! moved out of the wizard and emitted as a record of its own, directly after
//! the wizard in the batch output.

use glucoguard_core::{Datum, Normalizer, ObjectParser, Validator};
use serde::Serialize;
use serde_json::Value;

use crate::base::Base;
use crate::blood_glucose::{validate_units, validate_value};
use crate::bolus;

pub const TYPE: &str = "wizard";

/// Grams
pub const CARB_INPUT_MAXIMUM: f64 = 1000.0;
/// Units of insulin
pub const INSULIN_ON_BOARD_MAXIMUM: f64 = 250.0;
/// Grams per unit
pub const INSULIN_CARB_RATIO_MAXIMUM: f64 = 250.0;
/// Units of insulin
pub const RECOMMENDED_MAXIMUM: f64 = 100.0;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Recommended {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub net: Option<f64>,
}

impl Recommended {
    fn parse(parser: &ObjectParser<'_>) -> Option<Self> {
        let recommended = parser.child_object_parser("recommended");
        recommended.exists().then(|| Self {
            carb: recommended.parse_float("carb"),
            correction: recommended.parse_float("correction"),
            net: recommended.parse_float("net"),
        })
    }

    fn validate(&self, validator: &Validator) {
        validator
            .validate_float("carb", self.carb)
            .in_range(0.0, RECOMMENDED_MAXIMUM);
        validator
            .validate_float("correction", self.correction)
            .in_range(-RECOMMENDED_MAXIMUM, RECOMMENDED_MAXIMUM);
        validator
            .validate_float("net", self.net)
            .in_range(-RECOMMENDED_MAXIMUM, RECOMMENDED_MAXIMUM);
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Wizard {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_input: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carb_input: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulin_on_board: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insulin_carb_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended: Option<Recommended>,
    #[serde(skip)]
    pub bolus: Option<Box<dyn Datum>>,
}

impl Datum for Wizard {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.base.parse(parser);
        self.units = parser.parse_string("units");
        self.bg_input = parser.parse_float("bgInput");
        self.carb_input = parser.parse_float("carbInput");
        self.insulin_on_board = parser.parse_float("insulinOnBoard");
        self.insulin_carb_ratio = parser.parse_float("insulinCarbRatio");
        self.recommended = Recommended::parse(parser);
        self.bolus = bolus::parse_embedded(&parser.child_object_parser("bolus"));
    }

    fn validate(&self, validator: &Validator) {
        self.base.validate(validator, TYPE, None);
        validate_units(validator, "units", self.units.as_deref());
        validate_value(validator, "bgInput", self.bg_input, self.units.as_deref());
        validator
            .validate_float("carbInput", self.carb_input)
            .in_range(0.0, CARB_INPUT_MAXIMUM);
        validator
            .validate_float("insulinOnBoard", self.insulin_on_board)
            .in_range(0.0, INSULIN_ON_BOARD_MAXIMUM);
        validator
            .validate_float("insulinCarbRatio", self.insulin_carb_ratio)
            .greater_than(0.0)
            .less_than_or_equal_to(INSULIN_CARB_RATIO_MAXIMUM);
        if let Some(recommended) = &self.recommended {
            recommended.validate(&validator.child("recommended"));
        }
        if let Some(bolus) = &self.bolus {
            bolus.validate(&validator.child("bolus"));
        }
    }

    fn normalize(&mut self, normalizer: &Normalizer) {
        let (units, bg_input) = normalizer
            .normalize_blood_glucose("bgInput", self.units.as_deref())
            .normalize_units_and_value(self.bg_input);
        self.units = units;
        self.bg_input = bg_input;

        if let Some(mut bolus) = self.bolus.take() {
            bolus.normalize(&normalizer.child("bolus"));
            normalizer.append_datum(bolus);
        }
    }

    fn datum_type(&self) -> &str {
        TYPE
    }

    fn sub_type(&self) -> Option<&str> {
        None
    }

    /// The embedded bolus, while still attached, renders under `bolus`
    fn to_value(&self) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let (Some(bolus), Value::Object(object)) = (&self.bolus, &mut value) {
            object.insert("bolus".to_string(), bolus.to_value()?);
        }
        Ok(value)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
