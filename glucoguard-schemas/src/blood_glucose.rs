//! Blood glucose value and units pair shared by glucose-bearing records

use glucoguard_core::{
    constants::blood_glucose::UNITS, BloodGlucoseUnits, Normalizer, ObjectParser, Validator,
};
use serde::Serialize;

/// Validate `value` against the plausible range of `units`
///
/// Units that do not resolve are reported by the units validation, so the
/// value is only checked for presence rules here.
pub fn validate_value(validator: &Validator, reference: &str, value: Option<f64>, units: Option<&str>) {
    let check = validator.validate_float(reference, value);
    if let Some((lower, upper)) = units.and_then(BloodGlucoseUnits::parse).map(|u| u.range()) {
        check.in_range(lower, upper);
    }
}

pub fn validate_units(validator: &Validator, reference: &str, units: Option<&str>) {
    validator
        .validate_string(reference, units)
        .exists()
        .one_of(&UNITS);
}

/// A required `value` in required `units`
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct BloodGlucose {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl BloodGlucose {
    pub fn parse(parser: &ObjectParser<'_>) -> Self {
        Self {
            units: parser.parse_string("units"),
            value: parser.parse_float("value"),
        }
    }

    pub fn validate(&self, validator: &Validator) {
        validate_units(validator, "units", self.units.as_deref());
        validator.validate_float("value", self.value).exists();
        validate_value(validator, "value", self.value, self.units.as_deref());
    }

    pub fn normalize(&mut self, normalizer: &Normalizer) {
        let (units, value) = normalizer
            .normalize_blood_glucose("value", self.units.as_deref())
            .normalize_units_and_value(self.value);
        self.units = units;
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glucoguard_core::{errors::codes, Context};
    use serde_json::json;

    fn validate(raw: serde_json::Value) -> Vec<String> {
        let context = Context::new();
        let parser = ObjectParser::new(context.clone(), raw.as_object());
        BloodGlucose::parse(&parser).validate(&Validator::new(context.clone()));
        context.errors().into_iter().map(|e| e.code).collect()
    }

    #[test]
    fn range_depends_on_units() {
        assert!(validate(json!({ "units": "mg/dL", "value": 400 })).is_empty());
        assert_eq!(
            validate(json!({ "units": "mmol/L", "value": 400 })),
            vec![codes::VALUE_OUT_OF_RANGE]
        );
        assert_eq!(
            validate(json!({ "units": "mg/dl", "value": 1000.5 })),
            vec![codes::VALUE_OUT_OF_RANGE]
        );
    }

    #[test]
    fn unknown_units_skip_the_range() {
        assert_eq!(
            validate(json!({ "units": "mg", "value": 5000 })),
            vec![codes::VALUE_NOT_ALLOWED]
        );
    }

    #[test]
    fn both_required() {
        assert_eq!(
            validate(json!({})),
            vec![codes::VALUE_NOT_EXISTS, codes::VALUE_NOT_EXISTS]
        );
    }

    #[test]
    fn normalizes_to_mmol_l() {
        let mut glucose = BloodGlucose {
            units: Some("mg/dL".into()),
            value: Some(180.1559),
        };
        glucose.normalize(&Normalizer::new(Context::new()));
        assert_eq!(glucose.units.as_deref(), Some("mmol/L"));
        assert!((glucose.value.unwrap() - 10.0).abs() < 1e-9);
    }
}
