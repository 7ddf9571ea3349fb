//! Device events: alarms and sensor calibrations

use glucoguard_core::{Datum, Normalizer, ObjectParser, Validator};
use serde::Serialize;

use crate::base::Base;
use crate::blood_glucose::BloodGlucose;

pub const TYPE: &str = "deviceEvent";
pub const SUB_TYPE_ALARM: &str = "alarm";
pub const SUB_TYPE_CALIBRATION: &str = "calibration";

pub const ALARM_TYPES: [&str; 9] = [
    "auto_off",
    "low_insulin",
    "low_power",
    "no_delivery",
    "no_insulin",
    "no_power",
    "occlusion",
    "other",
    "over_limit",
];

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    #[serde(flatten)]
    pub base: Base,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_type: Option<String>,
}

impl Datum for Alarm {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.base.parse(parser);
        self.base.parse_sub_type(parser);
        self.alarm_type = parser.parse_string("alarmType");
    }

    fn validate(&self, validator: &Validator) {
        self.base.validate(validator, TYPE, Some(SUB_TYPE_ALARM));
        validator
            .validate_string("alarmType", self.alarm_type.as_deref())
            .exists()
            .one_of(&ALARM_TYPES);
    }

    fn normalize(&mut self, _normalizer: &Normalizer) {}

    datum_identity!(TYPE, Some(SUB_TYPE_ALARM));
}

/// A reference reading entered to calibrate a sensor
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Calibration {
    #[serde(flatten)]
    pub base: Base,
    #[serde(flatten)]
    pub glucose: BloodGlucose,
}

impl Datum for Calibration {
    fn parse(&mut self, parser: &ObjectParser<'_>) {
        self.base.parse(parser);
        self.base.parse_sub_type(parser);
        self.glucose = BloodGlucose::parse(parser);
    }

    fn validate(&self, validator: &Validator) {
        self.base.validate(validator, TYPE, Some(SUB_TYPE_CALIBRATION));
        self.glucose.validate(validator);
    }

    fn normalize(&mut self, normalizer: &Normalizer) {
        self.glucose.normalize(normalizer);
    }

    datum_identity!(TYPE, Some(SUB_TYPE_CALIBRATION));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{base_fields, run};
    use glucoguard_core::{errors::codes, Context};
    use serde_json::json;

    #[test]
    fn alarm_types() {
        let mut raw = base_fields(TYPE, Some(SUB_TYPE_ALARM));
        raw["alarmType"] = json!("occlusion");
        assert!(run::<Alarm>(raw.clone()).1.is_empty());

        raw["alarmType"] = json!("meltdown");
        assert_eq!(
            run::<Alarm>(raw).1,
            vec![(codes::VALUE_NOT_ALLOWED.to_string(), "/alarmType".to_string())]
        );
    }

    #[test]
    fn calibration_is_normalized() {
        let mut raw = base_fields(TYPE, Some(SUB_TYPE_CALIBRATION));
        raw["units"] = json!("mg/dL");
        raw["value"] = json!(90.07795);

        let (mut datum, recorded) = run::<Calibration>(raw);
        assert!(recorded.is_empty(), "{:?}", recorded);
        datum.normalize(&Normalizer::new(Context::new()));
        assert!((datum.glucose.value.unwrap() - 5.0).abs() < 1e-9);
    }
}
