//! End-to-end batch ingest against the default catalog

mod common;

use glucoguard_core::{errors::codes, ingest, ingest_json, IngestConfig};
use glucoguard_schemas::{
    bolus, glucose::Cbg, pump_settings::PumpSettings, wizard::Wizard, GLOBAL_REGISTRY,
};
use proptest::prelude::*;
use serde_json::json;

use common::{cbg, codes_and_pointers, pair, pump_settings, scheduled_basal, wizard};

#[test]
fn valid_records_produce_no_errors() {
    let records = vec![cbg("mmol/L", 5.5), scheduled_basal(), pump_settings()];
    let outcome = ingest(&GLOBAL_REGISTRY, &records, &IngestConfig::default());

    assert!(outcome.is_clean(), "{:?}", outcome.errors);
    assert_eq!(outcome.data.len(), 3);

    let reading = outcome.data[0].as_any().downcast_ref::<Cbg>().unwrap();
    assert_eq!(reading.glucose.value.map(f64::to_bits), Some(5.5f64.to_bits()));
}

#[test]
fn four_record_batch() {
    let mut nested_error = pump_settings();
    nested_error["units"]["bg"] = json!("mg");

    let records = vec![
        // valid
        cbg("mg/dL", 60.0),
        // valid with nested sub-objects
        pump_settings(),
        // every field wrong-typed
        json!({
            "type": "cbg",
            "id": 1,
            "userId": 2,
            "deviceId": 3,
            "uploadId": 4,
            "time": 5,
            "deviceTime": 6,
            "timezoneOffset": "x",
            "conversionOffset": "x",
            "clockDriftOffset": "x",
            "annotations": "x",
            "payload": "x",
            "units": 7,
            "value": "x"
        }),
        // only discriminators
        json!({ "type": "bolus", "subType": "normal" }),
        nested_error,
    ];
    let outcome = ingest(&GLOBAL_REGISTRY, &records, &IngestConfig::default());
    let recorded = codes_and_pointers(&outcome.errors);

    assert_eq!(outcome.rejected, vec![2, 3, 4]);

    let wrong_typed: Vec<_> = recorded
        .iter()
        .filter(|(code, pointer)| pointer.starts_with("/2/") && code.starts_with("type-not-"))
        .cloned()
        .collect();
    assert_eq!(
        wrong_typed,
        vec![
            pair(codes::TYPE_NOT_STRING, "/2/id"),
            pair(codes::TYPE_NOT_STRING, "/2/userId"),
            pair(codes::TYPE_NOT_STRING, "/2/deviceId"),
            pair(codes::TYPE_NOT_STRING, "/2/uploadId"),
            pair(codes::TYPE_NOT_STRING, "/2/time"),
            pair(codes::TYPE_NOT_STRING, "/2/deviceTime"),
            pair(codes::TYPE_NOT_INTEGER, "/2/timezoneOffset"),
            pair(codes::TYPE_NOT_INTEGER, "/2/conversionOffset"),
            pair(codes::TYPE_NOT_INTEGER, "/2/clockDriftOffset"),
            pair(codes::TYPE_NOT_ARRAY, "/2/annotations"),
            pair(codes::TYPE_NOT_OBJECT, "/2/payload"),
            pair(codes::TYPE_NOT_STRING, "/2/units"),
            pair(codes::TYPE_NOT_FLOAT, "/2/value"),
        ]
    );

    let discriminators_only: Vec<_> = recorded
        .iter()
        .filter(|(_, pointer)| pointer.starts_with("/3/"))
        .cloned()
        .collect();
    assert_eq!(
        discriminators_only,
        vec![
            pair(codes::VALUE_NOT_EXISTS, "/3/deviceId"),
            pair(codes::VALUE_NOT_EXISTS, "/3/time"),
            pair(codes::VALUE_NOT_EXISTS, "/3/normal"),
        ]
    );

    let nested: Vec<_> = recorded
        .iter()
        .filter(|(_, pointer)| pointer.starts_with("/4/"))
        .cloned()
        .collect();
    assert_eq!(nested, vec![pair(codes::VALUE_NOT_ALLOWED, "/4/units/bg")]);

    // The two valid records survive, normalized
    assert_eq!(outcome.data.len(), 2);
    let reading = outcome.data[0].as_any().downcast_ref::<Cbg>().unwrap();
    assert!((reading.glucose.value.unwrap() - 60.0 / 18.01559).abs() < 1e-9);
    assert!(outcome.data[1].as_any().downcast_ref::<PumpSettings>().is_some());
}

#[test]
fn unknown_type_is_one_error() {
    let outcome = ingest(
        &GLOBAL_REGISTRY,
        &[json!({ "type": "unknown-xyz", "deviceId": 7 })],
        &IngestConfig::default(),
    );
    assert_eq!(
        codes_and_pointers(&outcome.errors),
        vec![pair(codes::TYPE_INVALID, "/0/type")]
    );
    assert!(outcome.data.is_empty());
}

#[test]
fn unknown_sub_type_is_one_error() {
    let mut record = scheduled_basal();
    record["subType"] = json!("automated");
    let outcome = ingest(&GLOBAL_REGISTRY, &[record], &IngestConfig::default());
    assert_eq!(
        codes_and_pointers(&outcome.errors),
        vec![pair(codes::SUB_TYPE_INVALID, "/0/subType")]
    );
}

#[test]
fn wizard_bolus_follows_the_wizard() {
    let records = vec![wizard(), cbg("mmol/L", 6.1)];
    let outcome = ingest(&GLOBAL_REGISTRY, &records, &IngestConfig::default());

    assert!(outcome.is_clean(), "{:?}", outcome.errors);
    let kinds: Vec<_> = outcome.data.iter().map(|d| d.datum_type().to_string()).collect();
    assert_eq!(kinds, vec!["wizard", "bolus", "cbg"]);

    let wizard = outcome.data[0].as_any().downcast_ref::<Wizard>().unwrap();
    assert!(wizard.bolus.is_none());
    assert!((wizard.bg_input.unwrap() - 10.0).abs() < 1e-9);
    assert!(outcome.data[1].as_any().downcast_ref::<bolus::Normal>().is_some());
}

#[test]
fn strict_mode_reports_unknown_fields() {
    let mut record = cbg("mmol/L", 5.5);
    record["trend"] = json!("rising");
    let config = IngestConfig::default().with_reject_unknown_fields(true);

    let outcome = ingest(&GLOBAL_REGISTRY, &[record, scheduled_basal()], &config);
    assert_eq!(
        codes_and_pointers(&outcome.errors),
        vec![pair(codes::VALUE_NOT_PARSED, "/0/trend")]
    );
}

#[test]
fn rendered_output_is_normalized_json() {
    let text = serde_json::to_string(&vec![cbg("mg/dl", 180.1559)]).unwrap();
    let outcome = ingest_json(&GLOBAL_REGISTRY, &text, &IngestConfig::default()).unwrap();

    let rendered = outcome.to_values().unwrap();
    assert_eq!(rendered[0]["type"], json!("cbg"));
    assert_eq!(rendered[0]["units"], json!("mmol/L"));
    assert!((rendered[0]["value"].as_f64().unwrap() - 10.0).abs() < 1e-9);
    assert_eq!(rendered[0]["deviceId"], json!(common::DEVICE_ID));
}

#[test]
fn future_records_are_rejected() {
    let mut record = cbg("mmol/L", 5.5);
    record["time"] = json!("2999-01-01T00:00:00Z");
    let outcome = ingest(&GLOBAL_REGISTRY, &[record], &IngestConfig::default());
    assert_eq!(
        codes_and_pointers(&outcome.errors),
        vec![pair(codes::TIME_NOT_BEFORE, "/0/time")]
    );
}

proptest! {
    #[test]
    fn mg_dl_readings_in_range_always_validate(value in 0.0f64..=1000.0) {
        let outcome = ingest(&GLOBAL_REGISTRY, &[cbg("mg/dL", value)], &IngestConfig::default());
        prop_assert!(outcome.is_clean());
        let reading = outcome.data[0].as_any().downcast_ref::<Cbg>().unwrap();
        prop_assert!((reading.glucose.value.unwrap() - value / 18.01559).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_mmol_l_is_always_rejected(value in 55.000_001f64..1.0e6) {
        let outcome = ingest(&GLOBAL_REGISTRY, &[cbg("mmol/L", value)], &IngestConfig::default());
        prop_assert_eq!(outcome.rejected, vec![0]);
        prop_assert_eq!(outcome.errors[0].code.as_str(), codes::VALUE_OUT_OF_RANGE);
    }
}
