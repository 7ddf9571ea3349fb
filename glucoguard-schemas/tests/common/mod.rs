//! Record fixtures for catalog integration tests and benchmarks

#![allow(dead_code)]

use glucoguard_core::ErrorRecord;
use serde_json::{json, Value};

pub const DEVICE_ID: &str = "InsOmn-1234567890";
pub const TIME: &str = "2024-03-01T08:15:00Z";

pub fn codes_and_pointers(errors: &[ErrorRecord]) -> Vec<(String, String)> {
    errors
        .iter()
        .map(|e| (e.code.clone(), e.pointer().unwrap_or_default().to_string()))
        .collect()
}

pub fn pair(code: &str, pointer: &str) -> (String, String) {
    (code.to_string(), pointer.to_string())
}

pub fn cbg(units: &str, value: f64) -> Value {
    json!({
        "type": "cbg",
        "deviceId": DEVICE_ID,
        "time": TIME,
        "units": units,
        "value": value
    })
}

pub fn scheduled_basal() -> Value {
    json!({
        "type": "basal",
        "subType": "scheduled",
        "deviceId": DEVICE_ID,
        "time": TIME,
        "deviceTime": "2024-03-01T03:15:00",
        "timezoneOffset": -300,
        "rate": 0.75,
        "duration": 3600000,
        "scheduleName": "Standard"
    })
}

pub fn pump_settings() -> Value {
    json!({
        "type": "pumpSettings",
        "deviceId": DEVICE_ID,
        "time": TIME,
        "activeSchedule": "Standard",
        "units": { "carb": "grams", "bg": "mmol/L" },
        "basalSchedules": {
            "Standard": [{ "start": 0, "rate": 0.8 }, { "start": 28800000, "rate": 1.0 }]
        },
        "carbRatio": [{ "start": 0, "amount": 10 }],
        "insulinSensitivity": [{ "start": 0, "amount": 2.5 }],
        "bgTarget": [{ "start": 0, "low": 5.0, "high": 7.0 }]
    })
}

pub fn wizard() -> Value {
    json!({
        "type": "wizard",
        "deviceId": DEVICE_ID,
        "time": TIME,
        "units": "mg/dL",
        "bgInput": 180.1559,
        "carbInput": 60,
        "insulinCarbRatio": 12,
        "recommended": { "carb": 5.0, "correction": 1.5, "net": 6.5 },
        "bolus": {
            "type": "bolus",
            "subType": "normal",
            "deviceId": DEVICE_ID,
            "time": TIME,
            "normal": 6.5
        }
    })
}

/// A mixed batch of `size` valid records
pub fn mixed_batch(size: usize) -> Vec<Value> {
    (0..size)
        .map(|index| match index % 4 {
            0 => cbg("mg/dL", 90.0 + index as f64 % 50.0),
            1 => scheduled_basal(),
            2 => pump_settings(),
            _ => wizard(),
        })
        .collect()
}
