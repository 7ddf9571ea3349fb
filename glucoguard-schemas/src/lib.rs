//! Device Record Catalog for GlucoGuard
//!
//! ## Overview
//!
//! This crate supplies the concrete record variants the engine in
//! `glucoguard-core` dispatches to. Each variant implements
//! [`Datum`](glucoguard_core::Datum): it parses its own fields, states its own
//! rules and normalizes itself. The engine only ever sees `Box<dyn Datum>`.
//!
//! ## Catalog
//!
//! | type           | subType                          | module              |
//! |----------------|----------------------------------|---------------------|
//! | `basal`        | `scheduled`, `temp`, `suspend`   | [`basal`]           |
//! | `bolus`        | `normal`, `square`, `dual/square`| [`bolus`]           |
//! | `cbg`, `smbg`  | none                             | [`glucose`]         |
//! | `deviceEvent`  | `alarm`, `calibration`           | [`device_event`]    |
//! | `pumpSettings` | none                             | [`pump_settings`]   |
//! | `wizard`       | none                             | [`wizard`]          |
//!
//! Every variant starts with the shared [`Base`](base::Base) fields: identity,
//! device and upload linkage, and timestamps.
//!
//! ## Registry Pattern
//!
//! [`DatumKind`] is the closed list of kinds; its exhaustive `constructor()`
//! match means adding a kind without wiring it up fails to compile. The
//! registry used for dispatch is built from it:
//!
//! - [`default_registry`] builds a fresh, owned registry
//! - [`GLOBAL_REGISTRY`] is a lazily built shared instance
//!
//! ## Usage Example
//!
//! ```rust
//! use glucoguard_core::{ingest_json, IngestConfig};
//! use glucoguard_schemas::GLOBAL_REGISTRY;
//!
//! let batch = r#"[
//!     { "type": "cbg", "deviceId": "cgm-1", "time": "2024-03-01T08:15:00Z",
//!       "units": "mg/dL", "value": 90.07795 },
//!     { "type": "cbg", "deviceId": "cgm-1", "time": "2024-03-01T08:20:00Z",
//!       "units": "mg/dL", "value": "low" }
//! ]"#;
//!
//! let outcome = ingest_json(&GLOBAL_REGISTRY, batch, &IngestConfig::default()).unwrap();
//!
//! assert_eq!(outcome.data.len(), 1);
//! assert_eq!(outcome.rejected, vec![1]);
//! assert_eq!(outcome.errors[0].pointer(), Some("/1/value"));
//! ```

#![deny(unsafe_code)]

#[macro_use]
mod logging;

/// Implements the identity half of `Datum` for a serializable record
macro_rules! datum_identity {
    ($datum_type:expr, $sub_type:expr) => {
        fn datum_type(&self) -> &str {
            $datum_type
        }

        fn sub_type(&self) -> Option<&str> {
            $sub_type
        }

        fn to_value(&self) -> serde_json::Result<serde_json::Value> {
            serde_json::to_value(self)
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    };
}

pub mod basal;
pub mod base;
pub mod blood_glucose;
pub mod bolus;
pub mod device_event;
pub mod glucose;
pub mod pump_settings;
pub mod registry;
pub mod wizard;

pub use registry::{default_registry, DatumKind, GLOBAL_REGISTRY};

#[cfg(test)]
mod test_support {
    use glucoguard_core::{Context, Datum, ObjectParser, Validator};
    use serde_json::{json, Value};

    /// A record carrying only the required base fields
    pub fn base_fields(datum_type: &str, sub_type: Option<&str>) -> Value {
        let mut raw = json!({
            "type": datum_type,
            "deviceId": "pump-1234",
            "time": "2024-03-01T08:15:00Z"
        });
        if let Some(sub_type) = sub_type {
            raw["subType"] = json!(sub_type);
        }
        raw
    }

    /// Parse and validate `raw` as `T`, returning `(code, pointer)` pairs
    pub fn run<T: Datum + Default>(raw: Value) -> (T, Vec<(String, String)>) {
        let context = Context::new();
        let parser = ObjectParser::new(context.clone(), raw.as_object());
        let mut datum = T::default();
        datum.parse(&parser);
        datum.validate(&Validator::new(context.clone()));
        let recorded = context
            .errors()
            .into_iter()
            .map(|e| (e.code.clone(), e.pointer().unwrap_or_default().to_string()))
            .collect();
        (datum, recorded)
    }
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
