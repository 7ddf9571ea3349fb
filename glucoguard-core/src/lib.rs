//! Core parse-validate-normalize engine for GlucoGuard
//!
//! Turns untyped JSON device records (insulin delivery, glucose readings,
//! pump settings, alarms) into typed records, collecting a precise error for
//! every field that fails along the way.
//!
//! Key properties:
//! - Errors are data, never panics; one bad record never aborts a batch
//! - Every error carries a pointer to the exact field, e.g. `/3/carbRatio/0/start`
//! - Validation never short-circuits, so a record reports everything wrong with it
//!
//! ```rust
//! use glucoguard_core::{Context, ObjectParser, Validator};
//! use serde_json::json;
//!
//! let raw = json!({ "value": "high", "units": "mg/dL" });
//! let context = Context::new();
//! let parser = ObjectParser::new(context.clone(), raw.as_object());
//!
//! let value = parser.parse_float("value");
//! let units = parser.parse_string("units");
//!
//! let validator = Validator::new(context.clone());
//! validator.validate_float("value", value).exists();
//! validator
//!     .validate_string("units", units.as_deref())
//!     .one_of(&["mmol/L", "mg/dL"]);
//!
//! let pointers: Vec<_> = context.errors().iter().map(|e| e.pointer().map(str::to_string)).collect();
//! assert_eq!(pointers, vec![Some("/value".to_string()), Some("/value".to_string())]);
//! ```

#![deny(unsafe_code)]

#[macro_use]
mod logging;

pub mod config;
pub mod constants;
pub mod context;
pub mod dispatch;
pub mod errors;
pub mod ingest;
pub mod normalizer;
pub mod parser;
pub mod time;
pub mod units;
pub mod validator;

// Public API
pub use config::IngestConfig;
pub use context::Context;
pub use dispatch::{Constructor, Datum, Registry, RegistryError};
pub use errors::ErrorRecord;
pub use ingest::{ingest, ingest_json, IngestError, IngestOutcome};
pub use normalizer::{BloodGlucoseNormalizer, Normalizer};
pub use parser::{ArrayParser, ObjectParser};
pub use time::TimeLayout;
pub use units::BloodGlucoseUnits;
pub use validator::Validator;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
