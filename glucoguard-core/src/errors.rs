//! Error Records for Record-Level Diagnostics
//!
//! ## Design Philosophy
//!
//! GlucoGuard never stops at the first problem in a submission. A device upload
//! is typically hundreds of records, and a client fixing a broken uploader needs
//! to see every offending field at once. Record errors are therefore *data*:
//!
//! 1. **Accumulated, never thrown**: Errors are appended to a shared
//!    [`Context`](crate::context::Context) and the caller inspects them after the
//!    whole batch has been processed.
//!
//! 2. **Stable codes**: `code` and `title` are a wire contract. Once a code has
//!    shipped it keeps its meaning; new failure modes get new codes.
//!
//! 3. **Located**: Every appended error carries a source pointer built from the
//!    context path (`/0/carbRatio/1/start`), so a client can highlight the field.
//!
//! ## Error Categories
//!
//! ### Type Coercion
//! - `type-not-boolean`, `type-not-integer`, `type-not-float`,
//!   `type-not-string`, `type-not-object`, `type-not-array`
//!
//! ### Presence
//! - `value-does-not-exist`: required field absent
//! - `value-exists`: field present where it must not be
//! - `value-not-parsed`: field supplied but never consumed by the record schema
//!
//! ### Range and Membership
//! - `value-out-of-range`: numeric comparison failed
//! - `value-not-allowed`: equality or membership failed
//! - `length-out-of-range`: string/array length constraint failed
//! - `value-empty`, `value-not-empty`, `value-not-true`, `value-not-false`
//!
//! ### Dispatch
//! - `type-invalid`, `sub-type-invalid`
//!
//! ### Time
//! - `time-not-valid`, `time-not-after`, `time-not-before`
//!
//! ## Wire Shape
//!
//! ```json
//! {
//!   "code": "value-out-of-range",
//!   "title": "value is out of range",
//!   "detail": "value 120.5 is not between 0 and 100",
//!   "source": { "pointer": "/3/normal" }
//! }
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use glucoguard_core::{context::Context, errors};
//!
//! let context = Context::new();
//! context.child("carbRatio").append_error(0, errors::value_not_exists());
//!
//! let recorded = context.errors();
//! assert_eq!(recorded[0].code, errors::codes::VALUE_NOT_EXISTS);
//! assert_eq!(recorded[0].pointer(), Some("/carbRatio/0"));
//! ```

use std::fmt::{Debug, Display};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Stable error codes
pub mod codes {
    pub const TYPE_NOT_BOOLEAN: &str = "type-not-boolean";
    pub const TYPE_NOT_INTEGER: &str = "type-not-integer";
    pub const TYPE_NOT_FLOAT: &str = "type-not-float";
    pub const TYPE_NOT_STRING: &str = "type-not-string";
    pub const TYPE_NOT_OBJECT: &str = "type-not-object";
    pub const TYPE_NOT_ARRAY: &str = "type-not-array";

    pub const VALUE_NOT_EXISTS: &str = "value-does-not-exist";
    pub const VALUE_EXISTS: &str = "value-exists";
    pub const VALUE_NOT_PARSED: &str = "value-not-parsed";

    pub const VALUE_OUT_OF_RANGE: &str = "value-out-of-range";
    pub const VALUE_NOT_ALLOWED: &str = "value-not-allowed";
    pub const LENGTH_OUT_OF_RANGE: &str = "length-out-of-range";
    pub const VALUE_EMPTY: &str = "value-empty";
    pub const VALUE_NOT_EMPTY: &str = "value-not-empty";
    pub const VALUE_NOT_TRUE: &str = "value-not-true";
    pub const VALUE_NOT_FALSE: &str = "value-not-false";

    pub const TYPE_INVALID: &str = "type-invalid";
    pub const SUB_TYPE_INVALID: &str = "sub-type-invalid";

    pub const TIME_NOT_VALID: &str = "time-not-valid";
    pub const TIME_NOT_AFTER: &str = "time-not-after";
    pub const TIME_NOT_BEFORE: &str = "time-not-before";
}

/// Location of an error within the submitted document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Slash-delimited path, analogous to a JSON Pointer
    pub pointer: String,
}

/// A single record-level diagnostic
///
/// Built by the constructor functions in this module and located by
/// [`Context::append_error`](crate::context::Context::append_error), which
/// fills in the source pointer.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{title}: {detail}")]
pub struct ErrorRecord {
    /// Stable machine-readable code (see [`codes`])
    pub code: String,

    /// Short human-readable summary, fixed per code
    pub title: String,

    /// Value-specific explanation
    pub detail: String,

    /// Where the error occurred; `None` until appended to a context
    #[serde(rename = "source", default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Source>,
}

impl ErrorRecord {
    /// Create an unlocated error
    pub fn new(code: &str, title: &str, detail: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            title: title.to_string(),
            detail: detail.into(),
            origin: None,
        }
    }

    /// Attach a source pointer, replacing any existing one
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.origin = Some(Source {
            pointer: pointer.into(),
        });
        self
    }

    /// Source pointer, if the error has been located
    pub fn pointer(&self) -> Option<&str> {
        self.origin.as_ref().map(|source| source.pointer.as_str())
    }
}

/// Human-readable name of a JSON value's shape, used in type-mismatch details
pub fn describe_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_not(code: &str, expected: &str, value: &Value) -> ErrorRecord {
    ErrorRecord::new(
        code,
        &format!("type is not {}", expected),
        format!("type is not {}, but {}", expected, describe_type(value)),
    )
}

pub fn type_not_boolean(value: &Value) -> ErrorRecord {
    type_not(codes::TYPE_NOT_BOOLEAN, "boolean", value)
}

pub fn type_not_integer(value: &Value) -> ErrorRecord {
    type_not(codes::TYPE_NOT_INTEGER, "integer", value)
}

pub fn type_not_float(value: &Value) -> ErrorRecord {
    type_not(codes::TYPE_NOT_FLOAT, "float", value)
}

pub fn type_not_string(value: &Value) -> ErrorRecord {
    type_not(codes::TYPE_NOT_STRING, "string", value)
}

pub fn type_not_object(value: &Value) -> ErrorRecord {
    type_not(codes::TYPE_NOT_OBJECT, "object", value)
}

pub fn type_not_array(value: &Value) -> ErrorRecord {
    type_not(codes::TYPE_NOT_ARRAY, "array", value)
}

pub fn value_not_exists() -> ErrorRecord {
    ErrorRecord::new(
        codes::VALUE_NOT_EXISTS,
        "value does not exist",
        "value does not exist",
    )
}

pub fn value_exists() -> ErrorRecord {
    ErrorRecord::new(codes::VALUE_EXISTS, "value exists", "value exists")
}

pub fn value_not_parsed() -> ErrorRecord {
    ErrorRecord::new(
        codes::VALUE_NOT_PARSED,
        "value is not parsed",
        "value is not parsed",
    )
}

pub fn value_not_true() -> ErrorRecord {
    ErrorRecord::new(codes::VALUE_NOT_TRUE, "value is not true", "value is not true")
}

pub fn value_not_false() -> ErrorRecord {
    ErrorRecord::new(
        codes::VALUE_NOT_FALSE,
        "value is not false",
        "value is not false",
    )
}

pub fn value_empty() -> ErrorRecord {
    ErrorRecord::new(codes::VALUE_EMPTY, "value is empty", "value is empty")
}

pub fn value_not_empty() -> ErrorRecord {
    ErrorRecord::new(codes::VALUE_NOT_EMPTY, "value is not empty", "value is not empty")
}

fn out_of_range(detail: String) -> ErrorRecord {
    ErrorRecord::new(codes::VALUE_OUT_OF_RANGE, "value is out of range", detail)
}

pub fn value_not_equal_to<T: Display>(value: T, limit: T) -> ErrorRecord {
    out_of_range(format!("value {} is not equal to {}", value, limit))
}

pub fn value_equal_to<T: Display>(value: T, limit: T) -> ErrorRecord {
    out_of_range(format!("value {} is equal to {}", value, limit))
}

pub fn value_not_less_than<T: Display>(value: T, limit: T) -> ErrorRecord {
    out_of_range(format!("value {} is not less than {}", value, limit))
}

pub fn value_not_less_than_or_equal_to<T: Display>(value: T, limit: T) -> ErrorRecord {
    out_of_range(format!(
        "value {} is not less than or equal to {}",
        value, limit
    ))
}

pub fn value_not_greater_than<T: Display>(value: T, limit: T) -> ErrorRecord {
    out_of_range(format!("value {} is not greater than {}", value, limit))
}

pub fn value_not_greater_than_or_equal_to<T: Display>(value: T, limit: T) -> ErrorRecord {
    out_of_range(format!(
        "value {} is not greater than or equal to {}",
        value, limit
    ))
}

pub fn value_not_in_range<T: Display>(value: T, lower: T, upper: T) -> ErrorRecord {
    out_of_range(format!(
        "value {} is not between {} and {}",
        value, lower, upper
    ))
}

fn not_allowed(detail: String) -> ErrorRecord {
    ErrorRecord::new(
        codes::VALUE_NOT_ALLOWED,
        "value is not one of the allowed values",
        detail,
    )
}

pub fn value_string_not_equal_to(value: &str, limit: &str) -> ErrorRecord {
    not_allowed(format!("value {:?} is not equal to {:?}", value, limit))
}

pub fn value_string_equal_to(value: &str, limit: &str) -> ErrorRecord {
    not_allowed(format!("value {:?} is equal to {:?}", value, limit))
}

pub fn value_not_one_of<T: Debug>(value: T, allowed: &[T]) -> ErrorRecord {
    not_allowed(format!("value {:?} is not one of {:?}", value, allowed))
}

pub fn value_one_of<T: Debug>(value: T, disallowed: &[T]) -> ErrorRecord {
    not_allowed(format!("value {:?} is one of {:?}", value, disallowed))
}

fn length_out_of_range(detail: String) -> ErrorRecord {
    ErrorRecord::new(codes::LENGTH_OUT_OF_RANGE, "length is out of range", detail)
}

pub fn length_not_equal_to(length: usize, limit: usize) -> ErrorRecord {
    length_out_of_range(format!("length {} is not equal to {}", length, limit))
}

pub fn length_equal_to(length: usize, limit: usize) -> ErrorRecord {
    length_out_of_range(format!("length {} is equal to {}", length, limit))
}

pub fn length_not_less_than(length: usize, limit: usize) -> ErrorRecord {
    length_out_of_range(format!("length {} is not less than {}", length, limit))
}

pub fn length_not_less_than_or_equal_to(length: usize, limit: usize) -> ErrorRecord {
    length_out_of_range(format!(
        "length {} is not less than or equal to {}",
        length, limit
    ))
}

pub fn length_not_greater_than(length: usize, limit: usize) -> ErrorRecord {
    length_out_of_range(format!("length {} is not greater than {}", length, limit))
}

pub fn length_not_greater_than_or_equal_to(length: usize, limit: usize) -> ErrorRecord {
    length_out_of_range(format!(
        "length {} is not greater than or equal to {}",
        length, limit
    ))
}

pub fn length_not_in_range(length: usize, lower: usize, upper: usize) -> ErrorRecord {
    length_out_of_range(format!(
        "length {} is not between {} and {}",
        length, lower, upper
    ))
}

pub fn type_invalid(value: &str) -> ErrorRecord {
    ErrorRecord::new(
        codes::TYPE_INVALID,
        "type is invalid",
        format!("type {:?} is invalid", value),
    )
}

pub fn sub_type_invalid(value: &str) -> ErrorRecord {
    ErrorRecord::new(
        codes::SUB_TYPE_INVALID,
        "sub type is invalid",
        format!("sub type {:?} is invalid", value),
    )
}

pub fn time_not_valid(value: &str, layout: &str) -> ErrorRecord {
    ErrorRecord::new(
        codes::TIME_NOT_VALID,
        "value is not a valid time",
        format!("value {:?} is not valid as time with layout {:?}", value, layout),
    )
}

pub fn time_not_after(value: impl Display, limit: impl Display) -> ErrorRecord {
    ErrorRecord::new(
        codes::TIME_NOT_AFTER,
        "value is not after the specified time",
        format!("value {} is not after {}", value, limit),
    )
}

pub fn time_not_before(value: impl Display, limit: impl Display) -> ErrorRecord {
    ErrorRecord::new(
        codes::TIME_NOT_BEFORE,
        "value is not before the specified time",
        format!("value {} is not before {}", value, limit),
    )
}
