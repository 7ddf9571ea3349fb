//! Typed extraction from untyped JSON trees
//!
//! ## Overview
//!
//! Records arrive as `serde_json::Value` trees whose true schema is only known
//! once the record's type has been resolved. The parsers walk those trees one
//! field at a time:
//!
//! - [`ObjectParser`] extracts by string key from a JSON object
//! - [`ArrayParser`] extracts by 0-based index from a JSON array
//!
//! ## Extraction Contract
//!
//! Every `parse_*` call ends in exactly one of three states:
//!
//! | input                         | result   | error appended          |
//! |-------------------------------|----------|-------------------------|
//! | key absent / index past end   | `None`   | none                    |
//! | present, coercible            | `Some`   | none                    |
//! | present, wrong shape (incl. `null`) | `None` | `type-not-*` at the key |
//!
//! A failure never aborts the record; sibling fields are still extracted.
//!
//! ## Numeric Coercion
//!
//! - Integer extraction accepts a float only when it has no fractional part
//!   (`4.0` → `4`, `5.67` → error).
//! - Float extraction widens integers (`6` → `6.0`).
//!
//! ## Partial Arrays
//!
//! String and object arrays are parsed element by element through a child
//! [`ArrayParser`]. A bad element yields a zero-value placeholder at its index
//! and one error at `/key/index`; the rest of the array is still returned:
//!
//! ```rust
//! use glucoguard_core::{context::Context, parser::ObjectParser};
//! use serde_json::json;
//!
//! let raw = json!({ "tags": ["five", 6] });
//! let context = Context::new();
//! let parser = ObjectParser::new(context.clone(), raw.as_object());
//!
//! assert_eq!(parser.parse_string_array("tags"), Some(vec!["five".to_string(), String::new()]));
//! assert_eq!(context.errors()[0].pointer(), Some("/tags/1"));
//! ```
//!
//! ## Nested Structures
//!
//! `child_object_parser` / `child_array_parser` descend into a nested value.
//! When the nested value is absent or has the wrong shape the child is backed by
//! `None` and answers every extraction with absence, so record code can recurse
//! unconditionally into optional structures.

mod array;
mod object;

pub use array::ArrayParser;
pub use object::ObjectParser;

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::context::Context;
use crate::errors::{self, ErrorRecord};

fn coerce_boolean(value: &Value) -> Result<bool, ErrorRecord> {
    value.as_bool().ok_or_else(|| errors::type_not_boolean(value))
}

fn coerce_integer(value: &Value) -> Result<i64, ErrorRecord> {
    let Value::Number(number) = value else {
        return Err(errors::type_not_integer(value));
    };

    if let Some(integer) = number.as_i64() {
        return Ok(integer);
    }

    match number.as_f64() {
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        Some(float)
            if number.is_f64()
                && float.is_finite()
                && float.trunc() == float
                && float >= i64::MIN as f64
                && float < i64::MAX as f64 =>
        {
            Ok(float as i64)
        }
        _ => Err(errors::type_not_integer(value)),
    }
}

fn coerce_float(value: &Value) -> Result<f64, ErrorRecord> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| errors::type_not_float(value)),
        _ => Err(errors::type_not_float(value)),
    }
}

fn coerce_string(value: &Value) -> Result<String, ErrorRecord> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| errors::type_not_string(value))
}

fn coerce_object(value: &Value) -> Result<&Map<String, Value>, ErrorRecord> {
    value.as_object().ok_or_else(|| errors::type_not_object(value))
}

fn coerce_array(value: &Value) -> Result<&[Value], ErrorRecord> {
    value
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| errors::type_not_array(value))
}

/// Run `coerce` over a looked-up value, recording a failure at `reference`
fn extract<'a, T>(
    context: &Context,
    reference: impl Display,
    raw: Option<&'a Value>,
    coerce: impl FnOnce(&'a Value) -> Result<T, ErrorRecord>,
) -> Option<T> {
    match coerce(raw?) {
        Ok(value) => Some(value),
        Err(error) => {
            context.append_error(reference, error);
            None
        }
    }
}

fn extract_string_array(context: &Context, reference: impl Display, raw: Option<&Value>) -> Option<Vec<String>> {
    let array = extract(context, &reference, raw, coerce_array)?;
    let elements = ArrayParser::new(context.child(&reference), Some(array));
    Some(
        (0..array.len())
            .map(|index| elements.parse_string(index).unwrap_or_default())
            .collect(),
    )
}

fn extract_object_array(
    context: &Context,
    reference: impl Display,
    raw: Option<&Value>,
) -> Option<Vec<Map<String, Value>>> {
    let array = extract(context, &reference, raw, coerce_array)?;
    let elements = ArrayParser::new(context.child(&reference), Some(array));
    Some(
        (0..array.len())
            .map(|index| elements.parse_object(index).cloned().unwrap_or_default())
            .collect(),
    )
}
