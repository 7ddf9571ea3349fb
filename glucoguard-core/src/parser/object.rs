//! Key-based extraction from a JSON object

use std::cell::RefCell;
use std::collections::BTreeSet;

use serde_json::{Map, Value};

use super::{
    coerce_array, coerce_boolean, coerce_float, coerce_integer, coerce_object, coerce_string,
    extract, extract_object_array, extract_string_array, ArrayParser,
};
use crate::context::Context;
use crate::errors;

/// Parser over one JSON object, paired with the context node for that object
///
/// Keys that are looked up and found are remembered, so
/// [`check_unparsed`](Self::check_unparsed) can report fields the record
/// schema never consumed.
pub struct ObjectParser<'a> {
    context: Context,
    object: Option<&'a Map<String, Value>>,
    parsed: RefCell<BTreeSet<String>>,
}

impl<'a> ObjectParser<'a> {
    /// Create a parser; a `None` object answers every lookup with absence
    pub fn new(context: Context, object: Option<&'a Map<String, Value>>) -> Self {
        Self {
            context,
            object,
            parsed: RefCell::new(BTreeSet::new()),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn object(&self) -> Option<&'a Map<String, Value>> {
        self.object
    }

    /// True when the parser is backed by an object
    pub fn exists(&self) -> bool {
        self.object.is_some()
    }

    /// True when `key` is present, without marking it parsed
    pub fn contains(&self, key: &str) -> bool {
        self.object.is_some_and(|object| object.contains_key(key))
    }

    fn raw(&self, key: &str) -> Option<&'a Value> {
        let value = self.object?.get(key)?;
        self.parsed.borrow_mut().insert(key.to_string());
        Some(value)
    }

    pub fn parse_boolean(&self, key: &str) -> Option<bool> {
        extract(&self.context, key, self.raw(key), coerce_boolean)
    }

    pub fn parse_integer(&self, key: &str) -> Option<i64> {
        extract(&self.context, key, self.raw(key), coerce_integer)
    }

    pub fn parse_float(&self, key: &str) -> Option<f64> {
        extract(&self.context, key, self.raw(key), coerce_float)
    }

    pub fn parse_string(&self, key: &str) -> Option<String> {
        extract(&self.context, key, self.raw(key), coerce_string)
    }

    /// Parse an array of strings, keeping `""` for elements that are not strings
    pub fn parse_string_array(&self, key: &str) -> Option<Vec<String>> {
        extract_string_array(&self.context, key, self.raw(key))
    }

    pub fn parse_object(&self, key: &str) -> Option<&'a Map<String, Value>> {
        extract(&self.context, key, self.raw(key), coerce_object)
    }

    /// Parse an array of objects, keeping an empty map for elements that are not objects
    pub fn parse_object_array(&self, key: &str) -> Option<Vec<Map<String, Value>>> {
        extract_object_array(&self.context, key, self.raw(key))
    }

    /// Any present value, whatever its shape
    pub fn parse_interface(&self, key: &str) -> Option<&'a Value> {
        self.raw(key)
    }

    pub fn parse_interface_array(&self, key: &str) -> Option<&'a [Value]> {
        extract(&self.context, key, self.raw(key), coerce_array)
    }

    /// Parser for the object at `key`, with a context one segment deeper
    pub fn child_object_parser(&self, key: &str) -> ObjectParser<'a> {
        ObjectParser::new(self.context.child(key), self.parse_object(key))
    }

    /// Parser for the array at `key`, with a context one segment deeper
    pub fn child_array_parser(&self, key: &str) -> ArrayParser<'a> {
        ArrayParser::new(self.context.child(key), self.parse_interface_array(key))
    }

    /// Keys present in the object that no extraction has consumed
    pub fn unparsed_keys(&self) -> Vec<&'a str> {
        let Some(object) = self.object else {
            return Vec::new();
        };
        let parsed = self.parsed.borrow();
        object
            .keys()
            .filter(|key| !parsed.contains(key.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Append `value-not-parsed` for every unconsumed key
    pub fn check_unparsed(&self) {
        for key in self.unparsed_keys() {
            self.context.append_error(key, errors::value_not_parsed());
        }
    }
}
