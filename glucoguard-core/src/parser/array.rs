//! Index-based extraction from a JSON array

use serde_json::{Map, Value};

use super::{
    coerce_array, coerce_boolean, coerce_float, coerce_integer, coerce_object, coerce_string,
    extract, extract_object_array, extract_string_array, ObjectParser,
};
use crate::context::Context;

/// Parser over one JSON array, paired with the context node for that array
///
/// Indices past the end are absent rather than errors.
pub struct ArrayParser<'a> {
    context: Context,
    array: Option<&'a [Value]>,
}

impl<'a> ArrayParser<'a> {
    /// Create a parser; a `None` array answers every lookup with absence
    pub fn new(context: Context, array: Option<&'a [Value]>) -> Self {
        Self { context, array }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn array(&self) -> Option<&'a [Value]> {
        self.array
    }

    pub fn exists(&self) -> bool {
        self.array.is_some()
    }

    pub fn len(&self) -> usize {
        self.array.map_or(0, <[Value]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn raw(&self, index: usize) -> Option<&'a Value> {
        self.array?.get(index)
    }

    pub fn parse_boolean(&self, index: usize) -> Option<bool> {
        extract(&self.context, index, self.raw(index), coerce_boolean)
    }

    pub fn parse_integer(&self, index: usize) -> Option<i64> {
        extract(&self.context, index, self.raw(index), coerce_integer)
    }

    pub fn parse_float(&self, index: usize) -> Option<f64> {
        extract(&self.context, index, self.raw(index), coerce_float)
    }

    pub fn parse_string(&self, index: usize) -> Option<String> {
        extract(&self.context, index, self.raw(index), coerce_string)
    }

    pub fn parse_string_array(&self, index: usize) -> Option<Vec<String>> {
        extract_string_array(&self.context, index, self.raw(index))
    }

    pub fn parse_object(&self, index: usize) -> Option<&'a Map<String, Value>> {
        extract(&self.context, index, self.raw(index), coerce_object)
    }

    pub fn parse_object_array(&self, index: usize) -> Option<Vec<Map<String, Value>>> {
        extract_object_array(&self.context, index, self.raw(index))
    }

    pub fn parse_interface(&self, index: usize) -> Option<&'a Value> {
        self.raw(index)
    }

    pub fn parse_interface_array(&self, index: usize) -> Option<&'a [Value]> {
        extract(&self.context, index, self.raw(index), coerce_array)
    }

    pub fn child_object_parser(&self, index: usize) -> ObjectParser<'a> {
        ObjectParser::new(self.context.child(index), self.parse_object(index))
    }

    pub fn child_array_parser(&self, index: usize) -> ArrayParser<'a> {
        ArrayParser::new(self.context.child(index), self.parse_interface_array(index))
    }

    /// Run `parse` over a child object parser for every element
    ///
    /// Elements that are not objects get a `type-not-object` error and are
    /// handed to `parse` as a `None`-backed parser, so the result always has
    /// one entry per element. Returns `None` when the array itself is absent.
    pub fn parse_each<T>(&self, mut parse: impl FnMut(&ObjectParser<'a>) -> T) -> Option<Vec<T>> {
        let array = self.array?;
        Some(
            (0..array.len())
                .map(|index| parse(&self.child_object_parser(index)))
                .collect(),
        )
    }
}
