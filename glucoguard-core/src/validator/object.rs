use serde_json::{Map, Value};

use super::Field;

/// Constraints on an optional JSON object
#[derive(Debug, Clone)]
pub struct ObjectValidator<'v> {
    field: Field,
    value: Option<&'v Map<String, Value>>,
}

impl<'v> ObjectValidator<'v> {
    pub(super) fn new(field: Field, value: Option<&'v Map<String, Value>>) -> Self {
        Self { field, value }
    }

    fn length(&self) -> Option<usize> {
        self.value.map(Map::len)
    }

    presence_constraints!();
    emptiness_constraints!();
}

/// Constraints on an optional collection of nested items
///
/// Item contents are validated by the items themselves through
/// [`Validator::child`](super::Validator::child); this only sees the count.
#[derive(Debug)]
pub struct ObjectArrayValidator<'v, T> {
    field: Field,
    value: Option<&'v [T]>,
}

impl<'v, T> ObjectArrayValidator<'v, T> {
    pub(super) fn new(field: Field, value: Option<&'v [T]>) -> Self {
        Self { field, value }
    }

    fn length(&self) -> Option<usize> {
        self.value.map(<[T]>::len)
    }

    presence_constraints!();
    emptiness_constraints!();
    length_constraints!();
}
