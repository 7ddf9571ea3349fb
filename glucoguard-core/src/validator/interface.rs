use serde_json::Value;

use super::Field;

/// Presence constraints on a JSON value of any shape
#[derive(Debug, Clone)]
pub struct InterfaceValidator<'v> {
    field: Field,
    value: Option<&'v Value>,
}

impl<'v> InterfaceValidator<'v> {
    pub(super) fn new(field: Field, value: Option<&'v Value>) -> Self {
        Self { field, value }
    }

    presence_constraints!();
}

/// Constraints on an optional array of arbitrary JSON values
#[derive(Debug, Clone)]
pub struct InterfaceArrayValidator<'v> {
    field: Field,
    value: Option<&'v [Value]>,
}

impl<'v> InterfaceArrayValidator<'v> {
    pub(super) fn new(field: Field, value: Option<&'v [Value]>) -> Self {
        Self { field, value }
    }

    fn length(&self) -> Option<usize> {
        self.value.map(<[Value]>::len)
    }

    presence_constraints!();
    emptiness_constraints!();
    length_constraints!();
}
