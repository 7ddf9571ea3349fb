use super::Field;
use crate::errors;

/// Constraints on an optional array of strings
///
/// Whole-array constraints report at the field; the `each_*` constraints
/// report at the offending element, one error per element.
#[derive(Debug, Clone)]
pub struct StringArrayValidator<'v> {
    field: Field,
    value: Option<&'v [String]>,
}

impl<'v> StringArrayValidator<'v> {
    pub(super) fn new(field: Field, value: Option<&'v [String]>) -> Self {
        Self { field, value }
    }

    fn length(&self) -> Option<usize> {
        self.value.map(<[String]>::len)
    }

    presence_constraints!();
    emptiness_constraints!();
    length_constraints!();

    pub fn each_not_empty(self) -> Self {
        if let Some(values) = self.value {
            let elements = self.field.elements();
            for (index, value) in values.iter().enumerate() {
                if value.is_empty() {
                    elements.append_error(index, errors::value_empty());
                }
            }
        }
        self
    }

    pub fn each_one_of(self, allowed: &[&str]) -> Self {
        if let Some(values) = self.value {
            let elements = self.field.elements();
            for (index, value) in values.iter().enumerate() {
                if !allowed.contains(&value.as_str()) {
                    elements.append_error(index, errors::value_not_one_of(value.as_str(), allowed));
                }
            }
        }
        self
    }

    pub fn each_not_one_of(self, disallowed: &[&str]) -> Self {
        if let Some(values) = self.value {
            let elements = self.field.elements();
            for (index, value) in values.iter().enumerate() {
                if disallowed.contains(&value.as_str()) {
                    elements.append_error(index, errors::value_one_of(value.as_str(), disallowed));
                }
            }
        }
        self
    }
}
