use super::Field;
use crate::errors;

/// Constraints on an optional string
///
/// Length is counted in characters, not bytes.
#[derive(Debug, Clone)]
pub struct StringValidator<'v> {
    field: Field,
    value: Option<&'v str>,
}

impl<'v> StringValidator<'v> {
    pub(super) fn new(field: Field, value: Option<&'v str>) -> Self {
        Self { field, value }
    }

    fn length(&self) -> Option<usize> {
        self.value.map(|value| value.chars().count())
    }

    presence_constraints!();
    emptiness_constraints!();
    length_constraints!();

    pub fn equal_to(self, limit: &str) -> Self {
        if let Some(value) = self.value {
            if value != limit {
                self.field
                    .report(errors::value_string_not_equal_to(value, limit));
            }
        }
        self
    }

    pub fn not_equal_to(self, limit: &str) -> Self {
        if let Some(value) = self.value {
            if value == limit {
                self.field.report(errors::value_string_equal_to(value, limit));
            }
        }
        self
    }

    pub fn one_of(self, allowed: &[&str]) -> Self {
        if let Some(value) = self.value {
            if !allowed.contains(&value) {
                self.field.report(errors::value_not_one_of(value, allowed));
            }
        }
        self
    }

    pub fn not_one_of(self, disallowed: &[&str]) -> Self {
        if let Some(value) = self.value {
            if disallowed.contains(&value) {
                self.field.report(errors::value_one_of(value, disallowed));
            }
        }
        self
    }
}
