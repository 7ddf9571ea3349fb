//! Numeric constraints, shared by integers and floats

use std::fmt::{Debug, Display};

use super::Field;
use crate::errors;

/// Constraints on an optional number
///
/// Comparisons use `PartialOrd`; a NaN never satisfies an ordering constraint
/// and is reported by each one.
#[derive(Debug, Clone)]
pub struct NumberValidator<T> {
    field: Field,
    value: Option<T>,
}

pub type IntegerValidator = NumberValidator<i64>;
pub type FloatValidator = NumberValidator<f64>;

#[allow(clippy::neg_cmp_op_on_partial_ord)]
impl<T> NumberValidator<T>
where
    T: Copy + PartialOrd + Display + Debug,
{
    pub(super) fn new(field: Field, value: Option<T>) -> Self {
        Self { field, value }
    }

    presence_constraints!();

    pub fn equal_to(self, limit: T) -> Self {
        if let Some(value) = self.value {
            if value != limit {
                self.field.report(errors::value_not_equal_to(value, limit));
            }
        }
        self
    }

    pub fn not_equal_to(self, limit: T) -> Self {
        if let Some(value) = self.value {
            if value == limit {
                self.field.report(errors::value_equal_to(value, limit));
            }
        }
        self
    }

    pub fn less_than(self, limit: T) -> Self {
        if let Some(value) = self.value {
            if !(value < limit) {
                self.field.report(errors::value_not_less_than(value, limit));
            }
        }
        self
    }

    pub fn less_than_or_equal_to(self, limit: T) -> Self {
        if let Some(value) = self.value {
            if !(value <= limit) {
                self.field
                    .report(errors::value_not_less_than_or_equal_to(value, limit));
            }
        }
        self
    }

    pub fn greater_than(self, limit: T) -> Self {
        if let Some(value) = self.value {
            if !(value > limit) {
                self.field.report(errors::value_not_greater_than(value, limit));
            }
        }
        self
    }

    pub fn greater_than_or_equal_to(self, limit: T) -> Self {
        if let Some(value) = self.value {
            if !(value >= limit) {
                self.field
                    .report(errors::value_not_greater_than_or_equal_to(value, limit));
            }
        }
        self
    }

    /// Fails unless `lower <= value <= upper`
    pub fn in_range(self, lower: T, upper: T) -> Self {
        if let Some(value) = self.value {
            if !(lower <= value && value <= upper) {
                self.field
                    .report(errors::value_not_in_range(value, lower, upper));
            }
        }
        self
    }

    pub fn one_of(self, allowed: &[T]) -> Self {
        if let Some(value) = self.value {
            if !allowed.contains(&value) {
                self.field.report(errors::value_not_one_of(value, allowed));
            }
        }
        self
    }

    pub fn not_one_of(self, disallowed: &[T]) -> Self {
        if let Some(value) = self.value {
            if disallowed.contains(&value) {
                self.field.report(errors::value_one_of(value, disallowed));
            }
        }
        self
    }
}
