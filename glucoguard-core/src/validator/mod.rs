//! Fluent Field Validators
//!
//! ## Overview
//!
//! After a record has been parsed into typed fields, its `validate` method
//! states the rules each field must satisfy. A [`Validator`] is bound to a
//! context node; its `validate_*` methods wrap one field and return a typed
//! sub-validator whose constraint methods can be chained:
//!
//! ```rust
//! use glucoguard_core::{context::Context, validator::Validator};
//!
//! let context = Context::new();
//! let validator = Validator::new(context.clone());
//!
//! validator
//!     .validate_float("normal", Some(120.0))
//!     .exists()
//!     .greater_than_or_equal_to(0.0)
//!     .less_than_or_equal_to(100.0);
//!
//! assert_eq!(context.errors()[0].pointer(), Some("/normal"));
//! ```
//!
//! ## Chaining Contract
//!
//! - Every constraint method appends **at most one** error and returns the
//!   same validator, so a chain never short-circuits. A value that breaks three
//!   rules produces three errors, each naming the rule it broke.
//! - An absent value (`None`) is not an error by itself. Only `exists()`
//!   reports absence; every other constraint is a no-op on `None`.
//! - `in_range` bounds are inclusive at both ends.
//!
//! ## Sub-Validators
//!
//! | field shape     | validator                  |
//! |-----------------|----------------------------|
//! | `bool`          | [`BooleanValidator`]       |
//! | `i64` / `f64`   | [`IntegerValidator`] / [`FloatValidator`] |
//! | `&str`          | [`StringValidator`]        |
//! | `&[String]`     | [`StringArrayValidator`]   |
//! | JSON object     | [`ObjectValidator`]        |
//! | slice of items  | [`ObjectArrayValidator`]   |
//! | any JSON value  | [`InterfaceValidator`]     |
//! | `&[Value]`      | [`InterfaceArrayValidator`] |
//! | time string     | [`TimeValidator`]          |
//!
//! ## Nested Structures
//!
//! [`Validator::child`] returns a validator one path segment deeper that shares
//! the root error collection, so nested items validate themselves in place:
//!
//! ```rust
//! # use glucoguard_core::{context::Context, validator::Validator};
//! let context = Context::new();
//! let validator = Validator::new(context.clone());
//!
//! let starts = [0_i64, 90_000_000];
//! let schedule = validator.child("carbRatio");
//! for (index, start) in starts.iter().enumerate() {
//!     schedule
//!         .child(index)
//!         .validate_integer("start", Some(*start))
//!         .in_range(0, 86_400_000);
//! }
//!
//! assert_eq!(context.errors()[0].pointer(), Some("/carbRatio/1/start"));
//! ```

use std::fmt::Display;

use serde_json::{Map, Value};

use crate::context::Context;
use crate::errors::ErrorRecord;
use crate::time::TimeLayout;

/// Generates `exists` / `not_exists` for a validator with an optional `value`
macro_rules! presence_constraints {
    () => {
        /// Fails when the value is absent
        pub fn exists(self) -> Self {
            if self.value.is_none() {
                self.field.report($crate::errors::value_not_exists());
            }
            self
        }

        /// Fails when the value is present
        pub fn not_exists(self) -> Self {
            if self.value.is_some() {
                self.field.report($crate::errors::value_exists());
            }
            self
        }
    };
}

/// Generates the `length_*` family for a validator with a `length()` helper
macro_rules! length_constraints {
    () => {
        pub fn length_equal_to(self, limit: usize) -> Self {
            if let Some(length) = self.length() {
                if length != limit {
                    self.field.report($crate::errors::length_not_equal_to(length, limit));
                }
            }
            self
        }

        pub fn length_not_equal_to(self, limit: usize) -> Self {
            if let Some(length) = self.length() {
                if length == limit {
                    self.field.report($crate::errors::length_equal_to(length, limit));
                }
            }
            self
        }

        pub fn length_less_than(self, limit: usize) -> Self {
            if let Some(length) = self.length() {
                if length >= limit {
                    self.field.report($crate::errors::length_not_less_than(length, limit));
                }
            }
            self
        }

        pub fn length_less_than_or_equal_to(self, limit: usize) -> Self {
            if let Some(length) = self.length() {
                if length > limit {
                    self.field
                        .report($crate::errors::length_not_less_than_or_equal_to(length, limit));
                }
            }
            self
        }

        pub fn length_greater_than(self, limit: usize) -> Self {
            if let Some(length) = self.length() {
                if length <= limit {
                    self.field.report($crate::errors::length_not_greater_than(length, limit));
                }
            }
            self
        }

        pub fn length_greater_than_or_equal_to(self, limit: usize) -> Self {
            if let Some(length) = self.length() {
                if length < limit {
                    self.field.report(
                        $crate::errors::length_not_greater_than_or_equal_to(length, limit),
                    );
                }
            }
            self
        }

        /// Fails unless `lower <= length <= upper`
        pub fn length_in_range(self, lower: usize, upper: usize) -> Self {
            if let Some(length) = self.length() {
                if length < lower || length > upper {
                    self.field
                        .report($crate::errors::length_not_in_range(length, lower, upper));
                }
            }
            self
        }
    };
}

/// Generates `empty` / `not_empty` for a validator with a `length()` helper
macro_rules! emptiness_constraints {
    () => {
        /// Fails when the value is present and not empty
        pub fn empty(self) -> Self {
            if matches!(self.length(), Some(length) if length > 0) {
                self.field.report($crate::errors::value_not_empty());
            }
            self
        }

        /// Fails when the value is present and empty
        pub fn not_empty(self) -> Self {
            if self.length() == Some(0) {
                self.field.report($crate::errors::value_empty());
            }
            self
        }
    };
}

mod boolean;
mod interface;
mod number;
mod object;
mod string;
mod string_array;
mod time;

pub use boolean::BooleanValidator;
pub use interface::{InterfaceArrayValidator, InterfaceValidator};
pub use number::{FloatValidator, IntegerValidator, NumberValidator};
pub use object::{ObjectArrayValidator, ObjectValidator};
pub use string::StringValidator;
pub use string_array::StringArrayValidator;
pub use time::TimeValidator;

/// The field a sub-validator reports against
#[derive(Debug, Clone)]
struct Field {
    context: Context,
    reference: String,
}

impl Field {
    fn new(context: &Context, reference: impl Display) -> Self {
        Self {
            context: context.clone(),
            reference: reference.to_string(),
        }
    }

    fn report(&self, error: ErrorRecord) {
        self.context.append_error(&self.reference, error);
    }

    /// Context for elements beneath this field
    fn elements(&self) -> Context {
        self.context.child(&self.reference)
    }
}

/// Entry point for record validation, bound to one context node
#[derive(Debug, Clone)]
pub struct Validator {
    context: Context,
}

impl Validator {
    pub fn new(context: Context) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Validator one segment deeper, sharing the error collection
    pub fn child(&self, reference: impl Display) -> Validator {
        Validator::new(self.context.child(reference))
    }

    /// Record a rule violation that no sub-validator expresses
    pub fn append_error(&self, reference: impl Display, error: ErrorRecord) {
        self.context.append_error(reference, error);
    }

    pub fn validate_boolean(&self, reference: impl Display, value: Option<bool>) -> BooleanValidator {
        BooleanValidator::new(Field::new(&self.context, reference), value)
    }

    pub fn validate_integer(&self, reference: impl Display, value: Option<i64>) -> IntegerValidator {
        NumberValidator::new(Field::new(&self.context, reference), value)
    }

    pub fn validate_float(&self, reference: impl Display, value: Option<f64>) -> FloatValidator {
        NumberValidator::new(Field::new(&self.context, reference), value)
    }

    pub fn validate_string<'v>(
        &self,
        reference: impl Display,
        value: Option<&'v str>,
    ) -> StringValidator<'v> {
        StringValidator::new(Field::new(&self.context, reference), value)
    }

    pub fn validate_string_array<'v>(
        &self,
        reference: impl Display,
        value: Option<&'v [String]>,
    ) -> StringArrayValidator<'v> {
        StringArrayValidator::new(Field::new(&self.context, reference), value)
    }

    pub fn validate_object<'v>(
        &self,
        reference: impl Display,
        value: Option<&'v Map<String, Value>>,
    ) -> ObjectValidator<'v> {
        ObjectValidator::new(Field::new(&self.context, reference), value)
    }

    /// Validate a collection of nested items, typed or raw
    pub fn validate_object_array<'v, T>(
        &self,
        reference: impl Display,
        value: Option<&'v [T]>,
    ) -> ObjectArrayValidator<'v, T> {
        ObjectArrayValidator::new(Field::new(&self.context, reference), value)
    }

    pub fn validate_interface<'v>(
        &self,
        reference: impl Display,
        value: Option<&'v Value>,
    ) -> InterfaceValidator<'v> {
        InterfaceValidator::new(Field::new(&self.context, reference), value)
    }

    pub fn validate_interface_array<'v>(
        &self,
        reference: impl Display,
        value: Option<&'v [Value]>,
    ) -> InterfaceArrayValidator<'v> {
        InterfaceArrayValidator::new(Field::new(&self.context, reference), value)
    }

    /// Validate a timestamp string laid out as `layout`
    ///
    /// A present string that does not match the layout is reported as
    /// `time-not-valid` here, once; the ordering constraints then no-op.
    pub fn validate_string_as_time(
        &self,
        reference: impl Display,
        value: Option<&str>,
        layout: TimeLayout,
    ) -> TimeValidator {
        TimeValidator::new(Field::new(&self.context, reference), value, layout)
    }
}
