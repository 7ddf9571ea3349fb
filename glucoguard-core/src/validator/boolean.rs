use super::Field;
use crate::errors;

/// Constraints on an optional `bool`
#[derive(Debug, Clone)]
pub struct BooleanValidator {
    field: Field,
    value: Option<bool>,
}

impl BooleanValidator {
    pub(super) fn new(field: Field, value: Option<bool>) -> Self {
        Self { field, value }
    }

    presence_constraints!();

    pub fn is_true(self) -> Self {
        if self.value == Some(false) {
            self.field.report(errors::value_not_true());
        }
        self
    }

    pub fn is_false(self) -> Self {
        if self.value == Some(true) {
            self.field.report(errors::value_not_false());
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::errors::codes;
    use crate::validator::Validator;

    #[test]
    fn truthiness() {
        let context = Context::new();
        let validator = Validator::new(context.clone());

        validator.validate_boolean("a", Some(true)).is_true().is_false();
        validator.validate_boolean("b", Some(false)).is_false().is_true();
        validator.validate_boolean("c", None).is_true().is_false();

        let recorded = context.errors();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].code, codes::VALUE_NOT_FALSE);
        assert_eq!(recorded[0].pointer(), Some("/a"));
        assert_eq!(recorded[1].code, codes::VALUE_NOT_TRUE);
        assert_eq!(recorded[1].pointer(), Some("/b"));
    }

    #[test]
    fn presence() {
        let context = Context::new();
        let validator = Validator::new(context.clone());

        validator.validate_boolean("present", Some(false)).exists().not_exists();
        validator.validate_boolean("absent", None).not_exists();

        let recorded = context.errors();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].code, codes::VALUE_EXISTS);
    }
}
