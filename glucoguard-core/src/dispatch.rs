//! Record type dispatch
//!
//! ## The `Datum` capability
//!
//! Every concrete record variant implements [`Datum`]: it knows how to pull its
//! fields out of an [`ObjectParser`], how to state its rules against a
//! [`Validator`], and how to rewrite itself through a [`Normalizer`]. The engine
//! never names a concrete variant; it only holds `Box<dyn Datum>`.
//!
//! ## The `Registry`
//!
//! A [`Registry`] maps the discriminator pair `(type, subType)` to a
//! constructor. A type is registered either as single-shape (no `subType`) or
//! as a family of sub-types, never both:
//!
//! ```text
//! "cbg"    ──► Single(Cbg::new)
//! "bolus"  ──► Sub { "normal" ──► Normal::new, "square" ──► Square::new, ... }
//! ```
//!
//! [`Registry::resolve`] reads the discriminators from the raw record, reports
//! what is missing or unknown on the record's context and, on a match,
//! constructs the variant and runs its `parse`. Nested structures are parsed
//! by the variant itself; there is only ever one dispatch per record.

use std::any::Any;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt::Debug;

use serde_json::Value;
use thiserror::Error;

use crate::errors;
use crate::normalizer::Normalizer;
use crate::parser::ObjectParser;
use crate::validator::Validator;

/// Discriminator field naming the record type
pub const TYPE_KEY: &str = "type";
/// Discriminator field naming the variant within a type
pub const SUB_TYPE_KEY: &str = "subType";

/// A polymorphic device record
pub trait Datum: Debug {
    /// Extract fields from the raw record, recording type mismatches
    fn parse(&mut self, parser: &ObjectParser<'_>);

    /// Check every field rule; never stops at the first failure
    fn validate(&self, validator: &Validator);

    /// Rewrite fields into canonical form; only called on valid records
    fn normalize(&mut self, normalizer: &Normalizer);

    fn datum_type(&self) -> &str;

    fn sub_type(&self) -> Option<&str>;

    /// JSON rendering of the record as it now stands
    fn to_value(&self) -> serde_json::Result<Value>;

    fn as_any(&self) -> &dyn Any;
}

/// Builds an empty record ready to be parsed
pub type Constructor = fn() -> Box<dyn Datum>;

/// Registration conflicts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The exact discriminator pair is already taken
    #[error("Duplicate registration: type {datum_type:?}, sub type {sub_type:?}")]
    Duplicate {
        datum_type: String,
        sub_type: Option<String>,
    },

    /// A type cannot be both single-shape and sub-typed
    #[error("Conflicting registration: type {0:?} mixes single-shape and sub-typed variants")]
    ConflictingShape(String),
}

#[derive(Debug, Clone)]
enum Shape {
    Single(Constructor),
    Sub(BTreeMap<String, Constructor>),
}

/// Lookup table from discriminators to constructors
#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: BTreeMap<String, Shape>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `constructor` under `datum_type` and an optional sub-type
    pub fn register(
        &mut self,
        datum_type: &str,
        sub_type: Option<&str>,
        constructor: Constructor,
    ) -> Result<(), RegistryError> {
        let duplicate = || RegistryError::Duplicate {
            datum_type: datum_type.to_string(),
            sub_type: sub_type.map(str::to_string),
        };

        match self.types.entry(datum_type.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(match sub_type {
                    None => Shape::Single(constructor),
                    Some(sub_type) => {
                        Shape::Sub(BTreeMap::from([(sub_type.to_string(), constructor)]))
                    }
                });
            }
            Entry::Occupied(mut entry) => match (entry.get_mut(), sub_type) {
                (Shape::Single(_), None) => return Err(duplicate()),
                (Shape::Sub(variants), Some(sub_type)) => {
                    if variants.contains_key(sub_type) {
                        return Err(duplicate());
                    }
                    variants.insert(sub_type.to_string(), constructor);
                }
                _ => return Err(RegistryError::ConflictingShape(datum_type.to_string())),
            },
        }

        log_debug!("registered {} {:?}", datum_type, sub_type);
        Ok(())
    }

    /// True when the exact discriminator pair is registered
    pub fn contains(&self, datum_type: &str, sub_type: Option<&str>) -> bool {
        match (self.types.get(datum_type), sub_type) {
            (Some(Shape::Single(_)), None) => true,
            (Some(Shape::Sub(variants)), Some(sub_type)) => variants.contains_key(sub_type),
            _ => false,
        }
    }

    /// Number of registered discriminator pairs
    pub fn len(&self) -> usize {
        self.types
            .values()
            .map(|shape| match shape {
                Shape::Single(_) => 1,
                Shape::Sub(variants) => variants.len(),
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Construct and parse the variant named by the record's discriminators
    ///
    /// Returns `None` after recording why when the discriminators are missing
    /// or unknown. A parser with no object behind it (the element was not an
    /// object) yields `None` without further errors.
    pub fn resolve(&self, parser: &ObjectParser<'_>) -> Option<Box<dyn Datum>> {
        if !parser.exists() {
            return None;
        }
        let context = parser.context();

        let Some(datum_type) = parser.parse_string(TYPE_KEY) else {
            if !parser.contains(TYPE_KEY) {
                context.append_error(TYPE_KEY, errors::value_not_exists());
            }
            return None;
        };

        let constructor = match self.types.get(&datum_type) {
            None => {
                log_warn!("unknown type {:?} at {}", datum_type, context.path());
                context.append_error(TYPE_KEY, errors::type_invalid(&datum_type));
                return None;
            }
            Some(Shape::Single(constructor)) => *constructor,
            Some(Shape::Sub(variants)) => {
                let Some(sub_type) = parser.parse_string(SUB_TYPE_KEY) else {
                    if !parser.contains(SUB_TYPE_KEY) {
                        context.append_error(SUB_TYPE_KEY, errors::value_not_exists());
                    }
                    return None;
                };
                match variants.get(&sub_type) {
                    Some(constructor) => *constructor,
                    None => {
                        log_warn!(
                            "unknown sub type {:?} of {:?} at {}",
                            sub_type,
                            datum_type,
                            context.path()
                        );
                        context.append_error(SUB_TYPE_KEY, errors::sub_type_invalid(&sub_type));
                        return None;
                    }
                }
            }
        };

        let mut datum = constructor();
        datum.parse(parser);
        Some(datum)
    }
}
