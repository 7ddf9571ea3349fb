//! Post-validation normalization
//!
//! A [`Normalizer`] is handed to [`Datum::normalize`] once a record has
//! validated cleanly. It offers unit conversion helpers and a side list for
//! derived records: a record may split itself by appending extra data, which
//! the batch places directly after it. Child normalizers share the side list.

use std::cell::RefCell;
use std::fmt::{self, Display};
use std::rc::Rc;

use crate::context::Context;
use crate::dispatch::Datum;
use crate::units::BloodGlucoseUnits;

/// Normalization scope bound to one context node
#[derive(Clone)]
pub struct Normalizer {
    context: Context,
    data: Rc<RefCell<Vec<Box<dyn Datum>>>>,
}

impl Normalizer {
    pub fn new(context: Context) -> Self {
        Self {
            context,
            data: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Normalizer one segment deeper, sharing the derived-data list
    pub fn child(&self, reference: impl Display) -> Normalizer {
        Normalizer {
            context: self.context.child(reference),
            data: Rc::clone(&self.data),
        }
    }

    /// Emit an additional record alongside the one being normalized
    pub fn append_datum(&self, datum: Box<dyn Datum>) {
        log_debug!(
            "derived {} record at {}",
            datum.datum_type(),
            self.context.path()
        );
        self.data.borrow_mut().push(datum);
    }

    pub fn data_count(&self) -> usize {
        self.data.borrow().len()
    }

    /// Drain every derived record appended so far, in append order
    pub fn take_data(&self) -> Vec<Box<dyn Datum>> {
        std::mem::take(&mut *self.data.borrow_mut())
    }

    /// Conversion helper for a blood glucose field expressed in `units`
    pub fn normalize_blood_glucose<'u>(
        &self,
        reference: impl Display,
        units: Option<&'u str>,
    ) -> BloodGlucoseNormalizer<'u> {
        BloodGlucoseNormalizer {
            context: self.context.child(reference),
            spelling: units,
            units: units.and_then(BloodGlucoseUnits::parse),
        }
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("context", &self.context)
            .field("data", &self.data_count())
            .finish()
    }
}

/// Converts blood glucose readings to mmol/L
///
/// Unrecognised units leave both units and values untouched; validation has
/// already reported them.
#[derive(Debug, Clone)]
pub struct BloodGlucoseNormalizer<'u> {
    context: Context,
    spelling: Option<&'u str>,
    units: Option<BloodGlucoseUnits>,
}

impl BloodGlucoseNormalizer<'_> {
    /// Context of the field being converted
    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn units(&self) -> Option<BloodGlucoseUnits> {
        self.units
    }

    /// Canonical spelling of the units
    pub fn normalize_units(&self) -> Option<String> {
        match self.units {
            Some(_) => Some(BloodGlucoseUnits::MmolL.canonical().to_string()),
            None => {
                if let Some(spelling) = self.spelling {
                    log_debug!(
                        "leaving unrecognised units {:?} at {}",
                        spelling,
                        self.context.path()
                    );
                }
                self.spelling.map(str::to_string)
            }
        }
    }

    /// `value` expressed in mmol/L
    pub fn normalize_value(&self, value: Option<f64>) -> Option<f64> {
        match self.units {
            Some(units) => value.map(|value| units.to_mmol_l(value)),
            None => value,
        }
    }

    pub fn normalize_units_and_value(&self, value: Option<f64>) -> (Option<String>, Option<f64>) {
        (self.normalize_units(), self.normalize_value(value))
    }
}
