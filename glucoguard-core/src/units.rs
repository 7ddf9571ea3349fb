//! Blood glucose unit resolution
//!
//! Spellings are compared by value against the accepted list in
//! [`constants::blood_glucose`](crate::constants::blood_glucose); anything else
//! resolves to `None` and is left for validation to report.

use std::fmt;

use crate::constants::blood_glucose::{
    MG_DL, MG_DL_LOWER, MG_DL_MAXIMUM, MG_DL_MINIMUM, MG_DL_PER_MMOL_L, MMOL_L, MMOL_L_LOWER,
    MMOL_L_MAXIMUM, MMOL_L_MINIMUM,
};

/// Unit system of a blood glucose value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloodGlucoseUnits {
    /// Millimoles per litre (canonical)
    MmolL,
    /// Milligrams per decilitre
    MgdL,
}

impl BloodGlucoseUnits {
    /// Resolve an accepted spelling
    pub fn parse(spelling: &str) -> Option<Self> {
        match spelling {
            MMOL_L | MMOL_L_LOWER => Some(Self::MmolL),
            MG_DL | MG_DL_LOWER => Some(Self::MgdL),
            _ => None,
        }
    }

    /// Spelling used when storing the units
    pub const fn canonical(&self) -> &'static str {
        match self {
            Self::MmolL => MMOL_L,
            Self::MgdL => MG_DL,
        }
    }

    /// Inclusive plausible range of readings in these units
    pub const fn range(&self) -> (f64, f64) {
        match self {
            Self::MmolL => (MMOL_L_MINIMUM, MMOL_L_MAXIMUM),
            Self::MgdL => (MG_DL_MINIMUM, MG_DL_MAXIMUM),
        }
    }

    /// Convert a reading in these units to mmol/L
    ///
    /// mmol/L values are returned untouched, bit for bit.
    pub fn to_mmol_l(&self, value: f64) -> f64 {
        match self {
            Self::MmolL => value,
            Self::MgdL => value / MG_DL_PER_MMOL_L,
        }
    }
}

impl fmt::Display for BloodGlucoseUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_spellings_resolve() {
        assert_eq!(BloodGlucoseUnits::parse("mmol/L"), Some(BloodGlucoseUnits::MmolL));
        assert_eq!(BloodGlucoseUnits::parse("mmol/l"), Some(BloodGlucoseUnits::MmolL));
        assert_eq!(BloodGlucoseUnits::parse("mg/dL"), Some(BloodGlucoseUnits::MgdL));
        assert_eq!(BloodGlucoseUnits::parse("mg/dl"), Some(BloodGlucoseUnits::MgdL));
    }

    #[test]
    fn comparison_is_by_value() {
        // A freshly allocated string must match as well as the constant itself
        let owned = String::from("mg/") + "dl";
        assert_eq!(BloodGlucoseUnits::parse(&owned), Some(BloodGlucoseUnits::MgdL));
    }

    #[test]
    fn unknown_spellings_are_rejected() {
        assert_eq!(BloodGlucoseUnits::parse("MG/DL"), None);
        assert_eq!(BloodGlucoseUnits::parse("mmol"), None);
        assert_eq!(BloodGlucoseUnits::parse(""), None);
    }

    #[test]
    fn conversion() {
        let converted = BloodGlucoseUnits::MgdL.to_mmol_l(60.0);
        assert!((converted - 3.330_448_794_627_32).abs() < 1e-9);
        assert_eq!(BloodGlucoseUnits::MmolL.to_mmol_l(5.5).to_bits(), 5.5f64.to_bits());
    }

    #[test]
    fn ranges() {
        assert_eq!(BloodGlucoseUnits::MmolL.range(), (0.0, 55.0));
        assert_eq!(BloodGlucoseUnits::MgdL.range(), (0.0, 1000.0));
    }
}
