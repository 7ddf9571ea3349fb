//! Blood Glucose Units and Limits
//!
//! Readings arrive in either of two unit systems, each with two accepted
//! spellings. Everything is stored in mmol/L.
//!
//! | units         | spellings accepted       | plausible range |
//! |---------------|--------------------------|-----------------|
//! | mmol/L        | `mmol/L`, `mmol/l`       | 0 ..= 55        |
//! | mg/dL         | `mg/dL`, `mg/dl`         | 0 ..= 1000      |
//!
//! Source: molar mass of glucose, 180.1559 g/mol, giving
//! 1 mmol/L = 18.01559 mg/dL.

/// Canonical spelling of millimoles per litre.
pub const MMOL_L: &str = "mmol/L";

/// Lower-case spelling of millimoles per litre, accepted on input.
pub const MMOL_L_LOWER: &str = "mmol/l";

/// Spelling of milligrams per decilitre.
pub const MG_DL: &str = "mg/dL";

/// Lower-case spelling of milligrams per decilitre, accepted on input.
pub const MG_DL_LOWER: &str = "mg/dl";

/// Every accepted spelling, in the order reported by validation errors.
pub const UNITS: [&str; 4] = [MMOL_L_LOWER, MMOL_L, MG_DL_LOWER, MG_DL];

/// mg/dL per mmol/L.
pub const MG_DL_PER_MMOL_L: f64 = 18.01559;

/// Lowest plausible reading in mmol/L.
pub const MMOL_L_MINIMUM: f64 = 0.0;

/// Highest plausible reading in mmol/L.
///
/// Meters saturate well below this; higher values indicate a unit mix-up.
pub const MMOL_L_MAXIMUM: f64 = 55.0;

/// Lowest plausible reading in mg/dL.
pub const MG_DL_MINIMUM: f64 = 0.0;

/// Highest plausible reading in mg/dL.
pub const MG_DL_MAXIMUM: f64 = 1000.0;
