//! Constants for GlucoGuard Core
//!
//! Centralized numeric and textual constants used by the engine and by record
//! catalogs. Values that clients depend on (unit spellings, conversion factors,
//! time layouts) live here so a change is visible in one place.
//!
//! ## Organization
//!
//! - **Blood glucose**: unit spellings, conversion factor, plausible ranges
//! - **Time**: unit conversions and timestamp layouts

/// Blood glucose unit spellings, conversion factor and value limits.
pub mod blood_glucose;

/// Time unit conversions and timestamp layouts.
pub mod time;

pub use blood_glucose::{MG_DL, MG_DL_PER_MMOL_L, MMOL_L};
pub use time::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND};
