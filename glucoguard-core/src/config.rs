//! Batch ingest configuration

use serde::{Deserialize, Serialize};

use crate::ingest::IngestError;

/// Default upper bound on records per batch
pub const DEFAULT_MAX_RECORDS: usize = 10_000;

/// Controls how [`ingest`](crate::ingest::ingest) treats a batch
///
/// Deserializes from camelCase JSON; missing keys take their defaults:
///
/// ```rust
/// use glucoguard_core::IngestConfig;
///
/// let config = IngestConfig::from_json(r#"{ "rejectUnknownFields": true }"#).unwrap();
/// assert!(config.reject_unknown_fields);
/// assert!(config.normalize);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IngestConfig {
    /// Normalize records that validated cleanly
    pub normalize: bool,
    /// Keep records that produced errors in the outcome data
    pub retain_invalid: bool,
    /// Report `value-not-parsed` for fields no schema consumed
    pub reject_unknown_fields: bool,
    /// Largest batch accepted; zero is invalid
    pub max_records: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            normalize: true,
            retain_invalid: false,
            reject_unknown_fields: false,
            max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

impl IngestConfig {
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn with_retain_invalid(mut self, retain_invalid: bool) -> Self {
        self.retain_invalid = retain_invalid;
        self
    }

    pub fn with_reject_unknown_fields(mut self, reject_unknown_fields: bool) -> Self {
        self.reject_unknown_fields = reject_unknown_fields;
        self
    }

    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json(text: &str) -> Result<Self, IngestError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| IngestError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), IngestError> {
        if self.max_records == 0 {
            return Err(IngestError::InvalidConfig(
                "maxRecords must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
