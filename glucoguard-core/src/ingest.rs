//! Batch ingest
//!
//! Runs every record of a batch through dispatch, parse, validate and
//! normalize against one shared context root. A failing record never aborts
//! the batch; its errors land in the outcome under its index:
//!
//! ```text
//! [ {..}, {..}, 7 ]
//!    │     │    └─ /2  type-not-object
//!    │     └────── /1/... field errors, record rejected
//!    └──────────── /0  clean, normalized, kept
//! ```
//!
//! Only failures that cannot be pinned on a record (undecodable text, a
//! document that is not an array, an oversized batch) are returned as
//! [`IngestError`].

use serde_json::Value;
use thiserror::Error;

use crate::config::IngestConfig;
use crate::context::Context;
use crate::dispatch::{Datum, Registry};
use crate::errors::{describe_type, ErrorRecord};
use crate::normalizer::Normalizer;
use crate::parser::ArrayParser;
use crate::validator::Validator;

/// Batch-level failures
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input text is not JSON
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Input JSON is not an array of records
    #[error("Expected an array of records, found {0}")]
    NotArray(&'static str),

    /// Batch exceeds the configured limit
    #[error("Batch of {count} records exceeds the limit of {limit}")]
    TooManyRecords { count: usize, limit: usize },

    /// Configuration rejected
    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

/// Result of ingesting one batch
#[derive(Debug, Default)]
pub struct IngestOutcome {
    /// Accepted records in submission order, derived records after their parent
    pub data: Vec<Box<dyn Datum>>,
    /// Every error recorded for the batch, in the order it was found
    pub errors: Vec<ErrorRecord>,
    /// Indices of records that produced at least one error
    pub rejected: Vec<usize>,
}

impl IngestOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Render every kept record as JSON
    pub fn to_values(&self) -> serde_json::Result<Vec<Value>> {
        self.data.iter().map(|datum| datum.to_value()).collect()
    }
}

/// Ingest an already decoded batch
///
/// `config.max_records` is not enforced here; callers holding decoded values
/// have already paid for them.
pub fn ingest(registry: &Registry, records: &[Value], config: &IngestConfig) -> IngestOutcome {
    let context = Context::new();
    let batch = ArrayParser::new(context.clone(), Some(records));
    let normalizer = Normalizer::new(context.clone());
    let mut outcome = IngestOutcome::default();

    for index in 0..batch.len() {
        let mark = context.error_count();
        let parser = batch.child_object_parser(index);

        let datum = registry.resolve(&parser);
        if let Some(datum) = &datum {
            if config.reject_unknown_fields {
                parser.check_unparsed();
            }
            datum.validate(&Validator::new(parser.context().clone()));
        }

        let valid = context.error_count() == mark;
        if !valid {
            log_debug!(
                "record {} rejected with {} errors",
                index,
                context.error_count() - mark
            );
            outcome.rejected.push(index);
        }

        let Some(mut datum) = datum else {
            continue;
        };
        if valid && config.normalize {
            datum.normalize(&normalizer.child(index));
        }
        if valid || config.retain_invalid {
            outcome.data.push(datum);
            outcome.data.extend(normalizer.take_data());
        }
    }

    outcome.errors = context.errors();
    log_debug!(
        "ingested {} records: {} kept, {} rejected",
        records.len(),
        outcome.data.len(),
        outcome.rejected.len()
    );
    outcome
}

/// Decode `text` as a JSON array of records and ingest it
pub fn ingest_json(
    registry: &Registry,
    text: &str,
    config: &IngestConfig,
) -> Result<IngestOutcome, IngestError> {
    config.validate()?;

    let document: Value = serde_json::from_str(text).map_err(|e| {
        log_warn!("undecodable batch: {}", e);
        IngestError::from(e)
    })?;
    let records = match &document {
        Value::Array(records) => records,
        other => return Err(IngestError::NotArray(describe_type(other))),
    };
    if records.len() > config.max_records {
        log_warn!(
            "batch of {} records exceeds limit {}",
            records.len(),
            config.max_records
        );
        return Err(IngestError::TooManyRecords {
            count: records.len(),
            limit: config.max_records,
        });
    }

    Ok(ingest(registry, records, config))
}
