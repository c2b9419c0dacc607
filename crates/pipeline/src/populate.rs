//! The populate contract and its driver.
//!
//! A computed table declares which upstream keys it is computed for
//! ([`Populate::key_source`]), how to compute the rows of one key
//! ([`Populate::make`]), and how to write them ([`Populate::insert`]).
//! [`populate`] runs that sequence for every key still missing output.

use std::fmt::Display;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::PipelineError;

/// A table whose rows are computed from an upstream key.
#[async_trait]
pub trait Populate: Send + Sync {
    type Key: Copy + Display + Send + Sync;
    type Row: Send;

    /// Table name used in logs.
    fn table_name(&self) -> &'static str;

    /// Upstream keys that have no output rows yet, at most `limit` of them.
    async fn key_source(&self, limit: Option<i64>) -> Result<Vec<Self::Key>, PipelineError>;

    /// Compute every output row of one key. Must not write anything.
    async fn make(&self, key: Self::Key) -> Result<Vec<Self::Row>, PipelineError>;

    /// Replace the key's output rows, atomically. Returns the rows written.
    async fn insert(&self, key: Self::Key, rows: Vec<Self::Row>) -> Result<usize, PipelineError>;
}

/// Options for a [`populate`] run.
#[derive(Debug, Clone, Default)]
pub struct PopulateOptions {
    /// Process at most this many keys.
    pub max_keys: Option<i64>,
    /// Log and record failing keys instead of stopping at the first one.
    pub suppress_errors: bool,
}

/// A key that failed during a run with `suppress_errors` set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyFailure {
    pub key: String,
    pub error: String,
}

/// Outcome of a [`populate`] run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PopulateReport {
    pub keys_populated: usize,
    pub rows_inserted: usize,
    pub failures: Vec<KeyFailure>,
}

/// Compute and write one key.
pub async fn populate_key<P>(routine: &P, key: P::Key) -> Result<usize, PipelineError>
where
    P: Populate + ?Sized,
{
    let rows = routine.make(key).await?;
    routine.insert(key, rows).await
}

/// Populate every pending key of `routine`, one at a time.
///
/// Without `suppress_errors` the first failing key aborts the run and its
/// error is returned; keys already written stay written.
pub async fn populate<P>(routine: &P, options: &PopulateOptions) -> Result<PopulateReport, PipelineError>
where
    P: Populate + ?Sized,
{
    let table = routine.table_name();
    let keys = routine.key_source(options.max_keys).await?;
    if keys.is_empty() {
        tracing::debug!(table, "Nothing to populate");
        return Ok(PopulateReport::default());
    }
    tracing::info!(table, pending = keys.len(), "Populating");

    let mut report = PopulateReport::default();
    for key in keys {
        match populate_key(routine, key).await {
            Ok(rows) => {
                tracing::info!(table, %key, rows, "Populated key");
                report.keys_populated += 1;
                report.rows_inserted += rows;
            }
            Err(e) => {
                tracing::error!(table, %key, error = %e, "Failed to populate key");
                if !options.suppress_errors {
                    return Err(e);
                }
                report.failures.push(KeyFailure {
                    key: key.to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        table,
        keys = report.keys_populated,
        rows = report.rows_inserted,
        failed = report.failures.len(),
        "Populate run finished"
    );
    Ok(report)
}
