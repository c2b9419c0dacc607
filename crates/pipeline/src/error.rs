use std::path::PathBuf;

use neuroscan_core::error::CoreError;
use neuroscan_core::types::DbId;

/// Errors raised while populating a computed table.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Upstream data failed a domain check (degenerate mask, missing slice, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database query failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The key refers to a scan with no geometry row.
    #[error("Scan {0} not found")]
    MissingScan(DbId),

    /// The scan has no scanner metadata file on record.
    #[error("Scan {0} has no scanner metadata file")]
    MissingHeader(DbId),

    /// The scanner metadata file could not be read.
    #[error("Failed to read scanner metadata {}: {source}", .path.display())]
    HeaderIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The scanner metadata file is not valid JSON of the expected shape.
    #[error("Malformed scanner metadata {}: {source}", .path.display())]
    HeaderParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
