//! Scanner metadata access.
//!
//! The acquisition software writes a JSON header next to each raw scan.
//! Only the per-slice z offsets are consumed here:
//!
//! ```json
//! { "slice_pos": [0.0, -15.0, -30.0] }
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use neuroscan_core::geometry::SlicePositions;
use neuroscan_db::models::scan::Scan;
use serde::Deserialize;

use crate::error::PipelineError;

/// Metadata recorded by the scanner for one scan.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScanMetadata {
    /// Z offset of each slice relative to the scan depth, in micrometers.
    pub slice_pos: SlicePositions,
}

/// Source of scanner metadata for a scan.
#[async_trait]
pub trait ScanMetadataReader: Send + Sync {
    async fn read(&self, scan: &Scan) -> Result<ScanMetadata, PipelineError>;
}

/// Reads the JSON header at `scans.header_path`.
///
/// Relative header paths are resolved against `root`.
#[derive(Debug, Clone, Default)]
pub struct JsonHeaderReader {
    root: Option<PathBuf>,
}

impl JsonHeaderReader {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    fn resolve(&self, header_path: &str) -> PathBuf {
        let path = Path::new(header_path);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Parse a header file from disk.
    pub async fn read_path(path: &Path) -> Result<ScanMetadata, PipelineError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| PipelineError::HeaderIo {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_slice(&bytes).map_err(|source| PipelineError::HeaderParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[async_trait]
impl ScanMetadataReader for JsonHeaderReader {
    async fn read(&self, scan: &Scan) -> Result<ScanMetadata, PipelineError> {
        let header_path = scan
            .header_path
            .as_deref()
            .ok_or(PipelineError::MissingHeader(scan.id))?;
        let path = self.resolve(header_path);
        tracing::debug!(scan_id = scan.id, path = %path.display(), "Reading scanner metadata");
        Self::read_path(&path).await
    }
}
