//! Mask coordinates: the physical location of every segmented trace.
//!
//! Computed per slice of a scan. For each mask of the slice the weighted
//! centroid is mapped onto frame-centered micrometers, and the slice's depth
//! below the surface comes from the scan depth plus the scanner's z offset
//! for that slice.

use async_trait::async_trait;
use neuroscan_core::centroid::MaskLayout;
use neuroscan_core::coordinates::{extract_coordinates, MaskInput};
use neuroscan_db::models::mask_coordinate::CreateMaskCoordinate;
use neuroscan_db::models::segmented_mask::SliceKey;
use neuroscan_db::repositories::{MaskCoordinateRepo, ScanRepo, SegmentedMaskRepo};
use neuroscan_db::DbPool;

use crate::error::PipelineError;
use crate::populate::Populate;
use crate::scanner::ScanMetadataReader;

/// Populates `mask_coordinates` from `segmented_masks`, `scans`, and scanner
/// metadata.
pub struct MaskCoordinates<R> {
    pool: DbPool,
    reader: R,
    layout: MaskLayout,
}

impl<R: ScanMetadataReader> MaskCoordinates<R> {
    pub fn new(pool: DbPool, reader: R, layout: MaskLayout) -> Self {
        Self {
            pool,
            reader,
            layout,
        }
    }
}

#[async_trait]
impl<R: ScanMetadataReader> Populate for MaskCoordinates<R> {
    type Key = SliceKey;
    type Row = CreateMaskCoordinate;

    fn table_name(&self) -> &'static str {
        "mask_coordinates"
    }

    async fn key_source(&self, limit: Option<i64>) -> Result<Vec<SliceKey>, PipelineError> {
        Ok(SegmentedMaskRepo::list_pending_slices(&self.pool, limit).await?)
    }

    async fn make(&self, key: SliceKey) -> Result<Vec<CreateMaskCoordinate>, PipelineError> {
        let scan = ScanRepo::find_by_id(&self.pool, key.scan_id)
            .await?
            .ok_or(PipelineError::MissingScan(key.scan_id))?;

        let masks: Vec<MaskInput> = SegmentedMaskRepo::list_for_slice(&self.pool, key.scan_id, key.slice)
            .await?
            .into_iter()
            .map(MaskInput::from)
            .collect();
        let metadata = self.reader.read(&scan).await?;

        let coordinates = extract_coordinates(
            &masks,
            &scan.geometry(),
            key.slice,
            &metadata.slice_pos,
            &self.layout,
        )?;
        tracing::debug!(%key, traces = coordinates.len(), "Computed mask coordinates");

        Ok(coordinates
            .iter()
            .map(|c| CreateMaskCoordinate::new(key, c))
            .collect())
    }

    async fn insert(
        &self,
        key: SliceKey,
        rows: Vec<CreateMaskCoordinate>,
    ) -> Result<usize, PipelineError> {
        let inserted =
            MaskCoordinateRepo::replace_for_slice(&self.pool, key.scan_id, key.slice, &rows).await?;
        Ok(inserted.len())
    }
}
