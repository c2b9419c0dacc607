//! Segmented cell mask models and DTOs.

use neuroscan_core::coordinates::MaskInput;
use neuroscan_core::types::{DbId, SliceNumber, Timestamp, TraceId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `segmented_masks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SegmentedMask {
    pub id: DbId,
    pub scan_id: DbId,
    pub slice: SliceNumber,
    pub trace_id: TraceId,
    pub mask_pixels: Vec<i64>,
    pub mask_weights: Vec<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SegmentedMask> for MaskInput {
    fn from(mask: SegmentedMask) -> Self {
        MaskInput {
            trace_id: mask.trace_id,
            mask_pixels: mask.mask_pixels,
            mask_weights: mask.mask_weights,
        }
    }
}

/// DTO for inserting a segmented mask.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSegmentedMask {
    pub scan_id: DbId,
    pub slice: SliceNumber,
    pub trace_id: TraceId,
    pub mask_pixels: Vec<i64>,
    pub mask_weights: Vec<f64>,
}

/// Identifies one slice of one scan: the unit of mask coordinate population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRow, Serialize, Deserialize)]
pub struct SliceKey {
    pub scan_id: DbId,
    pub slice: SliceNumber,
}

impl std::fmt::Display for SliceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scan {} slice {}", self.scan_id, self.slice)
    }
}
