//! Mask coordinate models and DTOs.

use neuroscan_core::coordinates;
use neuroscan_core::types::{DbId, SliceNumber, Timestamp, TraceId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::segmented_mask::SliceKey;

/// A row from the `mask_coordinates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MaskCoordinate {
    pub id: DbId,
    pub scan_id: DbId,
    pub slice: SliceNumber,
    pub trace_id: TraceId,
    pub xloc: f64,
    pub yloc: f64,
    pub zloc: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a computed coordinate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateMaskCoordinate {
    pub scan_id: DbId,
    pub slice: SliceNumber,
    pub trace_id: TraceId,
    pub xloc: f64,
    pub yloc: f64,
    pub zloc: f64,
}

impl CreateMaskCoordinate {
    /// Attach a computed coordinate to the slice it was computed for.
    pub fn new(key: SliceKey, coordinate: &coordinates::MaskCoordinate) -> Self {
        Self {
            scan_id: key.scan_id,
            slice: key.slice,
            trace_id: coordinate.trace_id,
            xloc: coordinate.xloc,
            yloc: coordinate.yloc,
            zloc: coordinate.zloc,
        }
    }
}
