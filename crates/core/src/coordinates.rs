//! Physical location of segmented cells.
//!
//! For every mask of one slice, [`extract_coordinates`] converts the mask's
//! weighted centroid into frame-centered micrometers and attaches the
//! slice's depth below the tissue surface.

use serde::{Deserialize, Serialize};

use crate::centroid::{weighted_centroid, MaskLayout};
use crate::error::CoreError;
use crate::geometry::{ScanGeometry, SlicePositions};
use crate::types::{SliceNumber, TraceId};

/// One segmented cell mask as fetched from upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskInput {
    pub trace_id: TraceId,
    pub mask_pixels: Vec<i64>,
    pub mask_weights: Vec<f64>,
}

/// Location of one trace, in micrometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaskCoordinate {
    pub trace_id: TraceId,
    /// Horizontal offset from the frame center.
    pub xloc: f64,
    /// Vertical offset from the frame center.
    pub yloc: f64,
    /// Depth below the tissue surface.
    pub zloc: f64,
}

/// Compute one coordinate per mask of a slice, in input order.
///
/// The whole slice fails if any single mask fails: no coordinates are
/// returned for a slice with an empty mask list, invalid geometry, a missing
/// slice offset, or a degenerate mask.
pub fn extract_coordinates(
    masks: &[MaskInput],
    geometry: &ScanGeometry,
    slice: SliceNumber,
    slice_pos: &SlicePositions,
    layout: &MaskLayout,
) -> Result<Vec<MaskCoordinate>, CoreError> {
    if masks.is_empty() {
        return Err(CoreError::Validation(format!(
            "Slice {slice} has no segmented masks"
        )));
    }
    geometry.validate()?;
    let zloc = slice_pos.depth_of(geometry.depth, slice)?;

    masks
        .iter()
        .map(|mask| {
            let centroid = weighted_centroid(
                mask.trace_id,
                &mask.mask_pixels,
                &mask.mask_weights,
                geometry.px_width,
                geometry.px_height,
                layout,
            )?;
            let (xloc, yloc) = geometry.to_microns(centroid.x, centroid.y);
            Ok(MaskCoordinate {
                trace_id: mask.trace_id,
                xloc,
                yloc,
                zloc,
            })
        })
        .collect()
}
