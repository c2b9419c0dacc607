//! Weighted center of mass of a segmented cell mask.
//!
//! A mask is a list of linear pixel indices plus one non-negative weight per
//! index. Pixel `(col, row)` is treated as the unit square whose center sits
//! at `(col + 0.5, row + 0.5)`, so a mask covering the whole frame with equal
//! weights has its centroid exactly at the frame center.
//!
//! Note the half-pixel shift: a centroid computed on integer pixel indices
//! (regionprops style, 0-based) is smaller by exactly `0.5` on both axes than
//! the one returned here.
//!
//! Only mask pixels enter the sums; every other pixel of the frame carries
//! zero weight and contributes nothing. Weight sums that overflow `f64` are
//! rejected rather than producing a `NaN` centroid.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::TraceId;

/* --------------------------------------------------------------------------
Index layout
-------------------------------------------------------------------------- */

/// Memory order of the linear pixel indices stored with a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PixelOrder {
    /// Index runs down a column first (MATLAB / Fortran order).
    ColumnMajor,
    /// Index runs along a row first (C order).
    RowMajor,
}

impl PixelOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ColumnMajor => "column-major",
            Self::RowMajor => "row-major",
        }
    }
}

impl std::str::FromStr for PixelOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "column-major" => Ok(Self::ColumnMajor),
            "row-major" => Ok(Self::RowMajor),
            _ => Err(CoreError::Validation(format!(
                "Invalid pixel order: '{s}'. Must be one of: column-major, row-major"
            ))),
        }
    }
}

/// How linear mask indices address a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskLayout {
    /// Index of the first pixel (0 or 1).
    pub base: i64,
    pub order: PixelOrder,
}

impl Default for MaskLayout {
    /// Segmentation masks are written by MATLAB tooling: 1-based, column-major.
    fn default() -> Self {
        Self {
            base: 1,
            order: PixelOrder::ColumnMajor,
        }
    }
}

impl MaskLayout {
    pub fn new(base: i64, order: PixelOrder) -> Result<Self, CoreError> {
        if base != 0 && base != 1 {
            return Err(CoreError::Validation(format!(
                "Mask index base must be 0 or 1 (got {base})"
            )));
        }
        Ok(Self { base, order })
    }

    /// Resolve a linear index to `(col, row)` within a `px_width x px_height` frame.
    pub fn locate(&self, index: i64, px_width: i32, px_height: i32) -> Result<(i64, i64), CoreError> {
        let (w, h) = (i64::from(px_width), i64::from(px_height));
        let offset = index - self.base;
        if offset < 0 || offset >= w * h {
            return Err(CoreError::Validation(format!(
                "Pixel index {index} is outside a {px_width}x{px_height} frame"
            )));
        }
        Ok(match self.order {
            PixelOrder::ColumnMajor => (offset / h, offset % h),
            PixelOrder::RowMajor => (offset % w, offset / w),
        })
    }
}

/* --------------------------------------------------------------------------
Centroid
-------------------------------------------------------------------------- */

/// Intensity-weighted center of a mask, in pixel units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub x: f64,
    pub y: f64,
    /// Sum of all mask weights.
    pub mass: f64,
}

/// Compute the weighted centroid of one mask.
///
/// Fails when the pixel and weight lists differ in length, when any weight
/// is negative or non-finite, when an index falls outside the frame, or when
/// the weights sum to zero.
pub fn weighted_centroid(
    trace_id: TraceId,
    mask_pixels: &[i64],
    mask_weights: &[f64],
    px_width: i32,
    px_height: i32,
    layout: &MaskLayout,
) -> Result<Centroid, CoreError> {
    if mask_pixels.len() != mask_weights.len() {
        return Err(CoreError::Validation(format!(
            "Trace {trace_id}: {} mask pixels but {} weights",
            mask_pixels.len(),
            mask_weights.len()
        )));
    }

    let mut mass = 0.0;
    let mut mx = 0.0;
    let mut my = 0.0;

    for (&index, &weight) in mask_pixels.iter().zip(mask_weights) {
        if !weight.is_finite() || weight < 0.0 {
            return Err(CoreError::Validation(format!(
                "Trace {trace_id}: mask weight {weight} at pixel {index} is not a non-negative number"
            )));
        }
        let (col, row) = layout.locate(index, px_width, px_height)?;
        mass += weight;
        mx += (col as f64 + 0.5) * weight;
        my += (row as f64 + 0.5) * weight;
    }

    if mass <= 0.0 {
        return Err(CoreError::DegenerateMask { trace_id });
    }

    let (x, y) = (mx / mass, my / mass);
    if !(mass.is_finite() && x.is_finite() && y.is_finite()) {
        return Err(CoreError::Validation(format!(
            "Trace {trace_id}: mask weights overflow (total {mass})"
        )));
    }

    Ok(Centroid { x, y, mass })
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
