//! Scan geometry and per-slice depth offsets.
//!
//! A scan frame is `px_width x px_height` pixels covering `um_width x
//! um_height` micrometers. Physical coordinates put the origin at the frame
//! center; depth is measured from the tissue surface.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::SliceNumber;

/// Calibrated frame geometry of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScanGeometry {
    pub px_width: i32,
    pub px_height: i32,
    pub um_width: f64,
    pub um_height: f64,
    /// Surface-to-scan-plane offset in micrometers.
    pub depth: f64,
}

impl ScanGeometry {
    /// Reject geometry that cannot map pixels onto micrometers.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.px_width <= 0 || self.px_height <= 0 {
            return Err(CoreError::Validation(format!(
                "Frame must be at least 1x1 pixels (got {}x{})",
                self.px_width, self.px_height
            )));
        }
        if !(self.um_width.is_finite() && self.um_width > 0.0)
            || !(self.um_height.is_finite() && self.um_height > 0.0)
        {
            return Err(CoreError::Validation(format!(
                "Physical frame size must be positive (got {} x {} um)",
                self.um_width, self.um_height
            )));
        }
        if !self.depth.is_finite() {
            return Err(CoreError::Validation(format!(
                "Scan depth must be finite (got {})",
                self.depth
            )));
        }
        Ok(())
    }

    /// Map a pixel-space point onto frame-centered micrometers.
    pub fn to_microns(&self, cx: f64, cy: f64) -> (f64, f64) {
        let xloc = cx / f64::from(self.px_width) * self.um_width - self.um_width / 2.0;
        let yloc = cy / f64::from(self.px_height) * self.um_height - self.um_height / 2.0;
        (xloc, yloc)
    }
}

/// Z offsets of each slice relative to the scan depth, as recorded by the
/// scanner. Entry `i` belongs to slice `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlicePositions(pub Vec<f64>);

impl SlicePositions {
    pub fn new(offsets: Vec<f64>) -> Self {
        Self(offsets)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Offset for a 1-based slice number.
    pub fn offset(&self, slice: SliceNumber) -> Result<f64, CoreError> {
        let missing = || CoreError::MissingSlice {
            slice,
            available: self.0.len(),
        };
        let index = usize::try_from(slice)
            .ok()
            .and_then(|s| s.checked_sub(1))
            .ok_or_else(missing)?;
        self.0.get(index).copied().ok_or_else(missing)
    }

    /// Absolute depth below the surface for a slice of a scan at `depth`.
    pub fn depth_of(&self, depth: f64, slice: SliceNumber) -> Result<f64, CoreError> {
        Ok(depth + self.offset(slice)?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn geometry() -> ScanGeometry {
        ScanGeometry {
            px_width: 256,
            px_height: 128,
            um_width: 400.0,
            um_height: 200.0,
            depth: 150.0,
        }
    }

    #[test]
    fn valid_geometry_accepted() {
        assert!(geometry().validate().is_ok());
    }

    #[test]
    fn zero_pixel_dimension_rejected() {
        let g = ScanGeometry {
            px_height: 0,
            ..geometry()
        };
        assert_matches!(g.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn non_positive_micron_size_rejected() {
        let g = ScanGeometry {
            um_width: -1.0,
            ..geometry()
        };
        assert!(g.validate().is_err());

        let g = ScanGeometry {
            um_height: f64::NAN,
            ..geometry()
        };
        assert!(g.validate().is_err());
    }

    #[test]
    fn frame_center_maps_to_origin() {
        let (x, y) = geometry().to_microns(128.0, 64.0);
        assert_eq!(x, 0.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn frame_corner_maps_to_half_extent() {
        let (x, y) = geometry().to_microns(0.0, 128.0);
        assert_eq!(x, -200.0);
        assert_eq!(y, 100.0);
    }

    #[test]
    fn slice_offsets_are_one_based() {
        let pos = SlicePositions::new(vec![0.0, 10.0, 20.0]);
        assert_eq!(pos.offset(1).unwrap(), 0.0);
        assert_eq!(pos.offset(3).unwrap(), 20.0);
        assert_eq!(pos.depth_of(150.0, 2).unwrap(), 160.0);
    }

    #[test]
    fn missing_slice_rejected() {
        let pos = SlicePositions::new(vec![0.0, 10.0]);
        assert_matches!(
            pos.offset(3),
            Err(CoreError::MissingSlice {
                slice: 3,
                available: 2
            })
        );
        assert_matches!(pos.offset(0), Err(CoreError::MissingSlice { .. }));
        assert_matches!(pos.offset(-1), Err(CoreError::MissingSlice { .. }));
    }
}
