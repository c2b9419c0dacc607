//! Scan geometry models and DTOs.

use neuroscan_core::geometry::ScanGeometry;
use neuroscan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `scans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scan {
    pub id: DbId,
    pub animal_id: i32,
    pub session: i16,
    pub scan_idx: i16,
    pub px_width: i32,
    pub px_height: i32,
    pub um_width: f64,
    pub um_height: f64,
    pub depth: f64,
    pub nslices: i32,
    pub header_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Scan {
    /// Frame geometry used to place masks in micrometers.
    pub fn geometry(&self) -> ScanGeometry {
        ScanGeometry {
            px_width: self.px_width,
            px_height: self.px_height,
            um_width: self.um_width,
            um_height: self.um_height,
            depth: self.depth,
        }
    }
}

/// DTO for registering a scan.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScan {
    pub animal_id: i32,
    pub session: i16,
    pub scan_idx: i16,
    pub px_width: i32,
    pub px_height: i32,
    pub um_width: f64,
    pub um_height: f64,
    pub depth: f64,
    pub nslices: Option<i32>,
    pub header_path: Option<String>,
}
