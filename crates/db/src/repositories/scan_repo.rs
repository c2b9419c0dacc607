//! Repository for the `scans` table.

use neuroscan_core::types::DbId;
use sqlx::PgPool;

use crate::models::scan::{CreateScan, Scan};

const COLUMNS: &str = "id, animal_id, session, scan_idx, px_width, px_height, \
     um_width, um_height, depth, nslices, header_path, created_at, updated_at";

/// Provides access to scan geometry.
pub struct ScanRepo;

impl ScanRepo {
    /// Register a scan, returning the created row.
    ///
    /// If `nslices` is `None`, defaults to 1.
    pub async fn create(pool: &PgPool, input: &CreateScan) -> Result<Scan, sqlx::Error> {
        let query = format!(
            "INSERT INTO scans \
                (animal_id, session, scan_idx, px_width, px_height, \
                 um_width, um_height, depth, nslices, header_path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 1), $10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scan>(&query)
            .bind(input.animal_id)
            .bind(input.session)
            .bind(input.scan_idx)
            .bind(input.px_width)
            .bind(input.px_height)
            .bind(input.um_width)
            .bind(input.um_height)
            .bind(input.depth)
            .bind(input.nslices)
            .bind(&input.header_path)
            .fetch_one(pool)
            .await
    }

    /// Find a scan by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Scan>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scans WHERE id = $1");
        sqlx::query_as::<_, Scan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a scan by its acquisition identity.
    pub async fn find_by_acquisition(
        pool: &PgPool,
        animal_id: i32,
        session: i16,
        scan_idx: i16,
    ) -> Result<Option<Scan>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scans \
             WHERE animal_id = $1 AND session = $2 AND scan_idx = $3"
        );
        sqlx::query_as::<_, Scan>(&query)
            .bind(animal_id)
            .bind(session)
            .bind(scan_idx)
            .fetch_optional(pool)
            .await
    }

    /// Point a scan at its scanner metadata file.
    pub async fn set_header_path(
        pool: &PgPool,
        id: DbId,
        header_path: &str,
    ) -> Result<Option<Scan>, sqlx::Error> {
        let query = format!(
            "UPDATE scans SET header_path = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scan>(&query)
            .bind(id)
            .bind(header_path)
            .fetch_optional(pool)
            .await
    }
}
