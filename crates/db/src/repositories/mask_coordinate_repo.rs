//! Repository for the `mask_coordinates` table.

use neuroscan_core::types::{DbId, SliceNumber};
use sqlx::PgPool;

use crate::models::mask_coordinate::{CreateMaskCoordinate, MaskCoordinate};

const COLUMNS: &str =
    "id, scan_id, slice, trace_id, xloc, yloc, zloc, created_at, updated_at";

/// Provides access to computed mask coordinates.
pub struct MaskCoordinateRepo;

impl MaskCoordinateRepo {
    /// Replace every coordinate of one slice in a single transaction.
    ///
    /// Existing rows for the slice are deleted first, so rerunning a slice
    /// never leaves stale or duplicate rows. Nothing is written if any
    /// insert fails.
    pub async fn replace_for_slice(
        pool: &PgPool,
        scan_id: DbId,
        slice: SliceNumber,
        rows: &[CreateMaskCoordinate],
    ) -> Result<Vec<MaskCoordinate>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM mask_coordinates WHERE scan_id = $1 AND slice = $2")
            .bind(scan_id)
            .bind(slice)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted > 0 {
            tracing::debug!(scan_id, slice, deleted, "Cleared stale mask coordinates");
        }

        let query = format!(
            "INSERT INTO mask_coordinates (scan_id, slice, trace_id, xloc, yloc, zloc) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let inserted = sqlx::query_as::<_, MaskCoordinate>(&query)
                .bind(scan_id)
                .bind(slice)
                .bind(row.trace_id)
                .bind(row.xloc)
                .bind(row.yloc)
                .bind(row.zloc)
                .fetch_one(&mut *tx)
                .await?;
            results.push(inserted);
        }

        tx.commit().await?;
        Ok(results)
    }

    /// All coordinates of one slice, ordered by trace.
    pub async fn list_for_slice(
        pool: &PgPool,
        scan_id: DbId,
        slice: SliceNumber,
    ) -> Result<Vec<MaskCoordinate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mask_coordinates \
             WHERE scan_id = $1 AND slice = $2 \
             ORDER BY trace_id ASC"
        );
        sqlx::query_as::<_, MaskCoordinate>(&query)
            .bind(scan_id)
            .bind(slice)
            .fetch_all(pool)
            .await
    }

    /// All coordinates of a scan, ordered by slice then trace.
    pub async fn list_for_scan(
        pool: &PgPool,
        scan_id: DbId,
    ) -> Result<Vec<MaskCoordinate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM mask_coordinates \
             WHERE scan_id = $1 \
             ORDER BY slice ASC, trace_id ASC"
        );
        sqlx::query_as::<_, MaskCoordinate>(&query)
            .bind(scan_id)
            .fetch_all(pool)
            .await
    }

    /// Delete every coordinate of one slice. Returns the number of rows removed.
    pub async fn delete_for_slice(
        pool: &PgPool,
        scan_id: DbId,
        slice: SliceNumber,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM mask_coordinates WHERE scan_id = $1 AND slice = $2")
            .bind(scan_id)
            .bind(slice)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
