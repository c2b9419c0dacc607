//! Repository for the `segmented_masks` table.

use neuroscan_core::types::{DbId, SliceNumber};
use sqlx::PgPool;

use crate::models::segmented_mask::{CreateSegmentedMask, SegmentedMask, SliceKey};

const COLUMNS: &str =
    "id, scan_id, slice, trace_id, mask_pixels, mask_weights, created_at, updated_at";

/// Provides access to segmented cell masks.
pub struct SegmentedMaskRepo;

impl SegmentedMaskRepo {
    /// Insert a mask, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateSegmentedMask,
    ) -> Result<SegmentedMask, sqlx::Error> {
        let query = format!(
            "INSERT INTO segmented_masks (scan_id, slice, trace_id, mask_pixels, mask_weights) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SegmentedMask>(&query)
            .bind(input.scan_id)
            .bind(input.slice)
            .bind(input.trace_id)
            .bind(&input.mask_pixels)
            .bind(&input.mask_weights)
            .fetch_one(pool)
            .await
    }

    /// All masks of one slice, ordered by trace.
    pub async fn list_for_slice(
        pool: &PgPool,
        scan_id: DbId,
        slice: SliceNumber,
    ) -> Result<Vec<SegmentedMask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM segmented_masks \
             WHERE scan_id = $1 AND slice = $2 \
             ORDER BY trace_id ASC"
        );
        sqlx::query_as::<_, SegmentedMask>(&query)
            .bind(scan_id)
            .bind(slice)
            .fetch_all(pool)
            .await
    }

    /// Number of masks in one slice.
    pub async fn count_for_slice(
        pool: &PgPool,
        scan_id: DbId,
        slice: SliceNumber,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM segmented_masks WHERE scan_id = $1 AND slice = $2",
        )
        .bind(scan_id)
        .bind(slice)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }

    /// Slices that have masks but no mask coordinates yet, oldest scan first.
    pub async fn list_pending_slices(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<Vec<SliceKey>, sqlx::Error> {
        sqlx::query_as::<_, SliceKey>(
            "SELECT DISTINCT m.scan_id, m.slice \
             FROM segmented_masks m \
             WHERE NOT EXISTS ( \
                 SELECT 1 FROM mask_coordinates c \
                 WHERE c.scan_id = m.scan_id AND c.slice = m.slice \
             ) \
             ORDER BY m.scan_id, m.slice \
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
