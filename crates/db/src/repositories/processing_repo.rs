//! Repository for the `processing_jobs` and `media_assets` tables.
//!
//! The retry mutation is a compare-and-swap keyed on the expected
//! `retry_count`, so two concurrent retry calls cannot both pass the gate
//! and double-increment. The loser of the race matches zero rows.

use focal_core::types::DbId;
use sqlx::PgPool;

use crate::models::processing::{MediaAsset, ProcessingJob};

/// Column list for `processing_jobs` queries.
const COLUMNS: &str = "\
    id, job_id, status, retry_count, max_retries, can_retry, last_retry_at, \
    error_message, bracket_count, worker_ref, submitted_at, started_at, \
    completed_at, created_at, updated_at";

/// Column list for `media_assets` queries.
const ASSET_COLUMNS: &str = "\
    id, processing_job_id, kind, status, url, created_at, updated_at";

/// Provides retry and status operations for HDR processing jobs.
pub struct ProcessingRepo;

impl ProcessingRepo {
    /// Find a processing job by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProcessingJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM processing_jobs WHERE id = $1");
        sqlx::query_as::<_, ProcessingJob>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Atomically reset a failed job for another attempt.
    ///
    /// The WHERE clause re-checks `status = 'failed'` and the expected
    /// `retry_count`, so the mutation only succeeds for the exact state the
    /// caller gated on. Returns `None` when the job changed underneath us
    /// (lost race or concurrent state transition).
    pub async fn begin_retry(
        pool: &PgPool,
        id: DbId,
        expected_retry_count: i32,
    ) -> Result<Option<ProcessingJob>, sqlx::Error> {
        let query = format!(
            "UPDATE processing_jobs \
             SET status = 'pending', retry_count = retry_count + 1, \
                 last_retry_at = NOW(), error_message = NULL, \
                 started_at = NULL, completed_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND status = 'failed' AND retry_count = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProcessingJob>(&query)
            .bind(id)
            .bind(expected_retry_count)
            .fetch_optional(pool)
            .await
    }

    /// Mark a pending job as queued once the external worker accepted it.
    pub async fn mark_queued(
        pool: &PgPool,
        id: DbId,
        worker_ref: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE processing_jobs \
             SET status = 'queued', worker_ref = $2, updated_at = NOW() \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .bind(worker_ref)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Reset all media assets derived from a processing job back to
    /// `processing` (called when the job is retried).
    pub async fn reset_assets(pool: &PgPool, processing_job_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE media_assets SET status = 'processing', updated_at = NOW() \
             WHERE processing_job_id = $1",
        )
        .bind(processing_job_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// List the media assets derived from a processing job.
    pub async fn list_assets(
        pool: &PgPool,
        processing_job_id: DbId,
    ) -> Result<Vec<MediaAsset>, sqlx::Error> {
        let query = format!(
            "SELECT {ASSET_COLUMNS} FROM media_assets \
             WHERE processing_job_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, MediaAsset>(&query)
            .bind(processing_job_id)
            .fetch_all(pool)
            .await
    }
}
