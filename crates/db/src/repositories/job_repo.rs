//! Repository for the `jobs` table.
//!
//! Status literals always go through [`OpsStatus`]; repositories never
//! touch raw status strings.

use focal_core::ops_status::OpsStatus;
use focal_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::job::{Job, JobListQuery};

/// Column list for `jobs` queries.
const COLUMNS: &str = "\
    id, address, ops_status, photographer_id, editor_id, is_rush, \
    scheduled_at, delivered_at, created_at, updated_at";

/// Maximum page size for job listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for job listing.
const DEFAULT_LIMIT: i64 = 50;

/// Provides CRUD operations for property media jobs.
pub struct JobRepo;

impl JobRepo {
    /// Find a job by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List jobs with optional status filter and pagination.
    pub async fn list(pool: &PgPool, params: &JobListQuery) -> Result<Vec<Job>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        // Pre-parsed by the handler; parse again here so the repo stays safe
        // when called directly.
        let status: Option<OpsStatus> = match &params.status {
            Some(raw) => Some(raw.parse().map_err(|e: String| {
                sqlx::Error::ColumnDecode {
                    index: "status".into(),
                    source: e.into(),
                }
            })?),
            None => None,
        };

        let query = if status.is_some() {
            format!(
                "SELECT {COLUMNS} FROM jobs WHERE ops_status = $1 \
                 ORDER BY created_at DESC LIMIT $2 OFFSET $3"
            )
        } else {
            format!(
                "SELECT {COLUMNS} FROM jobs \
                 ORDER BY created_at DESC LIMIT $1 OFFSET $2"
            )
        };

        let mut q = sqlx::query_as::<_, Job>(&query);
        if let Some(status) = status {
            q = q.bind(status.as_str());
        }
        q.bind(limit).bind(offset).fetch_all(pool).await
    }

    /// Update the ops status of every job in `ids` with one batched statement.
    ///
    /// `delivered_at` is stamped only when the new status is `delivered`, and
    /// only if it has never been set -- repeat delivery calls are idempotent.
    /// Returns the updated rows.
    pub async fn bulk_update_status(
        pool: &PgPool,
        ids: &[DbId],
        new_status: OpsStatus,
    ) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs \
             SET ops_status = $2, \
                 delivered_at = CASE WHEN $2 = 'delivered' \
                     THEN COALESCE(delivered_at, NOW()) ELSE delivered_at END, \
                 updated_at = NOW() \
             WHERE id = ANY($1) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(ids)
            .bind(new_status.as_str())
            .fetch_all(pool)
            .await
    }

    /// Write a photographer assignment (and shoot time) onto a job.
    ///
    /// Returns `None` if the job does not exist.
    pub async fn assign_photographer(
        pool: &PgPool,
        job_id: DbId,
        staff_id: DbId,
        scheduled_at: Option<Timestamp>,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs \
             SET photographer_id = $2, \
                 scheduled_at = COALESCE($3, scheduled_at), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .bind(staff_id)
            .bind(scheduled_at)
            .fetch_optional(pool)
            .await
    }

    /// Write an editor assignment onto a job.
    ///
    /// Returns `None` if the job does not exist.
    pub async fn assign_editor(
        pool: &PgPool,
        job_id: DbId,
        staff_id: DbId,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs \
             SET editor_id = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .bind(staff_id)
            .fetch_optional(pool)
            .await
    }
}
