//! Repository for the append-only `job_events` audit trail.

use focal_core::types::DbId;
use sqlx::PgPool;

use crate::models::job_event::JobEvent;

/// Column list for `job_events` queries.
const COLUMNS: &str = "id, job_id, event_type, detail, actor_staff_id, created_at";

/// Provides append and read operations for per-job audit events.
pub struct JobEventRepo;

impl JobEventRepo {
    /// Append one audit event for a job.
    pub async fn insert(
        pool: &PgPool,
        job_id: DbId,
        event_type: &str,
        detail: &serde_json::Value,
        actor_staff_id: Option<DbId>,
    ) -> Result<JobEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO job_events (job_id, event_type, detail, actor_staff_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JobEvent>(&query)
            .bind(job_id)
            .bind(event_type)
            .bind(detail)
            .bind(actor_staff_id)
            .fetch_one(pool)
            .await
    }

    /// List a job's audit trail, oldest first.
    pub async fn list_for_job(pool: &PgPool, job_id: DbId) -> Result<Vec<JobEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM job_events WHERE job_id = $1 ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, JobEvent>(&query)
            .bind(job_id)
            .fetch_all(pool)
            .await
    }
}
