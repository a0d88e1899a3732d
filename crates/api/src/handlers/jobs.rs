//! Handlers for the ops job board: listing, detail, and bulk status moves.

use axum::extract::{Path, Query, State};
use axum::Json;
use focal_core::audit::event_types;
use focal_core::error::CoreError;
use focal_core::ops_status::OpsStatus;
use focal_core::types::DbId;
use focal_db::models::job::{BulkStatusRequest, Job, JobListQuery};
use focal_db::models::job_event::JobEvent;
use focal_db::repositories::{JobEventRepo, JobRepo};
use focal_events::OpsEvent;
use serde::Serialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Job row plus its append-only audit trail.
#[derive(Debug, Serialize)]
pub struct JobDetail {
    pub job: Job,
    pub events: Vec<JobEvent>,
}

/// Response body for `POST /admin/ops/bulk-status`.
#[derive(Debug, Serialize)]
pub struct BulkStatusResponse {
    pub success: bool,
    /// Number of rows updated.
    pub updated: usize,
    pub jobs: Vec<Job>,
}

/// GET /api/v1/admin/ops/jobs
///
/// List jobs with optional status filter and pagination.
pub async fn list_jobs(
    _staff: AuthStaff,
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> AppResult<Json<DataResponse<Vec<Job>>>> {
    // Reject unknown statuses up front with the enumerated list.
    if let Some(raw) = &params.status {
        raw.parse::<OpsStatus>()
            .map_err(|e| AppError::Core(CoreError::Validation(e)))?;
    }

    let jobs = JobRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: jobs }))
}

/// GET /api/v1/admin/ops/jobs/{id}
///
/// Job detail including its audit trail.
pub async fn get_job(
    _staff: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<JobDetail>>> {
    let job = JobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Job", id }))?;

    let events = JobEventRepo::list_for_job(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: JobDetail { job, events },
    }))
}

/// POST /api/v1/admin/ops/bulk-status
///
/// Move every job in `jobIds` to `newStatus` with one batched statement.
/// `delivered_at` is stamped exactly once, when a job first reaches
/// `delivered`. Audit events are appended fire-and-forget; their failure
/// never fails the status change.
pub async fn bulk_status(
    staff: AuthStaff,
    State(state): State<AppState>,
    Json(input): Json<BulkStatusRequest>,
) -> AppResult<Json<BulkStatusResponse>> {
    if input.job_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "jobIds must not be empty".into(),
        )));
    }
    if input.job_ids.len() > super::MAX_BATCH_IDS {
        return Err(AppError::Core(CoreError::Validation(format!(
            "jobIds must not exceed {} ids per request",
            super::MAX_BATCH_IDS
        ))));
    }

    let new_status: OpsStatus = input
        .new_status
        .parse()
        .map_err(|e: String| AppError::Core(CoreError::Validation(e)))?;

    let jobs = JobRepo::bulk_update_status(&state.pool, &input.job_ids, new_status).await?;

    for job in &jobs {
        let event_type = if new_status == OpsStatus::Delivered {
            event_types::JOB_DELIVERED
        } else {
            event_types::JOB_STATUS_CHANGED
        };
        state.event_bus.publish(
            OpsEvent::new(event_type)
                .with_source("job", job.id)
                .with_actor(staff.staff_id)
                .with_payload(json!({ "new_status": new_status.as_str() })),
        );

        // Per-job audit trail row, decoupled from the response path.
        let pool = state.pool.clone();
        let job_id = job.id;
        let actor = staff.staff_id;
        let detail = json!({ "new_status": new_status.as_str() });
        tokio::spawn(async move {
            if let Err(e) =
                JobEventRepo::insert(&pool, job_id, "status_changed", &detail, Some(actor)).await
            {
                tracing::warn!(error = %e, job_id, "Failed to append job audit event");
            }
        });
    }

    tracing::info!(
        count = jobs.len(),
        new_status = %new_status,
        staff_id = staff.staff_id,
        "Bulk status update applied",
    );

    Ok(Json(BulkStatusResponse {
        success: true,
        updated: jobs.len(),
        jobs,
    }))
}
