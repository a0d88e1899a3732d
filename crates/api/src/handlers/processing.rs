//! Handlers for HDR processing status and the retry controller.
//!
//! The retry gate (status, attempts, poison pill, cooldown) is evaluated
//! first for a precise denial, then the actual mutation re-checks state
//! with a compare-and-swap keyed on the expected `retry_count`. Worker
//! re-dispatch is best-effort: a dispatch failure leaves the job `pending`
//! and never fails the retry call.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use focal_core::audit::event_types;
use focal_core::error::CoreError;
use focal_core::ops_status::ProcessingStatus;
use focal_core::retry;
use focal_core::types::DbId;
use focal_db::models::processing::{BulkRetryRequest, MediaAsset, ProcessingJob, RetryRequest};
use focal_db::repositories::ProcessingRepo;
use focal_events::OpsEvent;
use focal_hdr::{FusionRequest, FusionStatus};
use serde::Serialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthStaff;
use crate::response::{BatchItemResult, BatchResponse, DataResponse};
use crate::state::AppState;

/// Processing job plus its derived media assets and, for in-flight jobs,
/// the live state reported by the worker.
#[derive(Debug, Serialize)]
pub struct ProcessingDetail {
    pub job: ProcessingJob,
    pub assets: Vec<MediaAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<FusionStatus>,
}

/// GET /api/v1/processing/jobs/{id}
pub async fn get_job(
    _staff: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProcessingDetail>>> {
    let job = ProcessingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProcessingJob",
            id,
        }))?;

    let assets = ProcessingRepo::list_assets(&state.pool, id).await?;
    let worker = fetch_worker_status(&state, &job).await;

    Ok(Json(DataResponse {
        data: ProcessingDetail {
            job,
            assets,
            worker,
        },
    }))
}

/// Poll the worker for live state while a job is queued or processing.
///
/// Best-effort: a fetch failure degrades to `None` so the detail endpoint
/// never depends on worker availability.
async fn fetch_worker_status(state: &AppState, job: &ProcessingJob) -> Option<FusionStatus> {
    if !matches!(
        job.status,
        ProcessingStatus::Queued | ProcessingStatus::Processing
    ) {
        return None;
    }
    let hdr = state.hdr.as_ref()?;
    let worker_ref = job.worker_ref.as_deref()?;

    match hdr.fetch_status(worker_ref).await {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::warn!(error = %e, job_id = job.id, "Worker status fetch failed");
            None
        }
    }
}

/// POST /api/v1/processing/retry
///
/// Retry one failed processing job.
pub async fn retry(
    staff: AuthStaff,
    State(state): State<AppState>,
    Json(input): Json<RetryRequest>,
) -> AppResult<Json<DataResponse<ProcessingJob>>> {
    let job = retry_one(&state, input.job_id, staff.staff_id).await?;
    Ok(Json(DataResponse { data: job }))
}

/// PUT /api/v1/processing/retry
///
/// Retry a list of jobs independently via the single-job path, collecting
/// per-item results.
pub async fn bulk_retry(
    staff: AuthStaff,
    State(state): State<AppState>,
    Json(input): Json<BulkRetryRequest>,
) -> AppResult<Json<BatchResponse<ProcessingJob>>> {
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

    let mut results = Vec::with_capacity(input.job_ids.len());
    for &id in &input.job_ids {
        results.push(match retry_one(&state, id, staff.staff_id).await {
            Ok(job) => BatchItemResult {
                id,
                success: true,
                error: None,
                result: Some(job),
            },
            Err(e) => BatchItemResult {
                id,
                success: false,
                error: Some(e.to_string()),
                result: None,
            },
        });
    }

    Ok(Json(BatchResponse::new(results)))
}

/// Gate, reset, and re-dispatch one processing job.
async fn retry_one(
    state: &AppState,
    id: DbId,
    actor_staff_id: DbId,
) -> AppResult<ProcessingJob> {
    let job = ProcessingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProcessingJob",
            id,
        }))?;

    retry::check_retry(&job.retry_state(), Utc::now())?;

    // CAS on the observed retry_count: the loser of a concurrent race
    // matches zero rows and surfaces as a conflict.
    let reset = ProcessingRepo::begin_retry(&state.pool, id, job.retry_count)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(
                "Job state changed during retry; refresh and try again".into(),
            ))
        })?;

    ProcessingRepo::reset_assets(&state.pool, id).await?;

    state.event_bus.publish(
        OpsEvent::new(event_types::PROCESSING_RETRIED)
            .with_source("processing_job", id)
            .with_actor(actor_staff_id)
            .with_payload(json!({ "retry_count": reset.retry_count })),
    );

    // Best-effort worker re-dispatch off the request path.
    if let Some(hdr) = &state.hdr {
        let hdr = hdr.clone();
        let pool = state.pool.clone();
        let bracket_count = reset.bracket_count;
        tokio::spawn(async move {
            let request = FusionRequest {
                reference: format!("pj-{id}"),
                bracket_count,
            };
            match hdr.submit_fusion(&request).await {
                Ok(submitted) => {
                    if let Err(e) =
                        ProcessingRepo::mark_queued(&pool, id, &submitted.worker_ref).await
                    {
                        tracing::warn!(error = %e, job_id = id, "Failed to mark job queued");
                    }
                }
                Err(e) => {
                    // Job stays pending for a later dispatch attempt.
                    tracing::warn!(error = %e, job_id = id, "HDR worker dispatch failed");
                }
            }
        });
    }

    tracing::info!(
        job_id = id,
        retry_count = reset.retry_count,
        staff_id = actor_staff_id,
        "Processing job retried",
    );

    Ok(reset)
}
