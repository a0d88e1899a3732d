//! Handlers for assignment candidates and creation.
//!
//! Candidate ranking is the greedy least-busy heuristic from
//! `focal_core::assignment`. Creation accepts a single assignment or a
//! batch; batch items are processed independently and collected into a
//! per-item result list (partial failure is reported, never rolled back).

use axum::extract::{Query, State};
use axum::Json;
use focal_core::assignment::{self, AssignmentRole, Candidate};
use focal_core::audit::event_types;
use focal_core::error::CoreError;
use focal_core::types::DbId;
use focal_db::models::job::{AssignmentRequest, CandidateQuery, CreateAssignment, Job};
use focal_db::repositories::{JobRepo, StaffRepo};
use focal_events::OpsEvent;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthStaff;
use crate::response::{BatchItemResult, BatchResponse, DataResponse};
use crate::state::AppState;

/// Why one assignment item failed.
enum AssignError {
    StaffNotFound(DbId),
    ListingNotFound(DbId),
    Rejected(String),
    Db(sqlx::Error),
}

impl AssignError {
    fn message(&self) -> String {
        match self {
            AssignError::StaffNotFound(id) => format!("Staff member {id} not found"),
            AssignError::ListingNotFound(id) => format!("Listing {id} not found"),
            AssignError::Rejected(msg) => msg.clone(),
            AssignError::Db(e) => {
                tracing::error!(error = %e, "Assignment write failed");
                "Assignment could not be saved".to_string()
            }
        }
    }
}

/// GET /api/v1/admin/assignments/candidates?role=photographer
///
/// Active staff eligible for the role, least-busy first.
pub async fn candidates(
    _staff: AuthStaff,
    State(state): State<AppState>,
    Query(params): Query<CandidateQuery>,
) -> AppResult<Json<DataResponse<Vec<Candidate>>>> {
    let unranked = StaffRepo::list_candidates(&state.pool, params.role).await?;
    let ranked = assignment::rank_candidates(unranked);
    Ok(Json(DataResponse { data: ranked }))
}

/// POST /api/v1/admin/assignments
///
/// Single form returns the updated job (or the error as an HTTP status);
/// batch form always returns 200 with per-item results plus a summary.
pub async fn create(
    staff: AuthStaff,
    State(state): State<AppState>,
    Json(input): Json<AssignmentRequest>,
) -> AppResult<axum::response::Response> {
    use axum::response::IntoResponse;

    match input {
        AssignmentRequest::Single(item) => {
            let listing_id = item.listing_id;
            match assign_one(&state, &item, staff.staff_id).await {
                Ok(job) => Ok(Json(DataResponse { data: job }).into_response()),
                Err(AssignError::StaffNotFound(id)) => Err(AppError::Core(CoreError::NotFound {
                    entity: "Staff",
                    id,
                })),
                Err(AssignError::ListingNotFound(_)) => Err(AppError::Core(CoreError::NotFound {
                    entity: "Job",
                    id: listing_id,
                })),
                Err(AssignError::Rejected(msg)) => {
                    Err(AppError::Core(CoreError::Validation(msg)))
                }
                Err(AssignError::Db(e)) => Err(AppError::Database(e)),
            }
        }
        AssignmentRequest::Batch { assignments } => {
            let mut results = Vec::with_capacity(assignments.len());
            for item in &assignments {
                let outcome = assign_one(&state, item, staff.staff_id).await;
                results.push(match outcome {
                    Ok(job) => BatchItemResult {
                        id: item.listing_id,
                        success: true,
                        error: None,
                        result: Some(job),
                    },
                    Err(e) => BatchItemResult {
                        id: item.listing_id,
                        success: false,
                        error: Some(e.message()),
                        result: None,
                    },
                });
            }
            Ok(Json(BatchResponse::new(results)).into_response())
        }
    }
}

/// Validate and write one assignment, publishing the notification event.
async fn assign_one(
    state: &AppState,
    item: &CreateAssignment,
    actor_staff_id: DbId,
) -> Result<Job, AssignError> {
    let staff = StaffRepo::find_by_id(&state.pool, item.staff_id)
        .await
        .map_err(AssignError::Db)?
        .ok_or(AssignError::StaffNotFound(item.staff_id))?;

    assignment::validate_candidate(&staff.name, staff.is_active, staff.role, item.role)
        .map_err(AssignError::Rejected)?;

    let job = match item.role {
        AssignmentRole::Photographer => {
            JobRepo::assign_photographer(&state.pool, item.listing_id, staff.id, item.scheduled_at)
                .await
        }
        AssignmentRole::Editor => {
            JobRepo::assign_editor(&state.pool, item.listing_id, staff.id).await
        }
    }
    .map_err(AssignError::Db)?
    .ok_or(AssignError::ListingNotFound(item.listing_id))?;

    // Notification and audit fan-out happen off the request path.
    state.event_bus.publish(
        OpsEvent::new(event_types::ASSIGNMENT_CREATED)
            .with_source("job", job.id)
            .with_actor(actor_staff_id)
            .with_payload(json!({
                "staff_id": staff.id,
                "role": item.role.as_str(),
                "address": job.address,
            })),
    );

    Ok(job)
}
