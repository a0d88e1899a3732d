//! Handlers for the staff roster.

use axum::extract::{Path, State};
use axum::Json;
use focal_core::audit::event_types;
use focal_core::error::CoreError;
use focal_core::types::DbId;
use focal_db::models::staff::Staff;
use focal_db::repositories::StaffRepo;
use focal_events::OpsEvent;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthStaff, RequireAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/staff
pub async fn list(
    _staff: AuthStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Staff>>>> {
    let roster = StaffRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: roster }))
}

/// POST /api/v1/admin/staff/{id}/deactivate
///
/// Staff are never hard-deleted; deactivation removes them from future
/// assignment eligibility while preserving history.
pub async fn deactivate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Staff>>> {
    let staff = StaffRepo::deactivate(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Staff", id }))?;

    state.event_bus.publish(
        OpsEvent::new(event_types::STAFF_DEACTIVATED)
            .with_source("staff", staff.id)
            .with_actor(admin.staff_id),
    );

    tracing::info!(staff_id = id, admin_id = admin.staff_id, "Staff member deactivated");

    Ok(Json(DataResponse { data: staff }))
}
