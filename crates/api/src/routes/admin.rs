use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{api_keys, assignments, jobs, staff, time_periods};
use crate::state::AppState;

/// Mount `/admin` routes. Authentication is enforced per handler via the
/// `AuthStaff` / `RequireAdmin` extractors.
pub fn router() -> Router<AppState> {
    Router::new()
        // Ops job board
        .route("/ops/jobs", get(jobs::list_jobs))
        .route("/ops/jobs/{id}", get(jobs::get_job))
        .route("/ops/bulk-status", post(jobs::bulk_status))
        // Assignments
        .route("/assignments/candidates", get(assignments::candidates))
        .route("/assignments", post(assignments::create))
        // Staff roster
        .route("/staff", get(staff::list))
        .route("/staff/{id}/deactivate", post(staff::deactivate))
        // Payroll
        .route("/time/periods", get(time_periods::list))
        .route("/time/periods/{id}/breakdown", get(time_periods::breakdown))
        .route("/time/periods/{id}/close", post(time_periods::close))
        // API keys
        .route("/api-keys", get(api_keys::list).post(api_keys::create))
        .route("/api-keys/{id}/revoke", post(api_keys::revoke))
}
