pub mod admin;
pub mod auth;
pub mod health;
pub mod location;
pub mod processing;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                login (public)
///
/// /admin/ops/jobs                            list jobs (staff)
/// /admin/ops/jobs/{id}                       job detail + audit trail (staff)
/// /admin/ops/bulk-status                     bulk status move (staff)
///
/// /admin/assignments/candidates              ranked candidates (staff)
/// /admin/assignments                         create, single or batch (staff)
///
/// /admin/staff                               roster (staff)
/// /admin/staff/{id}/deactivate               deactivate (admin)
///
/// /admin/time/periods                        list periods (staff)
/// /admin/time/periods/{id}/breakdown         per-staff preview (staff)
/// /admin/time/periods/{id}/close             close + freeze totals (admin)
///
/// /admin/api-keys                            list, create (admin)
/// /admin/api-keys/{id}/revoke                revoke (admin)
///
/// /processing/jobs/{id}                      processing status (staff)
/// /processing/retry                          POST single / PUT bulk (staff)
///
/// /location/scores                           Life Here Score (API key)
/// /location/dining                           dining listings (API key)
/// /location/events                           event listings (API key)
/// /location/attractions                      attraction listings (API key)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/admin", admin::router())
        .nest("/processing", processing::router())
        .nest("/location", location::router())
}
