use axum::routing::{get, post};
use axum::Router;

use crate::handlers::processing;
use crate::state::AppState;

/// Mount `/processing` routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs/{id}", get(processing::get_job))
        .route("/retry", post(processing::retry).put(processing::bulk_retry))
}
