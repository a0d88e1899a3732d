use axum::routing::get;
use axum::Router;

use crate::handlers::location;
use crate::state::AppState;

/// Mount the public `/location` proxy routes (API-key authenticated).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/scores", get(location::scores))
        .route("/dining", get(location::dining))
        .route("/events", get(location::events))
        .route("/attractions", get(location::attractions))
}
