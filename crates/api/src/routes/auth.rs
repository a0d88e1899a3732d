use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Mount `/auth` routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/auth/login", post(auth::login))
}
