use std::sync::Arc;

use crate::config::ServerConfig;
use crate::middleware::api_key::RateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: focal_db::DbPool,
    /// Server configuration (JWT secret, timeouts, CORS origins).
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing ops events.
    pub event_bus: Arc<focal_events::EventBus>,
    /// External HDR worker client; `None` when `HDR_WORKER_URL` is unset.
    pub hdr: Option<Arc<focal_hdr::HdrClient>>,
    /// Places provider client; `None` when the provider is unconfigured.
    pub places: Option<Arc<focal_places::PlacesClient>>,
    /// Per-API-key fixed-window rate limiter for the public location routes.
    pub rate_limiter: Arc<RateLimiter>,
}
