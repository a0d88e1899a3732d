//! Public location data proxies, authenticated by API key.
//!
//! Each endpoint proxies the third-party places provider through the
//! shared TTL cache and reports cache provenance and handler latency in
//! the response `meta` block.

use std::time::Instant;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use focal_core::scoring::LifeHereScore;
use focal_places::types::PlaceCategory;
use focal_places::{PlacesClient, PlacesError};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::api_key::ApiKeyAuth;
use crate::response::{ProxyMeta, ProxyResponse};
use crate::state::AppState;

/// Query parameters shared by all location endpoints.
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    /// Street address the lookup is keyed on.
    pub address: String,
}

/// GET /api/v1/location/scores
///
/// Composite Life Here Score for an address.
pub async fn scores(
    _key: ApiKeyAuth,
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<LocationQuery>,
) -> AppResult<Json<ProxyResponse<LifeHereScore>>> {
    let started = Instant::now();
    let client = places_client(&state)?;

    let (score, cached) = client
        .life_here_score(&params.address)
        .await
        .map_err(map_places_error)?;

    Ok(Json(ProxyResponse {
        success: true,
        data: score,
        meta: meta(&headers, cached, started),
    }))
}

/// GET /api/v1/location/dining
pub async fn dining(
    key: ApiKeyAuth,
    state: State<AppState>,
    headers: HeaderMap,
    params: Query<LocationQuery>,
) -> AppResult<Json<ProxyResponse<serde_json::Value>>> {
    listings(key, state, headers, params, PlaceCategory::Dining).await
}

/// GET /api/v1/location/events
pub async fn events(
    key: ApiKeyAuth,
    state: State<AppState>,
    headers: HeaderMap,
    params: Query<LocationQuery>,
) -> AppResult<Json<ProxyResponse<serde_json::Value>>> {
    listings(key, state, headers, params, PlaceCategory::Events).await
}

/// GET /api/v1/location/attractions
pub async fn attractions(
    key: ApiKeyAuth,
    state: State<AppState>,
    headers: HeaderMap,
    params: Query<LocationQuery>,
) -> AppResult<Json<ProxyResponse<serde_json::Value>>> {
    listings(key, state, headers, params, PlaceCategory::Attractions).await
}

/// Shared proxy path for the three listing categories.
async fn listings(
    _key: ApiKeyAuth,
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<LocationQuery>,
    category: PlaceCategory,
) -> AppResult<Json<ProxyResponse<serde_json::Value>>> {
    let started = Instant::now();
    let client = places_client(&state)?;

    let response = client
        .listings(category, &params.address)
        .await
        .map_err(map_places_error)?;

    Ok(Json(ProxyResponse {
        success: true,
        data: response.data,
        meta: meta(&headers, response.cached, started),
    }))
}

fn places_client(state: &AppState) -> AppResult<&PlacesClient> {
    state
        .places
        .as_deref()
        .ok_or_else(|| AppError::Unavailable("Location provider is not configured".into()))
}

fn map_places_error(err: PlacesError) -> AppError {
    AppError::Upstream(err.to_string())
}

/// Build the response metadata block from the request-id header and the
/// handler-measured elapsed time.
fn meta(headers: &HeaderMap, cached: bool, started: Instant) -> ProxyMeta {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    ProxyMeta {
        request_id,
        cached,
        response_time_ms: started.elapsed().as_millis() as u64,
    }
}
