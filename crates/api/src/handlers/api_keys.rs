//! Admin handlers for public API key management.
//!
//! All endpoints require the admin role via [`RequireAdmin`].
//! The plaintext key is returned **only** on creation; subsequent queries
//! expose only the `key_prefix` for identification.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use focal_core::api_keys::{generate_api_key, DEFAULT_RATE_LIMIT_PER_MINUTE};
use focal_core::audit::event_types;
use focal_core::error::CoreError;
use focal_core::types::{DbId, Timestamp};
use focal_db::models::api_key::CreateApiKey;
use focal_db::repositories::ApiKeyRepo;
use focal_events::OpsEvent;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Creation response carrying the plaintext key exactly once.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKeyCreatedResponse {
    pub id: DbId,
    pub name: String,
    pub key_prefix: String,
    pub plaintext_key: String,
    pub rate_limit_per_minute: i32,
    pub created_at: Timestamp,
}

/// POST /api/v1/admin/api-keys
///
/// Generate a new API key. The plaintext key is returned exactly once.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateApiKey>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }

    let rate_limit = input
        .rate_limit_per_minute
        .unwrap_or(DEFAULT_RATE_LIMIT_PER_MINUTE);
    if rate_limit <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "rateLimitPerMinute must be positive".into(),
        )));
    }

    let generated = generate_api_key();

    let key = ApiKeyRepo::insert(
        &state.pool,
        input.name.trim(),
        &generated.prefix,
        &generated.hash,
        rate_limit,
    )
    .await?;

    state.event_bus.publish(
        OpsEvent::new(event_types::API_KEY_CREATED)
            .with_source("api_key", key.id)
            .with_actor(admin.staff_id),
    );

    tracing::info!(
        api_key_id = key.id,
        key_prefix = %generated.prefix,
        admin_id = admin.staff_id,
        "API key created",
    );

    let response = ApiKeyCreatedResponse {
        id: key.id,
        name: key.name,
        key_prefix: generated.prefix,
        plaintext_key: generated.plaintext,
        rate_limit_per_minute: key.rate_limit_per_minute,
        created_at: key.created_at,
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: response })))
}

/// GET /api/v1/admin/api-keys
///
/// List all API keys. Shows prefix only, never the full key.
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let keys = ApiKeyRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: keys }))
}

/// POST /api/v1/admin/api-keys/{id}/revoke
///
/// Instantly revoke an API key.
pub async fn revoke(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let revoked = ApiKeyRepo::revoke(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ApiKey",
            id,
        }))?;

    state.event_bus.publish(
        OpsEvent::new(event_types::API_KEY_REVOKED)
            .with_source("api_key", id)
            .with_actor(admin.staff_id),
    );

    tracing::info!(
        api_key_id = id,
        key_prefix = %revoked.key_prefix,
        admin_id = admin.staff_id,
        "API key revoked",
    );

    Ok(Json(DataResponse { data: revoked }))
}
