//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use focal_core::audit::event_types;
use focal_core::error::CoreError;
use focal_core::types::DbId;
use focal_db::repositories::StaffRepo;
use focal_events::OpsEvent;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub staff: StaffInfo,
}

/// Public staff info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct StaffInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Returns a staff access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let staff = StaffRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid email or password".into()))
        })?;

    if !staff.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let password_valid = verify_password(&input.password, &staff.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid email or password".into(),
        )));
    }

    let role = staff.role.as_str();
    let access_token = generate_access_token(staff.id, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    state.event_bus.publish(
        OpsEvent::new(event_types::STAFF_LOGIN)
            .with_source("staff", staff.id)
            .with_actor(staff.id),
    );

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        staff: StaffInfo {
            id: staff.id,
            name: staff.name,
            email: staff.email,
            role: role.to_string(),
        },
    }))
}
