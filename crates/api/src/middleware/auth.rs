//! JWT-based authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use focal_core::error::CoreError;
use focal_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Role string required by admin-only routes.
pub const ROLE_ADMIN: &str = "admin";

/// Authenticated staff member extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires a staff
/// session:
///
/// ```ignore
/// async fn my_handler(staff: AuthStaff) -> AppResult<Json<()>> {
///     tracing::info!(staff_id = staff.staff_id, role = %staff.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthStaff {
    /// The staff member's internal database id (from `claims.sub`).
    pub staff_id: DbId,
    /// The staff member's role name (e.g. `"admin"`, `"photographer"`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthStaff {
            staff_id: claims.sub,
            role: claims.role,
        })
    }
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(staff): RequireAdmin) -> AppResult<Json<()>> {
///     // staff is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthStaff);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let staff = AuthStaff::from_request_parts(parts, state).await?;
        if staff.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(staff))
    }
}
