//! Handlers for pay period listing, breakdown preview, and close.

use axum::extract::{Path, State};
use axum::Json;
use focal_core::audit::event_types;
use focal_core::error::CoreError;
use focal_core::payroll::{self, PeriodTotals, StaffBreakdown};
use focal_core::types::DbId;
use focal_db::models::pay_period::PayPeriod;
use focal_db::repositories::{CloseOutcome, PayPeriodRepo, TimeEntryRepo};
use focal_events::OpsEvent;
use serde::Serialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthStaff, RequireAdmin};
use crate::response::DataResponse;
use crate::state::AppState;

/// Per-staff preview of an open period, computed on demand and never
/// persisted.
#[derive(Debug, Serialize)]
pub struct BreakdownResponse {
    pub period: PayPeriod,
    pub totals: PeriodTotals,
    pub breakdown: Vec<StaffBreakdown>,
}

/// Response body for a successful close.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseResponse {
    pub success: bool,
    pub total_hours: f64,
    pub total_pay_cents: i64,
}

/// GET /api/v1/admin/time/periods
pub async fn list(
    _staff: AuthStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<PayPeriod>>>> {
    let periods = PayPeriodRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: periods }))
}

/// GET /api/v1/admin/time/periods/{id}/breakdown
///
/// Grand totals plus the per-staff split for inspection before close.
pub async fn breakdown(
    _staff: AuthStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<BreakdownResponse>>> {
    let period = PayPeriodRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "PayPeriod",
            id,
        }))?;

    let entries =
        TimeEntryRepo::settlement_entries_in_range(&state.pool, period.start_date, period.end_date)
            .await?;

    let totals = payroll::settle(&entries);
    let breakdown = payroll::per_staff_breakdown(&entries);

    Ok(Json(DataResponse {
        data: BreakdownResponse {
            period,
            totals,
            breakdown,
        },
    }))
}

/// POST /api/v1/admin/time/periods/{id}/close
///
/// Aggregate the period's time entries and freeze the totals. A second
/// close attempt is rejected without recomputing anything.
pub async fn close(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CloseResponse>> {
    let period = match PayPeriodRepo::close(&state.pool, id).await? {
        CloseOutcome::Closed(period) => period,
        CloseOutcome::NotOpen(status) => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Pay period is not open (status: {})",
                status.as_str()
            ))));
        }
        CloseOutcome::NotFound => {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "PayPeriod",
                id,
            }));
        }
    };

    let total_hours = period.total_hours.unwrap_or(0.0);
    let total_pay_cents = period.total_pay_cents.unwrap_or(0);

    state.event_bus.publish(
        OpsEvent::new(event_types::PAY_PERIOD_CLOSED)
            .with_source("pay_period", period.id)
            .with_actor(admin.staff_id)
            .with_payload(json!({
                "total_hours": total_hours,
                "total_pay_cents": total_pay_cents,
            })),
    );

    tracing::info!(
        period_id = id,
        total_hours,
        total_pay_cents,
        admin_id = admin.staff_id,
        "Pay period closed",
    );

    Ok(Json(CloseResponse {
        success: true,
        total_hours,
        total_pay_cents,
    }))
}
