//! Staff roster models.

use focal_core::assignment::StaffRole;
use focal_core::payroll::PayoutType;
use focal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `staff` table.
///
/// The password hash never leaves the server: it is skipped during
/// serialization.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Staff {
    pub id: DbId,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: StaffRole,
    pub is_active: bool,
    #[sqlx(try_from = "String")]
    pub payout_type: PayoutType,
    pub hourly_rate_cents: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
