//! Pay period models.

use chrono::NaiveDate;
use focal_core::ops_status::PayPeriodStatus;
use focal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `pay_periods` table: one bi-weekly settlement window.
///
/// `total_hours` and `total_pay_cents` are `NULL` until the period is
/// closed; once set they are frozen.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PayPeriod {
    pub id: DbId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: PayPeriodStatus,
    pub total_hours: Option<f64>,
    pub total_pay_cents: Option<i64>,
    pub closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
