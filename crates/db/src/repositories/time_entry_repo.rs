//! Repository for the `time_entries` table.

use chrono::NaiveDate;
use focal_core::payroll::SettlementEntry;
use sqlx::PgPool;

/// Provides read operations over clock-in/clock-out records.
pub struct TimeEntryRepo;

impl TimeEntryRepo {
    /// Fetch the finalized entries in range as settlement inputs.
    ///
    /// Open entries (no clock-out yet) are excluded: their duration and pay
    /// are not yet derived.
    pub async fn settlement_entries_in_range(
        pool: &PgPool,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<SettlementEntry>, sqlx::Error> {
        let rows = sqlx::query_as::<_, SettlementRow>(
            "SELECT staff_id, duration_minutes, total_pay_cents FROM time_entries \
             WHERE clock_in >= $1 AND clock_in < $2 + INTERVAL '1 day' \
               AND clock_out IS NOT NULL",
        )
        .bind(start_date)
        .bind(end_date)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SettlementEntry {
                staff_id: r.staff_id,
                duration_minutes: r.duration_minutes,
                total_pay_cents: r.total_pay_cents,
            })
            .collect())
    }
}

/// Projection row for settlement aggregation.
#[derive(sqlx::FromRow)]
struct SettlementRow {
    staff_id: i64,
    duration_minutes: i32,
    total_pay_cents: i64,
}
