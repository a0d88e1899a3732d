//! Repository for the `pay_periods` table.
//!
//! Closing runs in a transaction with the period row locked, so the
//! open-status check, the aggregation, and the freeze are atomic. A
//! partial unique index on `status = 'open'` additionally guarantees at
//! most one open period exists.

use focal_core::ops_status::PayPeriodStatus;
use focal_core::payroll::{self, SettlementEntry};
use focal_core::types::DbId;
use sqlx::PgPool;

use crate::models::pay_period::PayPeriod;

/// Column list for `pay_periods` queries.
const COLUMNS: &str = "\
    id, start_date, end_date, status, total_hours, total_pay_cents, \
    closed_at, created_at";

/// Result of a close attempt.
#[derive(Debug)]
pub enum CloseOutcome {
    /// The period was closed; the returned row carries the frozen totals.
    Closed(PayPeriod),
    /// The period exists but is not open; nothing was mutated.
    NotOpen(PayPeriodStatus),
    /// No such period.
    NotFound,
}

/// Provides settlement operations over pay periods.
pub struct PayPeriodRepo;

impl PayPeriodRepo {
    /// Find a pay period by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PayPeriod>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pay_periods WHERE id = $1");
        sqlx::query_as::<_, PayPeriod>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all periods, newest window first.
    pub async fn list(pool: &PgPool) -> Result<Vec<PayPeriod>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pay_periods ORDER BY start_date DESC");
        sqlx::query_as::<_, PayPeriod>(&query).fetch_all(pool).await
    }

    /// Close an open pay period: aggregate its time entries and freeze the
    /// totals. Closed periods are never recomputed; a second close attempt
    /// reports [`CloseOutcome::NotOpen`] without touching the stored totals.
    pub async fn close(pool: &PgPool, period_id: DbId) -> Result<CloseOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock_query = format!("SELECT {COLUMNS} FROM pay_periods WHERE id = $1 FOR UPDATE");
        let period = sqlx::query_as::<_, PayPeriod>(&lock_query)
            .bind(period_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(period) = period else {
            return Ok(CloseOutcome::NotFound);
        };

        if period.status != PayPeriodStatus::Open {
            return Ok(CloseOutcome::NotOpen(period.status));
        }

        let entries = sqlx::query_as::<_, SettlementRow>(
            "SELECT staff_id, duration_minutes, total_pay_cents FROM time_entries \
             WHERE clock_in >= $1 AND clock_in < $2 + INTERVAL '1 day' \
               AND clock_out IS NOT NULL",
        )
        .bind(period.start_date)
        .bind(period.end_date)
        .fetch_all(&mut *tx)
        .await?;

        let inputs: Vec<SettlementEntry> = entries
            .into_iter()
            .map(|r| SettlementEntry {
                staff_id: r.staff_id,
                duration_minutes: r.duration_minutes,
                total_pay_cents: r.total_pay_cents,
            })
            .collect();
        let totals = payroll::settle(&inputs);

        let update_query = format!(
            "UPDATE pay_periods \
             SET status = 'closed', total_hours = $2, total_pay_cents = $3, \
                 closed_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let closed = sqlx::query_as::<_, PayPeriod>(&update_query)
            .bind(period_id)
            .bind(totals.total_hours)
            .bind(totals.total_pay_cents)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(CloseOutcome::Closed(closed))
    }
}

/// Projection row for in-transaction settlement aggregation.
#[derive(sqlx::FromRow)]
struct SettlementRow {
    staff_id: i64,
    duration_minutes: i32,
    total_pay_cents: i64,
}
