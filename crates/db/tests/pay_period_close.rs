//! Integration tests for pay period settlement against a real database.
//!
//! Exercises the repository layer to verify that:
//! - Closing aggregates the period's finished time entries and freezes totals
//! - Open entries (no clock-out) are excluded from settlement
//! - A second close is rejected and never recomputes the stored totals
//! - Closing an unknown period reports not-found without mutating anything

use assert_matches::assert_matches;
use chrono::{NaiveDate, TimeZone, Utc};
use focal_core::ops_status::PayPeriodStatus;
use focal_db::repositories::{CloseOutcome, PayPeriodRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_staff(pool: &PgPool, name: &str, email: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO staff (name, email, password_hash, role, payout_type, hourly_rate_cents) \
         VALUES ($1, $2, 'x', 'photographer', 'hourly', 2500) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

async fn seed_period(pool: &PgPool, start: NaiveDate, end: NaiveDate) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO pay_periods (start_date, end_date) VALUES ($1, $2) RETURNING id",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

async fn seed_entry(
    pool: &PgPool,
    staff_id: i64,
    day: NaiveDate,
    duration_minutes: i32,
    total_pay_cents: i64,
) {
    let clock_in = Utc
        .from_utc_datetime(&day.and_hms_opt(9, 0, 0).unwrap());
    let clock_out = clock_in + chrono::Duration::minutes(duration_minutes as i64);
    sqlx::query(
        "INSERT INTO time_entries \
             (staff_id, clock_in, clock_out, duration_minutes, total_pay_cents) \
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(staff_id)
    .bind(clock_in)
    .bind(clock_out)
    .bind(duration_minutes)
    .bind(total_pay_cents)
    .execute(pool)
    .await
    .unwrap();
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn close_freezes_settlement_totals(pool: PgPool) {
    let staff = seed_staff(&pool, "Mara Voss", "mara@focal.test").await;
    let period = seed_period(&pool, date(2026, 1, 1), date(2026, 1, 14)).await;

    seed_entry(&pool, staff, date(2026, 1, 3), 480, 120_000).await;
    seed_entry(&pool, staff, date(2026, 1, 14), 240, 60_000).await;

    // An open entry (no clock-out yet) must not count.
    let open_clock_in = Utc
        .from_utc_datetime(&date(2026, 1, 5).and_hms_opt(9, 0, 0).unwrap());
    sqlx::query("INSERT INTO time_entries (staff_id, clock_in) VALUES ($1, $2)")
        .bind(staff)
        .bind(open_clock_in)
        .execute(&pool)
        .await
        .unwrap();

    let outcome = PayPeriodRepo::close(&pool, period).await.unwrap();
    let closed = assert_matches!(outcome, CloseOutcome::Closed(p) => p);

    assert_eq!(closed.status, PayPeriodStatus::Closed);
    assert_eq!(closed.total_hours, Some(12.0));
    assert_eq!(closed.total_pay_cents, Some(180_000));
    assert!(closed.closed_at.is_some());
}

#[sqlx::test]
async fn second_close_never_recomputes_frozen_totals(pool: PgPool) {
    let staff = seed_staff(&pool, "Mara Voss", "mara@focal.test").await;
    let period = seed_period(&pool, date(2026, 1, 1), date(2026, 1, 14)).await;
    seed_entry(&pool, staff, date(2026, 1, 3), 480, 120_000).await;

    let first = PayPeriodRepo::close(&pool, period).await.unwrap();
    assert_matches!(first, CloseOutcome::Closed(_));

    // A late entry lands inside the window after the close.
    seed_entry(&pool, staff, date(2026, 1, 4), 60, 15_000).await;

    let second = PayPeriodRepo::close(&pool, period).await.unwrap();
    assert_matches!(second, CloseOutcome::NotOpen(PayPeriodStatus::Closed));

    let stored = PayPeriodRepo::find_by_id(&pool, period).await.unwrap().unwrap();
    assert_eq!(stored.total_hours, Some(8.0));
    assert_eq!(stored.total_pay_cents, Some(120_000));
}

#[sqlx::test]
async fn entries_outside_the_window_are_excluded(pool: PgPool) {
    let staff = seed_staff(&pool, "Mara Voss", "mara@focal.test").await;
    let period = seed_period(&pool, date(2026, 1, 1), date(2026, 1, 14)).await;

    seed_entry(&pool, staff, date(2025, 12, 31), 480, 120_000).await;
    seed_entry(&pool, staff, date(2026, 1, 15), 480, 120_000).await;
    seed_entry(&pool, staff, date(2026, 1, 7), 120, 30_000).await;

    let outcome = PayPeriodRepo::close(&pool, period).await.unwrap();
    let closed = assert_matches!(outcome, CloseOutcome::Closed(p) => p);

    assert_eq!(closed.total_hours, Some(2.0));
    assert_eq!(closed.total_pay_cents, Some(30_000));
}

#[sqlx::test]
async fn closing_unknown_period_reports_not_found(pool: PgPool) {
    let outcome = PayPeriodRepo::close(&pool, 424_242).await.unwrap();
    assert_matches!(outcome, CloseOutcome::NotFound);
}
