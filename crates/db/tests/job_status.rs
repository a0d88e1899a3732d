//! Integration tests for bulk status moves against a real database.
//!
//! Exercises the repository layer to verify that:
//! - A bulk update moves every listed job and returns the updated rows
//! - `delivered_at` is stamped on the first transition to `delivered` only
//! - Later status moves never clear or re-stamp `delivered_at`
//! - Ids with no matching row are skipped, not errors

use focal_core::ops_status::OpsStatus;
use focal_db::repositories::JobRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_job(pool: &PgPool, address: &str) -> i64 {
    let row: (i64,) = sqlx::query_as("INSERT INTO jobs (address) VALUES ($1) RETURNING id")
        .bind(address)
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn bulk_update_moves_every_listed_job(pool: PgPool) {
    let a = seed_job(&pool, "12 Harbor View Dr").await;
    let b = seed_job(&pool, "77 Cannery Row").await;
    let untouched = seed_job(&pool, "3 Beacon St").await;

    let updated = JobRepo::bulk_update_status(&pool, &[a, b], OpsStatus::Scheduled)
        .await
        .unwrap();

    assert_eq!(updated.len(), 2);
    for job in &updated {
        assert_eq!(job.ops_status, OpsStatus::Scheduled);
    }

    let other = JobRepo::find_by_id(&pool, untouched).await.unwrap().unwrap();
    assert_eq!(other.ops_status, OpsStatus::Pending);
}

#[sqlx::test]
async fn delivered_at_is_stamped_exactly_once(pool: PgPool) {
    let id = seed_job(&pool, "12 Harbor View Dr").await;

    let delivered = JobRepo::bulk_update_status(&pool, &[id], OpsStatus::Delivered)
        .await
        .unwrap();
    let first_stamp = delivered[0].delivered_at.unwrap();

    // Moving away from delivered keeps the original stamp.
    let reopened = JobRepo::bulk_update_status(&pool, &[id], OpsStatus::InQc)
        .await
        .unwrap();
    assert_eq!(reopened[0].delivered_at, Some(first_stamp));

    // A second delivery never re-stamps.
    let redelivered = JobRepo::bulk_update_status(&pool, &[id], OpsStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(redelivered[0].delivered_at, Some(first_stamp));
}

#[sqlx::test]
async fn non_delivered_moves_never_set_delivered_at(pool: PgPool) {
    let id = seed_job(&pool, "77 Cannery Row").await;

    let updated = JobRepo::bulk_update_status(&pool, &[id], OpsStatus::InEditing)
        .await
        .unwrap();
    assert_eq!(updated[0].delivered_at, None);
}

#[sqlx::test]
async fn missing_ids_are_skipped(pool: PgPool) {
    let id = seed_job(&pool, "3 Beacon St").await;

    let updated = JobRepo::bulk_update_status(&pool, &[id, 9_999_999], OpsStatus::Staged)
        .await
        .unwrap();

    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].id, id);
}
