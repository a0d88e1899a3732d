//! Integration tests for the retry compare-and-swap against a real database.
//!
//! Exercises the repository layer to verify that:
//! - `begin_retry` resets a failed job and increments `retry_count`
//! - A stale expected count matches zero rows (lost race) and mutates nothing
//! - Jobs that are not `failed` can never be reset
//! - `reset_assets` flips every derived asset back to `processing`

use focal_core::ops_status::{AssetStatus, ProcessingStatus};
use focal_db::repositories::ProcessingRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_job(pool: &PgPool) -> i64 {
    let row: (i64,) =
        sqlx::query_as("INSERT INTO jobs (address) VALUES ('12 Harbor View Dr') RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap();
    row.0
}

async fn seed_failed(pool: &PgPool, job_id: i64, retry_count: i32) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO processing_jobs \
             (job_id, status, retry_count, error_message, bracket_count, completed_at) \
         VALUES ($1, 'failed', $2, 'fusion pass crashed', 3, NOW()) RETURNING id",
    )
    .bind(job_id)
    .bind(retry_count)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

async fn seed_asset(pool: &PgPool, processing_job_id: i64, status: &str) {
    sqlx::query(
        "INSERT INTO media_assets (processing_job_id, kind, status) VALUES ($1, 'hdr_photo', $2)",
    )
    .bind(processing_job_id)
    .bind(status)
    .execute(pool)
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn begin_retry_resets_the_failed_job(pool: PgPool) {
    let job = seed_job(&pool).await;
    let id = seed_failed(&pool, job, 1).await;

    let reset = ProcessingRepo::begin_retry(&pool, id, 1)
        .await
        .unwrap()
        .expect("matching state must win the swap");

    assert_eq!(reset.status, ProcessingStatus::Pending);
    assert_eq!(reset.retry_count, 2);
    assert_eq!(reset.error_message, None);
    assert_eq!(reset.completed_at, None);
    assert!(reset.last_retry_at.is_some());
}

#[sqlx::test]
async fn stale_retry_count_loses_the_race(pool: PgPool) {
    let job = seed_job(&pool).await;
    let id = seed_failed(&pool, job, 2).await;

    let lost = ProcessingRepo::begin_retry(&pool, id, 1).await.unwrap();
    assert!(lost.is_none());

    // The loser mutated nothing.
    let row = ProcessingRepo::find_by_id(&pool, id).await.unwrap().unwrap();
    assert_eq!(row.status, ProcessingStatus::Failed);
    assert_eq!(row.retry_count, 2);
    assert_eq!(row.error_message.as_deref(), Some("fusion pass crashed"));
}

#[sqlx::test]
async fn only_failed_jobs_can_be_reset(pool: PgPool) {
    let job = seed_job(&pool).await;
    let id = seed_failed(&pool, job, 0).await;

    let first = ProcessingRepo::begin_retry(&pool, id, 0).await.unwrap();
    assert!(first.is_some());

    // The job is now pending; a second swap with the current count still
    // matches zero rows.
    let second = ProcessingRepo::begin_retry(&pool, id, 1).await.unwrap();
    assert!(second.is_none());
}

#[sqlx::test]
async fn reset_assets_marks_all_assets_processing(pool: PgPool) {
    let job = seed_job(&pool).await;
    let id = seed_failed(&pool, job, 0).await;
    seed_asset(&pool, id, "failed").await;
    seed_asset(&pool, id, "ready").await;

    let affected = ProcessingRepo::reset_assets(&pool, id).await.unwrap();
    assert_eq!(affected, 2);

    let assets = ProcessingRepo::list_assets(&pool, id).await.unwrap();
    assert_eq!(assets.len(), 2);
    for asset in assets {
        assert_eq!(asset.status, AssetStatus::Processing);
    }
}
