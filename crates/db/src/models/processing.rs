//! Processing job and media asset models.

use focal_core::ops_status::{AssetStatus, ProcessingStatus};
use focal_core::retry::RetryState;
use focal_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `processing_jobs` table: one HDR-bracket-fusion request
/// sent to the external GPU worker.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProcessingJob {
    pub id: DbId,
    pub job_id: DbId,
    #[sqlx(try_from = "String")]
    pub status: ProcessingStatus,
    pub retry_count: i32,
    pub max_retries: i32,
    pub can_retry: bool,
    pub last_retry_at: Option<Timestamp>,
    pub error_message: Option<String>,
    pub bracket_count: i32,
    pub worker_ref: Option<String>,
    pub submitted_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProcessingJob {
    /// The retry-relevant fields, for the eligibility gate.
    pub fn retry_state(&self) -> RetryState {
        RetryState {
            status: self.status,
            retry_count: self.retry_count,
            max_retries: self.max_retries,
            can_retry: self.can_retry,
            last_retry_at: self.last_retry_at,
        }
    }
}

/// A row from the `media_assets` table: one output derived from a
/// processing job (fused HDR photo, thumbnail, etc.).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaAsset {
    pub id: DbId,
    pub processing_job_id: DbId,
    pub kind: String,
    #[sqlx(try_from = "String")]
    pub status: AssetStatus,
    pub url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body for `POST /processing/retry`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryRequest {
    pub job_id: DbId,
}

/// Body for `PUT /processing/retry` (bulk).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRetryRequest {
    pub job_ids: Vec<DbId>,
}
