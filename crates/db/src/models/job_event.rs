//! Append-only per-job audit log models.

use focal_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `job_events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobEvent {
    pub id: DbId,
    pub job_id: DbId,
    pub event_type: String,
    pub detail: serde_json::Value,
    pub actor_staff_id: Option<DbId>,
    pub created_at: Timestamp,
}
