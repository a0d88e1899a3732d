//! API key models and DTOs.

use focal_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `api_keys` table.
///
/// Only the SHA-256 hash of the key is stored; the hash is also excluded
/// from serialized responses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ApiKey {
    pub id: DbId,
    pub name: String,
    pub key_prefix: String,
    #[serde(skip_serializing)]
    pub key_hash: String,
    pub rate_limit_per_minute: i32,
    pub is_revoked: bool,
    pub created_at: Timestamp,
    pub last_used_at: Option<Timestamp>,
}

/// Body for `POST /admin/api-keys`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiKey {
    pub name: String,
    pub rate_limit_per_minute: Option<i32>,
}
