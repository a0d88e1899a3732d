//! Repository for the `api_keys` table.

use focal_core::types::DbId;
use sqlx::PgPool;

use crate::models::api_key::ApiKey;

/// Column list for `api_keys` queries.
const COLUMNS: &str = "\
    id, name, key_prefix, key_hash, rate_limit_per_minute, is_revoked, \
    created_at, last_used_at";

/// Provides management and authentication lookups for public API keys.
pub struct ApiKeyRepo;

impl ApiKeyRepo {
    /// Store a new key. Only the hash is persisted; the plaintext is the
    /// caller's responsibility to surface exactly once.
    pub async fn insert(
        pool: &PgPool,
        name: &str,
        key_prefix: &str,
        key_hash: &str,
        rate_limit_per_minute: i32,
    ) -> Result<ApiKey, sqlx::Error> {
        let query = format!(
            "INSERT INTO api_keys (name, key_prefix, key_hash, rate_limit_per_minute) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(name)
            .bind(key_prefix)
            .bind(key_hash)
            .bind(rate_limit_per_minute)
            .fetch_one(pool)
            .await
    }

    /// List all keys, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ApiKey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM api_keys ORDER BY created_at DESC");
        sqlx::query_as::<_, ApiKey>(&query).fetch_all(pool).await
    }

    /// Revoke a key. Returns the updated row, or `None` if no such key.
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<Option<ApiKey>, sqlx::Error> {
        let query = format!(
            "UPDATE api_keys SET is_revoked = TRUE WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Authentication lookup: find a non-revoked key by its SHA-256 hash,
    /// stamping `last_used_at` as a side effect.
    pub async fn find_active_by_hash(
        pool: &PgPool,
        key_hash: &str,
    ) -> Result<Option<ApiKey>, sqlx::Error> {
        let query = format!(
            "UPDATE api_keys SET last_used_at = NOW() \
             WHERE key_hash = $1 AND NOT is_revoked \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ApiKey>(&query)
            .bind(key_hash)
            .fetch_optional(pool)
            .await
    }
}
