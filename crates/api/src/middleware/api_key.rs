//! API key authentication and per-key rate limiting for the public
//! location routes.
//!
//! Clients send their plaintext key in `X-Api-Key`. The key is hashed with
//! SHA-256 and looked up against stored hashes; the lookup itself stamps
//! `last_used_at`. Rate limiting is a fixed one-minute window tracked
//! in-process per key id, sized by the key's `rate_limit_per_minute`.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use focal_core::api_keys::hash_api_key;
use focal_core::error::CoreError;
use focal_core::types::DbId;
use focal_db::models::api_key::ApiKey;
use focal_db::repositories::ApiKeyRepo;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the plaintext API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Fixed-window request counter, one window per key per minute.
///
/// State is in-process only; a multi-instance deployment rate-limits per
/// instance. Windows from past minutes are overwritten on first touch, so
/// the map never grows beyond the set of keys seen.
#[derive(Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<DbId, Window>>,
}

struct Window {
    minute: u64,
    count: i32,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one request for `key_id` and check it against `limit`.
    ///
    /// Returns `false` when the key has exhausted its window.
    pub fn check(&self, key_id: DbId, limit: i32) -> bool {
        let minute = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() / 60)
            .unwrap_or(0);

        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");
        let window = windows.entry(key_id).or_insert(Window { minute, count: 0 });

        if window.minute != minute {
            window.minute = minute;
            window.count = 0;
        }

        window.count += 1;
        window.count <= limit
    }
}

/// Authenticated API key extracted from the `X-Api-Key` header.
///
/// Rejects with 401 when the header is missing or the key is unknown or
/// revoked, and 429 when the key's per-minute rate limit is exhausted.
#[derive(Debug, Clone)]
pub struct ApiKeyAuth(pub ApiKey);

impl FromRequestParts<AppState> for ApiKeyAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw_key = parts
            .headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing X-Api-Key header".into()))
            })?;

        let key = ApiKeyRepo::find_active_by_hash(&state.pool, &hash_api_key(raw_key))
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Invalid or revoked API key".into()))
            })?;

        if !state.rate_limiter.check(key.id, key.rate_limit_per_minute) {
            return Err(AppError::Core(CoreError::Cooldown {
                wait_seconds: 60,
                message: "Rate limit exceeded".into(),
            }));
        }

        Ok(ApiKeyAuth(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_within_limit_pass() {
        let limiter = RateLimiter::new();
        for _ in 0..5 {
            assert!(limiter.check(1, 5));
        }
    }

    #[test]
    fn request_over_limit_is_rejected() {
        let limiter = RateLimiter::new();
        for _ in 0..3 {
            assert!(limiter.check(1, 3));
        }
        assert!(!limiter.check(1, 3));
    }

    #[test]
    fn keys_are_limited_independently() {
        let limiter = RateLimiter::new();
        for _ in 0..2 {
            assert!(limiter.check(1, 2));
        }
        assert!(!limiter.check(1, 2));
        // A different key still has its full window.
        assert!(limiter.check(2, 2));
    }
}
