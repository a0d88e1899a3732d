//! Shared in-memory TTL cache for provider responses.
//!
//! Keys are `"{category}:{address}"` strings built by the client. Entries
//! expire after a fixed TTL; expired entries are dropped lazily on lookup
//! and swept opportunistically on insert once the map grows past a
//! threshold.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

/// Default entry lifetime.
const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Sweep expired entries once the map holds this many keys.
const SWEEP_THRESHOLD: usize = 1024;

struct CacheEntry {
    value: serde_json::Value,
    expires_at: Instant,
}

/// Concurrent TTL cache for JSON provider responses.
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl ResponseCache {
    /// Create a cache with a specific entry TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Look up a fresh entry, dropping it if it has expired.
    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => return None,
            }
        }
        // Entry exists but is stale; upgrade to a write lock to remove it.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.expires_at <= Instant::now() {
                entries.remove(key);
            }
        }
        None
    }

    /// Store a response under the given key.
    pub async fn insert(&self, key: impl Into<String>, value: serde_json::Value) {
        let mut entries = self.entries.write().await;
        if entries.len() >= SWEEP_THRESHOLD {
            let now = Instant::now();
            entries.retain(|_, entry| entry.expires_at > now);
        }
        entries.insert(
            key.into(),
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Number of entries currently held, including not-yet-swept stale ones.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when the cache holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn miss_then_hit() {
        let cache = ResponseCache::default();
        assert!(cache.get("dining:123 Main St").await.is_none());

        cache
            .insert("dining:123 Main St", serde_json::json!({"items": []}))
            .await;

        let hit = cache.get("dining:123 Main St").await;
        assert_eq!(hit, Some(serde_json::json!({"items": []})));
    }

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let cache = ResponseCache::new(Duration::from_secs(60));
        cache.insert("events:addr", serde_json::json!(1)).await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.get("events:addr").await.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get("events:addr").await.is_none());
        // The stale entry was dropped on lookup.
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn insert_overwrites_existing_key() {
        let cache = ResponseCache::default();
        cache.insert("k", serde_json::json!("old")).await;
        cache.insert("k", serde_json::json!("new")).await;
        assert_eq!(cache.get("k").await, Some(serde_json::json!("new")));
        assert_eq!(cache.len().await, 1);
    }
}
