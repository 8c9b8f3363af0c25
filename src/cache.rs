//! Time-boxed, size-bounded memoization.
//!
//! Two independent instances exist at runtime: one for text→vector results
//! and one for query→ranked-results. Entries expire after a TTL and are never
//! returned stale; when the cache is full the oldest 20% (by insertion time)
//! are evicted inside the same critical section as the insert, so no
//! iteration can race the eviction.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Fraction of entries dropped when the cache is full.
const EVICT_FRACTION: f64 = 0.2;

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// Bounded TTL cache, safe to share across concurrent requests.
pub struct TtlCache<V> {
    ttl: Duration,
    max_entries: usize,
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Fetch a live entry. An entry older than the TTL is never returned; it
    /// is dropped on the spot.
    pub fn get(&self, key: &str) -> Option<V> {
        let Ok(mut entries) = self.entries.lock() else {
            return None;
        };
        match entries.get(key) {
            Some(entry) if entry.inserted_at.elapsed() < self.ttl => {
                Some(entry.value.clone())
            }
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Insert a value, evicting the oldest 20% first if the cache is full.
    pub fn insert(&self, key: impl Into<String>, value: V) {
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        let key = key.into();
        if entries.len() >= self.max_entries && !entries.contains_key(&key) {
            let drop_count = ((self.max_entries as f64 * EVICT_FRACTION).ceil() as usize).max(1);
            let mut by_age: Vec<(String, Instant)> = entries
                .iter()
                .map(|(k, e)| (k.clone(), e.inserted_at))
                .collect();
            by_age.sort_by_key(|(_, at)| *at);
            for (old_key, _) in by_age.into_iter().take(drop_count) {
                entries.remove(&old_key);
            }
            tracing::debug!(dropped = drop_count, "cache full, evicted oldest entries");
        }
        entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Return the cached value for `key` or run `compute` and store its
    /// result. Concurrent misses may compute redundantly; last write wins.
    pub async fn get_or_compute<F, Fut>(&self, key: &str, compute: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = V>,
    {
        if let Some(hit) = self.get(key) {
            return hit;
        }
        let value = compute().await;
        self.insert(key, value.clone());
        value
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stable string key for arbitrary hashable cache inputs.
pub fn cache_key(parts: &[&str]) -> String {
    let mut hasher = DefaultHasher::new();
    for part in parts {
        part.hash(&mut hasher);
    }
    format!("{:016x}", hasher.finish())
}
