//! Per-user category cache with a fixed TTL.

use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::clock::Clock;
use crate::config::CacheConfig;
use crate::observability::metrics;
use crate::xtream::types::CategoryListing;

/// Prefix of every cache key; the username follows it.
const KEY_PREFIX: &str = "categories@";

/// A stored listing and the instant it was fetched.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: CategoryListing,
    pub stored_at: Instant,
}

/// A thread-safe cache of category listings keyed by username.
///
/// Host and password are not part of the key, so one username is assumed to
/// map to a single panel for as long as its entry lives. Expiry is checked
/// lazily on lookup and nothing sweeps stale entries. Without `max_entries`
/// the map grows by one entry per distinct username for the process lifetime.
#[derive(Clone)]
pub struct CategoryCache {
    inner: Arc<DashMap<String, CacheEntry>>,
    ttl: Duration,
    max_entries: Option<usize>,
    clock: Arc<dyn Clock>,
}

impl CategoryCache {
    /// Create an empty cache driven by the given clock.
    pub fn with_clock(config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl: Duration::from_secs(config.ttl_secs),
            max_entries: config.max_entries,
            clock,
        }
    }

    fn key(username: &str) -> String {
        format!("{KEY_PREFIX}{username}")
    }

    /// Return the cached listing for `username` if it is still fresh.
    pub fn get(&self, username: &str) -> Option<CategoryListing> {
        let now = self.clock.now();
        let hit = self
            .inner
            .get(&Self::key(username))
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| entry.data.clone());

        metrics::record_cache_lookup(hit.is_some());
        hit
    }

    /// Store a freshly fetched listing, replacing any previous one.
    pub fn insert(&self, username: &str, data: CategoryListing) {
        let key = Self::key(username);

        if let Some(max) = self.max_entries {
            if !self.inner.contains_key(&key) && self.inner.len() >= max {
                self.evict_oldest();
            }
        }

        self.inner.insert(
            key,
            CacheEntry {
                data,
                stored_at: self.clock.now(),
            },
        );
        metrics::record_cache_size(self.inner.len());
    }

    fn evict_oldest(&self) {
        let oldest = self
            .inner
            .iter()
            .min_by_key(|r| r.value().stored_at)
            .map(|r| r.key().clone());

        if let Some(key) = oldest {
            self.inner.remove(&key);
            tracing::debug!(key = %key, "Evicted oldest category cache entry");
        }
    }

    /// Number of stored entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;
    use crate::xtream::types::Category;
    use serde_json::json;

    fn listing(name: &str) -> CategoryListing {
        CategoryListing {
            movie_categories: vec![Category {
                id: json!("1"),
                name: json!(name),
            }],
            series_categories: vec![],
        }
    }

    fn cache_with_clock(max_entries: Option<usize>) -> (CategoryCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let config = CacheConfig {
            ttl_secs: 1800,
            max_entries,
        };
        (CategoryCache::with_clock(&config, clock.clone()), clock)
    }

    #[test]
    fn test_cache_operations() {
        let (cache, _clock) = cache_with_clock(None);

        assert!(cache.get("alice").is_none());

        cache.insert("alice", listing("Action"));
        assert_eq!(cache.get("alice"), Some(listing("Action")));
        assert!(cache.get("bob").is_none());

        cache.insert("alice", listing("Drama"));
        assert_eq!(cache.get("alice"), Some(listing("Drama")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_entry_expires_at_ttl() {
        let (cache, clock) = cache_with_clock(None);
        cache.insert("alice", listing("Action"));

        clock.advance(Duration::from_secs(1799));
        assert!(cache.get("alice").is_some());

        clock.advance(Duration::from_secs(1));
        assert!(cache.get("alice").is_none());

        // Stale entries stay until overwritten.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_overwrite_resets_timestamp() {
        let (cache, clock) = cache_with_clock(None);
        cache.insert("alice", listing("Action"));
        clock.advance(Duration::from_secs(2000));
        cache.insert("alice", listing("Action"));
        clock.advance(Duration::from_secs(100));
        assert!(cache.get("alice").is_some());
    }

    #[test]
    fn test_unbounded_by_default() {
        let (cache, _clock) = cache_with_clock(None);
        for i in 0..100 {
            cache.insert(&format!("user{i}"), listing("Action"));
        }
        assert_eq!(cache.len(), 100);
    }

    #[test]
    fn test_bound_evicts_oldest() {
        let (cache, clock) = cache_with_clock(Some(2));
        cache.insert("alice", listing("A"));
        clock.advance(Duration::from_secs(1));
        cache.insert("bob", listing("B"));
        clock.advance(Duration::from_secs(1));

        // Refreshing an existing key never evicts.
        cache.insert("bob", listing("B2"));
        assert_eq!(cache.len(), 2);

        cache.insert("carol", listing("C"));
        assert_eq!(cache.len(), 2);
        assert!(cache.get("alice").is_none());
        assert_eq!(cache.get("bob"), Some(listing("B2")));
        assert_eq!(cache.get("carol"), Some(listing("C")));
    }
}
