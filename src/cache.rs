//! # Query cache
//!
//! This module implements a type-erased cache for query results, supporting:
//! - **Expiration**: Entries are removed after a configurable TTL.
//! - **Staleness (SWR)**: Entries can be reported stale and revalidated in the background.
//! - **LRU Eviction**: Least-recently-used entries are evicted to maintain a size limit.
//! - **Access/Usage Stats**: Provides statistics for cache introspection and tuning.
//!
//! The cache is an explicit, injectable service: every [`SyncRuntime`]
//! (crate::runtime::SyncRuntime) owns its own instance, so tests get isolated
//! caches instead of sharing hidden global state.
//!
//! Writer discipline: a key's slot is only ever written by its own successful
//! fetch or by an explicit mutation-success write/remove/invalidate for that
//! key. Mutation failures never touch the cache.
//!
//! ## Example
//! ```rust,no_run
//! use comanda_sync::cache::QueryCache;
//! let cache = QueryCache::new();
//! cache.set("products".to_string(), 42);
//! let value: Option<i32> = cache.get("products");
//! ```

use std::{
    any::Any,
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    },
    time::{Duration, Instant},
};

/// Maximum number of entries kept before LRU eviction during maintenance.
pub const DEFAULT_MAX_CACHE_SIZE: usize = 1000;

/// How long an entry may go unaccessed before maintenance removes it.
pub const DEFAULT_UNUSED_THRESHOLD: Duration = Duration::from_secs(600);

/// Options for cache retrieval operations
#[derive(Debug, Clone, Default)]
pub struct CacheGetOptions {
    /// Optional expiration duration - entries older than this will be removed
    pub expiration: Option<Duration>,
    /// Optional stale time - used to check if data is stale
    pub stale_time: Option<Duration>,
    /// Whether to return staleness information
    pub check_staleness: bool,
}

impl CacheGetOptions {
    /// Create new cache get options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the expiration duration
    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration = Some(expiration);
        self
    }

    /// Set the stale time
    pub fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = Some(stale_time);
        self.check_staleness = true;
        self
    }
}

/// Result type for cache get operations with staleness information
#[derive(Debug, Clone)]
pub struct CacheGetResult<T> {
    /// The cached data
    pub data: T,
    /// Whether the data is considered stale
    pub is_stale: bool,
}

/// A type-erased cache entry storing one query result with timestamp and
/// access tracking.
#[derive(Clone)]
pub struct CacheEntry {
    data: Arc<dyn Any + Send + Sync>,
    cached_at: Arc<Mutex<Instant>>,
    last_accessed: Arc<Mutex<Instant>>,
    access_count: Arc<AtomicU32>,
}

impl CacheEntry {
    /// Creates a new cache entry with the given data.
    pub fn new<T: Clone + Send + Sync + 'static>(data: T) -> Self {
        let now = Instant::now();
        Self {
            data: Arc::new(data),
            cached_at: Arc::new(Mutex::new(now)),
            last_accessed: Arc::new(Mutex::new(now)),
            access_count: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Retrieves the cached data of type `T`.
    ///
    /// Updates the `last_accessed` timestamp and increments the access count.
    pub fn get<T: Clone + Send + Sync + 'static>(&self) -> Option<T> {
        if let Ok(mut last_accessed) = self.last_accessed.lock() {
            *last_accessed = Instant::now();
        }
        self.access_count.fetch_add(1, Ordering::SeqCst);
        self.data.downcast_ref::<T>().cloned()
    }

    /// Refreshes the cached_at timestamp to the current time.
    pub fn refresh_timestamp(&self) {
        if let Ok(mut cached_at) = self.cached_at.lock() {
            *cached_at = Instant::now();
        }
    }

    /// Checks if the entry has outlived the given expiration duration.
    pub fn is_expired(&self, expiration: Duration) -> bool {
        if let Ok(cached_at) = self.cached_at.lock() {
            cached_at.elapsed() > expiration
        } else {
            false
        }
    }

    /// Checks if the entry is stale based on the given stale time.
    pub fn is_stale(&self, stale_time: Duration) -> bool {
        if let Ok(cached_at) = self.cached_at.lock() {
            cached_at.elapsed() >= stale_time
        } else {
            false
        }
    }

    /// Current access count for the entry.
    pub fn access_count(&self) -> u32 {
        self.access_count.load(Ordering::SeqCst)
    }

    /// Checks if the entry hasn't been accessed for the given duration.
    pub fn is_unused_for(&self, duration: Duration) -> bool {
        if let Ok(last_accessed) = self.last_accessed.lock() {
            last_accessed.elapsed() > duration
        } else {
            false
        }
    }

    /// Time since this entry was last accessed.
    pub fn time_since_last_access(&self) -> Duration {
        if let Ok(last_accessed) = self.last_accessed.lock() {
            last_accessed.elapsed()
        } else {
            Duration::from_secs(0)
        }
    }

    /// Age of this cache entry.
    pub fn age(&self) -> Duration {
        if let Ok(cached_at) = self.cached_at.lock() {
            cached_at.elapsed()
        } else {
            Duration::from_secs(0)
        }
    }
}

/// Keyed, process-scoped cache for query results.
#[derive(Clone, Default)]
pub struct QueryCache {
    pub(crate) cache: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl QueryCache {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves a cached result by key.
    pub fn get<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Option<T> {
        self.cache.lock().ok()?.get(key)?.get::<T>()
    }

    /// Retrieves a cached result with configurable options.
    ///
    /// This unified method handles expiration and staleness checking. Expired
    /// entries are removed and reported as a miss; stale entries are returned
    /// with `is_stale` set so the caller can serve them while revalidating.
    pub fn get_with_options<T: Clone + Send + Sync + 'static>(
        &self,
        key: &str,
        options: CacheGetOptions,
    ) -> Option<CacheGetResult<T>> {
        let cache_guard = self.cache.lock().ok()?;
        let entry = cache_guard.get(key)?;

        // Check expiration first
        if let Some(exp_duration) = options.expiration {
            if entry.is_expired(exp_duration) {
                drop(cache_guard);
                if let Ok(mut cache) = self.cache.lock() {
                    cache.remove(key);
                    crate::debug_log!(
                        "🗑️ [CACHE-EXPIRATION] Removing expired cache entry for key: {}",
                        key
                    );
                }
                return None;
            }
        }

        let data = entry.get::<T>()?;

        let is_stale = if options.check_staleness {
            if let Some(stale_duration) = options.stale_time {
                entry.is_stale(stale_duration)
            } else {
                false
            }
        } else {
            false
        };

        Some(CacheGetResult { data, is_stale })
    }

    /// Sets a value for a given key. Last write wins.
    ///
    /// Returns whether the stored value actually changed. When the new value
    /// equals the existing one, only the timestamp is refreshed so consumers
    /// are not re-notified for identical data.
    pub fn set<T: Clone + Send + Sync + PartialEq + 'static>(&self, key: String, value: T) -> bool {
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(existing_entry) = cache.get_mut(&key)
                && let Some(existing_value) = existing_entry.get::<T>()
                && existing_value == value
            {
                existing_entry.refresh_timestamp();
                crate::debug_log!(
                    "⏸️ [CACHE-STORE] Value unchanged for key: {}, refreshing timestamp",
                    key
                );
                return false;
            }
            cache.insert(key.clone(), CacheEntry::new(value));
            crate::log_cache_store!("stored data for key: {}", key);
            return true;
        }
        false
    }

    /// Removes a cached result by key. Returns whether an entry was removed.
    pub fn remove(&self, key: &str) -> bool {
        if let Ok(mut cache) = self.cache.lock() {
            cache.remove(key).is_some()
        } else {
            false
        }
    }

    /// Invalidates a cached result by key, forcing the next read to refetch.
    pub fn invalidate(&self, key: &str) {
        self.remove(key);
        crate::log_cache_invalidate!("invalidated cache entry for key: {}", key);
    }

    /// Clears all cached results.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            #[cfg(feature = "tracing")]
            let count = cache.len();
            cache.clear();
            #[cfg(feature = "tracing")]
            crate::debug_log!("🗑️ [CACHE-CLEAR] Cleared {} cache entries", count);
        }
    }

    /// Number of cached entries.
    pub fn size(&self) -> usize {
        self.cache.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Removes entries that have not been accessed within `unused_threshold`.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_unused_entries(&self, unused_threshold: Duration) -> usize {
        if let Ok(mut cache) = self.cache.lock() {
            let initial_size = cache.len();
            cache.retain(|_key, entry| {
                let should_keep = !entry.is_unused_for(unused_threshold);
                #[cfg(feature = "tracing")]
                if !should_keep {
                    crate::debug_log!("🧹 [CACHE-CLEANUP] Removing unused entry: {}", _key);
                }
                should_keep
            });
            let removed = initial_size - cache.len();
            if removed > 0 {
                crate::debug_log!("🧹 [CACHE-CLEANUP] Removed {} unused entries", removed);
            }
            removed
        } else {
            0
        }
    }

    /// Evicts least recently used entries down to `max_size`.
    ///
    /// Returns the number of entries evicted.
    pub fn evict_lru_entries(&self, max_size: usize) -> usize {
        if let Ok(mut cache) = self.cache.lock() {
            if cache.len() <= max_size {
                return 0;
            }

            let mut entries: Vec<_> = cache.drain().collect();

            // Sort by last access time (oldest first)
            entries.sort_by(|(_, a), (_, b)| {
                a.time_since_last_access().cmp(&b.time_since_last_access())
            });

            // Keep the most recently used entries
            let to_keep = entries.split_off(entries.len().saturating_sub(max_size));
            let evicted = entries.len();

            cache.extend(to_keep);

            if evicted > 0 {
                crate::debug_log!(
                    "🗑️ [LRU-EVICT] Evicted {} entries due to cache size limit",
                    evicted
                );
            }
            evicted
        } else {
            0
        }
    }

    /// Performs comprehensive cache maintenance: unused-entry cleanup followed
    /// by LRU eviction, using the default thresholds.
    pub fn maintain(&self) -> CacheMaintenanceStats {
        CacheMaintenanceStats {
            unused_removed: self.cleanup_unused_entries(DEFAULT_UNUSED_THRESHOLD),
            lru_evicted: self.evict_lru_entries(DEFAULT_MAX_CACHE_SIZE),
            final_size: self.size(),
        }
    }

    /// Gets cache statistics.
    pub fn stats(&self) -> CacheStats {
        if let Ok(cache) = self.cache.lock() {
            let mut total_age = Duration::ZERO;
            let mut total_accesses = 0;

            for entry in cache.values() {
                total_age += entry.age();
                total_accesses += entry.access_count();
            }

            let entry_count = cache.len();
            let avg_age = if entry_count > 0 {
                total_age / entry_count as u32
            } else {
                Duration::ZERO
            };

            CacheStats {
                entry_count,
                total_accesses,
                avg_age,
            }
        } else {
            CacheStats::default()
        }
    }
}

/// Statistics for cache maintenance operations
#[derive(Debug, Clone, Default)]
pub struct CacheMaintenanceStats {
    pub unused_removed: usize,
    pub lru_evicted: usize,
    pub final_size: usize,
}

/// General cache statistics
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub entry_count: usize,
    pub total_accesses: u32,
    pub avg_age: Duration,
}

impl CacheStats {
    pub fn avg_accesses_per_entry(&self) -> f64 {
        if self.entry_count > 0 {
            self.total_accesses as f64 / self.entry_count as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_roundtrip() {
        let cache = QueryCache::new();
        assert!(cache.set("clients".to_string(), vec![1, 2, 3]));
        assert_eq!(cache.get::<Vec<i32>>("clients"), Some(vec![1, 2, 3]));
        assert!(cache.remove("clients"));
        assert_eq!(cache.get::<Vec<i32>>("clients"), None);
    }

    #[test]
    fn set_reports_unchanged_values() {
        let cache = QueryCache::new();
        assert!(cache.set("tables".to_string(), 5u32));
        assert!(!cache.set("tables".to_string(), 5u32));
        assert!(cache.set("tables".to_string(), 6u32));
    }

    #[test]
    fn expired_entries_read_as_misses() {
        let cache = QueryCache::new();
        cache.set("orders".to_string(), 1u32);
        let options = CacheGetOptions::new().with_expiration(Duration::ZERO);
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get_with_options::<u32>("orders", options).is_none());
        // the expired entry is gone entirely
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn stale_entries_are_served_with_flag() {
        let cache = QueryCache::new();
        cache.set("sales-subtotal".to_string(), 990u32);
        let options = CacheGetOptions::new().with_stale_time(Duration::ZERO);
        let hit = cache
            .get_with_options::<u32>("sales-subtotal", options)
            .expect("entry should still be served");
        assert_eq!(hit.data, 990);
        assert!(hit.is_stale);
    }

    #[test]
    fn lru_eviction_keeps_recently_used() {
        let cache = QueryCache::new();
        cache.set("a".to_string(), 1u32);
        cache.set("b".to_string(), 2u32);
        cache.set("c".to_string(), 3u32);
        std::thread::sleep(Duration::from_millis(5));
        // touch "a" so it is the most recently used
        let _ = cache.get::<u32>("a");
        let evicted = cache.evict_lru_entries(1);
        assert_eq!(evicted, 2);
        assert_eq!(cache.get::<u32>("a"), Some(1));
    }

    #[test]
    fn type_mismatch_is_a_miss() {
        let cache = QueryCache::new();
        cache.set("products".to_string(), 10u32);
        assert_eq!(cache.get::<String>("products"), None);
    }
}
