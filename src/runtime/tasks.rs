//! Background task setup for query keys.

use std::time::Duration;

use crate::{
    cache::{DEFAULT_MAX_CACHE_SIZE, QueryCache},
    query::Query,
    refresh::{RefreshRegistry, TaskType},
    runtime::{SyncRuntime, swr::revalidate_in_background},
};

/// Minimum interval for periodic tasks to prevent busy spinning.
const MIN_TASK_INTERVAL: Duration = Duration::from_millis(1);

/// Sets up the automatic refetch task for queries with a refetch interval.
pub fn setup_refetch_interval_task<Q: Query>(
    query: &Q,
    cache_key: &str,
    cache: &QueryCache,
    refresh_registry: &RefreshRegistry,
) {
    if let Some(interval) = query.refetch_interval() {
        let cache = cache.clone();
        let query = query.clone();
        let cache_key_clone = cache_key.to_string();
        let refresh_registry_clone = refresh_registry.clone();

        refresh_registry.start_periodic_task(
            cache_key,
            TaskType::RefetchInterval,
            interval,
            move || {
                let cache = cache.clone();
                let query = query.clone();
                let cache_key = cache_key_clone.clone();
                let refresh_registry = refresh_registry_clone.clone();

                tokio::spawn(async move {
                    let result = query.run().await;
                    let updated = cache.set(cache_key.clone(), result);
                    if updated {
                        refresh_registry.trigger_refresh(&cache_key);
                    }
                });
            },
        );
    }
}

/// Sets up automatic cache expiration monitoring for a query key.
pub fn setup_cache_expiration_task<Q: Query>(
    query: &Q,
    cache_key: &str,
    cache: &QueryCache,
    refresh_registry: &RefreshRegistry,
) {
    if let Some(expiration) = query.cache_expiration() {
        let cache = cache.clone();
        let cache_key_clone = cache_key.to_string();
        let refresh_registry_clone = refresh_registry.clone();

        let check_interval = std::cmp::max(expiration / 4, MIN_TASK_INTERVAL);

        refresh_registry.start_periodic_task(
            cache_key,
            TaskType::CacheExpiration,
            check_interval,
            move || {
                if let Ok(mut cache_lock) = cache.cache.lock() {
                    if let Some(entry) = cache_lock.get(&cache_key_clone) {
                        if entry.is_expired(expiration) {
                            crate::debug_log!(
                                "🗑️ [AUTO-EXPIRATION] Cache expired for key: {} - triggering refresh",
                                cache_key_clone
                            );
                            cache_lock.remove(&cache_key_clone);
                            drop(cache_lock);
                            refresh_registry_clone.trigger_refresh(&cache_key_clone);
                        }
                    }
                }
            },
        );
    }
}

/// Sets up the periodic stale check that drives SWR for queries with a
/// stale time.
pub fn setup_stale_check_task<Q: Query>(runtime: &SyncRuntime, query: &Q, cache_key: &str) {
    if let Some(stale_time) = query.stale_time() {
        // always-stale queries revalidate on every access already; a periodic
        // checker would just spin
        if stale_time.is_zero() {
            return;
        }
        let check_interval = std::cmp::max(stale_time, MIN_TASK_INTERVAL);
        let runtime_clone = runtime.clone();
        let query = query.clone();
        let cache_key_clone = cache_key.to_string();

        runtime.refresh_registry().start_periodic_task(
            cache_key,
            TaskType::StaleCheck,
            check_interval,
            move || {
                let is_stale = {
                    let cache_lock = runtime_clone.cache().cache.lock();
                    match cache_lock {
                        Ok(guard) => guard
                            .get(&cache_key_clone)
                            .map(|entry| entry.is_stale(stale_time))
                            .unwrap_or(false),
                        Err(_) => false,
                    }
                };
                if is_stale {
                    revalidate_in_background(
                        &runtime_clone,
                        query.clone(),
                        cache_key_clone.clone(),
                    );
                }
            },
        );
    }
}

/// Sets up cache-wide maintenance for keys with an expiration policy:
/// unused-entry cleanup plus LRU eviction above the size cap.
pub fn setup_cache_maintenance<Q: Query>(
    query: &Q,
    cache_key: &str,
    cache: &QueryCache,
    refresh_registry: &RefreshRegistry,
) {
    if let Some(cache_expiration) = query.cache_expiration() {
        let cleanup_interval = std::cmp::max(cache_expiration / 4, Duration::from_secs(30));

        let cache = cache.clone();
        let unused_threshold = cache_expiration * 2;
        let cleanup_key = format!("{cache_key}_cleanup");

        refresh_registry.start_periodic_task(
            &cleanup_key,
            TaskType::CacheCleanup,
            cleanup_interval,
            move || {
                let removed = cache.cleanup_unused_entries(unused_threshold);
                if removed > 0 {
                    crate::debug_log!("🧹 [CLEANUP] Removed {} unused cache entries", removed);
                }

                let evicted = cache.evict_lru_entries(DEFAULT_MAX_CACHE_SIZE);
                if evicted > 0 {
                    crate::debug_log!(
                        "🗑️ [LRU-EVICT] Evicted {} entries due to cache size limit",
                        evicted
                    );
                }
            },
        );
    }
}
