//! Refresh registry: change notification and background task management.
//!
//! Each cache key has a monotonically increasing refresh count. Consumers
//! subscribe to a key and are woken (via a `tokio::sync::watch` channel)
//! whenever the key is invalidated, overwritten by a mutation, revalidated in
//! the background, or refreshed on an interval — their cue to re-read the
//! cache.
//!
//! The registry also owns the per-key background tasks (refetch intervals,
//! cache-expiration sweeps, stale checks, maintenance) so they can be stopped
//! when a key is torn down, and the focus-notification hook used by
//! refetch-on-focus queries.

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::{sync::watch, task::JoinHandle};

/// Kinds of background tasks the registry schedules per cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    /// Re-runs the query on a fixed interval.
    RefetchInterval,
    /// Removes the entry once it outlives its expiration.
    CacheExpiration,
    /// Checks staleness and triggers background revalidation.
    StaleCheck,
    /// Cache-wide unused-entry cleanup and LRU eviction.
    CacheCleanup,
}

#[derive(Default)]
struct RegistryInner {
    channels: HashMap<String, watch::Sender<u64>>,
    tasks: HashMap<(String, TaskType), JoinHandle<()>>,
    revalidating: HashSet<String>,
    focus_keys: HashSet<String>,
}

/// Per-runtime registry of refresh channels and scheduled tasks.
#[derive(Clone, Default)]
pub struct RefreshRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl RefreshRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to refresh events for a cache key.
    ///
    /// The receiver yields the current refresh count immediately and wakes on
    /// every subsequent [`trigger_refresh`](Self::trigger_refresh).
    pub fn subscribe(&self, key: &str) -> watch::Receiver<u64> {
        let mut inner = self.lock();
        inner
            .channels
            .entry(key.to_string())
            .or_insert_with(|| watch::channel(0).0)
            .subscribe()
    }

    /// Bump the refresh count for a key, waking all subscribers.
    pub fn trigger_refresh(&self, key: &str) {
        let mut inner = self.lock();
        let sender = inner
            .channels
            .entry(key.to_string())
            .or_insert_with(|| watch::channel(0).0);
        let next = *sender.borrow() + 1;
        let _ = sender.send_replace(next);
        crate::debug_log!("🔄 [REFRESH] Triggered refresh #{next} for key: {key}");
    }

    /// Current refresh count for a key (0 if never refreshed).
    pub fn refresh_count(&self, key: &str) -> u64 {
        let inner = self.lock();
        inner
            .channels
            .get(key)
            .map(|sender| *sender.borrow())
            .unwrap_or(0)
    }

    /// Start a periodic background task for a key, unless one of the same
    /// type is already running. The callback runs once per `period`.
    pub fn start_periodic_task<F>(&self, key: &str, task_type: TaskType, period: Duration, callback: F)
    where
        F: Fn() + Send + 'static,
    {
        let task_key = (key.to_string(), task_type);
        let mut inner = self.lock();
        if inner.tasks.contains_key(&task_key) {
            return;
        }

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period.max(Duration::from_millis(1)));
            // the first tick completes immediately; skip it so the callback
            // only fires after a full period
            ticker.tick().await;
            loop {
                ticker.tick().await;
                callback();
            }
        });
        inner.tasks.insert(task_key, handle);
        crate::debug_log!(
            "⏱️ [TASKS] Started {:?} task for key: {} (every {:?})",
            task_type,
            key,
            period
        );
    }

    /// Stop one background task for a key.
    pub fn stop_task(&self, key: &str, task_type: TaskType) {
        let mut inner = self.lock();
        if let Some(handle) = inner.tasks.remove(&(key.to_string(), task_type)) {
            handle.abort();
        }
    }

    /// Stop every background task associated with a key.
    pub fn stop_tasks_for(&self, key: &str) {
        let mut inner = self.lock();
        let to_stop: Vec<_> = inner
            .tasks
            .keys()
            .filter(|(task_key, _)| task_key == key)
            .cloned()
            .collect();
        for task_key in to_stop {
            if let Some(handle) = inner.tasks.remove(&task_key) {
                handle.abort();
            }
        }
    }

    /// Claim the revalidation slot for a key.
    ///
    /// Returns `true` when the caller won the race and should run the
    /// background revalidation; losers must not start a second one.
    pub fn start_revalidation(&self, key: &str) -> bool {
        self.lock().revalidating.insert(key.to_string())
    }

    /// Release the revalidation slot for a key.
    pub fn complete_revalidation(&self, key: &str) {
        self.lock().revalidating.remove(key);
    }

    /// Register a key whose query refetches when the window regains focus.
    pub fn register_focus_key(&self, key: &str) {
        self.lock().focus_keys.insert(key.to_string());
    }

    /// Notify the registry that the application window regained focus.
    ///
    /// Every focus-registered key gets a refresh event; subscribers re-read
    /// and, their data being stale, refetch.
    pub fn notify_focus(&self) {
        let keys: Vec<String> = {
            let inner = self.lock();
            inner.focus_keys.iter().cloned().collect()
        };
        for key in keys {
            self.trigger_refresh(&key);
        }
    }

    /// Abort all tasks and drop all channels and bookkeeping.
    pub fn clear_all(&self) {
        let mut inner = self.lock();
        for (_, handle) in inner.tasks.drain() {
            handle.abort();
        }
        inner.channels.clear();
        inner.revalidating.clear();
        inner.focus_keys.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, RegistryInner> {
        // registry state stays usable even if a panicking task poisoned it
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn refresh_counts_are_per_key() {
        let registry = RefreshRegistry::new();
        registry.trigger_refresh("clients");
        registry.trigger_refresh("clients");
        registry.trigger_refresh("orders");
        assert_eq!(registry.refresh_count("clients"), 2);
        assert_eq!(registry.refresh_count("orders"), 1);
        assert_eq!(registry.refresh_count("tables"), 0);
    }

    #[tokio::test]
    async fn subscribers_wake_on_refresh() {
        let registry = RefreshRegistry::new();
        let mut rx = registry.subscribe("products");
        assert_eq!(*rx.borrow(), 0);
        registry.trigger_refresh("products");
        rx.changed().await.expect("channel alive");
        assert_eq!(*rx.borrow(), 1);
    }

    #[tokio::test]
    async fn revalidation_slot_is_exclusive() {
        let registry = RefreshRegistry::new();
        assert!(registry.start_revalidation("sales-subtotal"));
        assert!(!registry.start_revalidation("sales-subtotal"));
        registry.complete_revalidation("sales-subtotal");
        assert!(registry.start_revalidation("sales-subtotal"));
    }

    #[tokio::test]
    async fn focus_notification_refreshes_registered_keys_only() {
        let registry = RefreshRegistry::new();
        registry.register_focus_key("sales-subtotal");
        registry.notify_focus();
        assert_eq!(registry.refresh_count("sales-subtotal"), 1);
        assert_eq!(registry.refresh_count("clients"), 0);
    }
}
