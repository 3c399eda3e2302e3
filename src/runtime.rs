//! Shared runtime components that back the synchronization layer.
//!
//! A [`SyncRuntime`] bundles the query cache, the refresh registry and the
//! pending-request table into one injectable unit with a defined lifecycle:
//! create one per application instance (or per test), drop it to tear
//! everything down. The optional process-global instance lives in
//! [`crate::global`].

pub mod request;
pub mod swr;
pub mod tasks;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::sync::watch;

use crate::{
    cache::QueryCache,
    keys::QueryKey,
    mutation::{Mutation, MutationState, run_mutation},
    query::Query,
    refresh::{RefreshRegistry, TaskType},
    state::QueryState,
};

/// Configuration for the sync runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    max_read_retries: u32,
    retry_delay: Duration,
}

impl RuntimeConfig {
    /// Create a new config with default settings: reads retry up to 3 times
    /// with a short linear backoff, mutations never retry.
    pub fn new() -> Self {
        Self {
            max_read_retries: 3,
            retry_delay: Duration::from_millis(250),
        }
    }

    /// Cap the number of automatic retries for read queries.
    pub fn with_max_read_retries(mut self, retries: u32) -> Self {
        self.max_read_retries = retries;
        self
    }

    /// Base delay between read retries (grows linearly per attempt).
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub(crate) fn max_read_retries(&self) -> u32 {
        self.max_read_retries
    }

    pub(crate) fn retry_delay(&self) -> Duration {
        self.retry_delay
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One in-flight fetch, shared by every caller waiting on the same key.
pub(crate) struct PendingFetch {
    pub(crate) waiters: u32,
    pub(crate) done: watch::Sender<bool>,
}

/// Central runtime that holds onto the core singletons.
#[derive(Clone)]
pub struct SyncRuntime {
    cache: QueryCache,
    refresh_registry: RefreshRegistry,
    pending_requests: Arc<Mutex<HashMap<String, PendingFetch>>>,
    config: RuntimeConfig,
}

/// Lightweight clones of the runtime handles for consumer code.
#[derive(Clone)]
pub struct SyncRuntimeHandles {
    pub cache: QueryCache,
    pub refresh_registry: RefreshRegistry,
}

impl SyncRuntime {
    /// Construct a new runtime instance using the provided configuration.
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            cache: QueryCache::new(),
            refresh_registry: RefreshRegistry::new(),
            pending_requests: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    /// Runtime with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RuntimeConfig::new())
    }

    /// Access the cache handle.
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Access the refresh registry handle.
    pub fn refresh_registry(&self) -> &RefreshRegistry {
        &self.refresh_registry
    }

    pub(crate) fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub(crate) fn pending_requests(&self) -> &Arc<Mutex<HashMap<String, PendingFetch>>> {
        &self.pending_requests
    }

    /// Get cloned handles for cache and refresh registry.
    pub fn handles(&self) -> SyncRuntimeHandles {
        SyncRuntimeHandles {
            cache: self.cache.clone(),
            refresh_registry: self.refresh_registry.clone(),
        }
    }

    /// Execute a query through the cache: serve hits, deduplicate concurrent
    /// misses, retry per the read policy and schedule the query's background
    /// tasks. See [`request::fetch_query`].
    pub async fn fetch<Q: Query>(&self, query: &Q) -> QueryState<Q::Output, Q::Error> {
        request::fetch_query(self, query).await
    }

    /// Current state of a query's slot without fetching.
    ///
    /// `Idle` when the query is disabled or nothing is cached or in flight,
    /// `Loading` while a fetch for the key is running, otherwise the cached
    /// result. Embedding shells poll this to render in-flight state.
    pub fn peek<Q: Query>(&self, query: &Q) -> QueryState<Q::Output, Q::Error> {
        if !query.enabled() {
            return QueryState::Idle;
        }
        let key = query.key().render();
        if let Some(result) = self.cache.get::<Result<Q::Output, Q::Error>>(&key) {
            return result.into();
        }
        let in_flight = self
            .pending_requests
            .lock()
            .map(|pending| pending.contains_key(&key))
            .unwrap_or(false);
        if in_flight {
            QueryState::Loading
        } else {
            QueryState::Idle
        }
    }

    /// Execute a mutation and, on success, apply its cache effects. Failures
    /// leave the cache untouched. See [`crate::mutation::run_mutation`].
    pub async fn mutate<M, In>(&self, mutation: &M, input: In) -> MutationState<M::Output, M::Error>
    where
        M: Mutation<In>,
        In: Clone + Send + Sync + 'static,
    {
        run_mutation(self, mutation, input).await
    }

    /// Invalidate one cache slot and wake its subscribers.
    pub fn invalidate(&self, key: &QueryKey) {
        let rendered = key.render();
        self.cache.invalidate(&rendered);
        self.refresh_registry.trigger_refresh(&rendered);
    }

    /// Clear the whole cache and stop all scheduled tasks.
    pub fn clear(&self) {
        self.cache.clear();
        self.refresh_registry.clear_all();
    }

    /// Notify focus-sensitive queries that the window regained focus.
    pub fn notify_focus(&self) {
        self.refresh_registry.notify_focus();
    }

    /// Stop all scheduled tasks for a cache key.
    pub fn stop_query_tasks(&self, cache_key: &str) {
        self.refresh_registry
            .stop_task(cache_key, TaskType::RefetchInterval);
        self.refresh_registry
            .stop_task(cache_key, TaskType::CacheExpiration);
        self.refresh_registry
            .stop_task(cache_key, TaskType::StaleCheck);

        let cleanup_key = format!("{cache_key}_cleanup");
        self.refresh_registry
            .stop_task(&cleanup_key, TaskType::CacheCleanup);
    }

    /// Ensure scheduled tasks are registered for a query's key.
    pub fn ensure_query_tasks<Q: Query>(&self, query: &Q, cache_key: &str) {
        tasks::setup_cache_maintenance(query, cache_key, &self.cache, &self.refresh_registry);
        tasks::setup_cache_expiration_task(query, cache_key, &self.cache, &self.refresh_registry);
        tasks::setup_refetch_interval_task(query, cache_key, &self.cache, &self.refresh_registry);
        tasks::setup_stale_check_task(self, query, cache_key);
        if query.refetch_on_focus() {
            self.refresh_registry.register_focus_key(cache_key);
        }
    }
}
