//! Fetch orchestration: cache hits, request deduplication and the read
//! retry policy.

use tokio::sync::watch;

use crate::{
    cache::CacheGetOptions,
    error::RetryableError,
    query::Query,
    runtime::{PendingFetch, SyncRuntime, swr::revalidate_in_background},
    state::QueryState,
};

enum FetchRole {
    /// This caller runs the fetch and stores the result.
    Leader,
    /// Another caller already started an identical fetch; wait for it.
    Waiter(watch::Receiver<bool>),
}

/// Execute a query through the runtime's cache.
///
/// - Disabled queries (missing id argument) short-circuit to
///   [`QueryState::Idle`] without issuing a request.
/// - Fresh cache hits are served directly; stale hits are served while a
///   background revalidation runs (SWR).
/// - Concurrent misses under the same key are deduplicated: one fetch runs,
///   the rest wait and read the slot it fills.
/// - Failed reads are retried per the runtime config, never when the error
///   is an authorization failure.
pub async fn fetch_query<Q: Query>(
    runtime: &SyncRuntime,
    query: &Q,
) -> QueryState<Q::Output, Q::Error> {
    if !query.enabled() {
        crate::debug_log!("⏸️ [QUERY] Disabled query, skipping fetch");
        return QueryState::Idle;
    }

    let cache_key = query.key().render();
    runtime.ensure_query_tasks(query, &cache_key);

    let mut options = CacheGetOptions::new();
    if let Some(expiration) = query.cache_expiration() {
        options = options.with_expiration(expiration);
    }
    if let Some(stale_time) = query.stale_time() {
        options = options.with_stale_time(stale_time);
    }

    loop {
        if let Some(hit) = runtime
            .cache()
            .get_with_options::<Result<Q::Output, Q::Error>>(&cache_key, options.clone())
        {
            if hit.is_stale {
                revalidate_in_background(runtime, query.clone(), cache_key.clone());
            }
            return hit.data.into();
        }

        let role = claim_fetch(runtime, &cache_key);
        match role {
            FetchRole::Leader => {
                crate::debug_log!("🆕 [REQUEST-DEDUP] Starting new request for key: {}", cache_key);
                // released on drop, so waiters are woken even if this future
                // is cancelled mid-fetch (they re-claim and fetch themselves)
                let guard = FetchGuard {
                    runtime,
                    cache_key: &cache_key,
                };
                let result = run_with_retries(runtime, query).await;
                runtime.cache().set(cache_key.clone(), result.clone());
                drop(guard);
                runtime.refresh_registry().trigger_refresh(&cache_key);
                return result.into();
            }
            FetchRole::Waiter(mut done) => {
                crate::debug_log!(
                    "🔄 [REQUEST-DEDUP] Request already pending for key: {}, waiting",
                    cache_key
                );
                // watch receivers observe a completion sent before we await,
                // so there is no missed-wakeup window here
                while !*done.borrow() {
                    if done.changed().await.is_err() {
                        break;
                    }
                }
                if let Some(result) = runtime
                    .cache()
                    .get::<Result<Q::Output, Q::Error>>(&cache_key)
                {
                    return result.into();
                }
                // the slot was invalidated between completion and our read;
                // loop and fetch again
            }
        }
    }
}

struct FetchGuard<'a> {
    runtime: &'a SyncRuntime,
    cache_key: &'a str,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        release_fetch(self.runtime, self.cache_key);
    }
}

fn claim_fetch(runtime: &SyncRuntime, cache_key: &str) -> FetchRole {
    let mut pending = lock_pending(runtime);
    match pending.get_mut(cache_key) {
        Some(entry) => {
            entry.waiters += 1;
            FetchRole::Waiter(entry.done.subscribe())
        }
        None => {
            let (done, _) = watch::channel(false);
            pending.insert(cache_key.to_string(), PendingFetch { waiters: 0, done });
            FetchRole::Leader
        }
    }
}

fn release_fetch(runtime: &SyncRuntime, cache_key: &str) {
    let mut pending = lock_pending(runtime);
    if let Some(entry) = pending.remove(cache_key) {
        if entry.waiters > 0 {
            crate::debug_log!(
                "✅ [REQUEST-DEDUP] Request completed for key: {} ({} waiters)",
                cache_key,
                entry.waiters
            );
        }
        let _ = entry.done.send_replace(true);
    }
}

fn lock_pending(
    runtime: &SyncRuntime,
) -> std::sync::MutexGuard<'_, std::collections::HashMap<String, PendingFetch>> {
    runtime
        .pending_requests()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run a read with the automatic retry policy: up to `max_read_retries`
/// retries with linear backoff, and no retry at all for errors that report
/// themselves non-retryable (authorization failures).
pub(crate) async fn run_with_retries<Q: Query>(
    runtime: &SyncRuntime,
    query: &Q,
) -> Result<Q::Output, Q::Error> {
    let max_retries = runtime.config().max_read_retries();
    let mut attempt: u32 = 0;
    loop {
        match query.run().await {
            Ok(output) => return Ok(output),
            Err(error) => {
                if attempt >= max_retries || !error.should_retry() {
                    return Err(error);
                }
                attempt += 1;
                crate::debug_log!(
                    "🔁 [RETRY] Read failed, retrying (attempt {}/{})",
                    attempt,
                    max_retries
                );
                let delay = runtime.config().retry_delay() * attempt;
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
