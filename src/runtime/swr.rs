//! Stale-while-revalidate (SWR) functionality.

use crate::{query::Query, runtime::SyncRuntime, runtime::request::run_with_retries};

/// Serve-stale-then-revalidate: spawn a background refetch for a stale key.
///
/// The revalidation slot guarantees at most one background refetch per key at
/// a time; losers of the race simply keep serving the stale value until the
/// winner's result lands and triggers a refresh.
pub fn revalidate_in_background<Q: Query>(runtime: &SyncRuntime, query: Q, cache_key: String) {
    if !runtime.refresh_registry().start_revalidation(&cache_key) {
        return;
    }

    crate::debug_log!(
        "🔄 [SWR] Data is stale for key: {} - triggering background revalidation",
        cache_key
    );

    let runtime = runtime.clone();
    tokio::spawn(async move {
        let result = run_with_retries(&runtime, &query).await;
        let updated = runtime.cache().set(cache_key.clone(), result);
        runtime.refresh_registry().complete_revalidation(&cache_key);
        if updated {
            runtime.refresh_registry().trigger_refresh(&cache_key);
            crate::debug_log!(
                "✅ [SWR] Background revalidation completed for key: {} (value changed)",
                cache_key
            );
        } else {
            crate::debug_log!(
                "✅ [SWR] Background revalidation completed for key: {} (value unchanged)",
                cache_key
            );
        }
    });
}
