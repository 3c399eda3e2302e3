//! Runtime behavior: dedup, cache rules for mutations, retry policy and
//! disabled-query short-circuits.
//!
//! Every test builds its own `SyncRuntime`, so caches never leak between
//! tests.

use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use comanda_sync::prelude::*;

/// Query that counts how many times it actually executes.
#[derive(Clone)]
struct CountingQuery {
    calls: Arc<AtomicU32>,
    key: QueryKey,
    delay: Duration,
    enabled: bool,
    stale_time: Option<Duration>,
}

impl CountingQuery {
    fn new(key: QueryKey) -> (Self, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (
            Self {
                calls: calls.clone(),
                key,
                delay: Duration::ZERO,
                enabled: true,
                stale_time: None,
            },
            calls,
        )
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    fn with_stale_time(mut self, stale_time: Duration) -> Self {
        self.stale_time = Some(stale_time);
        self
    }
}

impl Query for CountingQuery {
    type Output = u32;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        self.key.clone()
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn stale_time(&self) -> Option<Duration> {
        self.stale_time
    }

    fn run(&self) -> impl Future<Output = ApiResult<u32>> + Send {
        let calls = self.calls.clone();
        let delay = self.delay;
        async move {
            let value = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Ok(value)
        }
    }
}

/// Query that always fails with the given status.
#[derive(Clone)]
struct FailingQuery {
    calls: Arc<AtomicU32>,
    key: QueryKey,
    status: u16,
}

impl FailingQuery {
    fn new(key: QueryKey, status: u16) -> (Self, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        (
            Self {
                calls: calls.clone(),
                key,
                status,
            },
            calls,
        )
    }
}

impl Query for FailingQuery {
    type Output = u32;
    type Error = ApiError;

    fn key(&self) -> QueryKey {
        self.key.clone()
    }

    fn run(&self) -> impl Future<Output = ApiResult<u32>> + Send {
        let calls = self.calls.clone();
        let status = self.status;
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Status {
                status,
                detail: None,
            })
        }
    }
}

/// Update-style mutation: returns its input value as the new entity.
#[derive(Clone)]
struct UpdateItemMutation;

impl Mutation<(i64, u32)> for UpdateItemMutation {
    type Output = u32;
    type Error = ApiError;

    fn mutate(&self, input: (i64, u32)) -> impl Future<Output = ApiResult<u32>> + Send {
        async move { Ok(input.1) }
    }

    fn effects(&self, input: &(i64, u32), output: &u32) -> MutationEffects {
        MutationEffects::updated(Resource::Clients, input.0, *output)
    }
}

/// Delete-style mutation.
#[derive(Clone)]
struct DeleteItemMutation;

impl Mutation<i64> for DeleteItemMutation {
    type Output = ();
    type Error = ApiError;

    fn mutate(&self, _id: i64) -> impl Future<Output = ApiResult<()>> + Send {
        async move { Ok(()) }
    }

    fn effects(&self, id: &i64, _output: &()) -> MutationEffects {
        MutationEffects::deleted(Resource::Clients, *id)
    }
}

/// Mutation that always fails, counting attempts.
#[derive(Clone)]
struct FailingMutation {
    calls: Arc<AtomicU32>,
}

impl Mutation<()> for FailingMutation {
    type Output = u32;
    type Error = ApiError;

    fn mutate(&self, _input: ()) -> impl Future<Output = ApiResult<u32>> + Send {
        let calls = self.calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::Status {
                status: 500,
                detail: None,
            })
        }
    }

    fn effects(&self, _input: &(), _output: &u32) -> MutationEffects {
        MutationEffects::created(Resource::Clients)
    }
}

fn test_runtime() -> SyncRuntime {
    SyncRuntime::new(RuntimeConfig::new().with_retry_delay(Duration::ZERO))
}

#[tokio::test]
async fn dedupes_identical_inflight_reads() {
    let runtime = test_runtime();
    let (query, calls) = CountingQuery::new(QueryKey::collection(Resource::Products));
    let query = query.with_delay(Duration::from_millis(20));

    let a = {
        let runtime = runtime.clone();
        let query = query.clone();
        tokio::spawn(async move { runtime.fetch(&query).await })
    };
    let b = {
        let runtime = runtime.clone();
        let query = query.clone();
        tokio::spawn(async move { runtime.fetch(&query).await })
    };

    let (a, b) = (a.await.unwrap(), b.await.unwrap());
    assert_eq!(a, QueryState::Success(1));
    assert_eq!(b, QueryState::Success(1));
    assert_eq!(
        calls.load(Ordering::SeqCst),
        1,
        "both consumers should share a single fetch"
    );
}

#[tokio::test]
async fn second_read_is_served_from_cache() {
    let runtime = test_runtime();
    let (query, calls) = CountingQuery::new(QueryKey::collection(Resource::Tables));

    assert_eq!(runtime.fetch(&query).await, QueryState::Success(1));
    assert_eq!(runtime.fetch(&query).await, QueryState::Success(1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn disabled_query_never_issues_a_request() {
    let runtime = test_runtime();
    let (query, calls) = CountingQuery::new(QueryKey::entity(Resource::Clients, 0));
    let query = query.disabled();

    let state = runtime.fetch(&query).await;
    assert!(state.is_idle());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn update_mutation_writes_entity_and_invalidates_collection() {
    let runtime = test_runtime();
    let (entity_query, entity_calls) = CountingQuery::new(QueryKey::entity(Resource::Clients, 7));
    let (collection_query, collection_calls) =
        CountingQuery::new(QueryKey::collection(Resource::Clients));

    // prime both slots
    assert_eq!(runtime.fetch(&entity_query).await, QueryState::Success(1));
    assert_eq!(runtime.fetch(&collection_query).await, QueryState::Success(1));

    let result = runtime.mutate(&UpdateItemMutation, (7, 42)).await;
    assert_eq!(result, MutationState::Success(42));

    // the entity read serves the mutation's value from cache, no request
    assert_eq!(runtime.fetch(&entity_query).await, QueryState::Success(42));
    assert_eq!(entity_calls.load(Ordering::SeqCst), 1);

    // the collection read refetches
    assert_eq!(runtime.fetch(&collection_query).await, QueryState::Success(2));
    assert_eq!(collection_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn delete_mutation_removes_entity_and_invalidates_collection() {
    let runtime = test_runtime();
    let (entity_query, entity_calls) = CountingQuery::new(QueryKey::entity(Resource::Clients, 9));
    let (collection_query, collection_calls) =
        CountingQuery::new(QueryKey::collection(Resource::Clients));

    runtime.fetch(&entity_query).await;
    runtime.fetch(&collection_query).await;

    let result = runtime.mutate(&DeleteItemMutation, 9).await;
    assert_eq!(result, MutationState::Success(()));

    // the entity slot is gone: the next read is a miss and fetches fresh
    assert_eq!(runtime.fetch(&entity_query).await, QueryState::Success(2));
    assert_eq!(entity_calls.load(Ordering::SeqCst), 2);

    assert_eq!(runtime.fetch(&collection_query).await, QueryState::Success(2));
    assert_eq!(collection_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn failed_mutation_leaves_cache_untouched() {
    let runtime = test_runtime();
    let (entity_query, entity_calls) = CountingQuery::new(QueryKey::entity(Resource::Clients, 3));
    runtime.fetch(&entity_query).await;

    let calls = Arc::new(AtomicU32::new(0));
    let mutation = FailingMutation {
        calls: calls.clone(),
    };
    let result = runtime.mutate(&mutation, ()).await;
    assert!(result.is_error());
    // mutations never retry
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // the previous cached state remains authoritative
    assert_eq!(runtime.fetch(&entity_query).await, QueryState::Success(1));
    assert_eq!(entity_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn reads_retry_up_to_three_times() {
    let runtime = test_runtime();
    let (query, calls) = FailingQuery::new(QueryKey::collection(Resource::Orders), 500);

    let state = runtime.fetch(&query).await;
    assert!(state.is_error());
    // one initial attempt plus three retries
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn auth_failures_are_never_retried() {
    for status in [401, 403] {
        let runtime = test_runtime();
        let (query, calls) = FailingQuery::new(QueryKey::collection(Resource::Users), status);

        let state = runtime.fetch(&query).await;
        assert!(state.is_error());
        assert_eq!(calls.load(Ordering::SeqCst), 1, "status {status} retried");
    }
}

#[tokio::test]
async fn failed_reads_are_cached_as_errors_not_dropped() {
    let runtime = test_runtime();
    let (query, _calls) = FailingQuery::new(QueryKey::collection(Resource::Expenses), 500);

    let state = runtime.fetch(&query).await;
    let error = state.error().expect("query should surface the error");
    assert_eq!(error.status(), 500);
}

#[tokio::test]
async fn always_stale_queries_revalidate_in_the_background() {
    let runtime = test_runtime();
    let (query, calls) = CountingQuery::new(QueryKey::collection(Resource::SalesSubtotal));
    let query = query.with_stale_time(Duration::ZERO);

    assert_eq!(runtime.fetch(&query).await, QueryState::Success(1));

    // the stale hit is served immediately while a background refetch runs
    assert_eq!(runtime.fetch(&query).await, QueryState::Success(1));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(calls.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn peek_reports_in_flight_reads_as_loading() {
    let runtime = test_runtime();
    let (query, _calls) = CountingQuery::new(QueryKey::collection(Resource::Employees));
    let query = query.with_delay(Duration::from_millis(50));

    assert!(runtime.peek(&query).is_idle());

    let fetch = {
        let runtime = runtime.clone();
        let query = query.clone();
        tokio::spawn(async move { runtime.fetch(&query).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(runtime.peek(&query).is_loading());

    assert_eq!(fetch.await.unwrap(), QueryState::Success(1));
    assert_eq!(runtime.peek(&query), QueryState::Success(1));
}

#[tokio::test]
async fn invalidate_forces_the_next_read_to_refetch() {
    let runtime = test_runtime();
    let (query, calls) = CountingQuery::new(QueryKey::collection(Resource::ExpenseTypes));

    runtime.fetch(&query).await;
    runtime.invalidate(&QueryKey::collection(Resource::ExpenseTypes));

    assert_eq!(runtime.fetch(&query).await, QueryState::Success(2));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn focus_notification_bumps_registered_keys() {
    let runtime = test_runtime();
    let key = QueryKey::collection(Resource::SalesSubtotal).render();
    runtime.refresh_registry().register_focus_key(&key);

    let mut rx = runtime.refresh_registry().subscribe(&key);
    runtime.notify_focus();
    rx.changed().await.expect("focus refresh should be delivered");
    assert_eq!(runtime.refresh_registry().refresh_count(&key), 1);
}
