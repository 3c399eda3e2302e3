//! Mutations: non-cached writes with declarative cache effects.
//!
//! A [`Mutation`] executes a write against the backend and, through
//! [`MutationEffects`], declares what happens to the cache when it succeeds:
//!
//! - **create** — invalidate the resource's collection query so the next list
//!   read refetches;
//! - **update / status change** — write the returned entity straight into its
//!   entity slot (no refetch needed) and invalidate the collection;
//! - **delete** — remove the entity slot outright and invalidate the
//!   collection.
//!
//! On failure the cache is never touched: the previous cached state remains
//! authoritative, the error is surfaced through [`MutationState::Error`], and
//! no automatic retry happens. Concurrent invocations of the same mutation
//! are independent; deduplication exists only for identical in-flight reads.

use std::future::Future;

use crate::{
    cache::QueryCache,
    error::ApiError,
    keys::{QueryKey, Resource},
    refresh::RefreshRegistry,
    runtime::SyncRuntime,
    state::AsyncState,
    types::{QueryErrorBounds, QueryOutputBounds},
};

/// Represents the state of a mutation.
#[derive(Clone, PartialEq, Debug)]
pub enum MutationState<T, E> {
    /// The mutation has not been executed yet
    Idle,
    /// The mutation is currently executing
    Loading,
    /// The mutation completed successfully with data
    Success(T),
    /// The mutation failed with an error
    Error(E),
}

impl<T, E> AsyncState for MutationState<T, E> {
    type Data = T;
    type Error = E;

    fn is_loading(&self) -> bool {
        matches!(self, MutationState::Loading)
    }

    fn is_success(&self) -> bool {
        matches!(self, MutationState::Success(_))
    }

    fn is_error(&self) -> bool {
        matches!(self, MutationState::Error(_))
    }

    fn data(&self) -> Option<&T> {
        match self {
            MutationState::Success(data) => Some(data),
            _ => None,
        }
    }

    fn error(&self) -> Option<&E> {
        match self {
            MutationState::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl<T, E> MutationState<T, E> {
    pub fn is_idle(&self) -> bool {
        matches!(self, MutationState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        <Self as AsyncState>::is_loading(self)
    }

    pub fn is_success(&self) -> bool {
        <Self as AsyncState>::is_success(self)
    }

    pub fn is_error(&self) -> bool {
        <Self as AsyncState>::is_error(self)
    }

    pub fn data(&self) -> Option<&T> {
        <Self as AsyncState>::data(self)
    }

    pub fn error(&self) -> Option<&E> {
        <Self as AsyncState>::error(self)
    }
}

/// One deferred entity write: stores a fresh `Ok` result into an entity slot
/// so the next entity read is served from cache without a network request.
pub struct EntityWrite {
    key: QueryKey,
    apply: Box<dyn FnOnce(&QueryCache, &str) -> bool + Send>,
}

impl EntityWrite {
    /// Write `value` into `key` as a successful query result.
    ///
    /// The stored type is `Result<T, ApiError>`, matching what this crate's
    /// queries cache; a read of the same slot with the same output type hits.
    pub fn new<T: QueryOutputBounds>(key: QueryKey, value: T) -> Self {
        Self {
            key,
            apply: Box::new(move |cache, rendered| {
                cache.set(rendered.to_string(), Ok::<T, ApiError>(value))
            }),
        }
    }
}

/// The cache consequences of a successful mutation.
///
/// Constructors encode the three standard rules (`created`, `updated`,
/// `deleted`); `and_*` combinators add resource-specific extras, such as an
/// order adjustment also invalidating the products collection because stock
/// moved.
#[derive(Default)]
pub struct MutationEffects {
    invalidates: Vec<QueryKey>,
    removes: Vec<QueryKey>,
    writes: Vec<EntityWrite>,
}

impl MutationEffects {
    /// No cache effects.
    pub fn none() -> Self {
        Self::default()
    }

    /// Standard create rule: invalidate the resource's collection query.
    pub fn created(resource: Resource) -> Self {
        Self::none().and_invalidate(QueryKey::collection(resource))
    }

    /// Standard update rule: write the returned entity into its entity slot
    /// and invalidate the collection query. Status changes follow the same
    /// rule.
    pub fn updated<T: QueryOutputBounds>(resource: Resource, id: i64, value: T) -> Self {
        Self::none()
            .and_write(EntityWrite::new(QueryKey::entity(resource, id), value))
            .and_invalidate(QueryKey::collection(resource))
    }

    /// Standard delete rule: remove the entity slot outright and invalidate
    /// the collection query.
    pub fn deleted(resource: Resource, id: i64) -> Self {
        Self::none()
            .and_remove(QueryKey::entity(resource, id))
            .and_invalidate(QueryKey::collection(resource))
    }

    pub fn and_invalidate(mut self, key: QueryKey) -> Self {
        self.invalidates.push(key);
        self
    }

    pub fn and_remove(mut self, key: QueryKey) -> Self {
        self.removes.push(key);
        self
    }

    pub fn and_write(mut self, write: EntityWrite) -> Self {
        self.writes.push(write);
        self
    }

    /// Apply the effects to the cache and wake affected subscribers.
    ///
    /// Only ever called on the success path; this is the sole writer of
    /// mutation results into the cache.
    pub(crate) fn apply(self, cache: &QueryCache, refresh: &RefreshRegistry) {
        for key in self.removes {
            let rendered = key.render();
            cache.remove(&rendered);
            refresh.trigger_refresh(&rendered);
        }
        for write in self.writes {
            let rendered = write.key.render();
            let updated = (write.apply)(cache, &rendered);
            if updated {
                refresh.trigger_refresh(&rendered);
            }
        }
        for key in self.invalidates {
            let rendered = key.render();
            cache.invalidate(&rendered);
            refresh.trigger_refresh(&rendered);
        }
    }
}

/// A write operation against the backend.
pub trait Mutation<Input>: Clone + Send + Sync + 'static {
    /// The type of data returned on success
    type Output: QueryOutputBounds;
    /// The type of error returned on failure
    type Error: QueryErrorBounds;

    /// Execute the write.
    fn mutate(&self, input: Input) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send;

    /// Cache effects to apply when the write succeeds.
    fn effects(&self, _input: &Input, _output: &Self::Output) -> MutationEffects {
        MutationEffects::none()
    }
}

/// Execute a mutation through the runtime.
///
/// On success the mutation's [`MutationEffects`] are applied to the cache;
/// on failure the cache is left untouched and the error is returned as
/// [`MutationState::Error`]. Mutations are never retried automatically.
pub async fn run_mutation<M, In>(
    runtime: &SyncRuntime,
    mutation: &M,
    input: In,
) -> MutationState<M::Output, M::Error>
where
    M: Mutation<In>,
    In: Clone + Send + Sync + 'static,
{
    crate::log_mutation_start!("executing mutation");
    match mutation.mutate(input.clone()).await {
        Ok(output) => {
            let effects = mutation.effects(&input, &output);
            effects.apply(runtime.cache(), runtime.refresh_registry());
            crate::log_mutation_success!("mutation succeeded, cache effects applied");
            MutationState::Success(output)
        }
        Err(error) => {
            crate::log_mutation_error!("mutation failed, cache left untouched");
            MutationState::Error(error)
        }
    }
}
