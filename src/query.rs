//! The [`Query`] trait: a cached read with a key and a refresh policy.
//!
//! A query pairs an async fetch (`run`) with the [`QueryKey`] that identifies
//! its cache slot, plus optional policy knobs mirroring what the dashboard
//! needs:
//!
//! - **Staleness (SWR)**: data older than `stale_time` is served immediately
//!   while a background revalidation runs. A zero stale time means the query
//!   is always considered stale and refetches on every access.
//! - **Refetch interval**: re-run the query on a schedule even without reads.
//! - **Cache expiration**: data older than `cache_expiration` is dropped and
//!   fetched fresh on the next access.
//! - **Enablement**: a query whose required argument is missing (an entity
//!   read with no id) reports `enabled() == false` and short-circuits to
//!   [`QueryState::Idle`](crate::state::QueryState) without touching the
//!   network.
//! - **Focus refetch**: queries that must be fresh whenever the operator
//!   returns to the window register for focus notifications.
//!
//! ## Example
//!
//! ```rust,no_run
//! use comanda_sync::prelude::*;
//! use std::time::Duration;
//!
//! #[derive(Clone)]
//! struct MenuOfTheDay;
//!
//! impl Query for MenuOfTheDay {
//!     type Output = Vec<String>;
//!     type Error = ApiError;
//!
//!     fn key(&self) -> QueryKey {
//!         QueryKey::collection(Resource::Products)
//!     }
//!
//!     fn stale_time(&self) -> Option<Duration> {
//!         Some(Duration::from_secs(300))
//!     }
//!
//!     async fn run(&self) -> Result<Self::Output, Self::Error> {
//!         Ok(vec!["cazuela".to_string()])
//!     }
//! }
//! ```

use std::{future::Future, time::Duration};

use crate::{
    error::RetryableError,
    keys::QueryKey,
    types::{QueryErrorBounds, QueryOutputBounds},
};

/// A cached, keyed read operation.
pub trait Query: Clone + Send + Sync + 'static {
    /// The type of data returned on success
    type Output: QueryOutputBounds;
    /// The type of error returned on failure
    type Error: QueryErrorBounds + RetryableError;

    /// The cache slot this query reads and writes.
    ///
    /// Only meaningful while `enabled()` holds; a disabled query is never
    /// keyed because it never executes.
    fn key(&self) -> QueryKey;

    /// Execute the fetch.
    fn run(&self) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send;

    /// Whether the query may execute at all.
    ///
    /// Entity queries return `false` while their id argument is absent, which
    /// short-circuits the fetch without issuing a request.
    fn enabled(&self) -> bool {
        true
    }

    /// Duration after which cached data is considered stale (None means never).
    fn stale_time(&self) -> Option<Duration> {
        None
    }

    /// Interval for automatic background refetch (None means no interval).
    fn refetch_interval(&self) -> Option<Duration> {
        None
    }

    /// Duration after which cached data is evicted outright (None means never).
    fn cache_expiration(&self) -> Option<Duration> {
        None
    }

    /// Whether this query refetches when the window regains focus.
    fn refetch_on_focus(&self) -> bool {
        false
    }
}
