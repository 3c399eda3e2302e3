//! Async state types surfaced to query and mutation callers.
//!
//! This module provides the [`QueryState`] enum and the [`AsyncState`] trait
//! for working with asynchronous operations in comanda-sync.

/// Common trait for async state types that represent loading, success, and error states
///
/// This trait provides a unified interface for working with different async state types
/// in comanda-sync, such as `QueryState` and `MutationState`.
pub trait AsyncState {
    /// The type of successful data
    type Data;
    /// The type of error
    type Error;

    /// Returns true if the state is currently loading
    fn is_loading(&self) -> bool;

    /// Returns true if the state contains successful data
    fn is_success(&self) -> bool;

    /// Returns true if the state contains an error
    fn is_error(&self) -> bool;

    /// Returns the data if successful, None otherwise
    fn data(&self) -> Option<&Self::Data>;

    /// Returns the error if failed, None otherwise
    fn error(&self) -> Option<&Self::Error>;
}

/// Represents the state of a cached read.
///
/// `Idle` is the short-circuit state of a disabled query (an entity query
/// whose id argument is absent): no request was issued and none will be until
/// the query becomes enabled.
#[derive(Clone, PartialEq, Debug)]
pub enum QueryState<T, E> {
    /// The query is disabled; no request was issued
    Idle,
    /// The operation is currently loading
    Loading,
    /// The operation completed successfully with data
    Success(T),
    /// The operation failed with an error
    Error(E),
}

impl<T, E> AsyncState for QueryState<T, E> {
    type Data = T;
    type Error = E;

    fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    fn is_success(&self) -> bool {
        matches!(self, QueryState::Success(_))
    }

    fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }

    fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    fn error(&self) -> Option<&E> {
        match self {
            QueryState::Error(error) => Some(error),
            _ => None,
        }
    }
}

impl<T, E> QueryState<T, E> {
    /// Returns true if the query is disabled and issued no request
    pub fn is_idle(&self) -> bool {
        matches!(self, QueryState::Idle)
    }

    /// Returns true if the state is currently loading
    pub fn is_loading(&self) -> bool {
        <Self as AsyncState>::is_loading(self)
    }

    /// Returns true if the state contains successful data
    pub fn is_success(&self) -> bool {
        <Self as AsyncState>::is_success(self)
    }

    /// Returns true if the state contains an error
    pub fn is_error(&self) -> bool {
        <Self as AsyncState>::is_error(self)
    }

    /// Returns the data if successful, None otherwise
    pub fn data(&self) -> Option<&T> {
        <Self as AsyncState>::data(self)
    }

    /// Returns the error if failed, None otherwise
    pub fn error(&self) -> Option<&E> {
        <Self as AsyncState>::error(self)
    }

    /// Maps a QueryState<T, E> to QueryState<U, E> by applying a function to the contained data if successful.
    pub fn map<U, F>(self, op: F) -> QueryState<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            QueryState::Success(data) => QueryState::Success(op(data)),
            QueryState::Error(e) => QueryState::Error(e),
            QueryState::Loading => QueryState::Loading,
            QueryState::Idle => QueryState::Idle,
        }
    }

    /// Maps a QueryState<T, E> to QueryState<T, F> by applying a function to the contained error if failed.
    pub fn map_err<F, O>(self, op: O) -> QueryState<T, F>
    where
        O: FnOnce(E) -> F,
    {
        match self {
            QueryState::Success(data) => QueryState::Success(data),
            QueryState::Error(e) => QueryState::Error(op(e)),
            QueryState::Loading => QueryState::Loading,
            QueryState::Idle => QueryState::Idle,
        }
    }

    /// Chains a QueryState<T, E> to QueryState<U, E> by applying a function to the contained data if successful.
    pub fn and_then<U, F>(self, op: F) -> QueryState<U, E>
    where
        F: FnOnce(T) -> QueryState<U, E>,
    {
        match self {
            QueryState::Success(data) => op(data),
            QueryState::Error(e) => QueryState::Error(e),
            QueryState::Loading => QueryState::Loading,
            QueryState::Idle => QueryState::Idle,
        }
    }
}

impl<T, E> From<Result<T, E>> for QueryState<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => QueryState::Success(data),
            Err(error) => QueryState::Error(error),
        }
    }
}
