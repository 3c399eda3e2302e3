//! Common trait bounds used throughout comanda-sync

/// Common trait bounds for query output types
pub trait QueryOutputBounds: Clone + PartialEq + Send + Sync + 'static {}
impl<T> QueryOutputBounds for T where T: Clone + PartialEq + Send + Sync + 'static {}

/// Common trait bounds for query error types
pub trait QueryErrorBounds: Clone + PartialEq + Send + Sync + 'static {}
impl<T> QueryErrorBounds for T where T: Clone + PartialEq + Send + Sync + 'static {}
