//! # Global runtime management
//!
//! An optional process-global [`SyncRuntime`] for application wiring. The
//! runtime itself stays an explicit, constructible service — tests build
//! their own isolated instances with [`SyncRuntime::new`] — but an
//! application shell usually wants exactly one, initialized at startup.

use std::sync::OnceLock;

use crate::runtime::{RuntimeConfig, SyncRuntime};

/// Error type for global runtime operations
#[derive(Debug, thiserror::Error)]
pub enum GlobalRuntimeError {
    #[error("Global runtime not initialized. Call init() first.")]
    NotInitialized,
    #[error("Global runtime already initialized")]
    AlreadyInitialized,
}

/// Global singleton instance of the sync runtime
static GLOBAL_RUNTIME: OnceLock<SyncRuntime> = OnceLock::new();

/// Initialize the global runtime with default configuration.
///
/// This should be called once at application startup, before any query or
/// mutation is executed through [`runtime()`].
///
/// ## Example
///
/// ```rust,no_run
/// fn main() {
///     comanda_sync::global::init().expect("runtime initialized twice");
/// }
/// ```
pub fn init() -> Result<(), GlobalRuntimeError> {
    init_with(RuntimeConfig::new())
}

/// Initialize the global runtime with an explicit configuration.
pub fn init_with(config: RuntimeConfig) -> Result<(), GlobalRuntimeError> {
    let mut fresh = false;
    GLOBAL_RUNTIME.get_or_init(|| {
        fresh = true;
        SyncRuntime::new(config)
    });
    if fresh {
        Ok(())
    } else {
        Err(GlobalRuntimeError::AlreadyInitialized)
    }
}

/// Get the global runtime instance.
///
/// ## Errors
///
/// Returns [`GlobalRuntimeError::NotInitialized`] if [`init`] has not been
/// called yet.
pub fn runtime() -> Result<&'static SyncRuntime, GlobalRuntimeError> {
    GLOBAL_RUNTIME.get().ok_or(GlobalRuntimeError::NotInitialized)
}

/// Check if the global runtime has been initialized
pub fn is_initialized() -> bool {
    GLOBAL_RUNTIME.get().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_then_access() {
        // If another test initialized the runtime first, init() reports it.
        match init() {
            Ok(()) => {}
            Err(GlobalRuntimeError::AlreadyInitialized) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
        assert!(is_initialized());
        assert!(runtime().is_ok());

        // A second init never clobbers the existing instance.
        assert!(matches!(
            init(),
            Err(GlobalRuntimeError::AlreadyInitialized)
        ));
    }
}
