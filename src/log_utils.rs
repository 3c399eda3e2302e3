//! Internal logging utilities for consistent log formatting across the library
//!
//! This module provides macros that adapt log messages based on feature flags:
//! - `tracing`: Enable/disable all logging (enabled by default)
//! - `plain-logs`: When enabled with `tracing`, uses plain text prefixes instead of emojis
//!
//! ## Usage
//!
//! ```toml
//! # Default: tracing enabled with emojis
//! comanda-sync = "0.2"
//!
//! # Disable all logging
//! comanda-sync = { version = "0.2", default-features = false }
//!
//! # Enable tracing with plain text (no emojis)
//! comanda-sync = { version = "0.2", features = ["plain-logs"] }
//! ```

/// Internal debug logging macro that respects the tracing feature flag
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    };
}

/// Logs a cache store operation with appropriate formatting
#[macro_export]
macro_rules! log_cache_store {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("📊 [CACHE-STORE] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[CACHE-STORE] {}", format!($($arg)*));
    };
}

/// Logs a cache invalidation with appropriate formatting
#[macro_export]
macro_rules! log_cache_invalidate {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("🗑️ [CACHE-INVALIDATE] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[CACHE-INVALIDATE] {}", format!($($arg)*));
    };
}

/// Logs a mutation start with appropriate formatting
#[macro_export]
macro_rules! log_mutation_start {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("🔄 [MUTATION] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[MUTATION] {}", format!($($arg)*));
    };
}

/// Logs a mutation success with appropriate formatting
#[macro_export]
macro_rules! log_mutation_success {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("✅ [MUTATION] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[MUTATION-SUCCESS] {}", format!($($arg)*));
    };
}

/// Logs a mutation error with appropriate formatting
#[macro_export]
macro_rules! log_mutation_error {
    ($($arg:tt)*) => {
        #[cfg(all(feature = "tracing", not(feature = "plain-logs")))]
        tracing::debug!("❌ [MUTATION] {}", format!($($arg)*));
        #[cfg(all(feature = "tracing", feature = "plain-logs"))]
        tracing::debug!("[MUTATION-ERROR] {}", format!($($arg)*));
    };
}
