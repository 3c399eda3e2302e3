//! Environment configuration for the API transport.
//!
//! The backend base URL comes from a per-environment preset, overridable with
//! the `COMANDA_API_URL` environment variable. The request timeout and the
//! default header set live here so every client is configured the same way.

use std::time::Duration;

/// Client-side timeout after which an in-flight request is aborted.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Environment variable overriding the backend base URL for any environment.
pub const API_URL_ENV: &str = "COMANDA_API_URL";

/// Deployment environment the dashboard talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ApiEnvironment {
    /// The preset base URL for this environment.
    pub const fn preset_url(self) -> &'static str {
        match self {
            ApiEnvironment::Development => "http://localhost:8000/api",
            ApiEnvironment::Staging => "https://staging.comanda.cl/api",
            ApiEnvironment::Production => "https://api.comanda.cl/api",
        }
    }

    /// Effective base URL: the `COMANDA_API_URL` override when set and
    /// non-blank, the preset otherwise.
    pub fn base_url(self) -> String {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url.trim().trim_end_matches('/').to_string(),
            _ => self.preset_url().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_cover_every_environment() {
        assert!(ApiEnvironment::Development.preset_url().starts_with("http://"));
        assert!(ApiEnvironment::Staging.preset_url().starts_with("https://"));
        assert!(ApiEnvironment::Production.preset_url().starts_with("https://"));
    }

    #[test]
    fn timeout_is_fifteen_seconds() {
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(15));
    }
}
