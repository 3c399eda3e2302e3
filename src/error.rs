//! Error types for the transport and synchronization layers.
//!
//! The taxonomy follows the dashboard's three failure classes:
//! - [`ApiError`] — transport failures (non-2xx responses, timeouts, network
//!   faults) and request-construction failures that happen inside the data
//!   layer. Every variant maps to an HTTP status via [`ApiError::status`];
//!   status `0` denotes a client-side transport failure rather than a server
//!   response.
//! - [`ValidationError`] — local form validation. These are resolved before
//!   submission and never reach the network layer.
//!
//! Query errors are surfaced as state, mutation errors through the mutation's
//! error channel; neither is thrown into surrounding control flow.

use serde::Deserialize;

/// Structured error payload the backend attaches to failed responses.
///
/// Every field is optional; backends are inconsistent about which ones they
/// populate.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    /// Per-field validation messages, when the server provides them.
    #[serde(default)]
    pub fields: Option<serde_json::Value>,
}

/// Fallback notification shown when a failed mutation carries no
/// server-supplied message.
pub const FALLBACK_NOTIFICATION: &str = "Something went wrong. Please try again.";

/// Error produced by the API transport client and the service layer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The server responded with a non-2xx status.
    #[error("server responded with status {status}")]
    Status {
        status: u16,
        detail: Option<ErrorDetail>,
    },

    /// The request exceeded the configured timeout and was aborted.
    #[error("request timed out")]
    Timeout,

    /// Connection-level failure before any response arrived.
    #[error("network failure: {0}")]
    Network(String),

    /// A 2xx response whose body did not match the expected shape.
    #[error("could not decode response body: {0}")]
    Decode(String),

    /// The request could not be constructed (bad endpoint name, unbound
    /// placeholder, unserializable body). Never left the process.
    #[error("invalid request: {0}")]
    Request(String),
}

impl ApiError {
    /// The HTTP status associated with this error.
    ///
    /// `0` for anything that is not an actual server response: timeouts,
    /// network faults, body decode failures and request-construction errors.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Status { status, .. } => *status,
            _ => 0,
        }
    }

    /// Structured detail payload extracted from the response body, if any.
    pub fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            ApiError::Status { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }

    /// Whether this failure is an authorization failure (401/403).
    ///
    /// Authorization failures are never retried automatically: retrying
    /// cannot succeed without an out-of-band re-authentication step.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), 401 | 403)
    }

    /// Human-readable notification for a failed mutation.
    ///
    /// Prefers the server-supplied message; falls back to
    /// [`FALLBACK_NOTIFICATION`] when none is available.
    pub fn notification(&self) -> String {
        self.detail()
            .and_then(|d| d.message.clone())
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_NOTIFICATION.to_string())
    }
}

/// Result alias for transport and service operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that decide the automatic read-retry policy.
pub trait RetryableError {
    /// Whether the read-query retry policy may retry after this error.
    fn should_retry(&self) -> bool;
}

impl RetryableError for ApiError {
    fn should_retry(&self) -> bool {
        !self.is_auth_error()
    }
}

/// Local form-field validation failure.
///
/// Blocks submission in place; never enters the data-synchronization layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} is not a valid email address")]
    InvalidEmail { field: &'static str },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_report_status_zero() {
        assert_eq!(ApiError::Timeout.status(), 0);
        assert_eq!(ApiError::Network("refused".into()).status(), 0);
        assert_eq!(ApiError::Decode("bad json".into()).status(), 0);
    }

    #[test]
    fn auth_classification() {
        let unauthorized = ApiError::Status {
            status: 401,
            detail: None,
        };
        let forbidden = ApiError::Status {
            status: 403,
            detail: None,
        };
        let server = ApiError::Status {
            status: 500,
            detail: None,
        };
        assert!(unauthorized.is_auth_error());
        assert!(forbidden.is_auth_error());
        assert!(!server.is_auth_error());
        assert!(!unauthorized.should_retry());
        assert!(server.should_retry());
        assert!(ApiError::Timeout.should_retry());
    }

    #[test]
    fn notification_prefers_server_message() {
        let err = ApiError::Status {
            status: 422,
            detail: Some(ErrorDetail {
                message: Some("Table is already occupied".into()),
                ..ErrorDetail::default()
            }),
        };
        assert_eq!(err.notification(), "Table is already occupied");

        let blank = ApiError::Status {
            status: 422,
            detail: Some(ErrorDetail {
                message: Some("   ".into()),
                ..ErrorDetail::default()
            }),
        };
        assert_eq!(blank.notification(), FALLBACK_NOTIFICATION);
        assert_eq!(ApiError::Timeout.notification(), FALLBACK_NOTIFICATION);
    }
}
