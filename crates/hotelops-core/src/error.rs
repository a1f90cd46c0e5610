// ── Core error types ──
//
// User-facing errors from hotelops-core. List screens never see these
// directly: the paginator turns fetch failures into `ListState::error`.
// Record-level operations (get/create/update/delete) return them.

use thiserror::Error;

use crate::filter::FilterError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the back-office API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {resource} {identifier}")]
    NotFound {
        resource: String,
        identifier: String,
    },

    /// The server said "no matching records". Lists treat this as an
    /// empty page; it only surfaces from single-record operations.
    #[error("No matching records: {message}")]
    NoRecords { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Invalid filter: {0}")]
    Filter(#[from] FilterError),

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Operation not supported: {operation}")]
    Unsupported { operation: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` for errors a retry might fix.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout { .. } => true,
            Self::Api { status, .. } => status.is_some_and(|s| s >= 500),
            _ => false,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hotelops_api::Error> for CoreError {
    fn from(err: hotelops_api::Error) -> Self {
        match err {
            hotelops_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            hotelops_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            hotelops_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            hotelops_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            hotelops_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            hotelops_api::Error::Api { status: 404, message } => CoreError::NotFound {
                resource: "record".into(),
                identifier: message,
            },
            hotelops_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            hotelops_api::Error::NoRecords { message } => CoreError::NoRecords { message },
            hotelops_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Malformed response: {message}"),
                status: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_404_maps_to_not_found() {
        let err: CoreError = hotelops_api::Error::Api {
            status: 404,
            message: "Employee not found".into(),
        }
        .into();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn malformed_envelope_maps_to_api_error() {
        let err: CoreError = hotelops_api::Error::Deserialization {
            message: "expected value".into(),
            body: "<html>".into(),
        }
        .into();
        assert!(err.to_string().contains("Malformed response"));
        assert!(!err.is_transient());
    }

    #[test]
    fn server_error_is_transient() {
        let err: CoreError = hotelops_api::Error::Api {
            status: 503,
            message: "down".into(),
        }
        .into();
        assert!(err.is_transient());
    }
}
