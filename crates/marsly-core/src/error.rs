// ── Core error types ──
//
// Errors from marsly-core. These are NOT API-specific: the
// `From<marsly_api::Error>` impl translates transport-layer errors into
// domain variants. The listing store absorbs all of them into
// `FetchStatus::Error`; they only surface through logs and through
// direct `ListingSource` calls.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach listings API at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    /// The request exceeded the transport's configured timeout.
    #[error("Listings request timed out")]
    Timeout,

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Unexpected response from listings API: {message}")]
    Deserialization { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<marsly_api::Error> for CoreError {
    fn from(err: marsly_api::Error) -> Self {
        match err {
            marsly_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
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
            marsly_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            marsly_api::Error::Tls(msg) => CoreError::Config {
                message: format!("HTTP client setup failed: {msg}"),
            },
            marsly_api::Error::Http { status, body } => CoreError::Api {
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    format!("HTTP {status}: {body}")
                },
                status: Some(status),
            },
            marsly_api::Error::Deserialization { message, body: _ } => {
                CoreError::Deserialization { message }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn http_error_keeps_status() {
        let err = CoreError::from(marsly_api::Error::Http {
            status: 502,
            body: "bad gateway".into(),
        });
        assert!(matches!(
            err,
            CoreError::Api {
                status: Some(502),
                ..
            }
        ));
        assert_eq!(err.to_string(), "API error: HTTP 502: bad gateway");
    }

    #[test]
    fn deserialization_drops_body() {
        let err = CoreError::from(marsly_api::Error::Deserialization {
            message: "expected a sequence".into(),
            body: "{}".into(),
        });
        assert_eq!(
            err.to_string(),
            "Unexpected response from listings API: expected a sequence"
        );
    }

    #[test]
    fn tls_setup_failure_is_config_error() {
        let err = CoreError::from(marsly_api::Error::Tls(
            "failed to read CA cert /etc/marsly/ca.pem: No such file or directory".into(),
        ));
        assert!(matches!(err, CoreError::Config { .. }));
        assert_eq!(
            err.to_string(),
            "Configuration error: HTTP client setup failed: \
             failed to read CA cert /etc/marsly/ca.pem: No such file or directory"
        );
    }

    #[test]
    fn invalid_url_is_config_error() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err = CoreError::from(marsly_api::Error::InvalidUrl(parse_err));
        assert!(matches!(err, CoreError::Config { .. }));
    }
}
