//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use marsly_config::ConfigError;
use marsly_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const FETCH: i32 = 9;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Fetch ────────────────────────────────────────────────────────
    #[error("Fetching {filter} listings from {url} failed")]
    #[diagnostic(
        code(marsly::fetch_failed),
        help("The warning above carries the underlying error; check --api-url and your network.")
    )]
    FetchFailed { filter: String, url: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Listing '{id}' not found")]
    #[diagnostic(
        code(marsly::not_found),
        help("Run: marsly list --filter {filter} to see available listings")
    )]
    NotFound { id: String, filter: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(marsly::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Could not set up the HTTP client: {reason}")]
    #[diagnostic(
        code(marsly::client_setup),
        help(
            "Check api.ca_cert and api.user_agent in the file printed by: marsly config path"
        )
    )]
    ClientSetup { reason: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(marsly::config_exists),
        help("Pass --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(marsly::config),
        help("Check the file printed by: marsly config path")
    )]
    Config(ConfigError),

    // ── Serialization ────────────────────────────────────────────────
    #[error("Failed to render output: {0}")]
    #[diagnostic(code(marsly::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FetchFailed { .. } => exit_code::FETCH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ConfigExists { .. } | Self::ClientSetup { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

/// Fetch failures never surface as `CoreError` here: the store absorbs them
/// into its status and commands report `FetchFailed`. What remains is a
/// client that could not be built.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let reason = match err {
            CoreError::Config { message } => message,
            other => other.to_string(),
        };
        Self::ClientSetup { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_kind() {
        let fetch = CliError::FetchFailed {
            filter: "rent".into(),
            url: "https://mars.udacity.com/".into(),
        };
        assert_eq!(fetch.exit_code(), exit_code::FETCH);

        let missing = CliError::NotFound {
            id: "1".into(),
            filter: "all".into(),
        };
        assert_eq!(missing.exit_code(), exit_code::NOT_FOUND);

        let setup: CliError = CoreError::Config {
            message: "HTTP client setup failed: invalid CA cert /tmp/ca.pem".into(),
        }
        .into();
        assert_eq!(setup.exit_code(), exit_code::USAGE);
        assert_eq!(
            setup.to_string(),
            "Could not set up the HTTP client: HTTP client setup failed: invalid CA cert /tmp/ca.pem"
        );
    }

    #[test]
    fn config_validation_becomes_usage_error() {
        let err: CliError = ConfigError::Validation {
            field: "api.timeout".into(),
            reason: "must be at least 1 second".into(),
        }
        .into();
        assert!(matches!(err, CliError::Validation { .. }));
        assert_eq!(err.exit_code(), exit_code::USAGE);
    }
}
