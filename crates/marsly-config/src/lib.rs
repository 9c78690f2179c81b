//! Configuration for the marsly CLI.
//!
//! TOML file + environment layering, validation, and translation to
//! `marsly_api::TransportConfig` and `marsly_core::StoreConfig`. The core
//! never reads files; the binary loads a [`Config`] here and hands the
//! translated pieces in.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use marsly_api::{DEFAULT_BASE_URL, TlsMode, TransportConfig};
use marsly_core::{FetchOrdering, FilterKind, StoreConfig};

/// Prefix for environment overrides, e.g. `MARSLY_API__BASE_URL`.
pub const ENV_PREFIX: &str = "MARSLY_";

/// Output formats accepted in `defaults.output`.
pub const OUTPUT_FORMATS: &[&str] = &["table", "json", "json-compact", "yaml", "plain"];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub defaults: Defaults,
}

/// Where and how to reach the listings API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Override the `User-Agent` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Extra CA certificate (PEM) to trust.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: None,
            ca_cert: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub default_filter: FilterKind,

    #[serde(default)]
    pub ordering: FetchOrdering,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    /// Seconds between refetches in `marsly watch`.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            refresh_interval: default_refresh_interval(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_timeout() -> u64 {
    30
}
fn default_output() -> String {
    "table".into()
}
fn default_refresh_interval() -> u64 {
    30
}

// ── Translation ─────────────────────────────────────────────────────

impl Config {
    /// Check every field that would otherwise fail later at use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;

        if self.api.timeout == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        if !OUTPUT_FORMATS.contains(&self.defaults.output.as_str()) {
            return Err(ConfigError::Validation {
                field: "defaults.output".into(),
                reason: format!(
                    "expected one of {}, got '{}'",
                    OUTPUT_FORMATS.join(", "),
                    self.defaults.output
                ),
            });
        }

        if self.defaults.refresh_interval == 0 {
            return Err(ConfigError::Validation {
                field: "defaults.refresh_interval".into(),
                reason: "must be at least 1 second".into(),
            });
        }

        Ok(())
    }

    /// The API base URL; only `http` and `https` are accepted.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let url: Url = self
            .api
            .base_url
            .parse()
            .map_err(|e| ConfigError::Validation {
                field: "api.base_url".into(),
                reason: format!("invalid URL '{}': {e}", self.api.base_url),
            })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::Validation {
                field: "api.base_url".into(),
                reason: format!("unsupported scheme '{other}'"),
            }),
        }
    }

    pub fn transport_config(&self) -> TransportConfig {
        let mut transport =
            TransportConfig::default().with_timeout(Duration::from_secs(self.api.timeout));
        if let Some(ref agent) = self.api.user_agent {
            transport.user_agent.clone_from(agent);
        }
        if let Some(ref ca) = self.api.ca_cert {
            transport.tls = TlsMode::CustomCa(ca.clone());
        }
        transport
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            default_filter: self.store.default_filter,
            ordering: self.store.ordering,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "marsly", "marsly").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("marsly");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// The provider stack: defaults, then the TOML file, then `MARSLY_*` env.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load the Config from `path` + environment.
///
/// A missing file is not an error; defaults apply. Values are not
/// validated here so callers can layer overrides first and then call
/// [`Config::validate`].
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    Ok(figment(path).extract()?)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
