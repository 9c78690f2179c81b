//! CLI configuration, layered on top of `marsly_config`.
//!
//! The shared crate handles defaults, the TOML file, and `MARSLY_*`
//! env vars. This module applies the command-line overrides on top and
//! picks the output format.

use std::path::PathBuf;

use clap::ValueEnum;

pub use marsly_config::Config;
use marsly_core::FetchOrdering;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// The config file in effect: `--config` if given, else the platform path.
pub fn active_config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(marsly_config::config_path)
}

/// Load the file + env layers, apply flag overrides, then validate.
///
/// Validation runs last so a flag can fix a bad file value.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = active_config_path(global);
    let mut cfg = marsly_config::load_config_from(&path)?;

    if let Some(ref url) = global.api_url {
        cfg.api.base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.api.timeout = timeout;
    }
    if global.latest_only {
        cfg.store.ordering = FetchOrdering::LatestRequested;
    }

    cfg.validate()?;
    tracing::debug!(path = %path.display(), base_url = %cfg.api.base_url, "configuration resolved");
    Ok(cfg)
}

/// `--output` wins; otherwise `defaults.output` from the config.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> Result<OutputFormat, CliError> {
    if let Some(ref format) = global.output {
        return Ok(format.clone());
    }
    OutputFormat::from_str(&cfg.defaults.output, true).map_err(|reason| CliError::Validation {
        field: "defaults.output".into(),
        reason,
    })
}
