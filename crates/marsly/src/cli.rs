//! Clap derive structures for the `marsly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only depends on clap + clap_complete so `build.rs` can include it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// marsly -- browse Mars real-estate listings
#[derive(Debug, Parser)]
#[command(
    name = "marsly",
    version,
    about = "Browse Mars real-estate listings from the command line",
    long_about = "Fetches property listings from the Mars real-estate API,\n\
        filters them by rent or sale, and shows listing details.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Listings API base URL (overrides config)
    #[arg(long, env = "MARSLY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Config file to use instead of the platform default
    #[arg(long, env = "MARSLY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (defaults to the config's `defaults.output`)
    #[arg(long, short = 'o', env = "MARSLY_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "MARSLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Discard results of superseded fetches instead of letting the
    /// last response win
    #[arg(long, global = true)]
    pub latest_only: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Which listings to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    /// Rentals only
    Rent,
    /// Properties for sale only
    Buy,
    /// Everything
    All,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List properties
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show the details of one property
    Show(ShowArgs),

    /// Refetch listings periodically and print every change
    Watch(WatchArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Listing commands ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter by listing type (defaults to the config's `store.default_filter`)
    #[arg(long, short = 'f', value_enum)]
    pub filter: Option<FilterArg>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Listing ID
    pub id: String,

    /// Filter used to fetch the listing set the ID is looked up in
    #[arg(long, short = 'f', value_enum)]
    pub filter: Option<FilterArg>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Filter by listing type
    #[arg(long, short = 'f', value_enum)]
    pub filter: Option<FilterArg>,

    /// Seconds between refetches (defaults to `defaults.refresh_interval`)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,

    /// Exit after this many completed fetches
    #[arg(long, short = 'n')]
    pub count: Option<u32>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Show the effective configuration (file + env + flags)
    Show,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
