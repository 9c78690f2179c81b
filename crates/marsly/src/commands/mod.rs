//! Command dispatch: bridges CLI args -> listing store -> output formatting.

pub mod config_cmd;
pub mod list;
pub mod show;
pub mod util;
pub mod watch;

use std::sync::Arc;

use marsly_core::ListingSource;

use crate::cli::{Command, GlobalOpts, OutputFormat};
use crate::config::Config;
use crate::error::CliError;

/// Everything a listing command needs besides its own arguments.
pub struct Session {
    pub source: Arc<dyn ListingSource>,
    pub config: Config,
    pub format: OutputFormat,
    pub color: bool,
}

/// Dispatch a listing command to the appropriate handler.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => list::handle(session, args, global).await,
        Command::Show(args) => show::handle(session, args, global).await,
        Command::Watch(args) => watch::handle(session, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
