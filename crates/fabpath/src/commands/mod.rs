//! Command dispatch: bridges CLI args -> core pipeline -> output formatting.

pub mod bindings;
pub mod bogus;
pub mod config_cmd;
pub mod dump;
pub mod interfaces;
pub mod report;
pub mod selectors;
pub mod util;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

use util::DataSource;

/// Dispatch a data-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    source: &DataSource,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    match cmd {
        Command::Report(args) => report::handle(source, &args, global, cfg).await,
        Command::Bindings(args) => bindings::handle(source, &args, global).await,
        Command::Interfaces(args) => interfaces::handle(source, &args, global).await,
        Command::Selectors => selectors::handle(source, global).await,
        Command::Bogus => bogus::handle(source, global).await,
        Command::Dump(args) => dump::handle(source, &args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
