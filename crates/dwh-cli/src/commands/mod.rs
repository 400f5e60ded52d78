//! Command handlers for the `dwh` CLI.

pub mod config_cmd;
pub mod relays;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::Relays(args) => relays::handle(args, global).await,
        Command::Config(args) => config_cmd::handle(args, global),
    }
}
