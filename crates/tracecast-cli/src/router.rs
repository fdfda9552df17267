//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Traces { action }) => commands::traces::run(&cli, action.clone()).await,
        None => commands::session::run(&cli).await,
    }
}
