//! Tracecast CLI application
//!
//! Runs an interactive weather conversation, records every message and tool
//! execution, and stores the resulting trace when the session ends.
//!
//! Configuration comes from a `.env` file and the environment; see
//! `tracecast --help` for the flags that override it. Set `RUST_LOG=debug`
//! (or pass `-v`) for diagnostic logging on stderr.

mod args;
mod commands;
mod console;
mod router;

use clap::Parser;
use tracecast_core::TracecastError;
use tracing_subscriber::EnvFilter;

use args::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    if let Err(err) = router::route(cli).await {
        let console = console::CliConsole::new(false);
        console.error(&format!("{:#}", err));
        if let Some(suggestion) = err
            .downcast_ref::<TracecastError>()
            .and_then(TracecastError::suggestion)
        {
            console.warn(suggestion);
        }
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout belongs to the conversation
fn init_logging(verbose: bool, json: bool) {
    let default_directives = if verbose {
        "tracecast=debug,tracecast_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
