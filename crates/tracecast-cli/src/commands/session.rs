//! Interactive weather session

use crate::args::Cli;
use crate::console::CliConsole;
use anyhow::Context;
use reqwest::Client;
use std::sync::Arc;
use tokio::io::BufReader;
use tracecast_core::config::load_from_env;
use tracecast_core::{Agent, OpenAiProvider, ToolRegistry, run_and_persist};

/// Run one session on stdin/stdout and store its trace
pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    let console = CliConsole::new(cli.verbose);
    let config = load_from_env(&cli.overrides())?;
    console.info(&format!(
        "model {} | weather {:?} | store {:?}",
        config.openai.model, config.weather_mode, config.store.backend
    ));

    let http_client = Client::new();
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(config.weather_tool(http_client.clone())))?;
    let provider = OpenAiProvider::new(config.openai.clone(), http_client.clone());
    let mut agent = Agent::new(Arc::new(provider), tools);
    console.info(&format!("tools: {}", agent.tools().names().join(", ")));

    let store = config
        .store
        .open(http_client)
        .await
        .context("Failed to open trace store")?;
    tracing::debug!(backend = store.backend_name(), "trace store opened");

    console.print_header("Weather agent (type quit, exit or bye to leave)");
    let input = BufReader::new(tokio::io::stdin());
    let mut output = tokio::io::stdout();

    match run_and_persist(&mut agent, store.as_ref(), input, &mut output).await {
        Ok(stored) => {
            console.success(&format!(
                "Conversation trace stored with ID: {}",
                stored.stored_id
            ));
            let trace = &stored.trace;
            console.info(&format!(
                "{} messages, {} tool executions over {}s",
                trace.message_count(),
                trace.tool_execution_count(),
                trace.duration().num_seconds()
            ));
            Ok(())
        }
        Err(err) => {
            if let Some(trace) = &err.trace {
                console.warn("Trace could not be stored; dumping it to stderr");
                match trace.to_document() {
                    Ok(document) => eprintln!("{}", serde_json::to_string_pretty(&document)?),
                    Err(e) => console.error(&format!("Failed to encode trace: {}", e)),
                }
            }
            Err(err.source).context("Session failed")
        }
    }
}
