//! Stored trace inspection

use crate::args::{Cli, TracesAction};
use anyhow::{Context, bail};
use reqwest::Client;
use tracecast_core::TraceStore;
use tracecast_core::config::load_from_env;

pub async fn run(cli: &Cli, action: TracesAction) -> anyhow::Result<()> {
    let config = load_from_env(&cli.overrides())?;
    let store = config
        .store
        .open(Client::new())
        .await
        .context("Failed to open trace store")?;

    let output = execute(store.as_ref(), action).await?;
    print!("{}", output);
    Ok(())
}

/// Run the action, then close the store; a close failure is only logged
async fn execute(store: &dyn TraceStore, action: TracesAction) -> anyhow::Result<String> {
    let result = match action {
        TracesAction::List => list(store).await,
        TracesAction::Show { id } => show(store, &id).await,
    };
    if let Err(err) = store.close().await {
        tracing::warn!(error = %err, "failed to close trace store");
    }
    result
}

async fn list(store: &dyn TraceStore) -> anyhow::Result<String> {
    let ids = store.list_ids().await?;
    if ids.is_empty() {
        eprintln!("No traces stored yet");
    }
    Ok(ids.iter().map(|id| format!("{}\n", id)).collect())
}

async fn show(store: &dyn TraceStore, id: &str) -> anyhow::Result<String> {
    let Some(trace) = store.find_one(id).await? else {
        bail!("No trace with conversation id {}", id);
    };
    Ok(format!(
        "{}\n",
        serde_json::to_string_pretty(&trace.to_document()?)?
    ))
}
