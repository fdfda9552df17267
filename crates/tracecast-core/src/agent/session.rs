//! Interactive session driver

use super::conversation::Agent;
use crate::error::{TracecastError, TracecastResult};
use crate::storage::TraceStore;
use crate::trace::Trace;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, instrument, warn};

const EXIT_COMMANDS: [&str; 3] = ["quit", "exit", "bye"];

/// A trace that reached the store
#[derive(Debug, Clone)]
pub struct StoredTrace {
    pub trace: Trace,
    /// Id reported by the store
    pub stored_id: String,
}

/// Failure of [`run_and_persist`]
///
/// `trace` is set when the session finished but the store rejected it, so
/// the caller can still save or print it.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct PersistError {
    pub trace: Option<Trace>,
    pub source: TracecastError,
}

/// `quit`, `exit` or `bye`, in any case
pub fn is_exit_command(line: &str) -> bool {
    let lowered = line.to_lowercase();
    EXIT_COMMANDS.contains(&lowered.as_str())
}

/// Drive a session until an exit command or end of input
///
/// Each turn prints `You: `, reads one line and prints `Agent: <reply>`.
pub async fn run_session<R, W>(agent: &mut Agent, input: R, output: &mut W) -> TracecastResult<Trace>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    loop {
        output.write_all(b"You: ").await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            info!("input closed");
            break;
        };
        if is_exit_command(&line) {
            info!("exit command received");
            break;
        }

        let reply = agent.chat(&line).await?;
        output
            .write_all(format!("Agent: {}\n", reply).as_bytes())
            .await?;
    }
    output.flush().await?;
    Ok(agent.trace())
}

/// Run a session and store its trace
///
/// The store is closed exactly once, whatever happens.
#[instrument(skip_all, fields(backend = %store.backend_name()))]
pub async fn run_and_persist<R, W>(
    agent: &mut Agent,
    store: &dyn TraceStore,
    input: R,
    output: &mut W,
) -> Result<StoredTrace, PersistError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let result = match run_session(agent, input, output).await {
        Ok(trace) => match store.insert_one(&trace).await {
            Ok(stored_id) => Ok(StoredTrace { trace, stored_id }),
            Err(source) => Err(PersistError {
                trace: Some(trace),
                source,
            }),
        },
        Err(source) => Err(PersistError {
            trace: None,
            source,
        }),
    };

    let closed = store.close().await;
    match (result, closed) {
        (Ok(stored), Ok(())) => {
            info!(stored_id = %stored.stored_id, "trace persisted");
            Ok(stored)
        }
        (Ok(stored), Err(source)) => Err(PersistError {
            trace: Some(stored.trace),
            source,
        }),
        (Err(err), closed) => {
            if let Err(close_err) = closed {
                warn!(error = %close_err, "failed to close trace store");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::test_support::{ScriptedModel, weather_call};
    use crate::llm::ChatResponse;
    use crate::storage::MemoryTraceStore;
    use crate::tools::{ToolRegistry, WeatherLookup};
    use crate::trace::MessageRole;
    use std::sync::Arc;

    fn agent_with(model: ScriptedModel) -> Agent {
        let mut tools = ToolRegistry::new();
        tools.register(Arc::new(WeatherLookup::stub())).unwrap();
        Agent::new(Arc::new(model), tools)
    }

    #[test]
    fn test_exit_commands() {
        for line in ["quit", "EXIT", "Bye", "qUiT"] {
            assert!(is_exit_command(line), "{line}");
        }
        for line in ["", "quit now", "goodbye", " bye"] {
            assert!(!is_exit_command(line), "{line}");
        }
    }

    #[tokio::test]
    async fn test_plain_turns_alternate() {
        let mut agent = agent_with(ScriptedModel::texts(&["a1", "a2", "a3"]));
        let mut output = Vec::new();

        let trace = run_session(&mut agent, "u1\nu2\r\nu3\nquit\n".as_bytes(), &mut output)
            .await
            .unwrap();

        assert_eq!(trace.messages.len(), 6);
        for (i, message) in trace.messages.iter().enumerate() {
            let expected = if i % 2 == 0 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            assert_eq!(message.role, expected);
        }
        assert_eq!(trace.messages[2].content, "u2");
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "You: Agent: a1\nYou: Agent: a2\nYou: Agent: a3\nYou: "
        );
    }

    #[tokio::test]
    async fn test_immediate_exit_yields_empty_trace() {
        let model = ScriptedModel::texts(&[]);
        let mut agent = agent_with(model);

        let trace = run_session(&mut agent, "BYE\n".as_bytes(), &mut Vec::new())
            .await
            .unwrap();

        assert!(trace.messages.is_empty());
        assert!(trace.tool_executions.is_empty());
        assert!(trace.end_time >= trace.start_time);
    }

    #[tokio::test]
    async fn test_end_of_input_stops_session() {
        let mut agent = agent_with(ScriptedModel::texts(&["hi"]));
        let trace = run_session(&mut agent, "hello".as_bytes(), &mut Vec::new())
            .await
            .unwrap();
        assert_eq!(trace.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_persist_success_closes_once() {
        let model = ScriptedModel::new(vec![Ok(ChatResponse::with_tool_calls(vec![
            weather_call("call_1", r#"{"location": "Rome"}"#),
        ]))]);
        let mut agent = agent_with(model);
        let store = MemoryTraceStore::new();

        let stored = run_and_persist(&mut agent, &store, "weather in Rome\nexit\n".as_bytes(), &mut Vec::new())
            .await
            .unwrap();

        assert_eq!(stored.stored_id, stored.trace.conversation_id);
        assert_eq!(store.traces(), vec![stored.trace.clone()]);
        assert_eq!(stored.trace.tool_executions.len(), 1);
        assert_eq!(store.close_calls(), 1);
    }

    #[tokio::test]
    async fn test_chat_error_still_closes_once() {
        let model = ScriptedModel::new(vec![Err(TracecastError::llm("connection reset"))]);
        let mut agent = agent_with(model);
        let store = MemoryTraceStore::new();

        let err = run_and_persist(&mut agent, &store, "hello\n".as_bytes(), &mut Vec::new())
            .await
            .unwrap_err();

        assert!(err.trace.is_none());
        assert_eq!(err.source.error_code(), "LLM_ERROR");
        assert!(store.traces().is_empty());
        assert_eq!(store.close_calls(), 1);
    }

    #[tokio::test]
    async fn test_insert_error_keeps_trace_and_closes_once() {
        let mut agent = agent_with(ScriptedModel::texts(&["hi"]));
        let store = MemoryTraceStore::failing();

        let err = run_and_persist(&mut agent, &store, "hello\nquit\n".as_bytes(), &mut Vec::new())
            .await
            .unwrap_err();

        assert_eq!(err.source.error_code(), "STORAGE_ERROR");
        let trace = err.trace.expect("trace should be returned");
        assert_eq!(trace.messages.len(), 2);
        assert_eq!(store.close_calls(), 1);
    }
}
