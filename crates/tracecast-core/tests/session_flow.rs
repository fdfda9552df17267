//! End-to-end session tests against a mocked completion endpoint

use reqwest::Client;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use tracecast_core::config::{ConfigOverrides, keys, load_from_lookup};
use tracecast_core::{Agent, OpenAiProvider, StoreBackend, ToolRegistry, run_and_persist};
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Route library logs to the test output; `RUST_LOG` selects the level
fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn tool_call_reply(arguments: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "finish_reason": "tool_calls",
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": "weather_lookup", "arguments": arguments}
                }]
            }
        }]
    })
}

fn text_reply(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-2",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "finish_reason": "stop",
            "message": {"role": "assistant", "content": content}
        }]
    })
}

fn file_store_env(server: &MockServer, dir: &TempDir) -> HashMap<String, String> {
    [
        (keys::OPENAI_API_KEY, "sk-test".to_string()),
        (keys::OPENAI_BASE_URL, server.uri()),
        (keys::WEATHER_API_KEY, "wx-test".to_string()),
        (keys::STORE_BACKEND, "file".to_string()),
        (keys::STORE_DATABASE, "AgentTrace".to_string()),
        (keys::STORE_COLLECTION, "Runs".to_string()),
        (keys::STORE_DIR, dir.path().display().to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

#[tokio::test]
async fn test_weather_session_is_persisted_to_file_store() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(tool_call_reply(r#"{"location": "Berlin"}"#)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("You're welcome!")))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let env = file_store_env(&server, &dir);
    let config = load_from_lookup(|k| env.get(k).cloned(), &ConfigOverrides::default()).unwrap();
    assert_eq!(config.store.backend, StoreBackend::File);

    let http = Client::new();
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(config.weather_tool(http.clone()))).unwrap();
    let provider = OpenAiProvider::new(config.openai.clone(), http.clone());
    let mut agent = Agent::new(Arc::new(provider), tools);
    let store = config.store.open(http).await.unwrap();

    let mut output = Vec::new();
    let stored = run_and_persist(
        &mut agent,
        store.as_ref(),
        "What's the weather in Berlin?\nthanks\nquit\n".as_bytes(),
        &mut output,
    )
    .await
    .unwrap();

    let transcript = String::from_utf8(output).unwrap();
    assert!(transcript.contains("Agent: I looked up the weather: Sunny, 72°F in Berlin\n"));
    assert!(transcript.contains("Agent: You're welcome!\n"));

    let trace = &stored.trace;
    assert_eq!(trace.messages.len(), 4);
    assert_eq!(trace.tool_executions.len(), 1);
    assert_eq!(trace.tool_executions[0].output, "Sunny, 72°F in Berlin");

    let document_path = dir
        .path()
        .join("AgentTrace")
        .join("Runs")
        .join(format!("{}.json", trace.conversation_id));
    assert!(document_path.exists());

    // The store was closed after the insert.
    assert!(store.list_ids().await.is_err());

    let reopened = config.store.open(Client::new()).await.unwrap();
    let loaded = reopened.find_one(&trace.conversation_id).await.unwrap();
    assert_eq!(loaded.as_ref(), Some(trace));
}

#[tokio::test]
async fn test_unparseable_arguments_do_not_end_the_session() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tool_call_reply("{'location': open('/etc/passwd').read()}")),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("Sorry about that.")))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let env = file_store_env(&server, &dir);
    let config = load_from_lookup(|k| env.get(k).cloned(), &ConfigOverrides::default()).unwrap();

    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(config.weather_tool(Client::new()))).unwrap();
    let provider = OpenAiProvider::new(config.openai.clone(), Client::new());
    let mut agent = Agent::new(Arc::new(provider), tools);
    let store = config.store.open(Client::new()).await.unwrap();

    let stored = run_and_persist(
        &mut agent,
        store.as_ref(),
        "weather?\nhello again\n".as_bytes(),
        &mut Vec::new(),
    )
    .await
    .unwrap();

    let execution = &stored.trace.tool_executions[0];
    assert!(execution.input_params.is_empty());
    assert!(execution.output.starts_with("Invalid arguments for weather_lookup"));
    assert_eq!(stored.trace.messages.len(), 4);
    assert_eq!(stored.trace.messages[3].content, "Sorry about that.");
}
