//! OpenAI provider implementation

use super::messages::{ChatMessage, ChatResponse};
use super::parser::ResponseParser;
use super::provider::CompletionService;
use crate::error::{TracecastError, TracecastResult};
use crate::tools::ToolSchema;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::instrument;

/// Default OpenAI API base URL
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub organization: Option<String>,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            organization: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sent as the `OpenAI-Organization` header
    pub fn with_organization(mut self, organization: Option<String>) -> Self {
        self.organization = organization;
        self
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

/// OpenAI provider handler
pub struct OpenAiProvider {
    config: OpenAiConfig,
    http_client: Client,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider
    pub fn new(config: OpenAiConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn request_body(&self, messages: &[ChatMessage], tools: &[ToolSchema]) -> Value {
        let mut request_body = json!({
            "model": self.config.model,
            "messages": messages
                .iter()
                .map(|m| json!({"role": m.role.as_str(), "content": m.content}))
                .collect::<Vec<_>>(),
        });

        if !tools.is_empty() {
            request_body["tools"] =
                json!(tools.iter().map(ToolSchema::to_openai).collect::<Vec<_>>());
            request_body["tool_choice"] = json!("auto");
        }

        request_body
    }
}

#[async_trait]
impl CompletionService for OpenAiProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    /// OpenAI chat completion
    #[instrument(skip(self, messages, tools), fields(model = %self.config.model, messages = messages.len()), level = "debug")]
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSchema],
    ) -> TracecastResult<ChatResponse> {
        let url = self.config.completions_url();
        let request_body = self.request_body(messages, tools);

        let mut request = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body);

        if let Some(org) = &self.config.organization {
            request = request.header("OpenAI-Organization", org);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TracecastError::llm_with_status(
                format!("OpenAI API error (status {}): {}", status, error_text),
                self.provider_name(),
                status.as_u16(),
            ));
        }

        let response_json: Value = response.json().await.map_err(|e| {
            TracecastError::llm(format!("Failed to parse OpenAI response: {}", e))
        })?;

        let parsed = ResponseParser::parse_openai(response_json)?;
        tracing::debug!(
            tool_calls = parsed.tool_calls.len(),
            finish_reason = ?parsed.finish_reason,
            "completion received"
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{Tool, WeatherLookup};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_test_provider(base_url: &str) -> OpenAiProvider {
        let config = OpenAiConfig::new("test-api-key").with_base_url(base_url);
        let http_client = Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to create HTTP client");
        OpenAiProvider::new(config, http_client)
    }

    #[tokio::test]
    async fn test_complete_sends_history_tools_and_auto_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "user", "content": "hi"},
                    {"role": "assistant", "content": "hello"},
                    {"role": "user", "content": "weather in Austin?"}
                ],
                "tool_choice": "auto",
                "tools": [{"type": "function", "function": {"name": "weather_lookup"}}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "gpt-4o-mini",
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_abc123",
                            "type": "function",
                            "function": {"name": "weather_lookup", "arguments": "{\"location\":\"Austin\"}"}
                        }]
                    },
                    "finish_reason": "tool_calls"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = create_test_provider(&server.uri());
        let messages = vec![
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
            ChatMessage::user("weather in Austin?"),
        ];
        let tools = vec![WeatherLookup::stub().schema()];

        let response = provider.complete(&messages, &tools).await.unwrap();
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].name, "weather_lookup");
        assert_eq!(response.tool_calls[0].arguments, "{\"location\":\"Austin\"}");
    }

    #[tokio::test]
    async fn test_complete_sends_organization_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("openai-organization", "org-weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "hi"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = OpenAiConfig::new("test-api-key")
            .with_base_url(server.uri())
            .with_organization(Some("org-weather".to_string()));
        let provider = OpenAiProvider::new(config, Client::new());

        let response = provider.complete(&[ChatMessage::user("hi")], &[]).await.unwrap();
        assert_eq!(response.content.as_deref(), Some("hi"));
    }

    #[test]
    fn test_request_without_tools_omits_tool_choice() {
        let provider = create_test_provider("http://unused");
        let body = provider.request_body(&[ChatMessage::user("hi")], &[]);
        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
    }

    #[tokio::test]
    async fn test_complete_maps_http_failure_to_llm_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let provider = create_test_provider(&server.uri());
        let err = provider
            .complete(&[ChatMessage::user("hi")], &[])
            .await
            .unwrap_err();

        match err {
            TracecastError::Llm {
                status_code,
                message,
                ..
            } => {
                assert_eq!(status_code, Some(401));
                assert!(message.contains("invalid api key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
