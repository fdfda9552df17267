//! Response parsing for OpenAI-compatible providers

use super::messages::{ChatResponse, ToolCall};
use crate::error::{TracecastError, TracecastResult};
use serde_json::Value;

/// Response parser
pub struct ResponseParser;

impl ResponseParser {
    /// Parse an OpenAI chat completion body
    ///
    /// Tool call arguments are kept as raw text. Providers that send an
    /// already-decoded object get it re-serialized so the registry sees one
    /// shape.
    pub fn parse_openai(response: Value) -> TracecastResult<ChatResponse> {
        let choice = response["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .ok_or_else(|| TracecastError::llm("No choices in OpenAI response"))?;
        let message = &choice["message"];

        let content = message["content"].as_str().map(|s| s.to_string());

        let mut tool_calls = Vec::new();
        if let Some(calls) = message["tool_calls"].as_array() {
            for call in calls {
                let (name, arguments) = match call["function"].as_object() {
                    Some(function) => {
                        let name = function
                            .get("name")
                            .and_then(|v| v.as_str())
                            .unwrap_or("")
                            .to_string();
                        let arguments = match function.get("arguments") {
                            Some(Value::String(raw)) => raw.clone(),
                            Some(Value::Null) | None => "{}".to_string(),
                            Some(other) => other.to_string(),
                        };
                        (name, arguments)
                    }
                    // Kept so the registry records the rejection.
                    None => {
                        tracing::warn!("tool call without a function block");
                        (String::new(), call["function"].to_string())
                    }
                };
                tool_calls.push(ToolCall {
                    id: call["id"].as_str().unwrap_or("").to_string(),
                    name,
                    arguments,
                });
            }
        }

        Ok(ChatResponse {
            content,
            tool_calls,
            model: response["model"].as_str().map(|s| s.to_string()),
            finish_reason: choice["finish_reason"].as_str().map(|s| s.to_string()),
        })
    }
}
