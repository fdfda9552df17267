//! Chat request and response types

use crate::trace::{Message, MessageRole};
use serde::{Deserialize, Serialize};

/// A `{role, content}` pair sent to the completion service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}

/// A tool invocation requested by the model
///
/// `arguments` is the raw payload produced by the model. It is untrusted and
/// only ever parsed as strict JSON by the tool registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call id
    pub id: String,
    /// Requested tool name
    pub name: String,
    /// Serialized arguments, as received
    pub arguments: String,
}

impl ToolCall {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: arguments.into(),
        }
    }
}

/// Reply from the completion service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Plain text reply, absent when the model only requested tools
    pub content: Option<String>,
    /// Requested tool invocations, in the order the model listed them
    pub tool_calls: Vec<ToolCall>,
    /// Model that produced the reply
    pub model: Option<String>,
    /// Finish reason reported by the provider
    pub finish_reason: Option<String>,
}

impl ChatResponse {
    /// Plain text reply without tool calls
    pub fn text<S: Into<String>>(content: S) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Reply that only requests tool invocations
    pub fn with_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls,
            ..Self::default()
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}
