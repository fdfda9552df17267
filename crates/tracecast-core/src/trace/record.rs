//! Trace data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arguments of a tool call, keyed by parameter name
pub type ToolParams = Map<String, Value>;

/// Author of a recorded message
///
/// Tool results are folded into assistant messages, so there is no tool role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Human input
    User,
    /// Model reply or synthesized tool summary
    Assistant,
}

impl MessageRole {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who authored the message
    pub role: MessageRole,
    /// Text payload
    pub content: String,
    /// When the message was appended
    pub timestamp: DateTime<Utc>,
}

/// Record of one tool invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolExecution {
    /// Name of the invoked tool
    pub tool_name: String,
    /// Arguments exactly as requested by the model
    pub input_params: ToolParams,
    /// Tool output, or the error text when the call failed
    pub output: String,
    /// When the tool finished
    pub timestamp: DateTime<Utc>,
}

/// Immutable snapshot of a session
///
/// The serde form of this struct is the storage document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Identifier generated when the snapshot was taken
    pub conversation_id: String,
    /// Messages in conversation order
    pub messages: Vec<Message>,
    /// Tool executions in execution order
    pub tool_executions: Vec<ToolExecution>,
    /// When the recorder was created
    pub start_time: DateTime<Utc>,
    /// When the snapshot was taken
    pub end_time: DateTime<Utc>,
}

impl Trace {
    /// Time covered by the snapshot
    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn tool_execution_count(&self) -> usize {
        self.tool_executions.len()
    }

    /// Serialize into the storage document form
    pub fn to_document(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Rebuild a trace from its storage document form
    pub fn from_document(document: Value) -> serde_json::Result<Self> {
        serde_json::from_value(document)
    }
}
