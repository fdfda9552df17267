//! Tool-related type definitions

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Declaration of a tool as advertised to the completion service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name the model must use
    pub name: String,
    /// What the tool does, for the model
    pub description: String,
    /// JSON Schema of the parameters object
    pub parameters: Value,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// OpenAI `tools[]` entry
    pub fn to_openai(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters
            }
        })
    }
}

/// Error type for tool operations
///
/// Display strings end up verbatim in the recorded tool output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToolError {
    /// Argument payload could not be parsed or lacks a parameter
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    /// No tool registered under that name
    #[error("Unknown tool: {0}")]
    NotFound(String),

    /// The tool ran and failed
    #[error("{0}")]
    ExecutionFailed(String),
}

impl ToolError {
    pub fn invalid_arguments(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            tool: tool.into(),
            message: message.into(),
        }
    }
}
