//! Core Tool trait definition

use super::types::{ToolError, ToolSchema};
use crate::trace::ToolParams;
use async_trait::async_trait;
use serde_json::Value;

/// Base trait for all tools
///
/// A tool is a function of named parameters to a textual result.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name, used both in the model schema and in the trace
    fn name(&self) -> &str;

    /// Description for the model
    fn description(&self) -> &str;

    /// JSON Schema of the parameters object
    fn parameters(&self) -> Value;

    /// Schema advertised to the completion service
    fn schema(&self) -> ToolSchema {
        ToolSchema::new(self.name(), self.description(), self.parameters())
    }

    /// Run the tool
    async fn execute(&self, params: &ToolParams) -> Result<String, ToolError>;

    /// Sentence recorded as the assistant message after a successful call
    fn summarize(&self, output: &str) -> String {
        format!("{} returned: {}", self.name(), output)
    }
}
