//! Tool registry and dispatch

use super::arguments::parse_arguments;
use super::tool::Tool;
use super::types::{ToolError, ToolSchema};
use crate::error::{TracecastError, TracecastResult};
use crate::llm::ToolCall;
use crate::trace::ToolParams;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Result of dispatching one tool call
///
/// Failures are data: `output` then holds the error text.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutcome {
    /// Name the model asked for
    pub tool_name: String,
    /// Parsed arguments, empty when parsing failed
    pub input_params: ToolParams,
    /// Tool output or error text
    pub output: String,
    /// Sentence to fold into the assistant message
    pub summary: String,
    pub success: bool,
}

/// Registered tools, in registration order
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool; names must be unique
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> TracecastResult<()> {
        if self.get(tool.name()).is_some() {
            return Err(TracecastError::tool(
                tool.name(),
                "a tool with this name is already registered",
            ));
        }
        self.tools.push(tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Schemas for the completion request
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    /// Parse, execute and summarize one call; never fails
    #[instrument(skip(self, call), fields(tool = %call.name, call_id = %call.id))]
    pub async fn dispatch(&self, call: &ToolCall) -> ToolOutcome {
        let Some(tool) = self.get(&call.name) else {
            warn!("model requested an unknown tool");
            return failure(
                &call.name,
                ToolParams::new(),
                ToolError::NotFound(call.name.clone()),
            );
        };

        let params = match parse_arguments(&call.name, &call.arguments) {
            Ok(params) => params,
            Err(err) => {
                warn!(error = %err, "rejected tool arguments");
                return failure(&call.name, ToolParams::new(), err);
            }
        };

        match tool.execute(&params).await {
            Ok(output) => {
                info!("tool call succeeded");
                ToolOutcome {
                    tool_name: call.name.clone(),
                    summary: tool.summarize(&output),
                    input_params: params,
                    output,
                    success: true,
                }
            }
            Err(err) => {
                warn!(error = %err, "tool call failed");
                failure(&call.name, params, err)
            }
        }
    }
}

fn failure(tool_name: &str, input_params: ToolParams, err: ToolError) -> ToolOutcome {
    let output = err.to_string();
    ToolOutcome {
        tool_name: tool_name.to_string(),
        input_params,
        summary: format!("I couldn't complete the {} request: {}", tool_name, output),
        output,
        success: false,
    }
}
