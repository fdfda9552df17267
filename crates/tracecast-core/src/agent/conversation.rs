//! Single-session conversation agent

use crate::error::TracecastResult;
use crate::llm::{ChatMessage, CompletionService};
use crate::tools::{ToolRegistry, ToolSchema};
use crate::trace::{Trace, TraceRecorder};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Conversation agent owning the trace of one session
pub struct Agent {
    model: Arc<dyn CompletionService>,
    tools: ToolRegistry,
    tool_schemas: Vec<ToolSchema>,
    recorder: TraceRecorder,
}

impl Agent {
    pub fn new(model: Arc<dyn CompletionService>, tools: ToolRegistry) -> Self {
        Self::with_recorder(model, tools, TraceRecorder::new())
    }

    /// Start from an existing recorder, e.g. one with a fixed start time
    pub fn with_recorder(
        model: Arc<dyn CompletionService>,
        tools: ToolRegistry,
        recorder: TraceRecorder,
    ) -> Self {
        let tool_schemas = tools.schemas();
        Self {
            model,
            tools,
            tool_schemas,
            recorder,
        }
    }

    /// Run one turn and return the assistant reply
    ///
    /// Tool calls are dispatched in order, each recorded as a tool execution,
    /// and their summaries become a single assistant message. Completion
    /// errors propagate; the user message stays recorded.
    #[instrument(skip_all, fields(provider = %self.model.provider_name(), turn = self.recorder.messages().len() / 2))]
    pub async fn chat(&mut self, user_input: &str) -> TracecastResult<String> {
        self.recorder.record_user_message(user_input);

        let history: Vec<ChatMessage> = self
            .recorder
            .messages()
            .iter()
            .map(ChatMessage::from)
            .collect();
        let response = self.model.complete(&history, &self.tool_schemas).await?;

        if response.has_tool_calls() {
            debug!(calls = response.tool_calls.len(), "model requested tools");
            let mut summaries = Vec::with_capacity(response.tool_calls.len());
            for call in &response.tool_calls {
                let outcome = self.tools.dispatch(call).await;
                summaries.push(outcome.summary);
                self.recorder.record_tool_execution(
                    outcome.tool_name,
                    outcome.input_params,
                    outcome.output,
                );
            }
            self.recorder.record_assistant_message(summaries.join("\n"));
        } else {
            self.recorder
                .record_assistant_message(response.content.unwrap_or_default());
        }

        Ok(self
            .recorder
            .last_message_content()
            .unwrap_or_default()
            .to_string())
    }

    /// Snapshot of everything recorded so far
    pub fn trace(&self) -> Trace {
        self.recorder.snapshot()
    }

    pub fn recorder(&self) -> &TraceRecorder {
        &self.recorder
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }
}
