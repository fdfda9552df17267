//! Session-scoped trace recorder

use super::record::{Message, MessageRole, ToolExecution, ToolParams, Trace};
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Append-only log of one session's messages and tool executions
///
/// Each session owns its recorder; nothing is shared between sessions.
#[derive(Debug, Clone)]
pub struct TraceRecorder {
    messages: Vec<Message>,
    tool_executions: Vec<ToolExecution>,
    start_time: DateTime<Utc>,
}

impl TraceRecorder {
    /// Start a new session log
    pub fn new() -> Self {
        Self::with_start_time(Utc::now())
    }

    /// Start a session log with an explicit start time
    pub fn with_start_time(start_time: DateTime<Utc>) -> Self {
        Self {
            messages: Vec::new(),
            tool_executions: Vec::new(),
            start_time,
        }
    }

    /// Append a user message
    pub fn record_user_message(&mut self, text: impl Into<String>) {
        self.push_message(MessageRole::User, text.into());
    }

    /// Append an assistant message
    pub fn record_assistant_message(&mut self, text: impl Into<String>) {
        self.push_message(MessageRole::Assistant, text.into());
    }

    /// Append a tool execution and hand the output back to the caller
    pub fn record_tool_execution(
        &mut self,
        tool_name: impl Into<String>,
        input_params: ToolParams,
        output: impl Into<String>,
    ) -> String {
        let timestamp = monotonic_now(self.tool_executions.last().map(|t| t.timestamp));
        let execution = ToolExecution {
            tool_name: tool_name.into(),
            input_params,
            output: output.into(),
            timestamp,
        };
        debug!(
            tool_name = %execution.tool_name,
            index = self.tool_executions.len(),
            "recorded tool execution"
        );
        let output = execution.output.clone();
        self.tool_executions.push(execution);
        output
    }

    /// Copy the current state into an immutable trace
    pub fn snapshot(&self) -> Trace {
        let end_time = Utc::now().max(self.start_time);
        let trace = Trace {
            conversation_id: uuid::Uuid::new_v4().to_string(),
            messages: self.messages.clone(),
            tool_executions: self.tool_executions.clone(),
            start_time: self.start_time,
            end_time,
        };
        info!(
            conversation_id = %trace.conversation_id,
            messages = trace.messages.len(),
            tool_executions = trace.tool_executions.len(),
            "trace snapshot taken"
        );
        trace
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn tool_executions(&self) -> &[ToolExecution] {
        &self.tool_executions
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Content of the most recent message, if any
    pub fn last_message_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }

    fn push_message(&mut self, role: MessageRole, content: String) {
        let timestamp = monotonic_now(self.messages.last().map(|m| m.timestamp));
        debug!(%role, index = self.messages.len(), "recorded message");
        self.messages.push(Message {
            role,
            content,
            timestamp,
        });
    }
}

impl Default for TraceRecorder {
    fn default() -> Self {
        Self::new()
    }
}

// Wall clock, clamped so a log never goes backwards in time.
fn monotonic_now(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(previous) if previous > now => previous,
        _ => now,
    }
}
