//! Completion service trait

use super::messages::{ChatMessage, ChatResponse};
use crate::error::TracecastResult;
use crate::tools::ToolSchema;
use async_trait::async_trait;

/// Remote model endpoint producing replies and tool requests
///
/// Implementations send every message in order together with the declared
/// tool schemas and let the model choose tools automatically.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Provider name used in logs and errors
    fn provider_name(&self) -> &str;

    /// Request one completion
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSchema],
    ) -> TracecastResult<ChatResponse>;
}
