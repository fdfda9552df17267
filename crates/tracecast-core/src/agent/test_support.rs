//! Scripted completion service for agent tests

use crate::error::{TracecastError, TracecastResult};
use crate::llm::{ChatMessage, ChatResponse, CompletionService, ToolCall};
use crate::tools::ToolSchema;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Replays queued responses and remembers every request
#[derive(Default)]
pub(crate) struct ScriptedModel {
    replies: Mutex<VecDeque<TracecastResult<ChatResponse>>>,
    requests: Mutex<Vec<(Vec<ChatMessage>, Vec<String>)>>,
}

impl ScriptedModel {
    pub(crate) fn new(replies: Vec<TracecastResult<ChatResponse>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::default(),
        }
    }

    pub(crate) fn texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(ChatResponse::text(*t))).collect())
    }

    /// Messages and tool names of each request, in order
    pub(crate) fn requests(&self) -> Vec<(Vec<ChatMessage>, Vec<String>)> {
        self.requests.lock().clone()
    }
}

pub(crate) fn weather_call(id: &str, arguments: &str) -> ToolCall {
    ToolCall::new(id, crate::tools::WEATHER_TOOL_NAME, arguments)
}

#[async_trait]
impl CompletionService for ScriptedModel {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSchema],
    ) -> TracecastResult<ChatResponse> {
        self.requests.lock().push((
            messages.to_vec(),
            tools.iter().map(|t| t.name.clone()).collect(),
        ));
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TracecastError::llm("script exhausted")))
    }
}
