//! Completion service client
//!
//! [`CompletionService`] is the seam the agent talks to. [`OpenAiProvider`]
//! implements it against an OpenAI-compatible `/chat/completions` endpoint.

pub mod messages;
pub mod openai;
pub mod parser;
pub mod provider;

pub use messages::{ChatMessage, ChatResponse, ToolCall};
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use parser::ResponseParser;
pub use provider::CompletionService;
