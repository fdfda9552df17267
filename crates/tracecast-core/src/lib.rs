//! Tracecast Core Library
//!
//! A conversational weather agent that records every message and tool
//! execution of a session into a trace, then hands the trace to a document
//! store.

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod storage;
pub mod tools;
pub mod trace;

// Re-export commonly used types
pub use agent::{Agent, PersistError, StoredTrace, run_and_persist, run_session};
pub use config::{AppConfig, ConfigOverrides, StoreBackend, WeatherMode};
pub use error::{TracecastError, TracecastResult};
pub use llm::{ChatMessage, ChatResponse, CompletionService, OpenAiConfig, OpenAiProvider, ToolCall};
pub use storage::{FileTraceStore, HttpTraceStore, MemoryTraceStore, TraceStore};
pub use tools::{Tool, ToolRegistry, WeatherLookup};
pub use trace::{Message, MessageRole, ToolExecution, Trace, TraceRecorder};
