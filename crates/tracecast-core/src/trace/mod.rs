//! Trace recording
//!
//! A [`TraceRecorder`] owns the message log and the tool execution log of one
//! session. [`TraceRecorder::snapshot`] copies both into an immutable
//! [`Trace`], which is what gets handed to a trace store.

pub mod record;
pub mod recorder;

pub use record::{Message, MessageRole, ToolExecution, ToolParams, Trace};
pub use recorder::TraceRecorder;
