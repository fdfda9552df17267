//! Conversation agent and session driver
//!
//! [`Agent`] runs one turn at a time against a [`CompletionService`] and
//! records everything into its [`TraceRecorder`]. The session functions bind
//! an agent to line-based input and output and hand the final trace to a
//! [`TraceStore`].
//!
//! [`CompletionService`]: crate::llm::CompletionService
//! [`TraceRecorder`]: crate::trace::TraceRecorder
//! [`TraceStore`]: crate::storage::TraceStore

pub mod conversation;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use conversation::Agent;
pub use session::{PersistError, StoredTrace, is_exit_command, run_and_persist, run_session};
