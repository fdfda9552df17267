//! Trace store trait definition

use crate::error::{TracecastError, TracecastResult};
use crate::trace::Trace;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};

/// Trait for trace storage backends
///
/// A store is opened before a session and closed once after it. Every
/// operation on a closed store fails with a storage error.
#[async_trait]
pub trait TraceStore: Send + Sync {
    /// Short backend name for logs
    fn backend_name(&self) -> &str;

    /// Persist one trace as a single document, returning the stored id
    async fn insert_one(&self, trace: &Trace) -> TracecastResult<String>;

    /// Load a trace by conversation id
    async fn find_one(&self, conversation_id: &str) -> TracecastResult<Option<Trace>>;

    /// Conversation ids of all stored traces
    async fn list_ids(&self) -> TracecastResult<Vec<String>>;

    /// Release the connection
    async fn close(&self) -> TracecastResult<()>;
}

/// Open/closed flag shared by the backends
#[derive(Debug, Default)]
pub(crate) struct ConnectionState {
    closed: AtomicBool,
}

impl ConnectionState {
    pub(crate) fn ensure_open(&self, backend: &str) -> TracecastResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            Err(TracecastError::storage(format!(
                "{} trace store connection is closed",
                backend
            )))
        } else {
            Ok(())
        }
    }

    /// Mark closed; returns false when it already was
    pub(crate) fn close(&self) -> bool {
        !self.closed.swap(true, Ordering::SeqCst)
    }
}
