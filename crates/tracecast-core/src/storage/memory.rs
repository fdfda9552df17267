//! In-memory trace store

use super::store::{ConnectionState, TraceStore};
use crate::error::{TracecastError, TracecastResult};
use crate::trace::Trace;
use async_trait::async_trait;
use parking_lot::{Mutex, MutexGuard};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Keeps traces in insertion order. Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryTraceStore {
    traces: Mutex<Vec<Trace>>,
    state: ConnectionState,
    close_calls: AtomicUsize,
    fail_inserts: bool,
}

impl MemoryTraceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose inserts always fail, for exercising error paths
    pub fn failing() -> Self {
        Self {
            fail_inserts: true,
            ..Self::default()
        }
    }

    /// Copies of everything stored so far
    pub fn traces(&self) -> Vec<Trace> {
        self.lock().clone()
    }

    /// How many times `close` was called
    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Trace>> {
        self.traces.lock()
    }
}

#[async_trait]
impl TraceStore for MemoryTraceStore {
    fn backend_name(&self) -> &str {
        "memory"
    }

    async fn insert_one(&self, trace: &Trace) -> TracecastResult<String> {
        self.state.ensure_open(self.backend_name())?;
        if self.fail_inserts {
            return Err(TracecastError::storage("memory store rejected the insert"));
        }
        self.lock().push(trace.clone());
        Ok(trace.conversation_id.clone())
    }

    async fn find_one(&self, conversation_id: &str) -> TracecastResult<Option<Trace>> {
        self.state.ensure_open(self.backend_name())?;
        Ok(self
            .lock()
            .iter()
            .find(|t| t.conversation_id == conversation_id)
            .cloned())
    }

    async fn list_ids(&self) -> TracecastResult<Vec<String>> {
        self.state.ensure_open(self.backend_name())?;
        Ok(self
            .lock()
            .iter()
            .map(|t| t.conversation_id.clone())
            .collect())
    }

    async fn close(&self) -> TracecastResult<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.state.close();
        Ok(())
    }
}
