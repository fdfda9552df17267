//! File-based trace store

use super::store::{ConnectionState, TraceStore};
use crate::error::{TracecastError, TracecastResult};
use crate::trace::Trace;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// One pretty-printed JSON document per trace under
/// `<base>/<database>/<collection>/<conversation_id>.json`
pub struct FileTraceStore {
    collection_dir: PathBuf,
    state: ConnectionState,
}

impl FileTraceStore {
    /// Open the store, creating the collection directory if needed
    pub async fn open(
        base_path: impl AsRef<Path>,
        database: &str,
        collection: &str,
    ) -> TracecastResult<Self> {
        validate_segment("database", database)?;
        validate_segment("collection", collection)?;

        let collection_dir = base_path.as_ref().join(database).join(collection);
        fs::create_dir_all(&collection_dir).await.map_err(|e| {
            TracecastError::io_with_path(
                format!("Failed to create trace directory: {}", e),
                collection_dir.display().to_string(),
            )
        })?;
        debug!(path = %collection_dir.display(), "opened file trace store");

        Ok(Self {
            collection_dir,
            state: ConnectionState::default(),
        })
    }

    /// Directory holding the documents
    pub fn path(&self) -> &Path {
        &self.collection_dir
    }

    fn document_path(&self, conversation_id: &str) -> TracecastResult<PathBuf> {
        validate_segment("conversation id", conversation_id)?;
        Ok(self.collection_dir.join(format!("{}.json", conversation_id)))
    }
}

#[async_trait]
impl TraceStore for FileTraceStore {
    fn backend_name(&self) -> &str {
        "file"
    }

    #[instrument(skip(self, trace), fields(conversation_id = %trace.conversation_id))]
    async fn insert_one(&self, trace: &Trace) -> TracecastResult<String> {
        self.state.ensure_open(self.backend_name())?;
        let path = self.document_path(&trace.conversation_id)?;
        if fs::try_exists(&path).await? {
            return Err(TracecastError::storage(format!(
                "Trace {} already exists",
                trace.conversation_id
            )));
        }

        let json = serde_json::to_string_pretty(trace)?;
        fs::write(&path, json).await.map_err(|e| {
            TracecastError::io_with_path(
                format!("Failed to write trace: {}", e),
                path.display().to_string(),
            )
        })?;
        info!(path = %path.display(), "trace written");

        Ok(trace.conversation_id.clone())
    }

    async fn find_one(&self, conversation_id: &str) -> TracecastResult<Option<Trace>> {
        self.state.ensure_open(self.backend_name())?;
        let path = self.document_path(conversation_id)?;
        if !fs::try_exists(&path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await?;
        let trace: Trace = serde_json::from_str(&content)?;
        Ok(Some(trace))
    }

    async fn list_ids(&self) -> TracecastResult<Vec<String>> {
        self.state.ensure_open(self.backend_name())?;
        let mut ids = Vec::new();
        let mut entries = fs::read_dir(&self.collection_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    async fn close(&self) -> TracecastResult<()> {
        if self.state.close() {
            debug!(path = %self.collection_dir.display(), "closed file trace store");
        }
        Ok(())
    }
}

// Names become path segments; keep them to a safe alphabet.
fn validate_segment(kind: &str, value: &str) -> TracecastResult<()> {
    let valid = !value.is_empty()
        && value != "."
        && value != ".."
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(TracecastError::invalid_input(format!(
            "Invalid {}: {:?}",
            kind, value
        )))
    }
}
