//! HTTP document-store trace backend
//!
//! Speaks the data-API dialect: `POST <base>/action/<verb>` with a JSON body
//! naming the data source, database and collection.

use super::store::{ConnectionState, TraceStore};
use crate::error::{TracecastError, TracecastResult};
use crate::trace::Trace;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

/// Connection settings for [`HttpTraceStore`]
#[derive(Debug, Clone)]
pub struct HttpStoreConfig {
    pub base_url: String,
    pub data_source: String,
    pub database: String,
    pub collection: String,
    pub username: String,
    pub password: String,
}

/// Trace store backed by a remote document database
pub struct HttpTraceStore {
    config: HttpStoreConfig,
    http_client: Client,
    state: ConnectionState,
}

impl HttpTraceStore {
    pub fn new(config: HttpStoreConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
            state: ConnectionState::default(),
        }
    }

    async fn action(&self, verb: &str, mut body: Value) -> TracecastResult<Value> {
        self.state.ensure_open(self.backend_name())?;

        body["dataSource"] = json!(self.config.data_source);
        body["database"] = json!(self.config.database);
        body["collection"] = json!(self.config.collection);

        let url = format!(
            "{}/action/{}",
            self.config.base_url.trim_end_matches('/'),
            verb
        );
        debug!(%url, "document store request");

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                TracecastError::storage_with_context(
                    format!("Document store unreachable: {}", e),
                    url.clone(),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TracecastError::storage_with_context(
                format!("Document store {} failed (status {}): {}", verb, status, error_text),
                url,
            ));
        }

        response.json::<Value>().await.map_err(|e| {
            TracecastError::storage(format!("Invalid document store response: {}", e))
        })
    }
}

#[async_trait]
impl TraceStore for HttpTraceStore {
    fn backend_name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self, trace), fields(conversation_id = %trace.conversation_id))]
    async fn insert_one(&self, trace: &Trace) -> TracecastResult<String> {
        let reply = self
            .action("insertOne", json!({ "document": trace.to_document()? }))
            .await?;

        let inserted_id = match &reply["insertedId"] {
            Value::String(id) => id.clone(),
            Value::Null => trace.conversation_id.clone(),
            other => other.to_string(),
        };
        info!(%inserted_id, collection = %self.config.collection, "trace inserted");
        Ok(inserted_id)
    }

    async fn find_one(&self, conversation_id: &str) -> TracecastResult<Option<Trace>> {
        let mut reply = self
            .action(
                "findOne",
                json!({ "filter": { "conversation_id": conversation_id } }),
            )
            .await?;

        match reply["document"].take() {
            Value::Null => Ok(None),
            document => Ok(Some(Trace::from_document(document)?)),
        }
    }

    async fn list_ids(&self) -> TracecastResult<Vec<String>> {
        let reply = self
            .action(
                "find",
                json!({ "filter": {}, "projection": { "conversation_id": 1 } }),
            )
            .await?;

        let ids = reply["documents"]
            .as_array()
            .map(|docs| {
                docs.iter()
                    .filter_map(|d| d["conversation_id"].as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(ids)
    }

    async fn close(&self) -> TracecastResult<()> {
        if self.state.close() {
            debug!(database = %self.config.database, "closed document store connection");
        }
        Ok(())
    }
}
