//! [`SearchEngine`] implementation for Elasticsearch.

use async_trait::async_trait;
use elasticsearch::indices::{IndicesCreateParts, IndicesExistsParts};
use elasticsearch::params::Refresh;
use elasticsearch::{IndexParts, SearchParts};
use serde::Deserialize;
use serde_json::Value;

use crate::core::{Hit, SearchEngine};
use crate::error::BackendError;

use super::backend::{BACKEND_NAME, ElasticsearchEngine};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    hits: Vec<Hit>,
}

fn internal_error(message: String) -> BackendError {
    BackendError::Internal {
        backend_name: BACKEND_NAME.to_string(),
        message,
        source: None,
    }
}

fn transport_error(action: &str, e: elasticsearch::Error) -> BackendError {
    BackendError::ConnectionFailed {
        backend_name: BACKEND_NAME.to_string(),
        message: format!("{} failed: {}", action, e),
    }
}

/// Extracts the hits array from a raw `_search` response body.
pub(super) fn parse_hits(body: Value) -> Result<Vec<Hit>, BackendError> {
    let response: SearchResponse =
        serde_json::from_value(body).map_err(|e| BackendError::SerializationError {
            message: format!("Failed to parse search response: {}", e),
        })?;
    Ok(response.hits.hits)
}

#[async_trait]
impl SearchEngine for ElasticsearchEngine {
    fn name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn search(&self, index: &str, body: Value) -> Result<Vec<Hit>, BackendError> {
        let response = self
            .client()
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| transport_error("Search", e))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if body.contains("index_not_found_exception") {
                tracing::debug!(index = %index, "Search on missing index, returning no hits");
                return Ok(Vec::new());
            }
            return Err(internal_error(format!(
                "Search failed (status {}): {}",
                status, body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| internal_error(format!("Failed to read search response: {}", e)))?;

        parse_hits(body)
    }

    async fn index(&self, index: &str, id: &str, document: Value) -> Result<(), BackendError> {
        let mut request = self
            .client()
            .index(IndexParts::IndexId(index, id))
            .body(document);
        if self.config().refresh_on_index {
            request = request.refresh(Refresh::WaitFor);
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error("Index", e))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(internal_error(format!(
                "Failed to index document {} (status {}): {}",
                id, status, body
            )));
        }

        Ok(())
    }

    async fn index_exists(&self, index: &str) -> Result<bool, BackendError> {
        let response = self
            .client()
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| transport_error("Index existence check", e))?;

        let status = response.status_code();
        if status.is_success() {
            return Ok(true);
        }
        if status.as_u16() == 404 {
            return Ok(false);
        }
        Err(internal_error(format!(
            "Index existence check for {} returned status {}",
            index, status
        )))
    }

    async fn create_index(&self, index: &str, mapping: Value) -> Result<(), BackendError> {
        let response = self
            .client()
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(mapping)
            .send()
            .await
            .map_err(|e| transport_error("Index creation", e))?;

        let status = response.status_code();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Lost a creation race against another instance
            if body.contains("resource_already_exists_exception") {
                tracing::debug!(index = %index, "Index was created concurrently");
                return Ok(());
            }
            return Err(internal_error(format!(
                "Failed to create index {} (status {}): {}",
                index, status, body
            )));
        }

        tracing::info!(index = %index, "Created Elasticsearch index");
        Ok(())
    }
}
