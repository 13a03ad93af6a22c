//! Search engine trait.

use std::fmt::Debug;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::BackendError;

/// A single document matched by a search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Hit {
    /// The engine document id.
    #[serde(rename = "_id")]
    pub id: String,

    /// Relevance score, absent when an explicit sort was requested.
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,

    /// The stored document.
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}

impl Hit {
    /// Creates a hit.
    pub fn new(id: impl Into<String>, score: Option<f64>, source: Value) -> Self {
        Self {
            id: id.into(),
            score,
            source: Some(source),
        }
    }
}

/// The subset of a search engine's API used by the phrase service.
///
/// Bodies are Elasticsearch Query DSL and mapping JSON. Implementations
/// perform exactly one round trip per call and do not retry.
#[async_trait]
pub trait SearchEngine: Send + Sync + Debug {
    /// Returns a human-readable name for this engine.
    fn name(&self) -> &'static str;

    /// Runs a search request body against an index and returns its hits.
    async fn search(&self, index: &str, body: Value) -> Result<Vec<Hit>, BackendError>;

    /// Stores a document under the given id, replacing any existing one.
    async fn index(&self, index: &str, id: &str, document: Value) -> Result<(), BackendError>;

    /// Returns whether the index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, BackendError>;

    /// Creates an index with the given settings and mappings.
    async fn create_index(&self, index: &str, mapping: Value) -> Result<(), BackendError>;
}
