//! Memory engine implementation.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::core::{Hit, SearchEngine};
use crate::error::BackendError;

use super::query::{self, Mapping};

/// Default number of hits when a request has no `size`.
const DEFAULT_SIZE: usize = 10;

#[derive(Debug, Default)]
struct MemoryIndex {
    mapping: Mapping,
    documents: BTreeMap<String, Value>,
}

/// A search engine that keeps every index in process memory.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    indices: RwLock<HashMap<String, MemoryIndex>>,
}

impl MemoryEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents in an index (0 if it does not exist).
    pub fn document_count(&self, index: &str) -> usize {
        self.indices
            .read()
            .get(index)
            .map(|i| i.documents.len())
            .unwrap_or(0)
    }

    /// Returns a stored document by id.
    pub fn document(&self, index: &str, id: &str) -> Option<Value> {
        self.indices
            .read()
            .get(index)
            .and_then(|i| i.documents.get(id).cloned())
    }
}

#[async_trait]
impl SearchEngine for MemoryEngine {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn search(&self, index: &str, body: Value) -> Result<Vec<Hit>, BackendError> {
        let indices = self.indices.read();
        let Some(target) = indices.get(index) else {
            tracing::debug!(index = %index, "Search on missing index, returning no hits");
            return Ok(Vec::new());
        };

        let match_all = Value::Object(Default::default());
        let clause = body.get("query").unwrap_or(&match_all);

        let mut hits = Vec::new();
        for (id, document) in &target.documents {
            let score = if clause.as_object().is_some_and(|o| o.is_empty()) {
                Some(1.0)
            } else {
                query::evaluate(clause, id, document, &target.mapping)?
            };
            if let Some(score) = score {
                hits.push(Hit::new(id.clone(), Some(score), document.clone()));
            }
        }

        match body.get("sort") {
            Some(sort) => {
                let keys = query::parse_sort(sort)?;
                hits.sort_by(|a, b| compare_by_keys(a, b, &keys));
                for hit in &mut hits {
                    hit.score = None;
                }
            }
            None => hits.sort_by(|a, b| {
                b.score
                    .partial_cmp(&a.score)
                    .unwrap_or(Ordering::Equal)
            }),
        }

        let from = read_usize(&body, "from")?.unwrap_or(0);
        let size = read_usize(&body, "size")?.unwrap_or(DEFAULT_SIZE);

        Ok(hits.into_iter().skip(from).take(size).collect())
    }

    async fn index(&self, index: &str, id: &str, document: Value) -> Result<(), BackendError> {
        if !document.is_object() {
            return Err(BackendError::QueryError {
                message: format!("Document {} must be a JSON object", id),
            });
        }

        self.indices
            .write()
            .entry(index.to_string())
            .or_default()
            .documents
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn index_exists(&self, index: &str) -> Result<bool, BackendError> {
        Ok(self.indices.read().contains_key(index))
    }

    async fn create_index(&self, index: &str, mapping: Value) -> Result<(), BackendError> {
        let mut indices = self.indices.write();
        if indices.contains_key(index) {
            // Same outcome as losing a creation race against Elasticsearch
            tracing::debug!(index = %index, "Index already exists, keeping existing mapping");
            return Ok(());
        }

        indices.insert(
            index.to_string(),
            MemoryIndex {
                mapping: Mapping::from_body(&mapping),
                documents: BTreeMap::new(),
            },
        );
        Ok(())
    }
}

fn compare_by_keys(a: &Hit, b: &Hit, keys: &[query::SortKey]) -> Ordering {
    for key in keys {
        let left = a.source.as_ref().and_then(|s| query::lookup(s, &key.field));
        let right = b.source.as_ref().and_then(|s| query::lookup(s, &key.field));

        let ordering = match (left, right) {
            // Missing values sort last regardless of direction
            (None, None) => Ordering::Equal,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(l), Some(r)) => {
                let ordering = query::compare_values(l, r);
                if key.descending {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

fn read_usize(body: &Value, key: &str) -> Result<Option<usize>, BackendError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| BackendError::QueryError {
                message: format!("'{}' must be a non-negative integer", key),
            }),
    }
}
