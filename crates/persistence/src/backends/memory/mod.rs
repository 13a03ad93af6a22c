//! In-process search engine.
//!
//! Evaluates the part of the Elasticsearch Query DSL the phrase service emits
//! (`ids`, `exists`, `term`, `match`, `multi_match`, `bool`, `match_all`,
//! `sort`, `size`, `from`) against documents held in memory. Text fields are
//! lowercased and split on non-alphanumeric characters, which is close enough
//! to the `standard` analyzer for short phrases. Anything else is rejected
//! with [`BackendError::QueryError`](crate::error::BackendError::QueryError).
//!
//! Nothing survives a restart; the bootstrap re-seeds on every start anyway.

mod engine;
mod query;

pub use engine::MemoryEngine;
