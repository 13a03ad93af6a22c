//! Elasticsearch engine.
//!
//! Talks to a single Elasticsearch node over HTTP through the official
//! `elasticsearch` client. All phrases live in one index whose mapping comes
//! from [`create_index_mapping`](crate::schema::create_index_mapping).
//!
//! Error handling follows what the cluster reports:
//!
//! - Transport failures (connection refused, timeout) become
//!   [`BackendError::ConnectionFailed`](crate::error::BackendError::ConnectionFailed)
//! - `resource_already_exists_exception` on index creation is success, since
//!   another process won the race
//! - `index_not_found_exception` on search yields zero hits
//! - Any other non-2xx status becomes
//!   [`BackendError::Internal`](crate::error::BackendError::Internal) carrying the response body
//!
//! # Example
//!
//! ```ignore
//! use phrasebook_persistence::backends::elasticsearch::{ElasticsearchConfig, ElasticsearchEngine};
//!
//! let config = ElasticsearchConfig {
//!     nodes: vec!["http://localhost:9200".to_string()],
//!     ..Default::default()
//! };
//! let engine = ElasticsearchEngine::new(config)?;
//! ```

mod backend;
mod engine;

pub use backend::{ElasticsearchAuth, ElasticsearchConfig, ElasticsearchEngine};
