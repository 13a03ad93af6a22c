//! Search engine implementations.
//!
//! # Available Engines
//!
//! | Engine | Feature | Description |
//! |--------|---------|-------------|
//! | Memory | (always) | In-process engine for tests and local development |
//! | Elasticsearch | `elasticsearch` | The production engine |
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "elasticsearch")]
//! use phrasebook_persistence::backends::elasticsearch::{ElasticsearchConfig, ElasticsearchEngine};
//!
//! # #[cfg(feature = "elasticsearch")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = ElasticsearchEngine::new(ElasticsearchConfig::default())?;
//! # Ok(())
//! # }
//! ```

pub mod memory;

#[cfg(feature = "elasticsearch")]
pub mod elasticsearch;
