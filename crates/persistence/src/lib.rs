//! Phrasebook Persistence Layer
//!
//! This crate stores multilingual phrases in a search engine and answers the
//! three lookups the phrase service exposes: by id, by id and language, and a
//! free-text search across the phrase and its translations.
//!
//! # Engine Features
//!
//! ```toml
//! [dependencies]
//! phrasebook-persistence = { version = "0.1", features = ["elasticsearch"] }
//! ```
//!
//! - `elasticsearch` (default) - Elasticsearch engine via the official client
//!
//! The in-process memory engine is always available.
//!
//! # Architecture
//!
//! - [`types`] - The phrase record and sort directives
//! - [`error`] - Error types for all operations
//! - [`core`] - The engine trait and [`PhraseRepository`]
//! - [`search`] - Query DSL construction
//! - [`schema`] - Index mapping
//! - [`seed`] - Seed file loading and startup bootstrap
//! - [`backends`] - Engine implementations
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use phrasebook_persistence::backends::memory::MemoryEngine;
//! use phrasebook_persistence::{PhraseRepository, SeedSet, bootstrap};
//!
//! # tokio_test_block(async {
//! let seeds = SeedSet::from_json(r#"[{
//!     "id": 1,
//!     "phrase": "Hello, world!",
//!     "status": "active",
//!     "createdAt": "2024-05-23T15:58:35+00:00",
//!     "updatedAt": "2024-05-23T15:58:35+00:00",
//!     "translations": { "fr": "Bonjour, le monde!" }
//! }]"#).unwrap();
//!
//! let repository = PhraseRepository::with_default_index(Arc::new(MemoryEngine::new()));
//! bootstrap(&repository, &seeds).await.unwrap();
//!
//! let french = repository.find_by_id_and_language("1", "fr").await.unwrap();
//! assert_eq!(french, "Bonjour, le monde!");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod schema;
pub mod search;
pub mod seed;
pub mod types;

pub use crate::core::{Hit, PhraseRepository, SearchEngine};
pub use error::{BackendError, SeedError, StorageError, StorageResult};
pub use seed::{SeedSet, bootstrap};
pub use types::{Phrase, PhraseStatus, SortDirective};
