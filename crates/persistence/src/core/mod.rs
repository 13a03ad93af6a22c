//! Core engine abstraction and the phrase repository.
//!
//! - [`SearchEngine`] - The four-call contract every search engine implements
//! - [`Hit`] - A single matched document
//! - [`PhraseRepository`] - Phrase lookups, search and seeding on top of an engine
//!
//! The repository never talks to a concrete client. It receives its engine
//! explicitly, so tests run against the in-process
//! [`MemoryEngine`](crate::backends::memory::MemoryEngine) and production
//! against Elasticsearch without any change to the query logic.
//!
//! ```ignore
//! use std::sync::Arc;
//! use phrasebook_persistence::backends::memory::MemoryEngine;
//! use phrasebook_persistence::core::PhraseRepository;
//!
//! let repository = PhraseRepository::new(Arc::new(MemoryEngine::new()), "phrases");
//! repository.ensure_index_exists().await?;
//! let phrases = repository.find_by_id("1").await?;
//! ```

mod engine;
mod repository;

pub use engine::{Hit, SearchEngine};
pub use repository::PhraseRepository;
