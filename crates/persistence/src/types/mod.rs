//! Core types for the persistence layer.
//!
//! - [`Phrase`], [`PhraseStatus`] - The phrase record as stored in the engine
//! - [`SortDirective`], [`SortField`], [`SortDirection`] - Search ordering
//!
//! # Examples
//!
//! ```
//! use phrasebook_persistence::types::{SortDirection, SortDirective, SortField};
//!
//! let sort: SortDirective = "createdAt:desc".parse().unwrap();
//! assert_eq!(sort.field, SortField::CreatedAt);
//! assert_eq!(sort.direction, SortDirection::Descending);
//! ```

mod phrase;
mod sort;

pub use phrase::{Phrase, PhraseStatus};
pub use sort::{SortDirection, SortDirective, SortField};
