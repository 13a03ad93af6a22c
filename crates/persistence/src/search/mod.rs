//! Query DSL construction for phrase lookups and search.

pub mod query_builder;

pub use query_builder::{
    PhraseQueryBuilder, SEARCH_FIELDS, by_id_and_language_query, by_id_query,
};
