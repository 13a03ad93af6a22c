//! Elasticsearch Query DSL builder.
//!
//! Translates the three phrase lookups into request bodies. The builder does
//! no validation: ids and language codes are forwarded as given and an id the
//! engine cannot match simply produces zero hits.

use serde_json::{Map, Value, json};

use crate::types::{SortDirective, SortField};

/// Fields matched by free-text search with `phrase_prefix` semantics.
pub const SEARCH_FIELDS: [&str; 3] = ["phrase", "translations.fr", "translations.es"];

/// Builds an exact-id lookup.
pub fn by_id_query(id: &str) -> Value {
    json!({
        "query": {
            "ids": { "values": [id] }
        }
    })
}

/// Builds an exact-id lookup that also requires `translations.<language>`.
pub fn by_id_and_language_query(id: &str, language: &str) -> Value {
    json!({
        "query": {
            "bool": {
                "must": [
                    { "ids": { "values": [id] } },
                    { "exists": { "field": format!("translations.{}", language) } }
                ]
            }
        }
    })
}

/// Builds free-text search requests.
#[derive(Debug, Clone)]
pub struct PhraseQueryBuilder {
    size: u32,
}

impl PhraseQueryBuilder {
    /// Creates a builder returning at most `size` hits per search.
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// Returns the configured result size.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Builds the search body.
    ///
    /// A hit matches when `status` equals the query exactly OR any of
    /// [`SEARCH_FIELDS`] matches it as a phrase prefix. Without a sort the
    /// engine orders by relevance.
    pub fn build(&self, query: &str, sort: Option<&SortDirective>) -> Value {
        let mut body = json!({
            "size": self.size,
            "query": {
                "bool": {
                    "should": [
                        { "match": { "status": query } },
                        {
                            "multi_match": {
                                "query": query,
                                "type": "phrase_prefix",
                                "fields": SEARCH_FIELDS
                            }
                        }
                    ]
                }
            }
        });

        if let Some(sort) = sort {
            body["sort"] = self.build_sort(sort);
        }

        body
    }

    /// Builds the sort clause, with `id` as a tie-breaker.
    fn build_sort(&self, directive: &SortDirective) -> Value {
        let mut primary = Map::new();
        primary.insert(
            directive.field.as_str().to_string(),
            json!({ "order": directive.direction.as_str() }),
        );
        let mut clauses = vec![Value::Object(primary)];

        if directive.field != SortField::Id {
            clauses.push(json!({ "id": { "order": "asc" } }));
        }

        Value::Array(clauses)
    }
}

impl Default for PhraseQueryBuilder {
    fn default() -> Self {
        Self::new(10)
    }
}
