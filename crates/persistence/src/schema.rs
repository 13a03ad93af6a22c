//! Index mapping for phrase documents.
//!
//! The mapping is fixed; there is no migration path. An index created by an
//! older build keeps whatever mapping it was created with.

use serde_json::{Value, json};

/// Default name of the phrase index.
pub const DEFAULT_INDEX: &str = "phrases";

/// Largest id the `integer` mapping accepts.
pub const MAX_PHRASE_ID: u32 = i32::MAX as u32;

/// Creates the index body (mappings only) for phrase documents.
///
/// - `id`: integer, also the engine document id
/// - `phrase`: analyzed text for prefix search
/// - `status`: keyword for exact matching
/// - `createdAt` / `updatedAt`: dates
/// - `translations`: dynamic object, one text field per language code
pub fn create_index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "integer" },
                "phrase": { "type": "text" },
                "status": { "type": "keyword" },
                "createdAt": { "type": "date" },
                "updatedAt": { "type": "date" },
                "translations": { "type": "object" }
            }
        }
    })
}
