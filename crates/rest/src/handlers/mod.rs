//! HTTP request handlers.
//!
//! - [`phrase`] - Phrase search, lookup by id, and translation lookup
//! - [`health`] - Health, liveness and readiness endpoints

pub mod health;
pub mod phrase;

// Re-export handlers for convenience
pub use health::{health_handler, liveness_handler, readiness_handler};
pub use phrase::{find_by_id_handler, search_handler, translation_handler};
