//! Phrase route configuration.

use axum::{Router, routing::get};
use phrasebook_persistence::SearchEngine;

use crate::handlers;
use crate::state::AppState;

/// Creates all phrase API routes.
///
/// # Routes
///
/// ## Operational
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// ## Phrases
/// - `GET /phrase/search` - Search by `query`, optionally ordered by `sortBy`
/// - `GET /phrase/{id}` - Lookup by id
/// - `GET /phrase/{id}/{language}` - Translation lookup
pub fn create_routes<E>(state: AppState<E>) -> Router
where
    E: SearchEngine + 'static,
{
    Router::new()
        .route("/health", get(handlers::health_handler::<E>))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler::<E>))
        // The static segment takes precedence over {id}
        .route("/phrase/search", get(handlers::search_handler::<E>))
        .route("/phrase/{id}", get(handlers::find_by_id_handler::<E>))
        .route(
            "/phrase/{id}/{language}",
            get(handlers::translation_handler::<E>),
        )
        .with_state(state)
}
