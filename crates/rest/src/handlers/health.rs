//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness endpoints for monitoring and load
//! balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use phrasebook_persistence::SearchEngine;
use tracing::{debug, warn};

use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// Reports the configured engine and index without contacting the engine.
///
/// # HTTP Request
///
/// `GET [base]/health`
pub async fn health_handler<E>(State(state): State<AppState<E>>) -> Response
where
    E: SearchEngine,
{
    debug!("Processing health check request");

    let repository = state.repository();
    let health_response = serde_json::json!({
        "status": "healthy",
        "engine": repository.engine().name(),
        "index": repository.index(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(health_response)).into_response()
}

/// Handler for the liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for the readiness probe.
///
/// Ready once the phrase index exists in the engine.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
///
/// # Response
///
/// - `200 OK` - The index exists
/// - `503 Service Unavailable` - The index is missing or the engine is unreachable
pub async fn readiness_handler<E>(State(state): State<AppState<E>>) -> Response
where
    E: SearchEngine,
{
    debug!("Processing readiness check request");

    let repository = state.repository();
    let engine = repository.engine();

    let (status, index_check) = match engine.index_exists(repository.index()).await {
        Ok(true) => (StatusCode::OK, "ok".to_string()),
        Ok(false) => (StatusCode::SERVICE_UNAVAILABLE, "missing".to_string()),
        Err(e) => {
            warn!(error = %e, "Readiness check could not reach engine");
            (StatusCode::SERVICE_UNAVAILABLE, "unreachable".to_string())
        }
    };

    let response = serde_json::json!({
        "status": if status.is_success() { "ready" } else { "not_ready" },
        "engine": engine.name(),
        "checks": {
            "index": index_check
        }
    });

    (status, Json(response)).into_response()
}
