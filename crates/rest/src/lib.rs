//! # phrasebook-rest - HTTP API for the phrase service
//!
//! This crate exposes phrase lookups and search over HTTP with
//! [axum](https://docs.rs/axum). Storage and querying live in
//! `phrasebook-persistence`; every request maps to exactly one repository
//! call.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use phrasebook_persistence::PhraseRepository;
//! use phrasebook_persistence::backends::memory::MemoryEngine;
//! use phrasebook_rest::{create_app_with_config, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let repository = PhraseRepository::with_default_index(Arc::new(MemoryEngine::new()));
//!     repository.ensure_index_exists().await?;
//!
//!     let config = ServerConfig::default();
//!     let app = create_app_with_config(repository, config.clone());
//!
//!     let listener = tokio::net::TcpListener::bind(config.socket_addr()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Operation | HTTP Method | URL Pattern |
//! |-----------|-------------|-------------|
//! | search | GET | `/phrase/search?query=[text]&sortBy=[field:dir]` |
//! | lookup | GET | `/phrase/[id]` |
//! | translation | GET | `/phrase/[id]/[language]` |
//! | health | GET | `/health` |
//! | liveness | GET | `/_liveness` |
//! | readiness | GET | `/_readiness` |
//!
//! ## Error Handling
//!
//! Errors are returned as `{"statusCode", "error", "message"}` JSON bodies:
//!
//! | HTTP Status | Cause |
//! |-------------|-------|
//! | 400 | Missing `query`, invalid `sortBy` |
//! | 404 | No matching phrase or translation |
//! | 408 | Request timed out |
//! | 500 | Engine failure |
//!
//! ## Architecture
//!
//! - [`error`] - Error types and response bodies
//! - [`config`] - Server configuration
//! - [`state`] - Application state (repository, configuration)
//! - [`handlers`] - HTTP request handlers
//! - [`routing`] - Route configuration

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routing;
pub mod state;

// Re-export commonly used types
pub use config::{EngineMode, ServerConfig};
pub use error::{RestError, RestResult};
pub use state::AppState;

use axum::Router;
use http::{HeaderName, HeaderValue, Method};
use phrasebook_persistence::{PhraseRepository, SearchEngine};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

/// Creates the Axum application with custom configuration.
///
/// # Arguments
///
/// * `repository` - The phrase repository, already bound to an engine and index
/// * `config` - Server configuration
pub fn create_app_with_config<E>(repository: PhraseRepository<E>, config: ServerConfig) -> Router
where
    E: SearchEngine + 'static,
{
    info!(
        engine = repository.engine().name(),
        index = %repository.index(),
        "Creating phrase API"
    );

    let state = AppState::new(repository, config.clone());
    let router = routing::phrase_routes::create_routes(state);

    // Build middleware stack
    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            axum::http::StatusCode::REQUEST_TIMEOUT,
            std::time::Duration::from_secs(config.request_timeout),
        ));

    // Add CORS if enabled
    let router = if config.enable_cors {
        let cors = build_cors_layer(&config);
        router.layer(cors)
    } else {
        router
    };

    // Apply remaining middleware
    router.layer(service_builder)
}

/// Builds the CORS layer based on configuration.
///
/// Credentials are only allowed when no list is a wildcard; the combination
/// is rejected by [`ServerConfig::validate`].
pub fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let mut cors = CorsLayer::new();

    // Configure origins
    if config.cors_origins.trim() == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    // Configure methods
    if config.cors_methods.trim() == "*" {
        cors = cors.allow_methods(Any);
    } else {
        let methods: Vec<Method> = config
            .cors_methods
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_methods(methods);
    }

    // Configure headers
    if config.cors_headers.trim() == "*" {
        cors = cors.allow_headers(Any);
    } else {
        let headers: Vec<HeaderName> = config
            .cors_headers
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        cors = cors.allow_headers(headers);
    }

    if config.cors_allow_credentials && !config.has_cors_wildcard() {
        cors = cors.allow_credentials(true);
    }

    cors
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup. `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "phrasebook={level},phrasebook_rest={level},phrasebook_persistence={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
