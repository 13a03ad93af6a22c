//! Shared helpers for phrase API integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum_test::TestServer;
use phrasebook_persistence::backends::memory::MemoryEngine;
use phrasebook_persistence::{PhraseRepository, SeedSet, bootstrap};
use phrasebook_rest::ServerConfig;

/// Path to the seed file shipped with the workspace.
pub fn seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.join("data").join("phrases.json"))
        .unwrap_or_else(|| PathBuf::from("data/phrases.json"))
}

/// Creates a memory-backed repository seeded through the real bootstrap.
pub async fn seeded_repository() -> (Arc<MemoryEngine>, PhraseRepository<MemoryEngine>) {
    let engine = Arc::new(MemoryEngine::new());
    let repository = PhraseRepository::with_default_index(Arc::clone(&engine));
    let seeds = SeedSet::from_file(seed_path())
        .await
        .expect("Failed to load seed file");
    bootstrap(&repository, &seeds)
        .await
        .expect("Failed to bootstrap");
    (engine, repository)
}

/// Creates a test server over the routes only (no middleware).
pub async fn create_test_server() -> TestServer {
    let (_, repository) = seeded_repository().await;
    let state = phrasebook_rest::AppState::new(repository, ServerConfig::for_testing());
    let app = phrasebook_rest::routing::phrase_routes::create_routes(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Creates a test server over the full application with the given config.
pub async fn create_app_server(config: ServerConfig) -> TestServer {
    let (_, repository) = seeded_repository().await;
    let app = phrasebook_rest::create_app_with_config(repository, config);
    TestServer::new(app).expect("Failed to create test server")
}
