//! Phrasebook server
//!
//! Multilingual phrase lookup and search over Elasticsearch.

use std::sync::Arc;

use clap::Parser;
use phrasebook_persistence::backends::memory::MemoryEngine;
use phrasebook_persistence::{PhraseRepository, SearchEngine, SeedSet, bootstrap};
use phrasebook_rest::{EngineMode, ServerConfig, create_app_with_config, init_logging};
use tracing::info;

/// Starts the Axum HTTP server.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Prepares the index, seeds it unless disabled, and serves the API.
async fn run<E>(engine: Arc<E>, config: ServerConfig) -> anyhow::Result<()>
where
    E: SearchEngine + 'static,
{
    let repository =
        PhraseRepository::new(engine, config.index.clone()).with_search_size(config.search_size);

    if config.skip_seed {
        info!(index = %config.index, "Seeding disabled");
        repository.ensure_index_exists().await?;
    } else {
        info!(seed_file = %config.seed_file.display(), "Loading seed file");
        let seeds = SeedSet::from_file(&config.seed_file).await?;
        bootstrap(&repository, &seeds).await?;
    }

    let app = create_app_with_config(repository, config.clone());
    serve(app, &config).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        port = config.port,
        host = %config.host,
        engine = %config.engine,
        index = %config.index,
        "Starting phrasebook server"
    );

    match config.engine {
        EngineMode::Elasticsearch => start_elasticsearch(config).await,
        EngineMode::Memory => start_memory(config).await,
    }
}

/// Starts the server with the in-process memory engine.
async fn start_memory(config: ServerConfig) -> anyhow::Result<()> {
    info!("Using in-memory engine; data is lost on exit");
    run(Arc::new(MemoryEngine::new()), config).await
}

/// Starts the server against an Elasticsearch cluster.
#[cfg(feature = "elasticsearch")]
async fn start_elasticsearch(config: ServerConfig) -> anyhow::Result<()> {
    use phrasebook_persistence::backends::elasticsearch::{
        ElasticsearchAuth, ElasticsearchConfig, ElasticsearchEngine,
    };

    let es_nodes = config.elasticsearch_node_list();

    let es_auth = match (
        &config.elasticsearch_username,
        &config.elasticsearch_password,
    ) {
        (Some(username), Some(password)) => Some(ElasticsearchAuth::Basic {
            username: username.clone(),
            password: password.clone(),
        }),
        _ => None,
    };

    let es_config = ElasticsearchConfig {
        nodes: es_nodes.clone(),
        request_timeout_ms: config.elasticsearch_timeout_ms,
        auth: es_auth,
        ..Default::default()
    };

    info!(nodes = ?es_nodes, "Initializing Elasticsearch engine");
    let engine = ElasticsearchEngine::new(es_config)?;

    run(Arc::new(engine), config).await
}

/// Fallback when elasticsearch feature is not enabled.
#[cfg(not(feature = "elasticsearch"))]
async fn start_elasticsearch(_config: ServerConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "The elasticsearch engine requires the 'elasticsearch' feature. \
         Build with: cargo build -p phrasebook --features elasticsearch, \
         or run with --engine memory"
    )
}
