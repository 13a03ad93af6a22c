//! Server configuration for the phrase API.
//!
//! Every option can be given on the command line or through a
//! `PHRASEBOOK_*` environment variable.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PHRASEBOOK_PORT` | 8000 | Server port |
//! | `PHRASEBOOK_HOST` | 127.0.0.1 | Host to bind |
//! | `PHRASEBOOK_LOG_LEVEL` | info | Log level |
//! | `PHRASEBOOK_REQUEST_TIMEOUT` | 30 | Request timeout (seconds) |
//! | `PHRASEBOOK_ENABLE_CORS` | true | Enable CORS |
//! | `PHRASEBOOK_CORS_ORIGINS` | http://localhost:3000 | Allowed origins |
//! | `PHRASEBOOK_CORS_METHODS` | GET | Allowed methods |
//! | `PHRASEBOOK_CORS_HEADERS` | Content-Type,Accept | Allowed headers |
//! | `PHRASEBOOK_CORS_ALLOW_CREDENTIALS` | true | Allow credentialed requests |
//! | `PHRASEBOOK_ENGINE` | elasticsearch | Search engine (`elasticsearch` or `memory`) |
//! | `PHRASEBOOK_ELASTICSEARCH_NODES` | http://localhost:9200 | Elasticsearch node URLs |
//! | `PHRASEBOOK_ELASTICSEARCH_USERNAME` | | Basic auth username |
//! | `PHRASEBOOK_ELASTICSEARCH_PASSWORD` | | Basic auth password |
//! | `PHRASEBOOK_ELASTICSEARCH_TIMEOUT_MS` | 30000 | Elasticsearch request timeout |
//! | `PHRASEBOOK_INDEX` | phrases | Phrase index name |
//! | `PHRASEBOOK_SEARCH_SIZE` | 10 | Maximum hits per search |
//! | `PHRASEBOOK_SEED_FILE` | data/phrases.json | Seed file loaded at startup |
//! | `PHRASEBOOK_SKIP_SEED` | false | Skip seeding (index is still created) |
//!
//! # Example
//!
//! ```rust
//! use phrasebook_rest::{EngineMode, ServerConfig};
//!
//! let config = ServerConfig {
//!     port: 3000,
//!     engine: EngineMode::Memory,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

/// Upper bound for `search_size`, the default Elasticsearch result window.
pub const MAX_SEARCH_SIZE: u32 = 10_000;

/// Which search engine the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EngineMode {
    /// An Elasticsearch cluster.
    #[default]
    Elasticsearch,
    /// The in-process memory engine.
    Memory,
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineMode::Elasticsearch => write!(f, "elasticsearch"),
            EngineMode::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for EngineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "elasticsearch" | "es" => Ok(EngineMode::Elasticsearch),
            "memory" | "mem" => Ok(EngineMode::Memory),
            _ => Err(format!(
                "Unknown engine '{}'. Valid options: elasticsearch, memory",
                s
            )),
        }
    }
}

/// Server configuration for the phrase API.
///
/// This struct is built from command line arguments and `PHRASEBOOK_*`
/// environment variables using [`ServerConfig::parse`], or programmatically.
#[derive(Debug, Clone, Parser)]
#[command(name = "phrasebook")]
#[command(about = "Multilingual phrase lookup and search service")]
pub struct ServerConfig {
    /// Port to listen on.
    #[arg(short, long, env = "PHRASEBOOK_PORT", default_value = "8000")]
    pub port: u16,

    /// Host address to bind to.
    #[arg(long, env = "PHRASEBOOK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "PHRASEBOOK_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Request timeout in seconds.
    #[arg(long, env = "PHRASEBOOK_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Enable CORS.
    #[arg(long, env = "PHRASEBOOK_ENABLE_CORS", default_value = "true", action = clap::ArgAction::Set)]
    pub enable_cors: bool,

    /// Allowed CORS origins (comma-separated, or * for all).
    #[arg(
        long,
        env = "PHRASEBOOK_CORS_ORIGINS",
        default_value = "http://localhost:3000"
    )]
    pub cors_origins: String,

    /// Allowed CORS methods (comma-separated, or * for all).
    #[arg(long, env = "PHRASEBOOK_CORS_METHODS", default_value = "GET")]
    pub cors_methods: String,

    /// Allowed CORS headers (comma-separated, or * for all).
    #[arg(
        long,
        env = "PHRASEBOOK_CORS_HEADERS",
        default_value = "Content-Type,Accept"
    )]
    pub cors_headers: String,

    /// Allow credentialed CORS requests.
    #[arg(long, env = "PHRASEBOOK_CORS_ALLOW_CREDENTIALS", default_value = "true", action = clap::ArgAction::Set)]
    pub cors_allow_credentials: bool,

    /// Search engine.
    #[arg(long, env = "PHRASEBOOK_ENGINE", value_enum, default_value_t = EngineMode::Elasticsearch)]
    pub engine: EngineMode,

    /// Elasticsearch node URLs (comma-separated). Only the first is used.
    #[arg(
        long,
        env = "PHRASEBOOK_ELASTICSEARCH_NODES",
        default_value = "http://localhost:9200"
    )]
    pub elasticsearch_nodes: String,

    /// Elasticsearch basic auth username.
    #[arg(long, env = "PHRASEBOOK_ELASTICSEARCH_USERNAME")]
    pub elasticsearch_username: Option<String>,

    /// Elasticsearch basic auth password.
    #[arg(long, env = "PHRASEBOOK_ELASTICSEARCH_PASSWORD", hide_env_values = true)]
    pub elasticsearch_password: Option<String>,

    /// Elasticsearch request timeout in milliseconds.
    #[arg(long, env = "PHRASEBOOK_ELASTICSEARCH_TIMEOUT_MS", default_value = "30000")]
    pub elasticsearch_timeout_ms: u64,

    /// Name of the phrase index.
    #[arg(long, env = "PHRASEBOOK_INDEX", default_value = "phrases")]
    pub index: String,

    /// Maximum number of hits returned by a search.
    #[arg(long, env = "PHRASEBOOK_SEARCH_SIZE", default_value = "10")]
    pub search_size: u32,

    /// JSON file with the phrases loaded at startup.
    #[arg(long, env = "PHRASEBOOK_SEED_FILE", default_value = "data/phrases.json")]
    pub seed_file: PathBuf,

    /// Skip seeding. The index is still created if missing.
    #[arg(long, env = "PHRASEBOOK_SKIP_SEED")]
    pub skip_seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "http://localhost:3000".to_string(),
            cors_methods: "GET".to_string(),
            cors_headers: "Content-Type,Accept".to_string(),
            cors_allow_credentials: true,
            engine: EngineMode::Elasticsearch,
            elasticsearch_nodes: "http://localhost:9200".to_string(),
            elasticsearch_username: None,
            elasticsearch_password: None,
            elasticsearch_timeout_ms: 30000,
            index: "phrases".to_string(),
            search_size: 10,
            seed_file: PathBuf::from("data/phrases.json"),
            skip_seed: false,
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the configured Elasticsearch node URLs.
    pub fn elasticsearch_node_list(&self) -> Vec<String> {
        self.elasticsearch_nodes
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Returns true if any CORS list is a wildcard.
    pub fn has_cors_wildcard(&self) -> bool {
        [&self.cors_origins, &self.cors_methods, &self.cors_headers]
            .iter()
            .any(|v| v.trim() == "*")
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("Port cannot be 0".to_string());
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.search_size == 0 {
            errors.push("Search size cannot be 0".to_string());
        }

        if self.search_size > MAX_SEARCH_SIZE {
            errors.push(format!("Search size cannot exceed {}", MAX_SEARCH_SIZE));
        }

        if self.index.trim().is_empty() {
            errors.push("Index name cannot be empty".to_string());
        }

        if self.enable_cors && self.cors_allow_credentials && self.has_cors_wildcard() {
            errors.push(
                "CORS credentials cannot be combined with wildcard origins, methods or headers"
                    .to_string(),
            );
        }

        if self.engine == EngineMode::Elasticsearch {
            if self.elasticsearch_node_list().is_empty() {
                errors.push("At least one Elasticsearch node is required".to_string());
            }
            if self.elasticsearch_username.is_some() != self.elasticsearch_password.is_some() {
                errors.push(
                    "Elasticsearch username and password must be given together".to_string(),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    ///
    /// This uses ephemeral port 0, the memory engine, and no seeding.
    pub fn for_testing() -> Self {
        Self {
            port: 0, // Let OS assign port
            host: "127.0.0.1".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5, // Shorter timeout for tests
            enable_cors: false,
            cors_origins: "*".to_string(),
            cors_methods: "*".to_string(),
            cors_headers: "*".to_string(),
            cors_allow_credentials: false,
            engine: EngineMode::Memory,
            elasticsearch_nodes: "http://localhost:9200".to_string(),
            elasticsearch_username: None,
            elasticsearch_password: None,
            elasticsearch_timeout_ms: 5000,
            index: "phrases".to_string(),
            search_size: 10,
            seed_file: PathBuf::from("data/phrases.json"),
            skip_seed: true,
        }
    }
}
