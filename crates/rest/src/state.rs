//! Application state for the phrase API.

use std::sync::Arc;

use phrasebook_persistence::{PhraseRepository, SearchEngine};

use crate::config::ServerConfig;

/// Shared application state for the REST API.
///
/// # Type Parameters
///
/// * `E` - The search engine type (must implement [`SearchEngine`])
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use phrasebook_persistence::PhraseRepository;
/// use phrasebook_persistence::backends::memory::MemoryEngine;
/// use phrasebook_rest::{AppState, ServerConfig};
///
/// let repository = PhraseRepository::with_default_index(Arc::new(MemoryEngine::new()));
/// let state = AppState::new(repository, ServerConfig::default());
/// assert_eq!(state.repository().index(), "phrases");
/// ```
pub struct AppState<E> {
    /// The phrase repository.
    repository: PhraseRepository<E>,

    /// Server configuration.
    config: Arc<ServerConfig>,
}

// Manually implement Clone since E is wrapped in Arc and doesn't need to be Clone
impl<E> Clone for AppState<E> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            config: Arc::clone(&self.config),
        }
    }
}

impl<E: SearchEngine> AppState<E> {
    /// Creates a new AppState with the given repository and configuration.
    pub fn new(repository: PhraseRepository<E>, config: ServerConfig) -> Self {
        Self {
            repository,
            config: Arc::new(config),
        }
    }

    /// Returns the phrase repository.
    pub fn repository(&self) -> &PhraseRepository<E> {
        &self.repository
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
