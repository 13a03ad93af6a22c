//! Seed data and startup bootstrap.
//!
//! The seed file is a JSON array of phrase records:
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "phrase": "Hello, world!",
//!     "status": "active",
//!     "createdAt": "2024-05-23T15:58:35+00:00",
//!     "updatedAt": "2024-05-23T15:58:35+00:00",
//!     "translations": { "fr": "Bonjour, le monde!" }
//!   }
//! ]
//! ```
//!
//! Bootstrapping upserts every record by id, so running it on each start
//! never duplicates documents. It does overwrite any change made to those ids
//! through other means.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::core::{PhraseRepository, SearchEngine};
use crate::error::{SeedError, StorageResult};
use crate::schema::MAX_PHRASE_ID;
use crate::types::Phrase;

/// A validated set of phrase records to load at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedSet {
    phrases: Vec<Phrase>,
}

impl SeedSet {
    /// Creates a seed set, validating ids.
    ///
    /// Ids must be unique and within `1..=MAX_PHRASE_ID`.
    pub fn new(phrases: Vec<Phrase>) -> Result<Self, SeedError> {
        let mut seen = HashSet::new();
        for (position, phrase) in phrases.iter().enumerate() {
            if phrase.id == 0 {
                return Err(SeedError::InvalidRecord {
                    position,
                    message: "id must be a positive integer".to_string(),
                });
            }
            if phrase.id > MAX_PHRASE_ID {
                return Err(SeedError::InvalidRecord {
                    position,
                    message: format!(
                        "id {} exceeds the maximum of {}",
                        phrase.id, MAX_PHRASE_ID
                    ),
                });
            }
            if !seen.insert(phrase.id) {
                return Err(SeedError::InvalidRecord {
                    position,
                    message: format!("duplicate id {}", phrase.id),
                });
            }
        }
        Ok(Self { phrases })
    }

    /// Parses a seed set from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, SeedError> {
        let phrases: Vec<Phrase> =
            serde_json::from_str(json).map_err(|source| SeedError::Parse { source })?;
        Self::new(phrases)
    }

    /// Reads and parses a seed file.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SeedError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_json(&contents)
    }

    /// Returns the phrases.
    pub fn phrases(&self) -> &[Phrase] {
        &self.phrases
    }

    /// Returns the number of phrases.
    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// Returns true if there is nothing to seed.
    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Ensures the phrase index exists, then upserts the seed set into it.
///
/// Not safe to run concurrently with itself.
pub async fn bootstrap<E: SearchEngine>(
    repository: &PhraseRepository<E>,
    seeds: &SeedSet,
) -> StorageResult<()> {
    info!(
        index = %repository.index(),
        engine = repository.engine().name(),
        records = seeds.len(),
        "Bootstrapping phrase index"
    );

    repository.ensure_index_exists().await?;
    repository.index_all(seeds.phrases()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::memory::MemoryEngine;
    use std::io::Write;
    use std::sync::Arc;

    const TWO_PHRASES: &str = r#"[
        {
            "id": 1,
            "phrase": "Hello, world!",
            "status": "active",
            "createdAt": "2024-05-23T15:58:35+00:00",
            "updatedAt": "2024-05-23T15:58:35+00:00",
            "translations": { "fr": "Bonjour, le monde!", "es": "¡Hola, mundo!" }
        },
        {
            "id": 2,
            "phrase": "Goodbye!",
            "status": "active",
            "createdAt": "2024-05-24T10:15:00+00:00",
            "updatedAt": "2024-05-24T10:15:00+00:00",
            "translations": { "fr": "Au revoir!", "es": "¡Adiós!" }
        }
    ]"#;

    #[test]
    fn test_from_json() {
        let seeds = SeedSet::from_json(TWO_PHRASES).unwrap();
        assert_eq!(seeds.len(), 2);
        assert!(!seeds.is_empty());
        assert_eq!(seeds.phrases()[1].phrase, "Goodbye!");
    }

    #[test]
    fn test_empty_array_is_valid() {
        let seeds = SeedSet::from_json("[]").unwrap();
        assert!(seeds.is_empty());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let json = TWO_PHRASES.replace("\"id\": 2", "\"id\": 1");
        let err = SeedSet::from_json(&json).unwrap_err();
        assert!(matches!(err, SeedError::InvalidRecord { position: 1, .. }));
    }

    #[test]
    fn test_rejects_zero_id() {
        let json = TWO_PHRASES.replace("\"id\": 1", "\"id\": 0");
        let err = SeedSet::from_json(&json).unwrap_err();
        assert!(matches!(err, SeedError::InvalidRecord { position: 0, .. }));
    }

    #[test]
    fn test_id_upper_bound() {
        let json = TWO_PHRASES.replace("\"id\": 2", "\"id\": 2147483647");
        let seeds = SeedSet::from_json(&json).unwrap();
        assert_eq!(seeds.phrases()[1].id, 2_147_483_647);

        let json = TWO_PHRASES.replace("\"id\": 2", "\"id\": 2147483648");
        let err = SeedSet::from_json(&json).unwrap_err();
        assert!(matches!(err, SeedError::InvalidRecord { position: 1, .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = SeedSet::from_json("{\"id\": 1}").unwrap_err();
        assert!(matches!(err, SeedError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TWO_PHRASES.as_bytes()).unwrap();

        let seeds = SeedSet::from_file(file.path()).await.unwrap();
        assert_eq!(seeds.len(), 2);
    }

    #[tokio::test]
    async fn test_from_missing_file() {
        let err = SeedSet::from_file("/nonexistent/phrases.json")
            .await
            .unwrap_err();
        assert!(matches!(err, SeedError::Io { .. }));
    }

    #[tokio::test]
    async fn test_bootstrap_twice_keeps_two_documents() {
        let engine = Arc::new(MemoryEngine::new());
        let repository = PhraseRepository::with_default_index(Arc::clone(&engine));
        let seeds = SeedSet::from_json(TWO_PHRASES).unwrap();

        bootstrap(&repository, &seeds).await.unwrap();
        bootstrap(&repository, &seeds).await.unwrap();

        assert_eq!(engine.document_count("phrases"), 2);
        assert!(engine.document("phrases", "1").is_some());
        assert!(engine.document("phrases", "2").is_some());
    }

    #[tokio::test]
    async fn test_bootstrap_empty_set_creates_index() {
        let engine = Arc::new(MemoryEngine::new());
        let repository = PhraseRepository::new(Arc::clone(&engine), "custom");

        bootstrap(&repository, &SeedSet::default()).await.unwrap();

        assert!(engine.index_exists("custom").await.unwrap());
        assert_eq!(engine.document_count("custom"), 0);
    }
}
