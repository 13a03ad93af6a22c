//! Phrase repository.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{BackendError, StorageError, StorageResult};
use crate::schema::{self, DEFAULT_INDEX};
use crate::search::{PhraseQueryBuilder, by_id_and_language_query, by_id_query};
use crate::types::{Phrase, SortDirective};

use super::engine::{Hit, SearchEngine};

/// Phrase lookups and search on top of a [`SearchEngine`].
///
/// Every call is one engine round trip. Zero hits become
/// [`StorageError::NotFound`]; nothing is cached or retried.
pub struct PhraseRepository<E> {
    engine: Arc<E>,
    index: String,
    query_builder: PhraseQueryBuilder,
}

// Manually implement Clone since E is wrapped in Arc and doesn't need to be Clone
impl<E> Clone for PhraseRepository<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            index: self.index.clone(),
            query_builder: self.query_builder.clone(),
        }
    }
}

impl<E> std::fmt::Debug for PhraseRepository<E>
where
    E: SearchEngine,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhraseRepository")
            .field("engine", &self.engine.name())
            .field("index", &self.index)
            .field("search_size", &self.query_builder.size())
            .finish()
    }
}

impl<E: SearchEngine> PhraseRepository<E> {
    /// Creates a repository over the given engine and index.
    pub fn new(engine: Arc<E>, index: impl Into<String>) -> Self {
        Self {
            engine,
            index: index.into(),
            query_builder: PhraseQueryBuilder::default(),
        }
    }

    /// Creates a repository over the default `phrases` index.
    pub fn with_default_index(engine: Arc<E>) -> Self {
        Self::new(engine, DEFAULT_INDEX)
    }

    /// Sets the maximum number of hits returned by [`search_by_query`](Self::search_by_query).
    pub fn with_search_size(mut self, size: u32) -> Self {
        self.query_builder = PhraseQueryBuilder::new(size);
        self
    }

    /// Returns the engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Returns the index name.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Finds the phrase with the given id.
    ///
    /// The full stored record is returned, translations included.
    pub async fn find_by_id(&self, id: &str) -> StorageResult<Vec<Phrase>> {
        debug!(index = %self.index, id = %id, "Finding phrase by id");

        let hits = self.engine.search(&self.index, by_id_query(id)).await?;
        extract_sources(hits, || format!("id={}", id))
    }

    /// Returns the translation of phrase `id` into `language`.
    ///
    /// Fails with not-found when the id is absent or the phrase has no
    /// translation for that language.
    pub async fn find_by_id_and_language(&self, id: &str, language: &str) -> StorageResult<String> {
        debug!(
            index = %self.index,
            id = %id,
            language = %language,
            "Finding phrase translation"
        );

        let lookup = || format!("id={} language={}", id, language);
        let hits = self
            .engine
            .search(&self.index, by_id_and_language_query(id, language))
            .await?;

        let phrases = extract_sources(hits, lookup)?;
        phrases
            .into_iter()
            .next()
            .and_then(|mut phrase| phrase.translations.remove(language))
            .ok_or_else(|| StorageError::not_found(lookup()))
    }

    /// Searches phrases by exact status or phrase-prefix text match.
    pub async fn search_by_query(
        &self,
        query: &str,
        sort: Option<&SortDirective>,
    ) -> StorageResult<Vec<Phrase>> {
        debug!(
            index = %self.index,
            query = %query,
            sort = ?sort.map(ToString::to_string),
            "Searching phrases"
        );

        let body = self.query_builder.build(query, sort);
        let hits = self.engine.search(&self.index, body).await?;
        extract_sources(hits, || format!("query={}", query))
    }

    /// Creates the index with the phrase mapping if it does not exist yet.
    pub async fn ensure_index_exists(&self) -> StorageResult<()> {
        if self.engine.index_exists(&self.index).await? {
            debug!(index = %self.index, "Index already exists");
            return Ok(());
        }

        self.engine
            .create_index(&self.index, schema::create_index_mapping())
            .await?;

        info!(index = %self.index, engine = self.engine.name(), "Created phrase index");
        Ok(())
    }

    /// Upserts every phrase by id.
    pub async fn index_all(&self, phrases: &[Phrase]) -> StorageResult<()> {
        for phrase in phrases {
            self.index_document(phrase).await?;
        }

        info!(index = %self.index, count = phrases.len(), "Indexed phrases");
        Ok(())
    }

    /// Upserts a single phrase, replacing any document with the same id.
    pub async fn index_document(&self, phrase: &Phrase) -> StorageResult<()> {
        let document = serde_json::to_value(phrase).map_err(|e| BackendError::SerializationError {
            message: format!("Failed to serialize phrase {}: {}", phrase.id, e),
        })?;

        self.engine
            .index(&self.index, &phrase.document_id(), document)
            .await?;

        debug!(index = %self.index, id = phrase.id, "Indexed phrase");
        Ok(())
    }
}

/// Projects hits into phrases, turning an empty hit list into not-found.
fn extract_sources(hits: Vec<Hit>, lookup: impl FnOnce() -> String) -> StorageResult<Vec<Phrase>> {
    if hits.is_empty() {
        return Err(StorageError::not_found(lookup()));
    }

    hits.into_iter().map(parse_hit).collect()
}

fn parse_hit(hit: Hit) -> StorageResult<Phrase> {
    let source: Value = hit.source.ok_or_else(|| BackendError::SerializationError {
        message: format!("Hit {} has no _source", hit.id),
    })?;

    serde_json::from_value(source).map_err(|e| {
        StorageError::Backend(BackendError::SerializationError {
            message: format!("Hit {} is not a phrase: {}", hit.id, e),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::memory::MemoryEngine;
    use crate::seed::SeedSet;
    use crate::types::{PhraseStatus, SortDirection, SortField};
    use serde_json::json;

    const SEEDS: &str = r#"[
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

    async fn seeded_repository() -> PhraseRepository<MemoryEngine> {
        let repository = PhraseRepository::with_default_index(Arc::new(MemoryEngine::new()));
        let seeds = SeedSet::from_json(SEEDS).unwrap();
        repository.ensure_index_exists().await.unwrap();
        repository.index_all(seeds.phrases()).await.unwrap();
        repository
    }

    fn ids(phrases: &[Phrase]) -> Vec<u32> {
        phrases.iter().map(|p| p.id).collect()
    }

    #[tokio::test]
    async fn test_find_by_id_returns_each_seeded_record() {
        let repository = seeded_repository().await;

        for id in [1u32, 2] {
            let phrases = repository.find_by_id(&id.to_string()).await.unwrap();
            assert_eq!(ids(&phrases), vec![id]);
        }
    }

    #[tokio::test]
    async fn test_find_by_id_includes_translations() {
        let repository = seeded_repository().await;

        let phrases = repository.find_by_id("1").await.unwrap();
        assert_eq!(phrases[0].phrase, "Hello, world!");
        assert_eq!(phrases[0].status, PhraseStatus::Active);
        assert_eq!(phrases[0].translations.len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let repository = seeded_repository().await;

        let err = repository.find_by_id("3").await.unwrap_err();
        assert!(err.is_not_found());

        let err = repository.find_by_id("abc").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_id_and_language() {
        let repository = seeded_repository().await;

        let fr = repository.find_by_id_and_language("1", "fr").await.unwrap();
        assert_eq!(fr, "Bonjour, le monde!");

        let es = repository.find_by_id_and_language("2", "es").await.unwrap();
        assert_eq!(es, "¡Adiós!");
    }

    #[tokio::test]
    async fn test_find_by_id_and_language_missing_translation() {
        let repository = seeded_repository().await;

        let err = repository
            .find_by_id_and_language("1", "de")
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = repository
            .find_by_id_and_language("9", "fr")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_by_status() {
        let repository = seeded_repository().await;

        let mut found = ids(&repository.search_by_query("active", None).await.unwrap());
        found.sort_unstable();
        assert_eq!(found, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_search_by_phrase_prefix() {
        let repository = seeded_repository().await;

        let phrases = repository.search_by_query("Hello", None).await.unwrap();
        assert!(phrases.iter().any(|p| p.phrase.starts_with("Hello, world!")));

        let phrases = repository.search_by_query("Hello, wor", None).await.unwrap();
        assert_eq!(ids(&phrases), vec![1]);
    }

    #[tokio::test]
    async fn test_search_matches_translations() {
        let repository = seeded_repository().await;

        let phrases = repository.search_by_query("au rev", None).await.unwrap();
        assert_eq!(ids(&phrases), vec![2]);

        let phrases = repository.search_by_query("Hola", None).await.unwrap();
        assert_eq!(ids(&phrases), vec![1]);
    }

    #[tokio::test]
    async fn test_search_no_match() {
        let repository = seeded_repository().await;

        let err = repository
            .search_by_query("nonexistent-xyz", None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_with_sort() {
        let repository = seeded_repository().await;

        let desc = SortDirective::new(SortField::Id, SortDirection::Descending);
        let phrases = repository.search_by_query("active", Some(&desc)).await.unwrap();
        assert_eq!(ids(&phrases), vec![2, 1]);

        let asc = SortDirective::new(SortField::CreatedAt, SortDirection::Ascending);
        let phrases = repository.search_by_query("active", Some(&asc)).await.unwrap();
        assert_eq!(ids(&phrases), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_search_size_limits_hits() {
        let repository = seeded_repository().await.with_search_size(1);

        let phrases = repository.search_by_query("active", None).await.unwrap();
        assert_eq!(phrases.len(), 1);
    }

    #[tokio::test]
    async fn test_reseeding_is_idempotent() {
        let repository = seeded_repository().await;
        let seeds = SeedSet::from_json(SEEDS).unwrap();

        repository.ensure_index_exists().await.unwrap();
        repository.index_all(seeds.phrases()).await.unwrap();

        assert_eq!(repository.engine().document_count("phrases"), 2);
        let mut found = ids(&repository.search_by_query("active", None).await.unwrap());
        found.sort_unstable();
        assert_eq!(found, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_index_document_overwrites_by_id() {
        let repository = seeded_repository().await;
        let mut phrase = repository.find_by_id("2").await.unwrap().remove(0);
        phrase.status = PhraseStatus::Spam;

        repository.index_document(&phrase).await.unwrap();

        let phrases = repository.find_by_id("2").await.unwrap();
        assert_eq!(phrases[0].status, PhraseStatus::Spam);
        assert_eq!(repository.engine().document_count("phrases"), 2);
    }

    #[tokio::test]
    async fn test_malformed_source_is_backend_error() {
        let engine = Arc::new(MemoryEngine::new());
        let repository = PhraseRepository::with_default_index(Arc::clone(&engine));
        repository.ensure_index_exists().await.unwrap();
        engine
            .index("phrases", "5", json!({ "id": 5, "phrase": "broken" }))
            .await
            .unwrap();

        let err = repository.find_by_id("5").await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::Backend(BackendError::SerializationError { .. })
        ));
    }
}
