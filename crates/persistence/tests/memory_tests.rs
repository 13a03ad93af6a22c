//! Memory engine tests over the bundled seed file.

use std::path::PathBuf;
use std::sync::Arc;

use phrasebook_persistence::backends::memory::MemoryEngine;
use phrasebook_persistence::{PhraseRepository, PhraseStatus, SeedSet, SortDirective, bootstrap};

fn seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.join("data").join("phrases.json"))
        .unwrap_or_else(|| PathBuf::from("data/phrases.json"))
}

async fn create_repository() -> (Arc<MemoryEngine>, PhraseRepository<MemoryEngine>) {
    let engine = Arc::new(MemoryEngine::new());
    let repository = PhraseRepository::with_default_index(Arc::clone(&engine));
    let seeds = SeedSet::from_file(seed_path()).await.unwrap();
    bootstrap(&repository, &seeds).await.unwrap();
    (engine, repository)
}

#[tokio::test]
async fn test_bundled_seed_file_loads() {
    let seeds = SeedSet::from_file(seed_path()).await.unwrap();
    assert_eq!(seeds.len(), 2);
    assert!(
        seeds
            .phrases()
            .iter()
            .all(|p| p.status == PhraseStatus::Active)
    );
}

#[tokio::test]
async fn test_lookup_and_translation() {
    let (_, repository) = create_repository().await;

    let phrases = repository.find_by_id("2").await.unwrap();
    assert_eq!(phrases[0].phrase, "Goodbye!");

    let spanish = repository.find_by_id_and_language("2", "es").await.unwrap();
    assert_eq!(spanish, "¡Adiós!");
}

#[tokio::test]
async fn test_search_sorted_by_created_at_desc() {
    let (_, repository) = create_repository().await;

    let sort: SortDirective = "createdAt:desc".parse().unwrap();
    let phrases = repository
        .search_by_query("active", Some(&sort))
        .await
        .unwrap();

    let ids: Vec<u32> = phrases.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn test_repeated_bootstrap_does_not_duplicate() {
    let (engine, repository) = create_repository().await;
    let seeds = SeedSet::from_file(seed_path()).await.unwrap();

    bootstrap(&repository, &seeds).await.unwrap();
    bootstrap(&repository, &seeds).await.unwrap();

    assert_eq!(engine.document_count("phrases"), 2);
}
