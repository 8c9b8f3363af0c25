#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use pitchscout::cache::TtlCache;
use pitchscout::config::{EmbeddingConfig, RecommendConfig, SearchConfig};
use pitchscout::content::{ContentRecord, InMemoryContentStore};
use pitchscout::embedding::EmbeddingChain;
use pitchscout::error::IndexError;
use pitchscout::index::{InMemoryVectorIndex, RecordMetadata, ScoredId, VectorIndex};
use pitchscout::ratelimit::SlidingWindowLimiter;
use pitchscout::recommend::RecommendationEngine;
use pitchscout::search::SearchService;

pub const DIM: usize = 768;

/// Build a startup record with sensible defaults for the remaining fields.
pub fn record(id: &str, title: &str, category: &str, description: &str, pitch: &str) -> ContentRecord {
    ContentRecord {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        pitch: pitch.to_string(),
        tags: Vec::new(),
        author_id: "author-1".to_string(),
        created_at: Utc::now(),
        views: 10,
        likes: 1,
        dislikes: 0,
        website: None,
        socials: Vec::new(),
    }
}

/// A small cross-category corpus used by the search and recommendation tests.
pub fn sample_corpus() -> Vec<ContentRecord> {
    let mut medi = record(
        "medi",
        "MediScan AI",
        "healthtech",
        "Automated diagnosis for rural health clinics and doctors",
        "AI diagnosis support for clinics",
    );
    medi.views = 5_000;
    medi.likes = 120;

    let mut farm = record(
        "farm",
        "FarmBot",
        "agritech",
        "Soil sensors improving crop yield on organic vegetable farms",
        "precision farming for smallholders",
    );
    farm.views = 2_000;
    farm.likes = 40;

    let mut pay = record(
        "pay",
        "PayFlow",
        "fintech",
        "Mobile banking wallet with instant payments and lending",
        "banking for the underbanked",
    );
    pay.views = 12_000;
    pay.likes = 300;

    let mut care = record(
        "care",
        "RemoteCare",
        "healthtech",
        "Remote patient monitoring for chronic conditions",
        "telemedicine for patients at home",
    );
    care.views = 800;
    care.likes = 25;

    let mut game = record(
        "game",
        "GameVault",
        "gaming",
        "Multiplayer esports arena platform",
        "competitive gaming for everyone",
    );
    game.views = 20_000;
    game.likes = 90;

    vec![medi, farm, pay, care, game]
}

/// Chain with no remote providers: every embed resolves through the
/// deterministic hash fallback, which keeps tests hermetic.
pub fn hash_only_chain() -> Arc<EmbeddingChain> {
    Arc::new(EmbeddingChain::new(
        vec![],
        Arc::new(SlidingWindowLimiter::new(100, Duration::from_secs(60))),
        Arc::new(TtlCache::new(100, Duration::from_secs(60))),
        DIM,
    ))
}

/// A search service over an in-memory store and index, with the given
/// records loaded and indexed.
pub async fn search_service(
    records: Vec<ContentRecord>,
) -> (SearchService, Arc<InMemoryContentStore>, Arc<InMemoryVectorIndex>) {
    let store = InMemoryContentStore::new();
    let index = Arc::new(InMemoryVectorIndex::new(DIM));
    let service = SearchService::new(
        store.clone(),
        index.clone(),
        hash_only_chain(),
        Arc::new(TtlCache::new(100, Duration::from_secs(60))),
        SearchConfig::default(),
        &EmbeddingConfig::default(),
    );
    for r in records {
        store.put(r.clone()).await;
        service.index_record(&r).await.unwrap();
    }
    (service, store, index)
}

/// A recommendation engine over the same in-memory collaborators.
pub async fn recommend_engine(
    records: Vec<ContentRecord>,
) -> (RecommendationEngine, Arc<InMemoryContentStore>) {
    let store = InMemoryContentStore::new();
    let index = Arc::new(InMemoryVectorIndex::new(DIM));
    let chain = hash_only_chain();

    let search = SearchService::new(
        store.clone(),
        index.clone(),
        chain.clone(),
        Arc::new(TtlCache::new(100, Duration::from_secs(60))),
        SearchConfig::default(),
        &EmbeddingConfig::default(),
    );
    for r in records {
        store.put(r.clone()).await;
        search.index_record(&r).await.unwrap();
    }

    let engine = RecommendationEngine::new(
        store.clone(),
        index,
        chain,
        RecommendConfig::default(),
    );
    (engine, store)
}

/// Vector index double where every operation fails, for degradation tests.
pub struct BrokenIndex;

#[async_trait]
impl VectorIndex for BrokenIndex {
    async fn upsert(
        &self,
        _id: &str,
        _vector: &[f32],
        _metadata: RecordMetadata,
    ) -> Result<(), IndexError> {
        Err(IndexError::Unavailable("index offline".to_string()))
    }

    async fn query(&self, _vector: &[f32], _top_k: usize) -> Result<Vec<ScoredId>, IndexError> {
        Err(IndexError::Unavailable("index offline".to_string()))
    }

    async fn delete(&self, _id: &str) -> Result<(), IndexError> {
        Err(IndexError::Unavailable("index offline".to_string()))
    }

    fn dimensions(&self) -> usize {
        DIM
    }
}

/// Search service whose index always fails, with records still reachable
/// through the content store's text matching.
pub async fn degraded_search_service(
    records: Vec<ContentRecord>,
) -> (SearchService, Arc<InMemoryContentStore>) {
    let store = InMemoryContentStore::new();
    for r in records {
        store.put(r).await;
    }
    let service = SearchService::new(
        store.clone(),
        Arc::new(BrokenIndex),
        hash_only_chain(),
        Arc::new(TtlCache::new(100, Duration::from_secs(60))),
        SearchConfig::default(),
        &EmbeddingConfig::default(),
    );
    (service, store)
}
