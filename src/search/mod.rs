//! Search orchestration: indexing pipeline and the query surface.
//!
//! `search` never returns an error. Provider and index failures degrade the
//! response — text matching instead of semantic ranking, an explicit
//! `degraded` flag, and human-readable `reasons` — rather than failing.

pub mod expand;
pub mod score;

pub use score::{ScoreBreakdown, SearchResult};

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::{cache_key, TtlCache};
use crate::config::{EmbeddingConfig, SearchConfig};
use crate::content::{ContentRecord, ContentStore, RecordFilter};
use crate::embedding::{document, EmbeddingChain};
use crate::index::{RecordMetadata, VectorIndex};
use crate::taxonomy::{category_by_key, Category};
use crate::text;

/// Similarity assigned to text-match fallback results.
const TEXT_MATCH_SIMILARITY: f32 = 0.01;
/// Confidence reported for non-empty degraded results.
const DEGRADED_CONFIDENCE: f32 = 0.1;

/// Structured search response. `degraded` signals that a text-match fallback
/// produced the results — a soft notice for callers, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub reasons: Vec<String>,
    pub confidence: f32,
    pub degraded: bool,
}

impl SearchResponse {
    fn empty(reason: String) -> Self {
        Self {
            results: Vec::new(),
            reasons: vec![reason],
            confidence: 0.0,
            degraded: false,
        }
    }
}

/// Semantic search service: owns the indexing pipeline and the query path.
/// Collaborators are injected; all shared state lives behind its own lock.
pub struct SearchService {
    store: Arc<dyn ContentStore>,
    index: Arc<dyn VectorIndex>,
    chain: Arc<EmbeddingChain>,
    results_cache: Arc<TtlCache<SearchResponse>>,
    config: SearchConfig,
    min_document_chars: usize,
}

impl SearchService {
    pub fn new(
        store: Arc<dyn ContentStore>,
        index: Arc<dyn VectorIndex>,
        chain: Arc<EmbeddingChain>,
        results_cache: Arc<TtlCache<SearchResponse>>,
        config: SearchConfig,
        embedding_config: &EmbeddingConfig,
    ) -> Self {
        Self {
            store,
            index,
            chain,
            results_cache,
            config,
            min_document_chars: embedding_config.min_document_chars,
        }
    }

    // ── Indexing pipeline ─────────────────────────────────────────────────

    /// Embed and upsert one record. Returns `false` when the record's
    /// composed text is below the quality floor and was skipped.
    pub async fn index_record(&self, record: &ContentRecord) -> Result<bool> {
        let Some(doc) = document::build_document(record, self.min_document_chars) else {
            debug!(id = %record.id, "document below minimum length, skipping");
            return Ok(false);
        };

        let clean = text::preprocess(&doc);
        let vector = self.chain.embed(&clean).await;
        let metadata = RecordMetadata {
            title: record.title.clone(),
            category: record.category.clone(),
            description: record.description.clone(),
            pitch: record.pitch.clone(),
            tags: record.tags.clone(),
            views: record.views,
            likes: record.likes,
        };
        self.index.upsert(&record.id, &vector, metadata).await?;
        debug!(id = %record.id, "record indexed");
        Ok(true)
    }

    /// Drop a record's vector after the record is deleted.
    pub async fn remove_record(&self, id: &str) -> Result<()> {
        self.index.delete(id).await?;
        Ok(())
    }

    /// Re-index every record matching `filter`. Returns how many were
    /// actually indexed (skipped records excluded).
    pub async fn reindex(&self, filter: &RecordFilter) -> Result<usize> {
        let records = self.store.fetch_by_filter(filter).await?;
        let mut indexed = 0usize;
        for record in &records {
            if self.index_record(record).await? {
                indexed += 1;
            }
        }
        info!(total = records.len(), indexed, "reindex complete");
        Ok(indexed)
    }

    // ── Query path ────────────────────────────────────────────────────────

    /// Ranked semantic search. Never fails: provider trouble falls through
    /// the embedding chain, index trouble degrades to text matching.
    pub async fn search(&self, query: &str, limit: usize) -> SearchResponse {
        let limit = if limit == 0 {
            self.config.default_limit
        } else {
            limit
        };

        let key = cache_key(&["search", query, &limit.to_string()]);
        if let Some(hit) = self.results_cache.get(&key) {
            debug!("search cache hit");
            return hit;
        }

        let clean = text::preprocess(query);
        if clean.is_empty() {
            return SearchResponse::empty("Query contained no searchable terms".into());
        }

        let category = expand::detect_category(&clean).and_then(category_by_key);
        let expanded = expand::expand(&clean);
        let vector = self.chain.embed(&expanded).await;

        let top_k = (limit * self.config.candidate_multiplier).max(self.config.min_candidates);
        let response = match self.index.query(&vector, top_k).await {
            Ok(hits) => self.rank_candidates(hits, &clean, category, limit).await,
            Err(err) => {
                warn!(%err, "vector index query failed, degrading to text match");
                self.text_match_fallback(&clean, limit).await
            }
        };

        self.results_cache.insert(key, response.clone());
        response
    }

    async fn rank_candidates(
        &self,
        hits: Vec<crate::index::ScoredId>,
        clean: &str,
        category: Option<&'static Category>,
        limit: usize,
    ) -> SearchResponse {
        let ids: Vec<String> = hits.iter().map(|h| h.id.clone()).collect();
        let records = match self.store.fetch_by_ids(&ids).await {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "content store fetch failed");
                return self.text_match_fallback(clean, limit).await;
            }
        };

        let mut candidates: Vec<(ContentRecord, f32)> = Vec::with_capacity(records.len());
        for record in records {
            let base = hits
                .iter()
                .find(|h| h.id == record.id)
                .map(|h| h.score)
                .unwrap_or(0.0);
            candidates.push((record, base));
        }

        let ranked = score::filter_and_rank(candidates, clean, category, limit);
        if ranked.is_empty() {
            debug!("no candidates survived relevance filtering");
            return self.text_match_fallback(clean, limit).await;
        }

        let mut reasons = vec![format!("Semantic matches for '{clean}'")];
        if let Some(category) = category {
            reasons.push(format!("Filtered to {}-related startups", category.key));
        }
        let confidence = ranked[0].similarity.clamp(0.0, 1.0);
        SearchResponse {
            results: ranked,
            reasons,
            confidence,
            degraded: false,
        }
    }

    /// Degraded path: lightweight text matching against the content store,
    /// nominal similarity, explicit flag.
    async fn text_match_fallback(&self, clean: &str, limit: usize) -> SearchResponse {
        let records = match self.store.text_match(clean, limit).await {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "text match fallback failed");
                return SearchResponse {
                    results: Vec::new(),
                    reasons: vec![format!("No results available for '{clean}'")],
                    confidence: 0.0,
                    degraded: true,
                };
            }
        };

        if records.is_empty() {
            return SearchResponse {
                results: Vec::new(),
                reasons: vec![format!("No results found for '{clean}'")],
                confidence: 0.0,
                degraded: true,
            };
        }

        let results: Vec<SearchResult> = records
            .into_iter()
            .map(|record| SearchResult {
                record,
                similarity: TEXT_MATCH_SIMILARITY,
                breakdown: ScoreBreakdown::default(),
            })
            .collect();

        SearchResponse {
            results,
            reasons: vec![
                "No strong semantic matches; showing text matches instead".to_string(),
            ],
            confidence: DEGRADED_CONFIDENCE,
            degraded: true,
        }
    }
}
