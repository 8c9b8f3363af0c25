//! Personalized recommendations from weighted behavioral signals.
//!
//! A user's saved/interested/liked/commented records are folded into a
//! synthetic preference corpus (each record's text repeated by its signal
//! weight), embedded, and matched against the vector index. Disliked and
//! already-liked records are excluded, preferred categories get a small
//! boost, and sparse results are backfilled from popularity. `recommend`
//! never fails — it degrades to the popularity ranking.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RecommendConfig;
use crate::content::{ContentRecord, ContentStore, UserSignals};
use crate::embedding::EmbeddingChain;
use crate::index::VectorIndex;
use crate::search::{ScoreBreakdown, SearchResult};
use crate::text;

/// Signal weights: how strongly each behavior counts toward preference.
const SAVED_WEIGHT: usize = 3;
const INTERESTED_WEIGHT: usize = 3;
const LIKED_WEIGHT: usize = 2;
const COMMENTED_WEIGHT: usize = 1;

/// Flat similarity assigned to popularity-ranked results.
const POPULARITY_SIMILARITY: f32 = 0.5;

/// Structured recommendation response.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendResponse {
    pub results: Vec<SearchResult>,
    pub reasons: Vec<String>,
    pub confidence: f32,
}

pub struct RecommendationEngine {
    store: Arc<dyn ContentStore>,
    index: Arc<dyn VectorIndex>,
    chain: Arc<EmbeddingChain>,
    config: RecommendConfig,
}

impl RecommendationEngine {
    pub fn new(
        store: Arc<dyn ContentStore>,
        index: Arc<dyn VectorIndex>,
        chain: Arc<EmbeddingChain>,
        config: RecommendConfig,
    ) -> Self {
        Self {
            store,
            index,
            chain,
            config,
        }
    }

    /// Personalized ranking for `user_id`. Degrades to the popularity
    /// ranking on sparse signal or collaborator failure; never errors.
    pub async fn recommend(&self, user_id: &str, limit: usize) -> RecommendResponse {
        let limit = limit.max(1);

        let signals = match self.store.user_signals(user_id).await {
            Ok(signals) => signals,
            Err(err) => {
                warn!(%err, "signal fetch failed, using popularity fallback");
                return self.popularity_fallback(limit, &HashSet::new()).await;
            }
        };

        if signals.is_cold() {
            debug!(user_id, "no positive signal, using popularity fallback");
            return self.popularity_fallback(limit, &HashSet::new()).await;
        }

        match self.personalized(&signals, limit).await {
            Some(response) => response,
            None => self.popularity_fallback(limit, &exclusions(&signals)).await,
        }
    }

    /// The personalization path; `None` means degrade to popularity.
    async fn personalized(&self, signals: &UserSignals, limit: usize) -> Option<RecommendResponse> {
        let weighted: Vec<(&[String], usize)> = vec![
            (&signals.saved, SAVED_WEIGHT),
            (&signals.interested, INTERESTED_WEIGHT),
            (&signals.liked, LIKED_WEIGHT),
            (&signals.commented, COMMENTED_WEIGHT),
        ];

        let mut wanted: Vec<String> = Vec::new();
        for (ids, _) in &weighted {
            wanted.extend(ids.iter().cloned());
        }
        wanted.dedup();

        let positives = match self.store.fetch_by_ids(&wanted).await {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "positive record fetch failed");
                return None;
            }
        };
        if positives.is_empty() {
            return None;
        }
        let by_id: HashMap<&str, &ContentRecord> =
            positives.iter().map(|r| (r.id.as_str(), r)).collect();

        // Naive frequency weighting: repeat each record's text `weight`
        // times so heavier signals dominate the synthetic embedding.
        let mut corpus = String::new();
        let mut category_weights: HashMap<String, usize> = HashMap::new();
        for (ids, weight) in &weighted {
            for id in ids.iter() {
                let Some(record) = by_id.get(id.as_str()) else {
                    continue;
                };
                let record_text = record.combined_text();
                for _ in 0..*weight {
                    corpus.push_str(&record_text);
                    corpus.push(' ');
                }
                *category_weights
                    .entry(record.category.to_lowercase())
                    .or_default() += weight;
            }
        }

        let preferred = preferred_categories(&category_weights, self.config.preferred_categories);
        let vector = self.chain.embed(&text::preprocess(&corpus)).await;

        let top_k = (limit * self.config.candidate_multiplier).max(self.config.min_candidates);
        let hits = match self.index.query(&vector, top_k).await {
            Ok(hits) => hits,
            Err(err) => {
                warn!(%err, "vector index query failed");
                return None;
            }
        };

        // Exclude disliked and already-liked records.
        let excluded = exclusions(signals);
        let candidate_ids: Vec<String> = hits
            .iter()
            .filter(|h| !excluded.contains(h.id.as_str()))
            .take(limit * 5)
            .map(|h| h.id.clone())
            .collect();

        let records = match self.store.fetch_by_ids(&candidate_ids).await {
            Ok(records) => records,
            Err(err) => {
                warn!(%err, "candidate fetch failed");
                return None;
            }
        };

        let mut results: Vec<SearchResult> = records
            .into_iter()
            .map(|record| {
                let base = hits
                    .iter()
                    .find(|h| h.id == record.id)
                    .map(|h| h.score)
                    .unwrap_or(0.0);
                let mut breakdown = ScoreBreakdown::default();
                if preferred.contains(&record.category.to_lowercase()) {
                    breakdown.category_match = self.config.category_boost;
                }
                SearchResult {
                    similarity: base + breakdown.total(),
                    breakdown,
                    record,
                }
            })
            .collect();

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);

        let mut reasons = signal_reasons(signals);
        let mut confidence = results
            .first()
            .map(|r| r.similarity.clamp(0.0, 1.0))
            .unwrap_or(0.0);

        // Backfill from popularity when personalization came up short.
        if results.len() < limit {
            let mut present: HashSet<String> =
                results.iter().map(|r| r.record.id.clone()).collect();
            present.extend(excluded.iter().map(|s| s.to_string()));

            let backfill = self
                .popularity_results(limit - results.len(), &present)
                .await;
            if !backfill.is_empty() {
                reasons.push("Popular startups to round out your feed".to_string());
                results.extend(backfill);
            }
            confidence = confidence.max(if results.is_empty() { 0.0 } else { 0.1 });
        }

        Some(RecommendResponse {
            results,
            reasons,
            confidence,
        })
    }

    // ── Popularity fallback ───────────────────────────────────────────────

    async fn popularity_results(
        &self,
        limit: usize,
        exclude: &HashSet<String>,
    ) -> Vec<SearchResult> {
        // Over-fetch so exclusions don't starve the fill.
        let fetch = limit + exclude.len();
        match self.store.top_by_popularity(fetch).await {
            Ok(records) => records
                .into_iter()
                .filter(|r| !exclude.contains(&r.id))
                .take(limit)
                .map(|record| SearchResult {
                    record,
                    similarity: POPULARITY_SIMILARITY,
                    breakdown: ScoreBreakdown::default(),
                })
                .collect(),
            Err(err) => {
                warn!(%err, "popularity fetch failed");
                Vec::new()
            }
        }
    }

    async fn popularity_fallback(
        &self,
        limit: usize,
        exclude: &HashSet<String>,
    ) -> RecommendResponse {
        let results = self.popularity_results(limit, exclude).await;
        let confidence = if results.is_empty() {
            0.0
        } else {
            POPULARITY_SIMILARITY
        };
        RecommendResponse {
            results,
            reasons: vec!["Popular startups to get you started".to_string()],
            confidence,
        }
    }
}

/// Ids never recommended back: disliked and already-liked records.
fn exclusions(signals: &UserSignals) -> HashSet<String> {
    signals
        .disliked
        .iter()
        .chain(signals.liked.iter())
        .cloned()
        .collect()
}

/// Top categories by summed signal weight, as lowercase labels.
fn preferred_categories(weights: &HashMap<String, usize>, take: usize) -> Vec<String> {
    let mut ordered: Vec<(&String, &usize)> = weights.iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
    ordered
        .into_iter()
        .take(take)
        .map(|(category, _)| category.clone())
        .collect()
}

/// Human-readable descriptions of which signals drove the result.
fn signal_reasons(signals: &UserSignals) -> Vec<String> {
    let mut reasons = Vec::new();
    if !signals.saved.is_empty() {
        reasons.push("Based on your saved startups".to_string());
    }
    if !signals.interested.is_empty() {
        reasons.push("Based on startups you marked interesting".to_string());
    }
    if !signals.liked.is_empty() {
        reasons.push("Based on startups you liked".to_string());
    }
    if !signals.commented.is_empty() {
        reasons.push("Based on startups you commented on".to_string());
    }
    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferred_categories_ordered_by_weight() {
        let mut weights = HashMap::new();
        weights.insert("healthtech".to_string(), 6);
        weights.insert("fintech".to_string(), 3);
        weights.insert("gaming".to_string(), 9);
        weights.insert("agritech".to_string(), 1);

        let top = preferred_categories(&weights, 3);
        assert_eq!(top, vec!["gaming", "healthtech", "fintech"]);
    }

    #[test]
    fn preferred_categories_tie_breaks_alphabetically() {
        let mut weights = HashMap::new();
        weights.insert("b".to_string(), 2);
        weights.insert("a".to_string(), 2);
        let top = preferred_categories(&weights, 2);
        assert_eq!(top, vec!["a", "b"]);
    }

    #[test]
    fn exclusions_cover_disliked_and_liked() {
        let signals = UserSignals {
            saved: vec!["s1".into()],
            liked: vec!["l1".into()],
            disliked: vec!["d1".into()],
            ..Default::default()
        };
        let excluded = exclusions(&signals);
        assert!(excluded.contains("d1"));
        assert!(excluded.contains("l1"));
        assert!(!excluded.contains("s1"));
    }

    #[test]
    fn reasons_name_present_signals_only() {
        let signals = UserSignals {
            saved: vec!["s1".into()],
            commented: vec!["c1".into()],
            ..Default::default()
        };
        let reasons = signal_reasons(&signals);
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].contains("saved"));
        assert!(reasons[1].contains("commented"));
    }
}
