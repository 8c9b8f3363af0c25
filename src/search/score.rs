//! Relevance filtering and scoring of search candidates.
//!
//! Two gates, then boosts, then rank:
//! 1. category gate — with a detected category, a candidate must carry an
//!    allowed label or a relevant keyword, and must not hit the category's
//!    hard-exclusion list;
//! 2. token-overlap gate — at least one meaningful query token must appear
//!    in the candidate's combined text, regardless of category;
//! 3. boosts — exact phrase, pitch-token (weighted above title/description
//!    matches), and category match, each recorded individually for
//!    explainability.

use serde::Serialize;

use crate::content::ContentRecord;
use crate::taxonomy::{contains_word, Category};
use crate::text::meaningful_tokens;

/// Boost for the full cleaned query appearing verbatim in the candidate.
pub const EXACT_PHRASE_BOOST: f32 = 0.10;
/// Boost for a query token appearing in the pitch text specifically.
pub const PITCH_TOKEN_BOOST: f32 = 0.15;
/// Boost for a candidate whose category label matches the detected category.
pub const CATEGORY_MATCH_BOOST: f32 = 0.05;

/// Individual boost contributions behind a final ranking, for
/// explainability and testing.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ScoreBreakdown {
    pub exact_phrase: f32,
    pub pitch_token: f32,
    pub category_match: f32,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f32 {
        self.exact_phrase + self.pitch_token + self.category_match
    }
}

/// A ranked search hit: the record, its final similarity, and the boosts
/// that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub record: ContentRecord,
    pub similarity: f32,
    pub breakdown: ScoreBreakdown,
}

/// Filter candidates against the query and detected category, apply boosts,
/// and rank. `candidates` pair each record with its base similarity from the
/// vector index.
pub fn filter_and_rank(
    candidates: Vec<(ContentRecord, f32)>,
    clean_query: &str,
    category: Option<&'static Category>,
    limit: usize,
) -> Vec<SearchResult> {
    let query_tokens = meaningful_tokens(clean_query);

    let mut ranked: Vec<SearchResult> = candidates
        .into_iter()
        .filter_map(|(record, base)| {
            let combined = record.combined_text();

            if let Some(category) = category {
                if !passes_category_gate(&combined, category) {
                    return None;
                }
            }

            // Category-independent tightening: at least one meaningful query
            // token must appear somewhere in the candidate.
            if !query_tokens.is_empty()
                && !query_tokens.iter().any(|t| contains_word(&combined, t))
            {
                return None;
            }

            let breakdown = compute_boosts(&record, &combined, clean_query, &query_tokens, category);
            Some(SearchResult {
                similarity: base + breakdown.total(),
                breakdown,
                record,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

/// A candidate passes when it carries an allowed label or relevant keyword
/// and avoids the category's hard exclusions. Labels match on word
/// boundaries, same as detection ("media" must not hit "immediately").
fn passes_category_gate(combined: &str, category: &Category) -> bool {
    let labeled = category.labels.iter().any(|l| contains_word(combined, l))
        || category.keywords.iter().any(|k| contains_word(combined, k));
    if !labeled {
        return false;
    }
    !category
        .exclusions
        .iter()
        .any(|e| contains_word(combined, e))
}

fn compute_boosts(
    record: &ContentRecord,
    combined: &str,
    clean_query: &str,
    query_tokens: &[&str],
    category: Option<&Category>,
) -> ScoreBreakdown {
    let mut breakdown = ScoreBreakdown::default();

    if !clean_query.is_empty() && combined.contains(clean_query) {
        breakdown.exact_phrase = EXACT_PHRASE_BOOST;
    }

    let pitch = record.pitch.to_lowercase();
    if query_tokens.iter().any(|t| contains_word(&pitch, t)) {
        breakdown.pitch_token = PITCH_TOKEN_BOOST;
    }

    if let Some(category) = category {
        let label = record.category.to_lowercase();
        if category.labels.contains(&label.as_str()) {
            breakdown.category_match = CATEGORY_MATCH_BOOST;
        }
    }

    breakdown
}
