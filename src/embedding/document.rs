//! Embedding-text construction for startup records.
//!
//! The composed document concatenates labeled fields plus derived semantic
//! enrichment (category keyword expansion, business-model indicators, an
//! engagement-tier descriptor). The enrichment compensates for the weakness
//! of the hash fallback embedding on short texts. Records whose composed
//! text is too short are skipped entirely — not embedded, not indexed.

use crate::content::ContentRecord;
use crate::taxonomy::{BUSINESS_MODELS, CATEGORIES};

/// Number of category keywords appended during expansion.
const CATEGORY_KEYWORD_CAP: usize = 8;

/// Compose the embedding document for a record.
///
/// Returns `None` when the composed text is shorter than `min_chars`
/// (low-quality content, skipped by the indexing pipeline).
pub fn build_document(record: &ContentRecord, min_chars: usize) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();

    if !record.title.trim().is_empty() {
        parts.push(format!("Startup: {}", record.title.trim()));
    }
    if !record.category.trim().is_empty() {
        parts.push(format!("Category: {}", record.category.trim()));
    }
    if !record.description.trim().is_empty() {
        parts.push(format!("Description: {}", record.description.trim()));
    }
    if !record.pitch.trim().is_empty() {
        parts.push(format!("Pitch: {}", record.pitch.trim()));
    }
    if !record.tags.is_empty() {
        parts.push(format!("Tags: {}", record.tags.join(", ")));
    }
    if let Some(website) = record.website.as_deref() {
        if !website.trim().is_empty() {
            parts.push(format!("Website: {}", website.trim()));
        }
    }

    let lower = record.combined_text();

    if let Some(expansion) = category_expansion(&record.category) {
        parts.push(expansion);
    }
    for (trigger, phrase) in BUSINESS_MODELS {
        if lower.contains(trigger) {
            parts.push(phrase.to_string());
        }
    }
    parts.push(engagement_tier(record).to_string());

    let document = parts.join(". ");
    if document.len() < min_chars {
        return None;
    }
    Some(document)
}

/// Keywords related to the record's category label, for semantic enrichment.
fn category_expansion(category_label: &str) -> Option<String> {
    let label = category_label.trim().to_lowercase();
    if label.is_empty() {
        return None;
    }
    let category = CATEGORIES
        .iter()
        .find(|c| c.labels.contains(&label.as_str()))?;
    let keywords: Vec<&str> = category
        .keywords
        .iter()
        .take(CATEGORY_KEYWORD_CAP)
        .copied()
        .collect();
    Some(format!("Related: {}", keywords.join(", ")))
}

/// Coarse descriptor of audience traction, derived from views and likes.
fn engagement_tier(record: &ContentRecord) -> &'static str {
    let score = record.views + record.likes * 10;
    if score >= 10_000 {
        "widely adopted popular startup with strong traction"
    } else if score >= 1_000 {
        "growing startup with early traction"
    } else {
        "early stage startup"
    }
}
