//! Query expansion and category detection.
//!
//! Expansion enriches a cleaned query with synonyms for its tokens and
//! 2-word phrases, deduplicated and capped. Category detection scans the
//! query against the taxonomy table; the first matching category in table
//! order wins — a deliberate simplicity choice, so ambiguous queries are
//! decided by table order (known limitation, see tests).

use crate::taxonomy::{contains_word, synonyms_for, CATEGORIES};

/// Cap on total terms (original + appended) in the expanded query.
const MAX_EXPANDED_TERMS: usize = 20;

/// Append synonym expansions to a cleaned query.
pub fn expand(clean_query: &str) -> String {
    let tokens: Vec<&str> = clean_query.split_whitespace().collect();
    if tokens.is_empty() {
        return String::new();
    }

    let mut terms: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

    // Single tokens, then adjacent 2-word phrases.
    let mut lookups: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    lookups.extend(tokens.windows(2).map(|pair| pair.join(" ")));

    'outer: for lookup in &lookups {
        if let Some(expansions) = synonyms_for(lookup) {
            for expansion in expansions {
                if terms.len() >= MAX_EXPANDED_TERMS {
                    break 'outer;
                }
                if !terms.iter().any(|t| t == expansion) {
                    terms.push(expansion.to_string());
                }
            }
        }
    }

    terms.join(" ")
}

/// Detect the likely category of a cleaned query.
///
/// First category in table order with a label or keyword hit wins.
pub fn detect_category(clean_query: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|c| {
            c.labels.iter().any(|l| contains_word(clean_query, l))
                || c.keywords.iter().any(|k| contains_word(clean_query, k))
        })
        .map(|c| c.key)
}
