//! Text preprocessing for queries and embedding documents.
//!
//! Pure and deterministic, no I/O. Strips markup, expands contractions,
//! drops noise words, and collapses whitespace so the same input always
//! produces the same cleaned output. Empty input returns empty output.

use crate::taxonomy::{is_stopword, CONTRACTIONS, FILLER_PHRASES};

/// Normalize raw content or query text for embedding and matching.
///
/// Steps, in order: strip HTML tags and common entities, lowercase, expand
/// contractions, remove filler phrases and stopwords, collapse whitespace.
pub fn preprocess(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let stripped = strip_markup(text);
    let mut lowered = stripped.to_lowercase();

    for (contraction, expansion) in CONTRACTIONS {
        if lowered.contains(contraction) {
            lowered = replace_word(&lowered, contraction, expansion);
        }
    }
    for phrase in FILLER_PHRASES {
        if lowered.contains(phrase) {
            lowered = lowered.replace(phrase, " ");
        }
    }

    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !is_stopword(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Tokenize already-cleaned text into meaningful words.
pub fn meaningful_tokens(clean: &str) -> Vec<&str> {
    clean
        .split_whitespace()
        .filter(|t| t.len() > 1 && !is_stopword(t))
        .collect()
}

/// Remove HTML/markup tags and decode the entities that show up in scraped
/// pitch text. Tags become spaces so adjacent words stay separated.
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

/// Replace `from` with `to` only at word boundaries.
fn replace_word(text: &str, from: &str, to: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find(from) {
        let before_ok = pos == 0
            || rest[..pos]
                .chars()
                .next_back()
                .is_some_and(|c| !c.is_alphanumeric());
        let after = &rest[pos + from.len()..];
        let after_ok = after
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric() && c != '\'');
        out.push_str(&rest[..pos]);
        if before_ok && after_ok {
            out.push_str(to);
        } else {
            out.push_str(from);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}
