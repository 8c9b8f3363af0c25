//! Semantic search and recommendations for startup directories.
//!
//! Pitchscout turns startup records into embedding vectors through a chain of
//! unreliable external providers, runs similarity search with query expansion
//! and category-aware relevance filtering, and computes personalized
//! recommendations from weighted behavioral signals — all under per-provider
//! rate limits, with TTL caching, and with fallbacks that cannot fail.
//!
//! # Architecture
//!
//! - **Embeddings**: ordered provider chain ([`embedding::EmbeddingChain`])
//!   over HTTP backends, terminating in a deterministic hash embedding that
//!   always succeeds
//! - **Search**: preprocess → expand → embed → vector query → category gate →
//!   boost → rank, degrading to plain text matching instead of erroring
//! - **Recommendations**: weighted save/interest/like/comment signals folded
//!   into a synthetic preference vector, backfilled from popularity
//! - **Collaborators**: the content store and the vector index are external
//!   systems consumed through async traits
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`text`] — Pure text preprocessing for queries and documents
//! - [`ratelimit`] — Sliding-window call budgets per provider
//! - [`cache`] — Time-boxed, size-bounded memoization
//! - [`content`] — Startup record model and the content-store interface
//! - [`index`] — Vector index interface and in-memory reference implementation
//! - [`embedding`] — Provider chain, remote backends, hash fallback
//! - [`search`] — Query expansion, relevance scoring, search orchestration
//! - [`taxonomy`] — Immutable category, synonym, and stopword tables
//! - [`recommend`] — Behavioral-signal personalization with popularity fallback

use tracing_subscriber::EnvFilter;

pub mod cache;
pub mod config;
pub mod content;
pub mod embedding;
pub mod error;
pub mod index;
pub mod ratelimit;
pub mod recommend;
pub mod search;
pub mod taxonomy;
pub mod text;

/// Initialize tracing for embedding hosts that don't bring their own
/// subscriber. `log_level` accepts any `EnvFilter` directive; invalid
/// directives fall back to `info`. Logs go to stderr.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
