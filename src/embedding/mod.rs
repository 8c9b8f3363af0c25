//! Text-to-vector embedding pipeline.
//!
//! Provides the [`EmbeddingProvider`] trait, the [`EmbeddingChain`] that
//! attempts providers strictly in priority order, and the deterministic
//! [`hash::hash_embedding`] terminal fallback that can never fail. Remote
//! results are fitted to the configured dimension and memoized in a shared
//! TTL cache.

pub mod document;
pub mod hash;
pub mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::{cache_key, TtlCache};
use crate::config::EmbeddingConfig;
use crate::error::EmbedError;
use crate::ratelimit::SlidingWindowLimiter;

/// Trait for embedding text into vectors.
///
/// Implementations may fail; the chain recovers by moving to the next
/// provider. The provider name doubles as its rate-limiter key.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
}

/// Ordered embedding backends with a guaranteed-non-failing terminal step.
///
/// Attempt order: each configured remote provider (gated by the shared rate
/// limiter under its own name), then the deterministic hash embedding.
/// `embed` therefore always returns a vector of exactly `dimensions`
/// components.
pub struct EmbeddingChain {
    providers: Vec<Box<dyn EmbeddingProvider>>,
    limiter: Arc<SlidingWindowLimiter>,
    cache: Arc<TtlCache<Vec<f32>>>,
    dimensions: usize,
}

impl EmbeddingChain {
    pub fn new(
        providers: Vec<Box<dyn EmbeddingProvider>>,
        limiter: Arc<SlidingWindowLimiter>,
        cache: Arc<TtlCache<Vec<f32>>>,
        dimensions: usize,
    ) -> Self {
        Self {
            providers,
            limiter,
            cache,
            dimensions,
        }
    }

    /// Build the chain from config: one HTTP provider per configured entry,
    /// in order. Providers that fail to construct are skipped with a warning
    /// — the hash fallback keeps the chain total.
    pub fn from_config(
        config: &EmbeddingConfig,
        limiter: Arc<SlidingWindowLimiter>,
        cache: Arc<TtlCache<Vec<f32>>>,
    ) -> Self {
        let mut providers: Vec<Box<dyn EmbeddingProvider>> = Vec::new();
        for provider_config in &config.providers {
            match remote::HttpEmbeddingProvider::from_config(provider_config) {
                Ok(provider) => providers.push(Box::new(provider)),
                Err(err) => {
                    warn!(provider = %provider_config.name, %err, "skipping provider");
                }
            }
        }
        Self::new(providers, limiter, cache, config.dimension)
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Embed `text`, never failing.
    ///
    /// Cached by text content. Providers are attempted sequentially; a later
    /// provider is only invoked after the prior one failed, so request
    /// latency is bounded by the sum of provider timeouts.
    pub async fn embed(&self, text: &str) -> Vec<f32> {
        let key = cache_key(&["embed", text]);
        if let Some(hit) = self.cache.get(&key) {
            debug!("embedding cache hit");
            return hit;
        }

        let vector = self.embed_uncached(text).await;
        self.cache.insert(key, vector.clone());
        vector
    }

    async fn embed_uncached(&self, text: &str) -> Vec<f32> {
        for provider in &self.providers {
            // The fallback still asks permission under its own name: a
            // saturated provider blocks only its own calls.
            if !self.limiter.try_acquire(provider.name()) {
                let err = EmbedError::RateLimited {
                    provider: provider.name().to_string(),
                };
                warn!(provider = provider.name(), %err, "provider skipped");
                continue;
            }
            match provider.embed(text).await {
                Ok(vector) => {
                    debug!(provider = provider.name(), "embedding from remote provider");
                    return fit_dimension(vector, self.dimensions);
                }
                Err(err) => {
                    warn!(provider = provider.name(), %err, "provider failed, falling through");
                }
            }
        }

        debug!("all providers exhausted, using hash embedding");
        hash::hash_embedding(text, self.dimensions)
    }
}

/// Pad with zeros or truncate so the vector has exactly `dimensions`
/// components — the index dimension is fixed for its lifetime.
pub fn fit_dimension(mut vector: Vec<f32>, dimensions: usize) -> Vec<f32> {
    vector.resize(dimensions, 0.0);
    vector
}
