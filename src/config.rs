use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PitchscoutConfig {
    pub log_level: String,
    pub embedding: EmbeddingConfig,
    pub cache: CacheConfig,
    pub rate_limit: RateLimitConfig,
    pub search: SearchConfig,
    pub recommend: RecommendConfig,
}

/// Embedding pipeline: vector dimension, provider order, quality floor.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Fixed dimension of every vector written to or read from the index.
    pub dimension: usize,
    /// Remote providers, attempted in order. Empty list means hash-only.
    pub providers: Vec<ProviderConfig>,
    /// Records whose composed embedding text is shorter than this are skipped.
    pub min_document_chars: usize,
}

/// One remote embedding backend.
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Provider name; doubles as the rate-limiter key.
    pub name: String,
    pub base_url: String,
    /// Env var holding the API key (never the key itself).
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Model ids tried in order before the chain moves to the next provider.
    pub models: Vec<String>,
    #[serde(default = "default_provider_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub embedding_max_entries: usize,
    pub embedding_ttl_secs: u64,
    pub search_max_entries: usize,
    pub search_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Calls allowed per provider within the trailing window.
    pub max_calls: usize,
    pub window_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub default_limit: usize,
    /// Candidates fetched from the index per requested result.
    pub candidate_multiplier: usize,
    /// Floor on candidates fetched from the index.
    pub min_candidates: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RecommendConfig {
    /// Candidates fetched per requested recommendation.
    pub candidate_multiplier: usize,
    /// Floor on candidates fetched from the index.
    pub min_candidates: usize,
    /// Additive boost for candidates in the user's preferred categories.
    pub category_boost: f32,
    /// Number of top preferred categories considered.
    pub preferred_categories: usize,
}

impl Default for PitchscoutConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            embedding: EmbeddingConfig::default(),
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::default(),
            search: SearchConfig::default(),
            recommend: RecommendConfig::default(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            dimension: 768,
            providers: Vec::new(),
            min_document_chars: 30,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            embedding_max_entries: 1000,
            embedding_ttl_secs: 300,
            search_max_entries: 1000,
            search_ttl_secs: 300,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_calls: 5,
            window_secs: 60,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            candidate_multiplier: 3,
            min_candidates: 30,
        }
    }
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            candidate_multiplier: 10,
            min_candidates: 50,
            category_boost: 0.05,
            preferred_categories: 3,
        }
    }
}

impl PitchscoutConfig {
    /// Load from a TOML file (if it exists) then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            PitchscoutConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    /// (PITCHSCOUT_LOG_LEVEL, PITCHSCOUT_DIMENSION, PITCHSCOUT_MAX_CALLS).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PITCHSCOUT_LOG_LEVEL") {
            self.log_level = val;
        }
        if let Ok(val) = std::env::var("PITCHSCOUT_DIMENSION") {
            if let Ok(dim) = val.parse() {
                self.embedding.dimension = dim;
            }
        }
        if let Ok(val) = std::env::var("PITCHSCOUT_MAX_CALLS") {
            if let Ok(max) = val.parse() {
                self.rate_limit.max_calls = max;
            }
        }
    }
}
