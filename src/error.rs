//! Error taxonomy for external collaborators.
//!
//! Every variant here is recovered somewhere inside the crate: embedding
//! errors advance the provider chain, index errors degrade search to text
//! matching. Nothing in this module ever reaches a caller of
//! [`search`](crate::search::SearchService::search) or
//! [`recommend`](crate::recommend::RecommendationEngine::recommend).

use thiserror::Error;

/// Failure of a single embedding provider attempt.
#[derive(Debug, Error)]
pub enum EmbedError {
    /// The sliding-window budget for this provider is exhausted.
    #[error("rate limit exhausted for provider '{provider}'")]
    RateLimited { provider: String },

    /// The provider rejected the requested model id (unknown model,
    /// insufficient credits). The chain retries with the provider's next
    /// configured model before moving on.
    #[error("provider '{provider}' rejected model '{model}': {reason}")]
    ModelRejected {
        provider: String,
        model: String,
        reason: String,
    },

    /// Auth, quota, network, or malformed-response failure. The chain moves
    /// to the next provider.
    #[error("provider '{provider}' unavailable: {reason}")]
    Unavailable { provider: String, reason: String },
}

impl EmbedError {
    /// The provider this error came from, for logging.
    pub fn provider(&self) -> &str {
        match self {
            EmbedError::RateLimited { provider }
            | EmbedError::ModelRejected { provider, .. }
            | EmbedError::Unavailable { provider, .. } => provider,
        }
    }
}

/// Failure of a vector-index operation.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("vector index unavailable: {0}")]
    Unavailable(String),
}
