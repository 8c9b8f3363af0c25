//! Remote embedding providers over HTTP.
//!
//! Speaks the OpenAI-style embeddings wire format
//! (`{"model", "input"}` → `{"data": [{"embedding": [...]}]}`). Each
//! provider carries its own ordered model-id fallback list: a model rejected
//! as unknown or out of credits advances to the next model before the chain
//! moves to the next provider.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use super::EmbeddingProvider;
use crate::config::ProviderConfig;
use crate::error::EmbedError;

pub struct HttpEmbeddingProvider {
    name: String,
    base_url: String,
    api_key: Option<String>,
    models: Vec<String>,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl HttpEmbeddingProvider {
    /// Build a provider from config. The API key is read from the named env
    /// var; a missing key is not an error here — the provider will fail at
    /// call time and the chain moves on.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, EmbedError> {
        let api_key = config
            .api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbedError::Unavailable {
                provider: config.name.clone(),
                reason: format!("http client: {e}"),
            })?;

        Ok(Self {
            name: config.name.clone(),
            base_url: config.base_url.clone(),
            api_key,
            models: config.models.clone(),
            client,
        })
    }

    async fn embed_with_model(&self, model: &str, text: &str) -> Result<Vec<f32>, EmbedError> {
        let body = serde_json::json!({ "model": model, "input": text });
        let mut request = self.client.post(&self.base_url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| EmbedError::Unavailable {
            provider: self.name.clone(),
            reason: format!("network: {e}"),
        })?;

        let status = response.status();
        if !status.is_success() {
            let text_body = response.text().await.unwrap_or_default();
            return Err(classify_failure(&self.name, model, status, &text_body));
        }

        let parsed: EmbeddingResponse =
            response.json().await.map_err(|e| EmbedError::Unavailable {
                provider: self.name.clone(),
                reason: format!("malformed response: {e}"),
            })?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| EmbedError::Unavailable {
                provider: self.name.clone(),
                reason: "empty embedding data".into(),
            })
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        try_models(&self.name, &self.models, |model| {
            self.embed_with_model(model, text)
        })
        .await
    }
}

/// Walk a provider's model list: a `ModelRejected` advances to the next
/// configured model id; any other failure aborts because it affects every
/// model of the provider (auth, network).
async fn try_models<'a, F, Fut>(
    provider: &str,
    models: &'a [String],
    mut call: F,
) -> Result<Vec<f32>, EmbedError>
where
    F: FnMut(&'a str) -> Fut,
    Fut: std::future::Future<Output = Result<Vec<f32>, EmbedError>>,
{
    let mut last: Option<EmbedError> = None;
    for model in models {
        match call(model).await {
            Ok(vector) => return Ok(vector),
            Err(err @ EmbedError::ModelRejected { .. }) => {
                warn!(provider, model = model.as_str(), "model rejected, trying next");
                last = Some(err);
            }
            Err(err) => return Err(err),
        }
    }
    Err(last.unwrap_or_else(|| EmbedError::Unavailable {
        provider: provider.to_string(),
        reason: "no models configured".into(),
    }))
}

/// Map an HTTP failure to the taxonomy. Unknown-model and insufficient-credit
/// rejections advance the model fallback list; everything else skips the
/// provider.
fn classify_failure(
    provider: &str,
    model: &str,
    status: reqwest::StatusCode,
    body: &str,
) -> EmbedError {
    let lower = body.to_lowercase();
    let model_rejection = lower.contains("unknown model")
        || lower.contains("model not found")
        || lower.contains("does not exist")
        || lower.contains("insufficient credit")
        || lower.contains("insufficient_quota");

    if model_rejection {
        EmbedError::ModelRejected {
            provider: provider.to_string(),
            model: model.to_string(),
            reason: truncate(&lower, 120),
        }
    } else {
        EmbedError::Unavailable {
            provider: provider.to_string(),
            reason: format!("http {status}: {}", truncate(&lower, 120)),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
