//! Joke aggregator: fan-out/fan-in over the provider set with per-branch
//! failure containment.

use crate::config::ProviderConfig;
use crate::models::JokeResult;
use crate::services::providers::{
    anthropic::AnthropicProvider, gemini::GeminiProvider, ollama::OllamaProvider,
    openai::OpenAiProvider, JokeProvider,
};
use futures::future;
use std::sync::Arc;

/// Fans one topic out to every provider concurrently and joins on all of
/// them. Each branch resolves to a value on every path — genuine content,
/// "not configured" text, or flavored fallback — so `generate_all` never
/// fails and always returns one result per provider in fixed order.
pub struct JokeAggregator {
    providers: Vec<Arc<dyn JokeProvider>>,
}

impl JokeAggregator {
    pub fn new(providers: Vec<Arc<dyn JokeProvider>>) -> Self {
        Self { providers }
    }

    /// Build the four real providers in their fixed presentation order.
    pub fn from_config(config: &ProviderConfig) -> Self {
        Self::new(vec![
            Arc::new(OpenAiProvider::new(
                config.openai_api_key.clone(),
                config.openai_model.clone(),
            )),
            Arc::new(AnthropicProvider::new(
                config.anthropic_api_key.clone(),
                config.anthropic_model.clone(),
            )),
            Arc::new(GeminiProvider::new(
                config.google_api_key.clone(),
                config.gemini_model.clone(),
            )),
            Arc::new(OllamaProvider::new(
                config.ollama_base_url.clone(),
                config.ollama_model.clone(),
            )),
        ])
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Generate one joke per provider, concurrently.
    ///
    /// The join waits for the slowest branch; latency is bounded per branch
    /// by each provider's declared timeout, not at the join. `join_all`
    /// preserves input order, so position i always corresponds to provider i
    /// regardless of completion order.
    pub async fn generate_all(&self, topic: &str) -> Vec<JokeResult> {
        let branches = self.providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            let topic = topic.to_string();
            async move { generate_one(provider, &topic).await }
        });

        future::join_all(branches).await
    }
}

/// One supervised branch. Never returns an error: every failure mode is
/// mapped to fallback content here, inside the branch boundary.
async fn generate_one(provider: Arc<dyn JokeProvider>, topic: &str) -> JokeResult {
    let name = provider.name();

    if !provider.is_configured() {
        tracing::warn!(provider = %name, "Provider not configured; substituting fallback");
        return JokeResult::fallback(name, name.not_configured_text());
    }

    match tokio::time::timeout(provider.timeout(), provider.generate(topic)).await {
        Ok(Ok(content)) => {
            tracing::info!(provider = %name, chars = content.len(), "Joke generated");
            JokeResult::generated(name, content)
        }
        Ok(Err(e)) => {
            tracing::error!(provider = %name, error = %e, "Joke generation failed");
            JokeResult::fallback(name, name.fallback_text())
        }
        Err(_) => {
            tracing::error!(
                provider = %name,
                timeout_secs = provider.timeout().as_secs(),
                "Joke generation timed out"
            );
            JokeResult::fallback(name, name.fallback_text())
        }
    }
}
