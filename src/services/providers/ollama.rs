//! Ollama (Llama) joke provider.
//!
//! Talks to a self-hosted Ollama instance. There is no API key; the base URL
//! is the provider's credential, so an unset `OLLAMA_BASE_URL` means the
//! branch falls back locally without I/O.

use super::{clean_joke, JokeProvider, ProviderError};
use crate::models::ModelName;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Local generation can be slow; this branch gets a longer bound than the
/// hosted APIs. The client bound sits under it so a slow instance reads as
/// a network error, not a branch timeout.
const OLLAMA_TIMEOUT: Duration = Duration::from_secs(30);
const OLLAMA_CLIENT_TIMEOUT: Duration = Duration::from_secs(25);

const NUM_PREDICT: i32 = 150;
const TEMPERATURE: f32 = 0.9;

pub struct OllamaProvider {
    base_url: Option<String>,
    model: String,
    client: Client,
}

impl OllamaProvider {
    pub fn new(base_url: Option<String>, model: String) -> Self {
        if base_url.is_none() {
            tracing::warn!("OLLAMA_BASE_URL not set; Llama branch will return fallback text");
        }

        let client = Client::builder()
            .timeout(OLLAMA_CLIENT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            model,
            client,
        }
    }
}

#[async_trait]
impl JokeProvider for OllamaProvider {
    fn name(&self) -> ModelName {
        ModelName::Llama
    }

    fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    fn timeout(&self) -> Duration {
        OLLAMA_TIMEOUT
    }

    async fn generate(&self, topic: &str) -> Result<String, ProviderError> {
        let base_url = self
            .base_url
            .as_ref()
            .ok_or_else(|| ProviderError::NotConfigured("Ollama base URL not set".to_string()))?;

        let request = GenerateRequest {
            model: &self.model,
            prompt: format!(
                "Generate a single, clean, funny joke about: {}. Keep it under 200 characters.",
                topic
            ),
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
                num_predict: NUM_PREDICT,
            },
        };

        tracing::debug!(model = %self.model, topic_len = topic.len(), "Sending request to Ollama");

        let response = self
            .client
            .post(format!("{}/api/generate", base_url.trim_end_matches('/')))
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!(
                "Ollama API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        clean_joke(Some(api_response.response))
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: i32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}
