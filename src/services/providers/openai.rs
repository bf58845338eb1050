//! OpenAI joke provider.
//!
//! Calls the chat completions API with a comedian system prompt.

use super::{clean_joke, JokeProvider, ProviderError, DEFAULT_CLIENT_TIMEOUT};
use crate::models::ModelName;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const OPENAI_API_BASE: &str = "https://api.openai.com";

const SYSTEM_PROMPT: &str = "You are a comedian. Generate a single, clean, funny joke based on the user's request. Keep it under 200 characters.";

const MAX_TOKENS: i32 = 150;
const TEMPERATURE: f32 = 0.9;

pub struct OpenAiProvider {
    api_key: Option<String>,
    model: String,
    base_url: String,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        if api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY not set; OpenAI branch will return fallback text");
        }

        let client = Client::builder()
            .timeout(DEFAULT_CLIENT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key,
            model,
            base_url: OPENAI_API_BASE.to_string(),
            client,
        }
    }

    /// Point the provider at a different endpoint (self-hosted gateways,
    /// test doubles).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl JokeProvider for OpenAiProvider {
    fn name(&self) -> ModelName {
        ModelName::OpenAi
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, topic: &str) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            ProviderError::NotConfigured("OpenAI API key not set".to_string())
        })?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("Tell me {}", topic),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        tracing::debug!(model = %self.model, topic_len = topic.len(), "Sending request to OpenAI API");

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderError::ApiError(format!(
                "OpenAI API error {}: {}",
                status, error_text
            )));
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        clean_joke(
            api_response
                .choices
                .into_iter()
                .next()
                .map(|c| c.message.content),
        )
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: i32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}
