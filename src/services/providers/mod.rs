//! Joke provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction over the four external
//! joke-generation services, plus a mock implementation for tests. Each
//! provider owns a bounded HTTP client and maps its own wire format; failures
//! never escape further than a `ProviderError`.

pub mod anthropic;
pub mod gemini;
pub mod mock;
pub mod ollama;
pub mod openai;

use crate::models::ModelName;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Bound applied to every provider branch unless the provider declares its
/// own. Under fan-out, one slow upstream would otherwise hold the whole
/// join; every branch gets an explicit limit.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(20);

/// HTTP client bound, kept under the branch bound so a slow upstream
/// surfaces as a network error inside the branch before the outer timeout
/// fires.
pub(crate) const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(15);

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Trait for joke-generation providers.
#[async_trait]
pub trait JokeProvider: Send + Sync {
    /// Fixed identity of this provider.
    fn name(&self) -> ModelName;

    /// Whether the provider's credential is present. An unconfigured
    /// provider is never called; the aggregator substitutes local fallback
    /// text without any I/O.
    fn is_configured(&self) -> bool;

    /// Per-provider latency bound enforced by the aggregator.
    fn timeout(&self) -> Duration {
        DEFAULT_PROVIDER_TIMEOUT
    }

    /// Generate one joke for the given topic.
    async fn generate(&self, topic: &str) -> Result<String, ProviderError>;
}

/// Trim provider output and reject empty or absent text as malformed.
pub(crate) fn clean_joke(text: Option<String>) -> Result<String, ProviderError> {
    text.map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ProviderError::MalformedResponse("response contained no text".to_string()))
}
