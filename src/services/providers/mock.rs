//! Mock provider implementation for testing.

use super::{JokeProvider, ProviderError};
use crate::models::ModelName;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Mock joke provider with scriptable behavior and a call counter, for
/// asserting that unconfigured providers are never called and that slow
/// branches do not block siblings.
pub struct MockJokeProvider {
    name: ModelName,
    configured: bool,
    fail: bool,
    delay: Option<Duration>,
    timeout: Duration,
    calls: Arc<AtomicUsize>,
}

impl MockJokeProvider {
    pub fn new(name: ModelName) -> Self {
        Self {
            name,
            configured: true,
            fail: false,
            delay: None,
            timeout: Duration::from_secs(5),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn unconfigured(name: ModelName) -> Self {
        Self {
            configured: false,
            ..Self::new(name)
        }
    }

    /// Make every generate call fail with an API error.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Sleep this long before responding.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Shared counter of generate calls; clone before handing the provider
    /// to an aggregator.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl JokeProvider for MockJokeProvider {
    fn name(&self) -> ModelName {
        self.name
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn generate(&self, topic: &str) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail {
            return Err(ProviderError::ApiError("mock provider failure".to_string()));
        }

        Ok(format!("{} joke about {}", self.name, topic))
    }
}
