//! Ephemeral aggregation results. Nothing here is persisted.

use super::ModelName;
use serde::Serialize;

/// One provider's response to one aggregation call.
///
/// `fallback` distinguishes genuine output from placeholder text explicitly,
/// so no caller has to guess intent from the content.
#[derive(Debug, Clone, Serialize)]
pub struct JokeResult {
    pub provider: ModelName,
    pub content: String,
    pub fallback: bool,
}

impl JokeResult {
    pub fn generated(provider: ModelName, content: String) -> Self {
        Self {
            provider,
            content,
            fallback: false,
        }
    }

    pub fn fallback(provider: ModelName, content: &str) -> Self {
        Self {
            provider,
            content: content.to_string(),
            fallback: true,
        }
    }
}
