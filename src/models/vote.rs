//! Vote ledger models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The four competing joke services, in their fixed presentation order.
///
/// Aggregation output and score zero-filling both follow this order; votes
/// for names outside the set are recorded but never shown in totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelName {
    #[serde(rename = "OpenAI")]
    OpenAi,
    Anthropic,
    Gemini,
    Llama,
}

impl ModelName {
    pub const ALL: [ModelName; 4] = [Self::OpenAi, Self::Anthropic, Self::Gemini, Self::Llama];

    /// Get string representation for the database and API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Gemini => "Gemini",
            Self::Llama => "Llama",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OpenAI" => Some(Self::OpenAi),
            "Anthropic" => Some(Self::Anthropic),
            "Gemini" => Some(Self::Gemini),
            "Llama" => Some(Self::Llama),
            _ => None,
        }
    }

    /// Decorative icon shown next to each model on the scoreboard.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::OpenAi => "🤖",
            Self::Anthropic => "🎭",
            Self::Gemini => "⭐",
            Self::Llama => "🦙",
        }
    }

    /// Content substituted when the provider's credential is absent.
    pub fn not_configured_text(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI API key not configured",
            Self::Anthropic => "Anthropic API key not configured",
            Self::Gemini => "Google API key not configured",
            Self::Llama => "Ollama base URL not configured",
        }
    }

    /// Content substituted when the provider call fails or times out.
    pub fn fallback_text(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI is having trouble thinking of jokes right now!",
            Self::Anthropic => "Claude is busy perfecting its comedy routine!",
            Self::Gemini => "Gemini is stargazing instead of joke-making!",
            Self::Llama => "Llama is busy grazing on comedy grass!",
        }
    }
}

impl std::fmt::Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One session's single ballot. Inserted at most once per session, never
/// mutated or deleted; `session_id` carries the UNIQUE constraint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vote {
    pub id: i64,
    pub model_name: String,
    pub session_id: String,
    pub voted_utc: DateTime<Utc>,
}

/// Aggregated vote count for one known model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelScore {
    pub model: ModelName,
    pub votes: i64,
}
