use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

/// Local development default; `postgres://` URLs select the Postgres backend.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:votes.db";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Per-provider credentials and model identifiers.
///
/// Every secret is optional: a missing credential makes the matching branch a
/// fast local fallback, never a startup abort. The Llama provider has no API
/// key; its base URL is its credential.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub ollama_base_url: Option<String>,
    pub openai_model: String,
    pub anthropic_model: String,
    pub gemini_model: String,
    pub ollama_model: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            anthropic_api_key: None,
            google_api_key: None,
            ollama_base_url: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            anthropic_model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub providers: ProviderConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let server: ServerConfig = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(AppConfig {
            server,
            database: DatabaseConfig {
                url: env_or("DATABASE_URL", DEFAULT_DATABASE_URL),
                max_connections: 5,
                min_connections: 1,
            },
            providers: ProviderConfig {
                openai_api_key: optional_env("OPENAI_API_KEY"),
                anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
                google_api_key: optional_env("GOOGLE_API_KEY"),
                ollama_base_url: optional_env("OLLAMA_BASE_URL"),
                openai_model: env_or("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
                anthropic_model: env_or("ANTHROPIC_MODEL", DEFAULT_ANTHROPIC_MODEL),
                gemini_model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
                ollama_model: env_or("OLLAMA_MODEL", DEFAULT_OLLAMA_MODEL),
            },
        })
    }
}

/// Empty values are treated as unset so a blank line in `.env` does not count
/// as a configured credential.
fn optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    optional_env(key).unwrap_or_else(|| default.to_string())
}
