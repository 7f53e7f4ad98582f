//! LLM integration for career-chat.
//!
//! `provider` holds the provider-neutral types and the `LlmProvider` trait;
//! `openai` is the chat-completions client used in production.

pub mod openai;
pub mod provider;

pub use openai::OpenAiProvider;
pub use provider::*;

use std::sync::Arc;

use crate::config::DEFAULT_OPENAI_BASE_URL;
use crate::error::ConfigError;

/// Default model for persona chat.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAi,
}

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub backend: LlmBackend,
    pub api_key: secrecy::SecretString,
    pub base_url: String,
    pub model: String,
}

impl LlmConfig {
    /// Read `OPENAI_API_KEY` (required), `OPENAI_BASE_URL` and `CAREER_CHAT_MODEL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        Ok(Self {
            backend: LlmBackend::OpenAi,
            api_key: secrecy::SecretString::from(api_key),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: std::env::var("CAREER_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        })
    }
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Arc<dyn LlmProvider> {
    match config.backend {
        LlmBackend::OpenAi => {
            tracing::info!("Using OpenAI (model: {})", config.model);
            Arc::new(OpenAiProvider::new(
                config.api_key.clone(),
                &config.base_url,
                &config.model,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_openai_provider() {
        let config = LlmConfig {
            backend: LlmBackend::OpenAi,
            api_key: secrecy::SecretString::from("sk-test"),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: "gpt-4o".to_string(),
        };
        let provider = create_provider(&config);
        assert_eq!(provider.model_name(), "gpt-4o");
    }
}
