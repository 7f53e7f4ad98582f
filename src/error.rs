//! Error types for career-chat.

use std::time::Duration;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },
}

/// Tool dispatch errors.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool {name} not found")]
    NotFound { name: String },

    #[error("Invalid parameters for tool {name}: {reason}")]
    InvalidParameters { name: String, reason: String },
}

/// Push notification delivery errors. Logged, never surfaced to visitors.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Notification request failed: {0}")]
    RequestFailed(String),

    #[error("Notification endpoint rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Errors that end a single chat turn.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Tool loop exceeded {max_rounds} rounds without a final answer")]
    ToolLoopExceeded { max_rounds: usize },

    #[error("Chat turn timed out after {timeout:?}")]
    Timeout { timeout: Duration },
}
