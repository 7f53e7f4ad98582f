//! Configuration types.
//!
//! Everything is read from the process environment. `main` loads a `.env`
//! file first, so values there behave the same as exported variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default Pushover message endpoint.
pub const DEFAULT_PUSHOVER_URL: &str = "https://api.pushover.net/1/messages.json";

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen port.
    pub port: u16,
    /// Directory holding index.html and the chat widget assets.
    pub static_dir: PathBuf,
    /// Environment label reported by /health. Informational only.
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: PathBuf::from("public"),
            environment: "development".to_string(),
        }
    }
}

impl ServerConfig {
    /// Read `PORT`, `STATIC_DIR` and `APP_ENV`/`NODE_ENV`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            port: parse_env("PORT")?.unwrap_or(defaults.port),
            static_dir: std::env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            environment: std::env::var("APP_ENV")
                .or_else(|_| std::env::var("NODE_ENV"))
                .unwrap_or(defaults.environment),
        })
    }
}

/// Where the persona's profile data lives.
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Persona name used throughout the system prompt.
    pub name: String,
    /// Directory containing linkedin.pdf / linkedin.txt / summary.txt.
    pub dir: PathBuf,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: "Bryan Chan".to_string(),
            dir: PathBuf::from("me"),
        }
    }
}

impl ProfileConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: std::env::var("PROFILE_NAME").unwrap_or(defaults.name),
            dir: std::env::var("PROFILE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.dir),
        }
    }
}

/// Chat orchestration limits.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Number of client-supplied history entries kept per request.
    pub history_window: usize,
    /// Maximum tool-execution rounds before a turn is abandoned.
    pub max_tool_rounds: usize,
    /// Upper bound on one whole chat turn, provider calls included.
    pub request_timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: 10,
            max_tool_rounds: 8,
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl ChatConfig {
    /// Read `CAREER_CHAT_MAX_TOOL_ROUNDS` and `CAREER_CHAT_REQUEST_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let max_tool_rounds: usize =
            parse_env("CAREER_CHAT_MAX_TOOL_ROUNDS")?.unwrap_or(defaults.max_tool_rounds);
        if max_tool_rounds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "CAREER_CHAT_MAX_TOOL_ROUNDS".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        let request_timeout = parse_env::<u64>("CAREER_CHAT_REQUEST_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        Ok(Self {
            history_window: defaults.history_window,
            max_tool_rounds,
            request_timeout,
        })
    }
}

/// Pushover credentials. Absent credentials mean notifications are only logged.
#[derive(Debug, Clone)]
pub struct PushoverConfig {
    pub token: SecretString,
    pub user: SecretString,
    pub endpoint: String,
}

impl PushoverConfig {
    /// Returns `None` unless both `PUSHOVER_TOKEN` and `PUSHOVER_USER` are set.
    pub fn from_env() -> Option<Self> {
        let token = std::env::var("PUSHOVER_TOKEN").ok()?;
        let user = std::env::var("PUSHOVER_USER").ok()?;
        Some(Self {
            token: SecretString::from(token),
            user: SecretString::from(user),
            endpoint: DEFAULT_PUSHOVER_URL.to_string(),
        })
    }
}

/// Parse an optional environment variable, rejecting values that don't parse.
fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{:?}: {}", raw, e),
            }),
        Err(_) => Ok(None),
    }
}
