//! Service configuration resolved from the environment.
//!
//! Values are read once at startup, `.env` files included. Every knob has a
//! working default so a bare `lawsmith` starts locally; only the OpenAI key
//! has no fallback.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable parsing error.
    #[error("failed to parse environment variable {key}: {message}")]
    EnvParse {
        /// Environment variable key.
        key: String,
        /// What the value must look like.
        message: String,
    },

    /// A variable with no default was absent.
    #[error("missing required environment variable {0}")]
    MissingVar(String),
}

/// Runtime settings for the whole service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP server binds, `LAWSMITH_ADDR`.
    pub bind_addr: String,
    /// Key clients must present in `X-API-Key`, `LAWSMITH_API_KEY`.
    pub api_key: String,
    /// Origin allowed by CORS, `LAWSMITH_ALLOWED_ORIGIN`.
    pub allowed_origin: String,
    /// Source document to ingest, `LAWSMITH_DOCUMENT`.
    pub document_path: PathBuf,
    /// SQLite database location, `LAWSMITH_DB`.
    pub db_path: PathBuf,
    /// Default retrieval depth, `LAWSMITH_TOP_K`.
    pub top_k: usize,
    /// Re-ingest even when the store already holds sections, `LAWSMITH_REBUILD`.
    pub rebuild: bool,
    /// `OPENAI_API_KEY`, if present.
    pub openai_api_key: Option<String>,
    /// Embedding model name, `LAWSMITH_EMBEDDING_MODEL`.
    pub embedding_model: String,
    /// Embedding vector width, `LAWSMITH_EMBEDDING_DIMS`.
    pub embedding_dims: usize,
    /// Completion model name, `LAWSMITH_COMPLETION_MODEL`.
    pub completion_model: String,
}

impl AppConfig {
    /// Resolves configuration from process environment and `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            bind_addr: env_or("LAWSMITH_ADDR", "0.0.0.0:8080"),
            api_key: env_or("LAWSMITH_API_KEY", "default-api-key-change-in-production"),
            allowed_origin: env_or("LAWSMITH_ALLOWED_ORIGIN", "http://localhost:3000"),
            document_path: PathBuf::from(env_or("LAWSMITH_DOCUMENT", "docs/laws.txt")),
            db_path: PathBuf::from(env_or("LAWSMITH_DB", "lawsmith.sqlite")),
            top_k: parse_env_or("LAWSMITH_TOP_K", 2)?,
            rebuild: env_flag("LAWSMITH_REBUILD"),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            embedding_model: env_or("LAWSMITH_EMBEDDING_MODEL", "text-embedding-3-small"),
            embedding_dims: parse_env_or("LAWSMITH_EMBEDDING_DIMS", 1536)?,
            completion_model: env_or("LAWSMITH_COMPLETION_MODEL", "gpt-4o-mini"),
        })
    }

    /// The OpenAI key, or the error naming what must be set.
    pub fn require_openai_key(&self) -> Result<&str, ConfigError> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingVar("OPENAI_API_KEY".to_string()))
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::EnvParse {
        key: key.to_string(),
        message: format!("'{raw}' is not a valid number"),
    })
}

fn env_flag(key: &str) -> bool {
    std::env::var(key)
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

fn parse_flag(raw: &str) -> bool {
    raw == "1" || raw.eq_ignore_ascii_case("true")
}
