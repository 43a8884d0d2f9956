use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

use crate::services::providers::gemini::GeminiConfig;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct AiConfig {
    pub common: core_config::Config,
    pub models: ModelConfig,
    pub google: GoogleConfig,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model used for summaries (e.g., gemini-2.5-flash)
    pub text_model: String,
    /// Model used for embeddings (e.g., text-embedding-004)
    pub embedding_model: String,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Missing key is not a startup error: the service runs degraded and
    /// AI routes answer 503.
    pub api_key: Option<String>,
    pub api_base: String,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            models: ModelConfig {
                text_model: DEFAULT_TEXT_MODEL.to_string(),
                embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            },
            google: GoogleConfig {
                api_key: None,
                api_base: DEFAULT_API_BASE.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
        }
    }
}

impl AiConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        Ok(AiConfig {
            common: common_config,
            models: ModelConfig {
                text_model: get_env("GEMINI_TEXT_MODEL", DEFAULT_TEXT_MODEL),
                embedding_model: get_env("GEMINI_EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            },
            google: GoogleConfig {
                api_key: get_optional_env("GEMINI_API_KEY"),
                api_base: get_env("GEMINI_API_BASE", DEFAULT_API_BASE),
                timeout_secs: parse_timeout(&get_env(
                    "GEMINI_TIMEOUT_SECS",
                    &DEFAULT_TIMEOUT_SECS.to_string(),
                ))?,
            },
        })
    }

    /// Settings for the Gemini client. An absent key becomes an empty one,
    /// which the client rejects at construction.
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.google.api_key.clone().unwrap_or_default(),
            api_base: self.google.api_base.clone(),
            text_model: self.models.text_model.clone(),
            embedding_model: self.models.embedding_model.clone(),
            timeout: Duration::from_secs(self.google.timeout_secs),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_timeout(raw: &str) -> Result<u64, AppError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(AppError::ConfigError(anyhow::anyhow!(
            "GEMINI_TIMEOUT_SECS must be greater than zero"
        ))),
        Ok(secs) => Ok(secs),
        Err(e) => Err(AppError::ConfigError(anyhow::anyhow!(
            "GEMINI_TIMEOUT_SECS is not a valid number of seconds: {}",
            e
        ))),
    }
}
