use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_TIMEOUT};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
///
/// Nothing is required: without `GEMINI_API_KEY` the service starts with an
/// unconfigured gateway that can be configured at runtime.
#[derive(Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub request_timeout: Duration,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL_NAME")
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            request_timeout: Duration::from_secs(parse_or(
                "GEMINI_TIMEOUT_SECS",
                optional_env("GEMINI_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT.as_secs(),
            )?),
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                optional_env("MAX_UPLOAD_BYTES"),
                DEFAULT_MAX_UPLOAD_BYTES,
            )?,
            port: parse_or("PORT", optional_env("PORT"), 8080)?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// The gateway settings as loaded at startup.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            credential: self.gemini_api_key.clone(),
            model_identifier: self.gemini_model.clone(),
            api_base: self.gemini_api_base.clone(),
            request_timeout: self.request_timeout,
        }
    }
}

/// Everything needed to build a `Gateway`. Rebuilt, never edited, when the
/// credential changes.
#[derive(Clone)]
pub struct GatewayConfig {
    pub credential: Option<String>,
    pub model_identifier: String,
    pub api_base: String,
    pub request_timeout: Duration,
}

impl GatewayConfig {
    pub fn with_credential(self, credential: Option<String>) -> Self {
        Self { credential, ..self }
    }

    /// Overrides the model when `model` is present and non-blank.
    pub fn with_model(self, model: Option<String>) -> Self {
        match model.filter(|m| !m.trim().is_empty()) {
            Some(model) => Self {
                model_identifier: model.trim().to_string(),
                ..self
            },
            None => self,
        }
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("model_identifier", &self.model_identifier)
            .field("api_base", &self.api_base)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{value}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway_config() -> GatewayConfig {
        GatewayConfig {
            credential: Some("old".to_string()),
            model_identifier: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }

    #[test]
    fn test_parse_or_uses_default_when_unset() {
        assert_eq!(parse_or::<u16>("PORT", None, 8080).unwrap(), 8080);
    }

    #[test]
    fn test_parse_or_parses_value() {
        assert_eq!(
            parse_or::<u64>("GEMINI_TIMEOUT_SECS", Some(" 30 ".to_string()), 120).unwrap(),
            30
        );
    }

    #[test]
    fn test_parse_or_rejects_garbage() {
        let err = parse_or::<u16>("PORT", Some("eighty".to_string()), 8080).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_with_credential_replaces_key() {
        let config = gateway_config().with_credential(None);
        assert!(config.credential.is_none());
        assert_eq!(config.model_identifier, DEFAULT_MODEL);
    }

    #[test]
    fn test_with_model_ignores_blank_override() {
        let config = gateway_config().with_model(Some("  ".to_string()));
        assert_eq!(config.model_identifier, DEFAULT_MODEL);

        let config = gateway_config().with_model(Some("gemini-1.5-pro".to_string()));
        assert_eq!(config.model_identifier, "gemini-1.5-pro");
    }

    #[test]
    fn test_debug_redacts_credential() {
        let rendered = format!("{:?}", gateway_config());
        assert!(!rendered.contains("old"));
        assert!(rendered.contains("<redacted>"));
    }
}
