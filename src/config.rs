use std::env;

use anyhow::Result;

use crate::classify::chat::{self, ChatSettings};
use crate::classify::zero_shot::{self, ZeroShotSettings};
use crate::classify::{BackendChoice, ClassifierSettings};

/// Default upload limit for the web boundary: 10 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// USE_OPENAI=1 enables the chat-completion backend
    pub use_openai: bool,
    /// USE_HF=1 enables the zero-shot backend (ignored if USE_OPENAI is set)
    pub use_hf: bool,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    /// Bearer token for the zero-shot endpoint; local servers usually need none
    pub hf_api_token: Option<String>,
    pub hf_zero_shot_url: String,
    pub hf_model: String,
    /// Address the web server binds to
    pub bind: String,
    pub port: u16,
    /// Maximum request body for uploads
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_openai: false,
            use_hf: false,
            openai_api_key: String::new(),
            openai_base_url: chat::DEFAULT_BASE_URL.to_string(),
            openai_model: chat::DEFAULT_MODEL.to_string(),
            hf_api_token: None,
            hf_zero_shot_url: zero_shot::DEFAULT_ENDPOINT.to_string(),
            hf_model: zero_shot::DEFAULT_MODEL.to_string(),
            bind: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional. With nothing set, the rule-based
    /// classifier is used and the server listens on 0.0.0.0:5000.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("MAILSORT_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("MAILSORT_PORT is not a valid port: {raw}"))?,
            Err(_) => defaults.port,
        };

        let max_upload_bytes = match env::var("MAILSORT_MAX_UPLOAD_BYTES") {
            Ok(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("MAILSORT_MAX_UPLOAD_BYTES is not a byte count: {raw}")
            })?,
            Err(_) => defaults.max_upload_bytes,
        };

        Ok(Self {
            use_openai: flag("USE_OPENAI"),
            use_hf: flag("USE_HF"),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            openai_model: env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            hf_api_token: env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty()),
            hf_zero_shot_url: env::var("HF_ZERO_SHOT_URL").unwrap_or(defaults.hf_zero_shot_url),
            hf_model: env::var("HF_MODEL").unwrap_or(defaults.hf_model),
            bind: env::var("MAILSORT_BIND").unwrap_or(defaults.bind),
            port,
            max_upload_bytes,
        })
    }

    /// The backend tried first for each email.
    pub fn backend_choice(&self) -> BackendChoice {
        BackendChoice::from_flags(self.use_openai, self.use_hf)
    }

    /// Settings passed into the EmailClassifier constructor.
    pub fn classifier_settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            backend: self.backend_choice(),
            chat: ChatSettings {
                api_key: self.openai_api_key.clone(),
                base_url: self.openai_base_url.clone(),
                model: self.openai_model.clone(),
            },
            zero_shot: ZeroShotSettings {
                endpoint: self.hf_zero_shot_url.clone(),
                api_token: self.hf_api_token.clone(),
                model: self.hf_model.clone(),
            },
        }
    }

    /// Check that the OpenAI API key is configured.
    pub fn require_openai(&self) -> Result<()> {
        if self.openai_api_key.is_empty() {
            anyhow::bail!(
                "OPENAI_API_KEY not set but USE_OPENAI=1. Add it to your .env file.\n\
                 Without it every email falls back to the rule-based classifier."
            );
        }
        Ok(())
    }

    /// Validate that the chosen backend has what it needs.
    ///
    /// Advisory only: a misconfigured backend still degrades to the rules
    /// per request, it just never succeeds.
    pub fn require_backend(&self) -> Result<()> {
        match self.backend_choice() {
            BackendChoice::ChatCompletion => self.require_openai(),
            BackendChoice::ZeroShot => {
                if self.hf_zero_shot_url.is_empty() {
                    anyhow::bail!("HF_ZERO_SHOT_URL is empty but USE_HF=1.");
                }
                Ok(())
            }
            BackendChoice::RuleBased => Ok(()),
        }
    }
}

/// "1" means on; anything else, or unset, means off.
fn flag(name: &str) -> bool {
    env::var(name).as_deref() == Ok("1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_rule_based() {
        let config = Config::default();
        assert_eq!(config.backend_choice(), BackendChoice::RuleBased);
        assert!(config.require_backend().is_ok());
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_openai_wins_over_hf() {
        let config = Config {
            use_openai: true,
            use_hf: true,
            ..Config::default()
        };
        assert_eq!(config.backend_choice(), BackendChoice::ChatCompletion);
        assert_eq!(
            config.classifier_settings().backend,
            BackendChoice::ChatCompletion
        );
    }

    #[test]
    fn test_openai_without_key_fails_validation() {
        let config = Config {
            use_openai: true,
            ..Config::default()
        };
        assert!(config.require_backend().is_err());

        let config = Config {
            use_openai: true,
            openai_api_key: "sk-test".to_string(),
            ..Config::default()
        };
        assert!(config.require_backend().is_ok());
    }

    #[test]
    fn test_settings_carry_connection_details() {
        let config = Config {
            use_hf: true,
            hf_zero_shot_url: "http://localhost:8080/zero-shot".to_string(),
            hf_api_token: Some("hf_x".to_string()),
            ..Config::default()
        };
        let settings = config.classifier_settings();
        assert_eq!(settings.backend, BackendChoice::ZeroShot);
        assert_eq!(settings.zero_shot.endpoint, "http://localhost:8080/zero-shot");
        assert_eq!(settings.zero_shot.api_token.as_deref(), Some("hf_x"));
    }
}
