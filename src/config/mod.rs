//! Configuration system (layered: code > env > `.env` file).

pub mod speech;

pub use speech::{ModelConfig, SpeechConfig};

use std::collections::HashMap;
use std::fmt;

use crate::error::{Result, VoicecraftError};
use crate::provider::ProviderKind;

/// Credentials and endpoint overrides for the provider families.
///
/// Resolution order for API keys:
/// 1. Explicit keys set with `set_api_key`
/// 2. Environment variables (and `.env`) read by `from_env`
#[derive(Clone, Default)]
pub struct ProviderConfig {
    api_keys: HashMap<ProviderKind, String>,
    base_urls: HashMap<ProviderKind, String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_keys", &self.api_keys.keys().collect::<Vec<_>>())
            .field("base_urls", &self.base_urls)
            .finish()
    }
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (OPENAI_API_KEY, GEMINI_API_KEY, etc.).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        let mut config = Self::new();

        // Later entries win, so GEMINI_API_KEY beats GOOGLE_API_KEY.
        let env_mappings = [
            ("OPENAI_API_KEY", ProviderKind::OpenAi),
            ("GOOGLE_API_KEY", ProviderKind::Gemini),
            ("GEMINI_API_KEY", ProviderKind::Gemini),
        ];

        for (env_var, provider) in env_mappings {
            if let Ok(key) = std::env::var(env_var) {
                if !key.trim().is_empty() {
                    config.set_api_key(provider, key);
                }
            }
        }

        let url_mappings = [
            ("OPENAI_BASE_URL", ProviderKind::OpenAi),
            ("GEMINI_BASE_URL", ProviderKind::Gemini),
        ];

        for (env_var, provider) in url_mappings {
            if let Ok(url) = std::env::var(env_var) {
                config.set_base_url(provider, url);
            }
        }

        config
    }

    pub fn with_api_key(mut self, provider: ProviderKind, key: impl Into<String>) -> Self {
        self.set_api_key(provider, key);
        self
    }

    pub fn with_base_url(mut self, provider: ProviderKind, url: impl Into<String>) -> Self {
        self.set_base_url(provider, url);
        self
    }

    pub fn set_api_key(&mut self, provider: ProviderKind, key: impl Into<String>) {
        self.api_keys.insert(provider, key.into());
    }

    pub fn set_base_url(&mut self, provider: ProviderKind, url: impl Into<String>) {
        self.base_urls.insert(provider, url.into());
    }

    pub fn api_key(&self, provider: ProviderKind) -> Option<&str> {
        self.api_keys.get(&provider).map(String::as_str)
    }

    /// Resolve an API key, failing with the env var the user should set.
    pub fn require_api_key(&self, provider: ProviderKind) -> Result<String> {
        self.api_key(provider)
            .map(ToString::to_string)
            .ok_or_else(|| VoicecraftError::MissingCredential {
                provider: provider.to_string(),
                env_var: provider.api_key_env_var().to_string(),
            })
    }

    /// Base URL for a provider, falling back to its public endpoint.
    pub fn base_url(&self, provider: ProviderKind) -> String {
        self.base_urls
            .get(&provider)
            .cloned()
            .unwrap_or_else(|| provider.default_base_url().to_string())
    }

    pub fn has_credentials(&self, provider: ProviderKind) -> bool {
        self.api_key(provider).is_some()
    }
}
