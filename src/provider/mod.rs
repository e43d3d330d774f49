//! Provider families, the chat completion trait, and REST clients.

pub mod http;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "gemini")]
pub mod gemini;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::config::ProviderConfig;
use crate::error::{Result, VoicecraftError};

/// The two supported provider families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Gemini,
}

impl ProviderKind {
    /// Pick a family from a model name.
    ///
    /// Case-insensitive substring rules, first match wins: `openai` or `gpt`
    /// selects OpenAI, then `gemini` selects Gemini.
    pub fn detect(model_name: &str) -> Result<Self> {
        let lower = model_name.to_lowercase();
        if lower.contains("openai") || lower.contains("gpt") {
            Ok(Self::OpenAi)
        } else if lower.contains("gemini") {
            Ok(Self::Gemini)
        } else {
            Err(VoicecraftError::UnsupportedModel(model_name.to_string()))
        }
    }

    pub fn api_key_env_var(self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Gemini => "https://generativelanguage.googleapis.com/v1beta",
        }
    }
}

/// Drop a routing prefix such as `openai/` or `gemini/` from a model name.
pub fn strip_provider_prefix(model_name: &str) -> &str {
    model_name
        .rsplit_once('/')
        .map(|(_, model)| model)
        .unwrap_or(model_name)
        .trim()
}

/// Chat role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A text completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    /// Only honored by OpenAI reasoning models.
    pub reasoning_effort: Option<String>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
            reasoning_effort: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_reasoning_effort(mut self, effort: impl Into<String>) -> Self {
        self.reasoning_effort = Some(effort.into());
        self
    }
}

/// Text completion against an LLM. Implemented by each provider client.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    fn provider(&self) -> ProviderKind;

    /// Run one completion and return the text of the first choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Create a completion client for the family `model_name` belongs to.
#[allow(unused_variables)]
pub fn create_completion_client(
    model_name: &str,
    config: &ProviderConfig,
) -> Result<Box<dyn CompletionClient>> {
    match ProviderKind::detect(model_name)? {
        #[cfg(feature = "openai")]
        ProviderKind::OpenAi => Ok(Box::new(openai::OpenAiClient::from_config(config)?)),
        #[cfg(feature = "gemini")]
        ProviderKind::Gemini => Ok(Box::new(gemini::GeminiClient::from_config(config)?)),
        #[allow(unreachable_patterns)]
        other => Err(VoicecraftError::Configuration(format!(
            "Provider '{other}' not enabled via feature flags"
        ))),
    }
}
