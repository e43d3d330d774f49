//! Synthesis request model: speakers, raw settings, and the normalized request.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SpeechConfig;
use crate::error::{Result, VoicecraftError};
use crate::provider::{strip_provider_prefix, ProviderKind};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-audio-preview";
pub const DEFAULT_OPENAI_VOICE: &str = "alloy";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-tts";
pub const DEFAULT_GEMINI_VOICE: &str = "Kore";
pub const DEFAULT_RESPONSE_FORMAT: &str = "wav";

/// A labeled speaker bound to a voice in multi-speaker mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerSpec {
    /// Label used in the script, e.g. `Host:`.
    pub name: String,
    pub voice_name: String,
    #[serde(default)]
    pub description: String,
}

impl SpeakerSpec {
    pub fn new(name: impl Into<String>, voice_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            voice_name: voice_name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Provider settings as written under `model_config.config`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub response_format: Option<String>,
    #[serde(default)]
    pub multi_speaker: bool,
    #[serde(default)]
    pub speakers: Vec<SpeakerSpec>,
}

/// Settings with provider defaults applied.
///
/// `speakers` is non-empty exactly when `multi_speaker` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub model: String,
    pub voice: String,
    pub response_format: String,
    pub multi_speaker: bool,
    pub speakers: Vec<SpeakerSpec>,
}

impl ProviderSettings {
    pub fn resolve(provider: ProviderKind, model_name: &str, settings: &ModelSettings) -> Self {
        let (default_model, default_voice) = match provider {
            ProviderKind::OpenAi => (DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_VOICE),
            ProviderKind::Gemini => (DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_VOICE),
        };

        let model = non_blank(settings.model.as_deref())
            .map(strip_provider_prefix)
            .unwrap_or_else(|| strip_provider_prefix(model_name));
        let model = if is_bare_family(model) {
            default_model.to_string()
        } else {
            model.to_string()
        };

        let multi_speaker = settings.multi_speaker && !settings.speakers.is_empty();
        if settings.multi_speaker != multi_speaker {
            debug!("multi_speaker requested without speakers; using single-speaker mode");
        }
        let speakers = if multi_speaker {
            settings.speakers.clone()
        } else {
            Vec::new()
        };

        Self {
            model,
            voice: non_blank(settings.voice.as_deref())
                .unwrap_or(default_voice)
                .to_string(),
            response_format: non_blank(settings.response_format.as_deref())
                .unwrap_or(DEFAULT_RESPONSE_FORMAT)
                .to_string(),
            multi_speaker,
            speakers,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn is_bare_family(model: &str) -> bool {
    model.is_empty() || matches!(model.to_lowercase().as_str(), "openai" | "gpt" | "gemini")
}

/// One synthesis job: normalized text, optional instructions, and the
/// provider-specific settings. Built once per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub text: String,
    pub instructions: Option<String>,
    pub provider: ProviderKind,
    pub settings: ProviderSettings,
}

impl SynthesisRequest {
    pub fn new(
        model_name: &str,
        settings: &ModelSettings,
        text: &str,
        instructions: Option<&str>,
    ) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(VoicecraftError::MissingTextContent);
        }

        let provider = ProviderKind::detect(model_name)?;
        Ok(Self {
            text: text.to_string(),
            instructions: non_blank(instructions).map(ToString::to_string),
            provider,
            settings: ProviderSettings::resolve(provider, model_name, settings),
        })
    }

    /// Build from a loaded config plus an optional text override.
    pub fn from_config(config: &SpeechConfig, override_text: Option<&str>) -> Result<Self> {
        let text = config.resolve_text(override_text)?;
        Self::new(
            &config.model_config.name,
            &config.model_config.config,
            &text,
            config.instructions(),
        )
    }
}
