//! Speech synthesis: request model, provider synthesizers, and the factory.

pub mod request;

#[cfg(feature = "openai")]
pub mod openai;

#[cfg(feature = "gemini")]
pub mod gemini;

pub use crate::provider::ProviderKind;
pub use request::{ModelSettings, ProviderSettings, SpeakerSpec, SynthesisRequest};

#[cfg(feature = "gemini")]
pub use gemini::GeminiSynthesizer;
#[cfg(feature = "openai")]
pub use openai::OpenAiSynthesizer;

use tracing::debug;

use crate::audio::AudioData;
use crate::config::ProviderConfig;
use crate::error::{Result, VoicecraftError};

/// A configured synthesizer for one provider family.
#[derive(Debug, Clone)]
pub enum Synthesizer {
    #[cfg(feature = "openai")]
    OpenAi(OpenAiSynthesizer),
    #[cfg(feature = "gemini")]
    Gemini(GeminiSynthesizer),
}

impl Synthesizer {
    /// Build the synthesizer for an already-normalized request.
    pub fn from_request(request: &SynthesisRequest, config: &ProviderConfig) -> Result<Self> {
        Self::new(request.provider, &request.settings, config)
    }

    #[allow(unused_variables)]
    pub fn new(
        provider: ProviderKind,
        settings: &ProviderSettings,
        config: &ProviderConfig,
    ) -> Result<Self> {
        debug!(%provider, model = %settings.model, "Creating synthesizer");
        match provider {
            #[cfg(feature = "openai")]
            ProviderKind::OpenAi => Ok(Self::OpenAi(OpenAiSynthesizer::new(settings, config)?)),
            #[cfg(feature = "gemini")]
            ProviderKind::Gemini => Ok(Self::Gemini(GeminiSynthesizer::new(settings, config)?)),
            #[allow(unreachable_patterns)]
            other => Err(VoicecraftError::Configuration(format!(
                "Provider '{other}' not enabled via feature flags"
            ))),
        }
    }

    pub fn provider(&self) -> ProviderKind {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi(_) => ProviderKind::OpenAi,
            #[cfg(feature = "gemini")]
            Self::Gemini(_) => ProviderKind::Gemini,
        }
    }

    pub fn model(&self) -> &str {
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi(s) => s.model(),
            #[cfg(feature = "gemini")]
            Self::Gemini(s) => s.model(),
        }
    }

    /// Synthesize `text`. Blank instructions are treated as absent.
    pub async fn synthesize(&self, text: &str, instructions: Option<&str>) -> Result<AudioData> {
        let instructions = instructions.filter(|s| !s.trim().is_empty());
        match self {
            #[cfg(feature = "openai")]
            Self::OpenAi(s) => s.synthesize(text, instructions).await,
            #[cfg(feature = "gemini")]
            Self::Gemini(s) => s.synthesize(text, instructions).await,
        }
    }

    #[cfg(feature = "gemini")]
    pub fn as_gemini_mut(&mut self) -> Option<&mut GeminiSynthesizer> {
        match self {
            Self::Gemini(s) => Some(s),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }
}

/// Pick and build a synthesizer from a model name and its settings.
///
/// The family is detected from `model_name`; unknown names fail with
/// `UnsupportedModel` before any credential lookup.
pub fn create_synthesizer(
    model_name: &str,
    settings: &ModelSettings,
    config: &ProviderConfig,
) -> Result<Synthesizer> {
    let provider = ProviderKind::detect(model_name)?;
    let resolved = ProviderSettings::resolve(provider, model_name, settings);
    Synthesizer::new(provider, &resolved, config)
}
