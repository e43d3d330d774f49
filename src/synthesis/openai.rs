//! OpenAI audio-output synthesizer.

use tracing::info;

use super::ProviderSettings;
use crate::audio::AudioData;
use crate::config::ProviderConfig;
use crate::error::{Result, VoicecraftError};
use crate::provider::openai::{AudioCompletionRequest, OpenAiClient};
use crate::provider::ProviderKind;

#[derive(Debug, Clone)]
pub struct OpenAiSynthesizer {
    client: OpenAiClient,
    model: String,
    voice: String,
    response_format: String,
}

impl OpenAiSynthesizer {
    /// Fails with `MissingCredential` when no OpenAI key is configured.
    pub fn new(settings: &ProviderSettings, config: &ProviderConfig) -> Result<Self> {
        let client = OpenAiClient::from_config(config)?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: OpenAiClient, settings: &ProviderSettings) -> Self {
        Self {
            client,
            model: settings.model.clone(),
            voice: settings.voice.clone(),
            response_format: settings.response_format.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn response_format(&self) -> &str {
        &self.response_format
    }

    /// Instructions go first, separated from the text by a blank line.
    pub fn build_prompt(text: &str, instructions: Option<&str>) -> String {
        match instructions {
            Some(instructions) => format!("{instructions}\n\n{text}"),
            None => text.to_string(),
        }
    }

    pub async fn synthesize(&self, text: &str, instructions: Option<&str>) -> Result<AudioData> {
        if text.trim().is_empty() {
            return Err(VoicecraftError::MissingTextContent);
        }

        let request = AudioCompletionRequest {
            model: self.model.clone(),
            voice: self.voice.clone(),
            format: self.response_format.clone(),
            prompt: Self::build_prompt(text, instructions),
        };

        info!(model = %self.model, voice = %self.voice, "Generating speech with OpenAI");

        let bytes = self
            .client
            .complete_audio(&request)
            .await
            .map_err(|e| VoicecraftError::synthesis(ProviderKind::OpenAi.to_string(), e))?;
        Ok(AudioData::new(bytes))
    }
}
