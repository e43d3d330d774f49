//! Gemini TTS synthesizer with single- and multi-speaker modes.

use std::collections::HashSet;

use tracing::{debug, info};

use super::{ProviderSettings, SpeakerSpec};
use crate::audio::AudioData;
use crate::config::ProviderConfig;
use crate::error::{Result, VoicecraftError};
use crate::provider::gemini::{GeminiClient, GeminiSpeechConfig};
use crate::provider::ProviderKind;
use crate::voices::{VoiceEntry, VoiceRegistry};

pub const SPEAKER_INSTRUCTIONS_HEADER: &str = "Voice style instructions for each speaker:";

#[derive(Debug, Clone)]
pub struct GeminiSynthesizer {
    client: GeminiClient,
    model: String,
    voice: String,
    multi_speaker: bool,
    speakers: Vec<SpeakerSpec>,
}

impl GeminiSynthesizer {
    /// Validates every voice before looking up credentials, so a bad voice
    /// is reported even when no key is set.
    pub fn new(settings: &ProviderSettings, config: &ProviderConfig) -> Result<Self> {
        validate_voices(&settings.voice, settings.multi_speaker, &settings.speakers)?;
        let client = GeminiClient::from_config(config)?;
        Ok(Self::from_parts(client, settings))
    }

    /// Build around an existing client. Voices are still validated.
    pub fn with_client(client: GeminiClient, settings: &ProviderSettings) -> Result<Self> {
        validate_voices(&settings.voice, settings.multi_speaker, &settings.speakers)?;
        Ok(Self::from_parts(client, settings))
    }

    fn from_parts(client: GeminiClient, settings: &ProviderSettings) -> Self {
        Self {
            client,
            model: settings.model.clone(),
            voice: settings.voice.clone(),
            multi_speaker: settings.multi_speaker,
            speakers: settings.speakers.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn voice(&self) -> &str {
        &self.voice
    }

    pub fn multi_speaker(&self) -> bool {
        self.multi_speaker
    }

    pub fn speakers(&self) -> &[SpeakerSpec] {
        &self.speakers
    }

    /// Append a speaker and switch to multi-speaker mode.
    ///
    /// Not validated here; `validate` or the next `synthesize` call checks it.
    pub fn add_speaker(&mut self, speaker: SpeakerSpec) {
        self.speakers.push(speaker);
        self.multi_speaker = true;
    }

    /// Replace the speaker list. An empty list means single-speaker mode.
    pub fn set_speakers(&mut self, speakers: Vec<SpeakerSpec>) {
        self.multi_speaker = !speakers.is_empty();
        self.speakers = speakers;
    }

    /// Registry entry for `name`, or for the default voice when `None`.
    pub fn voice_info(&self, name: Option<&str>) -> Option<&'static VoiceEntry> {
        VoiceRegistry::global().lookup(name.unwrap_or(&self.voice))
    }

    /// Re-check the current voice and speaker state.
    pub fn validate(&self) -> Result<()> {
        validate_voices(&self.voice, self.multi_speaker, &self.speakers)
    }

    /// The `speechConfig` sent with each request.
    pub fn speech_config(&self) -> GeminiSpeechConfig {
        if self.multi_speaker && !self.speakers.is_empty() {
            GeminiSpeechConfig::multi(
                self.speakers
                    .iter()
                    .map(|s| (s.name.as_str(), s.voice_name.as_str())),
            )
        } else {
            GeminiSpeechConfig::single(self.voice.as_str())
        }
    }

    /// Join instructions, the speaker style block, and the text with blank lines.
    pub fn build_prompt(&self, text: &str, instructions: Option<&str>) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(instructions) = instructions {
            parts.push(instructions.to_string());
        }
        if let Some(block) = self.speaker_instructions() {
            parts.push(block);
        }
        parts.push(text.to_string());
        parts.join("\n\n")
    }

    /// Style lines for speakers that carry a description, `None` if there are none.
    fn speaker_instructions(&self) -> Option<String> {
        if !self.multi_speaker {
            return None;
        }

        let registry = VoiceRegistry::global();
        let lines = self
            .speakers
            .iter()
            .filter(|s| !s.name.is_empty() && !s.description.is_empty())
            .map(|s| match registry.lookup(&s.voice_name) {
                Some(entry) => format!(
                    "- {}: {} (Voice characteristic: {})",
                    s.name, s.description, entry.characteristic
                ),
                None => format!("- {}: {}", s.name, s.description),
            })
            .collect::<Vec<_>>();

        if lines.is_empty() {
            return None;
        }
        Some(format!("{SPEAKER_INSTRUCTIONS_HEADER}\n{}", lines.join("\n")))
    }

    pub async fn synthesize(&self, text: &str, instructions: Option<&str>) -> Result<AudioData> {
        if text.trim().is_empty() {
            return Err(VoicecraftError::MissingTextContent);
        }
        self.validate()?;

        let prompt = self.build_prompt(text, instructions);
        let speech_config = self.speech_config();

        if self.multi_speaker {
            info!(model = %self.model, speakers = self.speakers.len(), "Generating multi-speaker speech with Gemini");
        } else {
            info!(model = %self.model, voice = %self.voice, "Generating speech with Gemini");
        }
        debug!(prompt_len = prompt.len(), "Gemini prompt built");

        let bytes = self
            .client
            .generate_speech(&self.model, &prompt, &speech_config)
            .await
            .map_err(|e| VoicecraftError::synthesis(ProviderKind::Gemini.to_string(), e))?;
        Ok(AudioData::new(bytes))
    }
}

fn invalid_voice(voice: &str) -> VoicecraftError {
    VoicecraftError::InvalidVoice {
        voice: voice.to_string(),
        available: VoiceRegistry::global().names(),
    }
}

/// Default voice first, then each speaker's voice and label.
fn validate_voices(voice: &str, multi_speaker: bool, speakers: &[SpeakerSpec]) -> Result<()> {
    let registry = VoiceRegistry::global();
    if !registry.validate(voice) {
        return Err(invalid_voice(voice));
    }

    if !multi_speaker {
        return Ok(());
    }

    let mut seen = HashSet::new();
    for speaker in speakers {
        if !registry.validate(&speaker.voice_name) {
            return Err(invalid_voice(&speaker.voice_name));
        }
        if speaker.name.trim().is_empty() {
            return Err(VoicecraftError::InvalidSpeaker(
                "speaker name must not be empty".into(),
            ));
        }
        if !seen.insert(speaker.name.as_str()) {
            return Err(VoicecraftError::InvalidSpeaker(format!(
                "duplicate speaker name '{}'",
                speaker.name
            )));
        }
    }
    Ok(())
}
