//! Google Gemini `generateContent` client (text and speech output).

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http::{check_status, shared_client, trim_trailing_slash};
use super::{strip_provider_prefix, CompletionClient, CompletionRequest, ProviderKind, Role};
use crate::config::ProviderConfig;
use crate::error::{Result, VoicecraftError};

/// `speechConfig` payload: exactly one of the two voice binding shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GeminiSpeechConfig {
    #[serde(rename = "voiceConfig")]
    SingleSpeaker(VoiceConfig),
    #[serde(rename = "multiSpeakerVoiceConfig")]
    MultiSpeaker(MultiSpeakerVoiceConfig),
}

impl GeminiSpeechConfig {
    pub fn single(voice_name: impl Into<String>) -> Self {
        Self::SingleSpeaker(VoiceConfig::prebuilt(voice_name))
    }

    /// Bind speaker labels to voices, keeping the given order.
    pub fn multi<I, S, V>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<String>,
    {
        Self::MultiSpeaker(MultiSpeakerVoiceConfig {
            speaker_voice_configs: bindings
                .into_iter()
                .map(|(speaker, voice)| SpeakerVoiceConfig {
                    speaker: speaker.into(),
                    voice_config: VoiceConfig::prebuilt(voice),
                })
                .collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceConfig {
    pub prebuilt_voice_config: PrebuiltVoiceConfig,
}

impl VoiceConfig {
    fn prebuilt(voice_name: impl Into<String>) -> Self {
        Self {
            prebuilt_voice_config: PrebuiltVoiceConfig {
                voice_name: voice_name.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrebuiltVoiceConfig {
    pub voice_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiSpeakerVoiceConfig {
    pub speaker_voice_configs: Vec<SpeakerVoiceConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakerVoiceConfig {
    pub speaker: String,
    pub voice_config: VoiceConfig,
}

#[derive(Clone)]
pub struct GeminiClient {
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url
                .unwrap_or_else(|| ProviderKind::Gemini.default_base_url().to_string()),
        }
    }

    /// Build from config. Fails when no API key is configured.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.require_api_key(ProviderKind::Gemini)?;
        Ok(Self::new(api_key, Some(config.base_url(ProviderKind::Gemini))))
    }

    async fn generate_content(
        &self,
        model: &str,
        body: &serde_json::Value,
    ) -> Result<GeminiResponse> {
        let url = format!(
            "{}/models/{}:generateContent",
            trim_trailing_slash(&self.base_url),
            model
        );

        let response = shared_client()
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Generate audio for `prompt` and return the raw PCM bytes.
    pub async fn generate_speech(
        &self,
        model: &str,
        prompt: &str,
        speech_config: &GeminiSpeechConfig,
    ) -> Result<Vec<u8>> {
        let body = serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": speech_config,
            },
        });

        debug!(model, "Gemini speech generation");

        let data = self.generate_content(model, &body).await?;
        let inline = data
            .first_part()?
            .inline_data
            .ok_or_else(|| missing("candidates[0].content.parts[0].inlineData"))?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(inline.data.trim())
            .map_err(|e| {
                VoicecraftError::InvalidResponse(format!("Failed to decode audio payload: {e}"))
            })?;
        if bytes.is_empty() {
            return Err(missing("inlineData.data"));
        }
        Ok(bytes)
    }

    fn build_text_body(request: &CompletionRequest) -> serde_json::Value {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for msg in &request.messages {
            match msg.role {
                Role::System => system_parts.push(serde_json::json!({"text": msg.content})),
                Role::User => contents.push(serde_json::json!({
                    "role": "user",
                    "parts": [{"text": msg.content}],
                })),
                Role::Assistant => contents.push(serde_json::json!({
                    "role": "model",
                    "parts": [{"text": msg.content}],
                })),
            }
        }

        let mut body = serde_json::Map::new();
        body.insert("contents".into(), serde_json::Value::Array(contents));

        if !system_parts.is_empty() {
            body.insert(
                "systemInstruction".into(),
                serde_json::json!({ "parts": system_parts }),
            );
        }

        let mut gen_config = serde_json::Map::new();
        if let Some(max) = request.max_tokens {
            gen_config.insert("maxOutputTokens".into(), max.into());
        }
        if let Some(temp) = request.temperature {
            gen_config.insert("temperature".into(), temp.into());
        }
        if !gen_config.is_empty() {
            body.insert("generationConfig".into(), serde_json::Value::Object(gen_config));
        }

        serde_json::Value::Object(body)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = Self::build_text_body(request);

        let model = strip_provider_prefix(&request.model);
        debug!(model = %model, "Gemini text completion");

        let data = self.generate_content(model, &body).await?;
        let text = data
            .first_candidate_parts()?
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<String>();
        if text.is_empty() {
            return Err(missing("candidates[0].content.parts[].text"));
        }
        Ok(text)
    }
}

fn missing(field: &str) -> VoicecraftError {
    VoicecraftError::InvalidResponse(format!("Gemini response missing {field}"))
}

// Internal Gemini response types

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    fn first_candidate_parts(self) -> Result<Vec<GeminiPart>> {
        let parts = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| missing("candidates"))?
            .content
            .ok_or_else(|| missing("candidates[0].content"))?
            .parts;
        if parts.is_empty() {
            return Err(missing("candidates[0].content.parts"));
        }
        Ok(parts)
    }

    fn first_part(self) -> Result<GeminiPart> {
        self.first_candidate_parts()?
            .into_iter()
            .next()
            .ok_or_else(|| missing("candidates[0].content.parts"))
    }
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    inline_data: Option<GeminiInlineData>,
}

#[derive(Deserialize)]
struct GeminiInlineData {
    data: String,
}
