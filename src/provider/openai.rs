//! OpenAI Chat Completions client (text and audio output).

use async_trait::async_trait;
use base64::Engine;
use serde::Deserialize;
use tracing::debug;

use super::http::{bearer_headers, check_status, shared_client, trim_trailing_slash};
use super::{strip_provider_prefix, CompletionClient, CompletionRequest, ProviderKind};
use crate::config::ProviderConfig;
use crate::error::{Result, VoicecraftError};

/// Parameters for an audio-output chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioCompletionRequest {
    pub model: String,
    pub voice: String,
    /// Audio container requested from the API (`wav`, `mp3`, `pcm16`, ...).
    pub format: String,
    pub prompt: String,
}

#[derive(Clone)]
pub struct OpenAiClient {
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url
                .unwrap_or_else(|| ProviderKind::OpenAi.default_base_url().to_string()),
        }
    }

    /// Build from config. Fails when no API key is configured.
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.require_api_key(ProviderKind::OpenAi)?;
        Ok(Self::new(api_key, Some(config.base_url(ProviderKind::OpenAi))))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn chat_completion(&self, body: &serde_json::Value) -> Result<OpenAiChatResponse> {
        let url = format!("{}/chat/completions", trim_trailing_slash(&self.base_url));

        let response = shared_client()
            .post(url)
            .headers(bearer_headers(&self.api_key))
            .json(body)
            .send()
            .await?;
        let response = check_status(response).await?;

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Request spoken audio for `prompt` and return the decoded bytes.
    pub async fn complete_audio(&self, request: &AudioCompletionRequest) -> Result<Vec<u8>> {
        let body = serde_json::json!({
            "model": request.model,
            "modalities": ["text", "audio"],
            "audio": {
                "voice": request.voice,
                "format": request.format,
            },
            "messages": [
                {"role": "user", "content": request.prompt},
            ],
        });

        debug!(model = %request.model, voice = %request.voice, "OpenAI audio completion");

        let data = self.chat_completion(&body).await?;
        let audio = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| VoicecraftError::InvalidResponse("No choices in OpenAI response".into()))?
            .message
            .audio
            .ok_or_else(|| {
                VoicecraftError::InvalidResponse("OpenAI response contained no audio".into())
            })?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(audio.data.trim())
            .map_err(|e| {
                VoicecraftError::InvalidResponse(format!("Failed to decode audio payload: {e}"))
            })?;
        if bytes.is_empty() {
            return Err(VoicecraftError::InvalidResponse(
                "OpenAI response contained an empty audio payload".into(),
            ));
        }
        Ok(bytes)
    }

    fn build_text_body(request: &CompletionRequest) -> serde_json::Value {
        let messages = request
            .messages
            .iter()
            .map(|m| serde_json::json!({"role": m.role.to_string(), "content": m.content}))
            .collect::<Vec<_>>();

        let mut body = serde_json::json!({
            "model": strip_provider_prefix(&request.model),
            "messages": messages,
        });

        if let Some(obj) = body.as_object_mut() {
            if let Some(temp) = request.temperature {
                obj.insert("temperature".into(), temp.into());
            }
            if let Some(max) = request.max_tokens {
                obj.insert("max_completion_tokens".into(), max.into());
            }
            if let Some(ref effort) = request.reasoning_effort {
                obj.insert("reasoning_effort".into(), effort.clone().into());
            }
        }
        body
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = Self::build_text_body(request);

        debug!(model = %request.model, "OpenAI text completion");

        let data = self.chat_completion(&body).await?;
        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| VoicecraftError::InvalidResponse("OpenAI response contained no text".into()))
    }
}

// OpenAI API response types (internal)

#[derive(Deserialize)]
struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
    audio: Option<OpenAiAudio>,
}

#[derive(Deserialize)]
struct OpenAiAudio {
    data: String,
}
