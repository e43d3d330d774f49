//! Shared test helpers: stub completion clients and config builders.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use voicecraft::config::ProviderConfig;
use voicecraft::error::{Result, VoicecraftError};
use voicecraft::provider::{CompletionClient, CompletionRequest, ProviderKind};

/// Returns a canned answer and records every request it sees. Clones share
/// the same request log.
#[derive(Clone)]
pub struct RecordingClient {
    reply: String,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl RecordingClient {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for RecordingClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.reply.clone())
    }
}

/// Always fails, like an unreachable or unauthorized upstream.
pub struct FailingClient;

#[async_trait]
impl CompletionClient for FailingClient {
    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        Err(VoicecraftError::api(503, "service unavailable"))
    }
}

/// Both keys set, both base URLs pointed at `uri`.
pub fn mock_config(uri: &str) -> ProviderConfig {
    ProviderConfig::new()
        .with_api_key(ProviderKind::OpenAi, "test-key")
        .with_api_key(ProviderKind::Gemini, "test-key")
        .with_base_url(ProviderKind::OpenAi, uri)
        .with_base_url(ProviderKind::Gemini, uri)
}

/// Little-endian PCM16 bytes for `samples`.
pub fn pcm16(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}
