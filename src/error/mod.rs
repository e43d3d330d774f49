//! Error types for Voicecraft.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for all Voicecraft operations.
#[derive(Error, Debug)]
pub enum VoicecraftError {
    #[error("Config file '{}' not found", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("Error parsing YAML config file '{}': {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No text content specified in config file or via --override-text")]
    MissingTextContent,

    #[error("Unsupported model: {0}. Supported models: OpenAI (gpt-*) and Gemini (gemini-*)")]
    UnsupportedModel(String),

    #[error("Unsupported voice '{voice}'. Available voices: {}", available.join(", "))]
    InvalidVoice {
        voice: String,
        available: Vec<String>,
    },

    #[error("Invalid speaker: {0}")]
    InvalidSpeaker(String),

    #[error("Missing credentials for {provider}: set {env_var}")]
    MissingCredential { provider: String, env_var: String },

    #[error("Error generating speech with {provider}: {source}")]
    Synthesis {
        provider: String,
        #[source]
        source: Box<VoicecraftError>,
    },

    #[error("Failed to write '{}': {message}", path.display())]
    FileWrite { path: PathBuf, message: String },

    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VoicecraftError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Wrap a provider or transport failure raised while synthesizing.
    pub fn synthesis(provider: impl Into<String>, source: VoicecraftError) -> Self {
        Self::Synthesis {
            provider: provider.into(),
            source: Box::new(source),
        }
    }

    pub fn file_write(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::FileWrite {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error was detected before any network call was made.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingTextContent
                | Self::UnsupportedModel(_)
                | Self::InvalidVoice { .. }
                | Self::InvalidSpeaker(_)
                | Self::MissingCredential { .. }
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, VoicecraftError>;
