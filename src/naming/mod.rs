//! Content-derived filenames, with a hash fallback that never fails.

use std::sync::OnceLock;

use chrono::Local;
use regex::Regex;
use sha2::{Digest, Sha256};
use strum::{Display, EnumString};
use tracing::{debug, warn};

use crate::config::ProviderConfig;
use crate::error::{Result, VoicecraftError};
use crate::provider::{create_completion_client, ChatMessage, CompletionClient, CompletionRequest};

const SYSTEM_INSTRUCTION: &str = "Create a filename for a text file. The user message contains \
the text of the file; base the filename on it. The filename must be short, in English, and \
describe the content. Do not include an extension. Output exactly one filename.";

const FALLBACK_STEM: &str = "generated_file";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const NAMING_MAX_TOKENS: u32 = 1000;

/// Which LLM family names files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum NamingProvider {
    #[default]
    OpenAi,
    Gemini,
}

impl NamingProvider {
    pub fn model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-5-nano",
            Self::Gemini => "gemini-2.5-flash-lite",
        }
    }
}

/// Shape of the generated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameOptions {
    /// Extension without the leading dot.
    pub extension: String,
    pub include_timestamp: bool,
    /// Maximum stem length in characters.
    pub max_length: usize,
}

impl Default for FilenameOptions {
    fn default() -> Self {
        Self {
            extension: "txt".into(),
            include_timestamp: true,
            max_length: 50,
        }
    }
}

impl FilenameOptions {
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn without_timestamp(mut self) -> Self {
        self.include_timestamp = false;
        self
    }

    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }
}

pub struct FilenameGenerator {
    provider: NamingProvider,
    /// `Err` when the client could not be built; every call then falls back.
    client: Result<Box<dyn CompletionClient>>,
}

impl FilenameGenerator {
    /// Never fails: a missing credential only disables the LLM path.
    pub fn new(provider: NamingProvider, config: &ProviderConfig) -> Self {
        Self {
            provider,
            client: create_completion_client(provider.model(), config),
        }
    }

    pub fn with_client(provider: NamingProvider, client: Box<dyn CompletionClient>) -> Self {
        Self {
            provider,
            client: Ok(client),
        }
    }

    pub fn provider(&self) -> NamingProvider {
        self.provider
    }

    /// Generate a filename for `content`.
    ///
    /// Any failure of the LLM call is logged and replaced by
    /// [`fallback_filename`]; this method cannot fail.
    pub async fn generate(&self, content: &str, options: &FilenameOptions) -> String {
        match self.request_stem(content).await {
            Ok(raw) => {
                let stem = clean_filename(&raw, options.max_length);
                debug!(raw = %raw, stem = %stem, "Generated filename stem");
                if options.include_timestamp {
                    format!("{stem}_{}.{}", timestamp(), options.extension)
                } else {
                    format!("{stem}.{}", options.extension)
                }
            }
            Err(e) => {
                warn!(
                    model = self.provider.model(),
                    error = %e,
                    "Failed to generate filename; falling back to hash-based name"
                );
                fallback_filename(content, &options.extension, options.include_timestamp)
            }
        }
    }

    async fn request_stem(&self, content: &str) -> Result<String> {
        let client = self
            .client
            .as_ref()
            .map_err(|e| VoicecraftError::Configuration(e.to_string()))?;

        let mut request = CompletionRequest::new(
            self.provider.model(),
            vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(format!(
                    "Create an appropriate filename from the following content:\n\n{content}"
                )),
            ],
        )
        .with_max_tokens(NAMING_MAX_TOKENS);
        if self.provider == NamingProvider::OpenAi {
            request = request.with_reasoning_effort("low");
        }

        Ok(client.complete(&request).await?.trim().to_string())
    }
}

fn illegal_chars() -> &'static Regex {
    static ILLEGAL: OnceLock<Regex> = OnceLock::new();
    ILLEGAL.get_or_init(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("filename regex must compile"))
}

/// Make an LLM answer safe to use as a filename stem.
pub fn clean_filename(name: &str, max_length: usize) -> String {
    let stripped = illegal_chars().replace_all(name, "");
    let stem = stripped
        .replace(' ', "_")
        .chars()
        .take(max_length)
        .collect::<String>();
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

/// Deterministic name from the first 8 hex digits of the content's SHA-256.
pub fn fallback_filename(content: &str, extension: &str, include_timestamp: bool) -> String {
    let digest = Sha256::digest(content.as_bytes());
    let hash = digest
        .iter()
        .take(4)
        .map(|b| format!("{b:02x}"))
        .collect::<String>();

    if include_timestamp {
        format!("file_{}_{hash}.{extension}", timestamp())
    } else {
        format!("file_{hash}.{extension}")
    }
}

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
