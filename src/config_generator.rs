//! Few-shot YAML config generation through a completion model.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, VoicecraftError};
use crate::provider::{ChatMessage, CompletionClient, CompletionRequest};

pub const DEFAULT_GENERATOR_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_FEW_SHOT_PATH: &str = "speech_configs/gemini_multi_speaker_example.yaml";

const SYSTEM_PROMPT: &str = "You are a helpful assistant that generates YAML configuration files \
for a speech synthesis tool. Output must be valid YAML only with no prose.";
const EXAMPLE_INTRO: &str =
    "Here is an example YAML config for multi-speaker Gemini text to speech. Follow this structure.";

/// Generation settings, fixed for the lifetime of a generator.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigGeneratorOptions {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub few_shot_path: PathBuf,
}

impl Default for ConfigGeneratorOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_GENERATOR_MODEL.into(),
            temperature: 1.0,
            max_tokens: 10_000,
            few_shot_path: PathBuf::from(DEFAULT_FEW_SHOT_PATH),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigGenerator {
    options: ConfigGeneratorOptions,
    few_shot_yaml: String,
}

impl ConfigGenerator {
    /// Load the few-shot exemplar. Fails with `NotFound` when it is missing.
    pub fn new(options: ConfigGeneratorOptions) -> Result<Self> {
        let few_shot_yaml = match fs::read_to_string(&options.few_shot_path) {
            Ok(yaml) => yaml,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VoicecraftError::NotFound(options.few_shot_path.clone()))
            }
            Err(e) => return Err(e.into()),
        };
        debug!(path = %options.few_shot_path.display(), "Loaded few-shot example");
        Ok(Self {
            options,
            few_shot_yaml,
        })
    }

    pub fn options(&self) -> &ConfigGeneratorOptions {
        &self.options
    }

    /// The fixed four-message exchange sent for `instructions`.
    pub fn messages(&self, instructions: &str) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(EXAMPLE_INTRO),
            ChatMessage::assistant(self.few_shot_yaml.as_str()),
            ChatMessage::user(format!(
                "Using the same structure, generate a new YAML config based on these \
instructions. Return YAML only, no explanations.\n\nInstructions:\n{instructions}"
            )),
        ]
    }

    /// Generate YAML text. The output is trimmed but not validated.
    pub async fn generate(&self, client: &dyn CompletionClient, instructions: &str) -> Result<String> {
        let request = CompletionRequest::new(self.options.model.as_str(), self.messages(instructions))
            .with_temperature(self.options.temperature)
            .with_max_tokens(self.options.max_tokens);

        info!(model = %self.options.model, "Generating speech config");
        let content = client.complete(&request).await?;
        Ok(content.trim().to_string())
    }

    /// Generate YAML and write it to `path`, creating parent directories.
    pub async fn generate_to_file(
        &self,
        client: &dyn CompletionClient,
        instructions: &str,
        path: impl AsRef<Path>,
    ) -> Result<PathBuf> {
        let yaml = self.generate(client, instructions).await?;
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| VoicecraftError::file_write(parent, e))?;
        }
        fs::write(path, yaml).map_err(|e| VoicecraftError::file_write(path, e))?;
        Ok(path.to_path_buf())
    }
}
