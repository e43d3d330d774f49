//! The `craft` pipeline: config, request, synthesizer, audio, WAV file.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::audio::write_wav;
use crate::config::{ProviderConfig, SpeechConfig};
use crate::error::Result;
use crate::naming::{FilenameGenerator, FilenameOptions, NamingProvider};
use crate::synthesis::{ModelSettings, SynthesisRequest, Synthesizer};

pub const DEFAULT_CONFIG_PATH: &str = "speech_configs/default.yaml";
pub const DEFAULT_OUTPUT_DIR: &str = "outputs";

const PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftOptions {
    pub config_path: PathBuf,
    pub override_text: Option<String>,
    pub override_output: Option<String>,
}

impl Default for CraftOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            override_text: None,
            override_output: None,
        }
    }
}

/// A validated job, ready to call the provider.
///
/// Building one performs every check that needs no network access: config
/// parsing, text resolution, model detection, voice validation and
/// credential lookup.
#[derive(Debug)]
pub struct CraftJob {
    pub request: SynthesisRequest,
    pub model_name: String,
    pub settings: ModelSettings,
    pub output: PathBuf,
    synthesizer: Synthesizer,
}

impl CraftJob {
    /// Prepare a job, naming the output with the OpenAI filename model if
    /// neither the config nor the options set one.
    pub async fn prepare(options: &CraftOptions, config: &ProviderConfig) -> Result<Self> {
        let namer = FilenameGenerator::new(NamingProvider::OpenAi, config);
        Self::prepare_with(options, config, &namer).await
    }

    pub async fn prepare_with(
        options: &CraftOptions,
        config: &ProviderConfig,
        namer: &FilenameGenerator,
    ) -> Result<Self> {
        let speech = SpeechConfig::load(&options.config_path)?;
        let request = SynthesisRequest::from_config(&speech, options.override_text.as_deref())?;
        let synthesizer = Synthesizer::from_request(&request, config)?;

        let output = match speech.resolve_output(options.override_output.as_deref()) {
            Some(path) => PathBuf::from(path),
            None => {
                let name = namer
                    .generate(&request.text, &FilenameOptions::default().with_extension("wav"))
                    .await;
                Path::new(DEFAULT_OUTPUT_DIR).join(name)
            }
        };

        Ok(Self {
            request,
            model_name: speech.model_config.name,
            settings: speech.model_config.config,
            output,
            synthesizer,
        })
    }

    /// Human-readable lines describing the job.
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Output path: {}", self.output.display()),
            format!("Generating speech for text: {}", preview(&self.request.text)),
            format!("Model: {}", self.model_name),
            format!(
                "Config: {}",
                serde_json::to_string(&self.settings).unwrap_or_default()
            ),
        ];
        if let Some(instructions) = &self.request.instructions {
            lines.push(format!("Instruction: {}", preview(instructions)));
        }
        lines
    }

    /// Synthesize once and write the WAV file.
    pub async fn run(self) -> Result<PathBuf> {
        let audio = self
            .synthesizer
            .synthesize(&self.request.text, self.request.instructions.as_deref())
            .await?;
        write_wav(&self.output, &audio)?;
        info!(path = %self.output.display(), bytes = audio.len(), "Audio saved");
        Ok(self.output)
    }
}

/// Run the whole pipeline, printing the job summary to stdout.
pub async fn run_craft(options: &CraftOptions, config: &ProviderConfig) -> Result<PathBuf> {
    let job = CraftJob::prepare(options, config).await?;
    for line in job.summary() {
        println!("{line}");
    }
    job.run().await
}

/// First 100 characters, with `...` when cut.
pub fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let head = text.chars().take(PREVIEW_CHARS).collect::<String>();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
