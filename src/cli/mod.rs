//! CLI definitions for Voicecraft.

pub mod commands;
pub mod errors;

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::config_generator::{DEFAULT_FEW_SHOT_PATH, DEFAULT_GENERATOR_MODEL};
use crate::craft::DEFAULT_CONFIG_PATH;
use crate::naming::NamingProvider;
use crate::voices::VoiceCategory;

pub const DEFAULT_GENERATED_CONFIG_PATH: &str = "speech_configs/generated_config.yaml";

/// Voicecraft text-to-speech CLI
#[derive(Parser, Debug)]
#[command(name = "voicecraft", version, about = "Generate speech from YAML configs with OpenAI or Gemini")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize speech from a YAML config
    Craft(CraftArgs),
    /// Generate a YAML config from natural-language instructions
    Gen(GenArgs),
    /// Generate a filename from text content
    Name(NameArgs),
    /// List available Gemini voices
    Voices(VoicesArgs),
}

/// Arguments for `voicecraft craft`.
#[derive(Args, Debug)]
pub struct CraftArgs {
    /// Path to YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Override text from config file
    #[arg(long)]
    pub override_text: Option<String>,

    /// Override output file from config file
    #[arg(long)]
    pub override_output: Option<String>,
}

/// Arguments for `voicecraft gen`.
#[derive(Args, Debug)]
pub struct GenArgs {
    /// Natural-language description of the config to generate
    #[arg(short, long)]
    pub instructions: String,

    /// Where to write the generated YAML
    #[arg(short, long, default_value = DEFAULT_GENERATED_CONFIG_PATH)]
    pub output: PathBuf,

    /// Completion model
    #[arg(long, default_value = DEFAULT_GENERATOR_MODEL)]
    pub model: String,

    /// Sampling temperature
    #[arg(long, default_value_t = 1.0)]
    pub temperature: f64,

    /// Max output tokens
    #[arg(long, default_value_t = 10_000)]
    pub max_tokens: u32,

    /// Few-shot example YAML
    #[arg(long, default_value = DEFAULT_FEW_SHOT_PATH)]
    pub few_shot: PathBuf,
}

/// Arguments for `voicecraft name`.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("source").required(true).args(["text", "file"])))]
pub struct NameArgs {
    /// Text content to generate a filename from
    #[arg(short, long)]
    pub text: Option<String>,

    /// Text file to generate a filename from
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// File extension without the dot
    #[arg(short, long, default_value = "txt")]
    pub extension: String,

    /// Do not include a timestamp
    #[arg(long)]
    pub no_timestamp: bool,

    /// Maximum length of the generated stem
    #[arg(long, default_value_t = 50)]
    pub max_length: usize,

    /// Provider used for naming (openai, gemini)
    #[arg(long, default_value = "openai")]
    pub provider: NamingProvider,

    /// API key for the naming provider (defaults to the environment)
    #[arg(long)]
    pub api_key: Option<String>,
}

/// Arguments for `voicecraft voices`.
#[derive(Args, Debug)]
pub struct VoicesArgs {
    /// Only voices in this category (female, male, neutral)
    #[arg(long)]
    pub category: Option<VoiceCategory>,

    /// Only voices whose characteristic contains this text
    #[arg(long)]
    pub characteristic: Option<String>,

    /// Suggest voices for a free-text context instead of listing
    #[arg(long, conflicts_with_all = ["category", "characteristic"])]
    pub suggest: Option<String>,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
