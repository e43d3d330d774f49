//! Voicecraft: text-to-speech from YAML configs.
//!
//! Dispatches synthesis to OpenAI (audio-output chat completions) or Gemini
//! (TTS `generateContent`) based on the model name, validates Gemini voices
//! against a static catalog, and writes the result as a mono 16-bit 24 kHz
//! WAV file. Two LLM helpers round it out: content-derived output filenames
//! and few-shot generation of new speech configs.
//!
//! # Quick Start
//!
//! ```no_run
//! use voicecraft::config::ProviderConfig;
//! use voicecraft::synthesis::{create_synthesizer, ModelSettings};
//!
//! # async fn example() -> voicecraft::error::Result<()> {
//! let config = ProviderConfig::from_env();
//! let synth = create_synthesizer("gemini-2.5-flash-preview-tts", &ModelSettings::default(), &config)?;
//! let audio = synth.synthesize("Hello!", Some("Say it cheerfully.")).await?;
//! voicecraft::audio::write_wav("outputs/hello.wav", &audio)?;
//! # Ok(())
//! # }
//! ```

pub mod audio;
pub mod config;
pub mod config_generator;
pub mod craft;
pub mod error;
pub mod naming;
pub mod provider;
pub mod synthesis;
pub mod voices;

#[cfg(feature = "cli")]
pub mod cli;
