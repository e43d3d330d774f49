//! YAML speech configuration consumed by `voicecraft craft`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VoicecraftError};
use crate::synthesis::ModelSettings;

pub const DEFAULT_MODEL_NAME: &str = "openai/gpt-4o-audio-preview";

/// Top-level speech config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Literal text, or a path to a text file.
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub model_config: ModelConfig,
}

/// `model_config` block: the name selects the provider family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_name")]
    pub name: String,
    #[serde(default)]
    pub config: ModelSettings,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            config: ModelSettings::default(),
        }
    }
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

impl SpeechConfig {
    /// Load and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(VoicecraftError::ConfigNotFound(path.to_path_buf()))
            }
            Err(err) => return Err(VoicecraftError::Io(err)),
        };

        Self::from_yaml_str(&raw).map_err(|source| VoicecraftError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a config document. An empty document yields the defaults.
    pub fn from_yaml_str(raw: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Instructions with surrounding whitespace removed, `None` when blank.
    pub fn instructions(&self) -> Option<&str> {
        self.instructions
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Resolve the text to speak: an override wins, and a value naming an
    /// existing file is replaced by that file's trimmed contents.
    pub fn resolve_text(&self, override_text: Option<&str>) -> Result<String> {
        let raw = override_text
            .filter(|s| !s.is_empty())
            .or(self.text.as_deref())
            .unwrap_or_default();
        if raw.is_empty() {
            return Err(VoicecraftError::MissingTextContent);
        }

        let path = Path::new(raw);
        let content = if path.is_file() {
            fs::read_to_string(path)?.trim().to_string()
        } else {
            raw.to_string()
        };

        if content.trim().is_empty() {
            return Err(VoicecraftError::MissingTextContent);
        }
        Ok(content)
    }

    /// Output path from an override or the config, `None` when unset.
    pub fn resolve_output(&self, override_output: Option<&str>) -> Option<String> {
        override_output
            .or(self.output.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_multi_speaker_config() {
        let raw = r#"
text: "A: hi\nB: hello"
output: outputs/dialog.wav
instructions: Read this as a friendly chat.
model_config:
  name: gemini/gemini-2.5-flash-preview-tts
  config:
    voice: Kore
    multi_speaker: true
    speakers:
      - name: A
        voice_name: Kore
        description: calm host
      - name: B
        voice_name: Puck
"#;
        let config = SpeechConfig::from_yaml_str(raw).unwrap();
        assert_eq!(config.model_config.name, "gemini/gemini-2.5-flash-preview-tts");
        let settings = &config.model_config.config;
        assert!(settings.multi_speaker);
        assert_eq!(settings.speakers.len(), 2);
        assert_eq!(settings.speakers[0].description, "calm host");
        assert_eq!(settings.speakers[1].description, "");
        assert_eq!(config.instructions(), Some("Read this as a friendly chat."));
    }

    #[test]
    fn missing_model_config_uses_default_name() {
        let config = SpeechConfig::from_yaml_str("text: hi").unwrap();
        assert_eq!(config.model_config.name, DEFAULT_MODEL_NAME);
        assert!(!config.model_config.config.multi_speaker);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SpeechConfig::load("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, VoicecraftError::ConfigNotFound(_)));
    }

    #[test]
    fn load_reports_malformed_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "text: [unclosed").unwrap();
        let err = SpeechConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, VoicecraftError::ConfigParse { .. }));
    }

    #[test]
    fn resolve_text_prefers_override() {
        let config = SpeechConfig {
            text: Some("from config".into()),
            ..Default::default()
        };
        assert_eq!(config.resolve_text(Some("override")).unwrap(), "override");
        assert_eq!(config.resolve_text(None).unwrap(), "from config");
    }

    #[test]
    fn resolve_text_reads_file_contents() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  spoken from a file  ").unwrap();
        let config = SpeechConfig {
            text: Some(file.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        assert_eq!(config.resolve_text(None).unwrap(), "spoken from a file");
    }

    #[test]
    fn resolve_text_rejects_empty_sources() {
        let config = SpeechConfig::default();
        assert!(matches!(
            config.resolve_text(None),
            Err(VoicecraftError::MissingTextContent)
        ));

        let blank_file = NamedTempFile::new().unwrap();
        let config = SpeechConfig {
            text: Some(blank_file.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        assert!(matches!(
            config.resolve_text(None),
            Err(VoicecraftError::MissingTextContent)
        ));
    }

    #[test]
    fn resolve_output_ignores_blank_values() {
        let config = SpeechConfig {
            output: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(config.resolve_output(None), None);
        assert_eq!(
            config.resolve_output(Some("out.wav")),
            Some("out.wav".to_string())
        );
    }
}
