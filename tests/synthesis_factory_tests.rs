#![cfg(all(feature = "openai", feature = "gemini"))]

use voicecraft::config::{ProviderConfig, SpeechConfig};
use voicecraft::error::VoicecraftError;
use voicecraft::provider::ProviderKind;
use voicecraft::synthesis::{create_synthesizer, ModelSettings, SynthesisRequest, Synthesizer};

fn keys() -> ProviderConfig {
    ProviderConfig::new()
        .with_api_key(ProviderKind::OpenAi, "sk-test")
        .with_api_key(ProviderKind::Gemini, "g-test")
}

#[test]
fn detection_is_case_insensitive_substring_match() {
    for (name, expected) in [
        ("openai/gpt-4o-audio-preview", ProviderKind::OpenAi),
        ("my-GPT-variant", ProviderKind::OpenAi),
        ("OpenAI", ProviderKind::OpenAi),
        ("gemini-2.5-flash-preview-tts", ProviderKind::Gemini),
        ("GEMINI/gemini-2.5-pro-preview-tts", ProviderKind::Gemini),
    ] {
        assert_eq!(ProviderKind::detect(name).unwrap(), expected, "{name}");
    }
}

#[test]
fn unsupported_model_is_rejected_with_guidance() {
    for name in ["claude-3", "", "llama"] {
        let err = create_synthesizer(name, &ModelSettings::default(), &keys()).unwrap_err();
        assert!(matches!(err, VoicecraftError::UnsupportedModel(_)), "{name}");
        assert!(err.to_string().contains("Supported models: OpenAI (gpt-*) and Gemini (gemini-*)"));
    }
}

#[test]
fn missing_gemini_key_names_env_var() {
    let config = ProviderConfig::new().with_api_key(ProviderKind::OpenAi, "sk-test");
    let err = create_synthesizer("gemini-2.5-flash-preview-tts", &ModelSettings::default(), &config)
        .unwrap_err();
    assert!(matches!(
        err,
        VoicecraftError::MissingCredential { ref provider, ref env_var }
            if provider == "gemini" && env_var == "GEMINI_API_KEY"
    ));
}

#[test]
fn request_from_yaml_builds_matching_synthesizer() {
    let config = SpeechConfig::from_yaml_str(
        r#"
text: "Joe: hi\nJane: hello"
instructions: "  Friendly tone.  "
model_config:
  name: gemini/gemini-2.5-flash-preview-tts
  config:
    multi_speaker: true
    speakers:
      - name: Joe
        voice_name: Kore
      - name: Jane
        voice_name: Puck
"#,
    )
    .unwrap();

    let request = SynthesisRequest::from_config(&config, None).unwrap();
    assert_eq!(request.provider, ProviderKind::Gemini);
    assert_eq!(request.instructions.as_deref(), Some("Friendly tone."));
    assert_eq!(request.settings.model, "gemini-2.5-flash-preview-tts");
    assert_eq!(request.settings.voice, "Kore");
    assert!(request.settings.multi_speaker);

    let mut synth = Synthesizer::from_request(&request, &keys()).unwrap();
    assert_eq!(synth.provider(), ProviderKind::Gemini);
    assert_eq!(synth.model(), "gemini-2.5-flash-preview-tts");

    let gemini = synth.as_gemini_mut().unwrap();
    assert_eq!(gemini.speakers().len(), 2);
    gemini.set_speakers(Vec::new());
    assert!(!gemini.multi_speaker());
}
