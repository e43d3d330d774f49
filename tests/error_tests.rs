//! Tests for the error system.

use std::error::Error as _;

use voicecraft::error::VoicecraftError;

#[test]
fn error_api_creation() {
    let err = VoicecraftError::api(404, "Not found");
    assert!(matches!(&err, VoicecraftError::Api { status: 404, .. }));
    assert_eq!(err.to_string(), "API error (status 404): Not found");
}

#[test]
fn synthesis_error_carries_cause() {
    let err = VoicecraftError::synthesis("gemini", VoicecraftError::Authentication("bad key".into()));
    assert_eq!(
        err.to_string(),
        "Error generating speech with gemini: Authentication error: bad key"
    );
    let source = err.source().expect("cause is kept");
    assert_eq!(source.to_string(), "Authentication error: bad key");
}

#[test]
fn invalid_voice_lists_available_voices() {
    let err = VoicecraftError::InvalidVoice {
        voice: "Nobody".into(),
        available: vec!["Zephyr".into(), "Puck".into()],
    };
    assert_eq!(err.to_string(), "Unsupported voice 'Nobody'. Available voices: Zephyr, Puck");
}

#[test]
fn validation_classification() {
    assert!(VoicecraftError::MissingTextContent.is_validation());
    assert!(VoicecraftError::UnsupportedModel("x".into()).is_validation());
    assert!(VoicecraftError::InvalidSpeaker("dup".into()).is_validation());
    assert!(!VoicecraftError::api(500, "boom").is_validation());
    assert!(!VoicecraftError::synthesis("openai", VoicecraftError::api(500, "boom")).is_validation());
}

#[test]
fn io_and_json_errors_convert() {
    let io: VoicecraftError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
    assert!(matches!(io, VoicecraftError::Io(_)));

    let json: VoicecraftError = serde_json::from_str::<serde_json::Value>("{not-json}")
        .unwrap_err()
        .into();
    assert!(matches!(json, VoicecraftError::Serialization(_)));
}
