#![cfg(all(feature = "openai", feature = "gemini"))]

mod common;

use std::fs;

use base64::Engine;
use regex::Regex;
use serde_json::json;
use tempfile::tempdir;
use voicecraft::craft::{CraftJob, CraftOptions};
use voicecraft::error::VoicecraftError;
use voicecraft::naming::{FilenameGenerator, NamingProvider};
use wiremock::matchers::{any, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{mock_config, pcm16, FailingClient};

fn gemini_audio(bytes: &[u8]) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {"parts": [{"inlineData": {
                "mimeType": "audio/L16;rate=24000",
                "data": base64::engine::general_purpose::STANDARD.encode(bytes)
            }}]}
        }]
    })
}

fn failing_namer() -> FilenameGenerator {
    FilenameGenerator::with_client(NamingProvider::OpenAi, Box::new(FailingClient))
}

#[tokio::test]
async fn craft_writes_mono_16bit_24khz_wav() {
    let server = MockServer::start().await;
    let samples = [0i16, 250, -250, 12_000, -12_000];

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-preview-tts:generateContent"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "Read warmly.\n\nGood morning!"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_audio(&pcm16(&samples))))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("audio/out.wav");
    let config_path = dir.path().join("speech.yaml");
    fs::write(
        &config_path,
        format!(
            "text: \"Good morning!\"\noutput: \"{}\"\ninstructions: \"Read warmly.\"\nmodel_config:\n  name: gemini/gemini-2.5-flash-preview-tts\n  config:\n    voice: Kore\n",
            output.display()
        ),
    )
    .unwrap();

    let options = CraftOptions {
        config_path,
        ..Default::default()
    };
    let job = CraftJob::prepare_with(&options, &mock_config(&server.uri()), &failing_namer())
        .await
        .unwrap();

    let summary = job.summary();
    assert_eq!(summary[0], format!("Output path: {}", output.display()));
    assert_eq!(summary[1], "Generating speech for text: Good morning!");
    assert_eq!(summary[2], "Model: gemini/gemini-2.5-flash-preview-tts");
    assert_eq!(summary[4], "Instruction: Read warmly.");

    let written = job.run().await.unwrap();
    assert_eq!(written, output);

    let mut reader = hound::WavReader::open(&output).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_rate, 24_000);
    let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(read, samples);
}

#[tokio::test]
async fn overrides_win_and_text_file_is_read() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [{"role": "user", "content": "Text from a file"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"audio": {
                "data": base64::engine::general_purpose::STANDARD.encode(pcm16(&[1, 2]))
            }}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let text_file = dir.path().join("script.txt");
    fs::write(&text_file, "\n  Text from a file \n").unwrap();
    let config_path = dir.path().join("speech.yaml");
    fs::write(&config_path, "text: ignored\noutput: ignored.wav\nmodel_config:\n  name: openai/gpt-4o-audio-preview\n").unwrap();
    let output = dir.path().join("override.wav");

    let options = CraftOptions {
        config_path,
        override_text: Some(text_file.to_string_lossy().into_owned()),
        override_output: Some(output.to_string_lossy().into_owned()),
    };
    let job = CraftJob::prepare_with(&options, &mock_config(&server.uri()), &failing_namer())
        .await
        .unwrap();
    assert_eq!(job.request.text, "Text from a file");
    job.run().await.unwrap();
    assert!(output.is_file());
}

#[tokio::test]
async fn missing_output_gets_generated_name_under_outputs() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("speech.yaml");
    fs::write(&config_path, "text: hello\nmodel_config:\n  name: openai/gpt-4o-audio-preview\n").unwrap();

    let options = CraftOptions {
        config_path,
        ..Default::default()
    };
    let job = CraftJob::prepare_with(&options, &mock_config("http://127.0.0.1:9"), &failing_namer())
        .await
        .unwrap();

    let output = job.output.to_string_lossy().into_owned();
    let re = Regex::new(r"^outputs/file_\d{8}_\d{6}_2cf24dba\.wav$").unwrap();
    assert!(re.is_match(&output), "{output}");
}

#[tokio::test]
async fn validation_errors_happen_before_network() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let cases = [
        ("model_config:\n  name: openai/gpt-4o-audio-preview\n", "missing text"),
        ("text: hi\nmodel_config:\n  name: claude-3\n", "unsupported model"),
        (
            "text: hi\nmodel_config:\n  name: gemini-2.5-flash-preview-tts\n  config:\n    voice: InvalidVoice\n",
            "invalid voice",
        ),
    ];

    for (yaml, label) in cases {
        let config_path = dir.path().join("case.yaml");
        fs::write(&config_path, yaml).unwrap();
        let options = CraftOptions {
            config_path,
            ..Default::default()
        };
        let err = CraftJob::prepare_with(&options, &mock_config(&server.uri()), &failing_namer())
            .await
            .unwrap_err();
        assert!(err.is_validation(), "{label}: {err}");
    }
}

#[tokio::test]
async fn missing_config_file_is_reported() {
    let options = CraftOptions {
        config_path: "definitely/missing.yaml".into(),
        ..Default::default()
    };
    let err = CraftJob::prepare_with(&options, &mock_config("http://127.0.0.1:9"), &failing_namer())
        .await
        .unwrap_err();
    assert!(matches!(err, VoicecraftError::ConfigNotFound(_)));
    assert_eq!(err.to_string(), "Config file 'definitely/missing.yaml' not found");
}
