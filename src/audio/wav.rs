//! WAV output: RIFF payloads pass through, raw PCM16 is wrapped as mono 24 kHz.

use std::fs;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::{debug, warn};

use super::AudioData;
use crate::error::{Result, VoicecraftError};

pub const SAMPLE_RATE: u32 = 24_000;
pub const CHANNELS: u16 = 1;
pub const SAMPLE_WIDTH_BYTES: u16 = 2;

/// Write synthesized audio to `path` as a WAV file, creating parent dirs.
///
/// A payload that is already a RIFF/WAVE file is written unchanged. Anything
/// else is treated as mono 16-bit little-endian PCM at 24 kHz.
pub fn write_wav(path: impl AsRef<Path>, audio: &AudioData) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| VoicecraftError::file_write(parent, e))?;
    }

    if audio.is_wav_container() {
        debug!(path = %path.display(), bytes = audio.len(), "Writing WAV container as-is");
        return fs::write(path, audio.as_bytes()).map_err(|e| VoicecraftError::file_write(path, e));
    }

    let bytes = audio.as_bytes();
    if bytes.len() % 2 != 0 {
        warn!(len = bytes.len(), "PCM payload has an odd byte count; dropping the last byte");
    }

    let spec = WavSpec {
        channels: CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: SAMPLE_WIDTH_BYTES * 8,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| VoicecraftError::file_write(path, e))?;
    for chunk in bytes.chunks_exact(2) {
        writer
            .write_sample(i16::from_le_bytes([chunk[0], chunk[1]]))
            .map_err(|e| VoicecraftError::file_write(path, e))?;
    }
    writer
        .finalize()
        .map_err(|e| VoicecraftError::file_write(path, e))?;

    debug!(path = %path.display(), samples = bytes.len() / 2, "Wrote PCM WAV file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn pcm_is_wrapped_with_expected_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/out.wav");
        let samples: [i16; 4] = [0, 1000, -1000, i16::MAX];
        let bytes = samples.iter().flat_map(|s| s.to_le_bytes()).collect::<Vec<_>>();

        write_wav(&path, &AudioData::new(bytes)).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 24_000);
        assert_eq!(spec.bits_per_sample, 16);
        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, samples);
    }

    #[test]
    fn riff_payload_is_written_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("copy.wav");
        let payload = b"RIFF\x04\0\0\0WAVEdata".to_vec();

        write_wav(&path, &AudioData::new(payload.clone())).unwrap();
        assert_eq!(fs::read(&path).unwrap(), payload);
    }

    #[test]
    fn odd_trailing_byte_is_dropped() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("odd.wav");
        write_wav(&path, &AudioData::new(vec![1, 0, 7])).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 1);
    }

    #[test]
    fn unwritable_target_is_a_file_write_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let err = write_wav(blocker.join("out.wav"), &AudioData::new(vec![0, 0])).unwrap_err();
        assert!(matches!(err, VoicecraftError::FileWrite { .. }));
    }
}
