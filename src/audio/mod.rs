//! Synthesized audio payloads and the WAV file sink.

mod wav;

pub use wav::{write_wav, CHANNELS, SAMPLE_RATE, SAMPLE_WIDTH_BYTES};

/// Raw audio bytes returned by a provider.
///
/// Either a complete RIFF/WAVE file or headerless 16-bit little-endian PCM,
/// depending on the provider and requested format.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AudioData(Vec<u8>);

impl AudioData {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the payload already carries a RIFF/WAVE header.
    pub fn is_wav_container(&self) -> bool {
        self.0.len() >= 12 && &self.0[0..4] == b"RIFF" && &self.0[8..12] == b"WAVE"
    }
}

impl From<Vec<u8>> for AudioData {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AudioData {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_riff_header() {
        let mut bytes = b"RIFF\0\0\0\0WAVEfmt ".to_vec();
        assert!(AudioData::new(bytes.clone()).is_wav_container());
        bytes[8] = b'X';
        assert!(!AudioData::new(bytes).is_wav_container());
        assert!(!AudioData::new(vec![1, 2, 3]).is_wav_container());
    }
}
