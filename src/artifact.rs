//! Generated media in a form the presentation layer can use directly.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose;
use chrono::{DateTime, Utc};

use crate::constants::{
    AUDIO_DOWNLOAD_FILENAME, AUDIO_WAV_MIME, DEFAULT_PCM_SAMPLE_RATE, IMAGE_DOWNLOAD_PREFIX,
    MAX_PCM_SAMPLE_RATE,
};
use crate::error::GenerationError;

/// Which kind of artifact a call was after.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ArtifactKind {
    /// Thumbnail image.
    Image,
    /// Spoken reaction.
    Audio,
}

/// A generated image, kept in the base64 form the service sent it in.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageArtifact {
    mime_type: String,
    data: String,
}

impl ImageArtifact {
    /// Wraps an already base64-encoded payload.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Declared MIME type.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Self-contained `data:<mime>;base64,<data>` URI.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Raw bytes, for serving the image as a download.
    pub fn decode(&self) -> Result<Vec<u8>, GenerationError> {
        Ok(general_purpose::STANDARD.decode(&self.data)?)
    }

    /// Download name, stamped with when the image was produced.
    pub fn download_filename(generated_at: DateTime<Utc>) -> String {
        format!(
            "{IMAGE_DOWNLOAD_PREFIX}-{}.png",
            generated_at.timestamp_millis()
        )
    }
}

/// A generated voiceover, decoded to bytes and ready to play.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AudioArtifact {
    mime_type: String,
    bytes: Vec<u8>,
}

impl AudioArtifact {
    /// Decodes a base64 payload as sent by the speech model.
    ///
    /// Raw 16-bit PCM (`audio/L16`, `audio/pcm`) is wrapped in a WAV container;
    /// anything else is assumed to already be playable and is kept as-is.
    pub fn from_base64(mime_type: &str, data: &str) -> Result<Self, GenerationError> {
        let raw = general_purpose::STANDARD.decode(data)?;
        if is_raw_pcm(mime_type) {
            let rate = sample_rate(mime_type).unwrap_or(DEFAULT_PCM_SAMPLE_RATE);
            if rate == 0 || rate > MAX_PCM_SAMPLE_RATE {
                return Err(GenerationError::DecodeFailure(format!(
                    "unsupported PCM sample rate {rate}"
                )));
            }
            return Ok(Self {
                mime_type: AUDIO_WAV_MIME.to_string(),
                bytes: pcm_to_wav(&raw, rate)?,
            });
        }
        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes: raw,
        })
    }

    /// MIME type of [`Self::bytes`].
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Playable file contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Filename used when the voiceover is downloaded.
    pub fn file_name(&self) -> &'static str {
        AUDIO_DOWNLOAD_FILENAME
    }

    /// Inline URI for an `<audio>` element.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

fn is_raw_pcm(mime_type: &str) -> bool {
    let mime = mime_type.to_ascii_lowercase();
    mime.starts_with("audio/l16") || mime.starts_with("audio/pcm") || mime.contains("codec=pcm")
}

fn sample_rate(mime_type: &str) -> Option<u32> {
    mime_type.split(';').find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("rate") {
            value.trim().parse().ok()
        } else {
            None
        }
    })
}

/// Wraps mono little-endian 16-bit samples in a WAV header.
fn pcm_to_wav(pcm: &[u8], sample_rate: u32) -> Result<Vec<u8>, GenerationError> {
    if pcm.len() % 2 != 0 {
        return Err(GenerationError::DecodeFailure(format!(
            "PCM payload has odd length {}",
            pcm.len()
        )));
    }
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut wav_cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut wav_cursor, spec)?;
        for sample in pcm.chunks_exact(2) {
            writer.write_sample(i16::from_le_bytes([sample[0], sample[1]]))?;
        }
        writer.finalize()?;
    }
    Ok(wav_cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn image_data_uri_is_passthrough() {
        let image = ImageArtifact::new("image/png", "iVBORw0KGgo=");
        assert_eq!(image.data_uri(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn image_download_name_uses_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).single().unwrap();
        assert_eq!(
            ImageArtifact::download_filename(at),
            "clash-royale-thumbnail-1700000000123.png"
        );
    }

    #[test]
    fn pcm_is_wrapped_as_wav() {
        let samples: Vec<u8> = [0i16, 1200, -1200, i16::MAX]
            .iter()
            .flat_map(|s| s.to_le_bytes())
            .collect();
        let payload = general_purpose::STANDARD.encode(&samples);
        let audio =
            AudioArtifact::from_base64("audio/L16;codec=pcm;rate=24000", &payload).unwrap();

        assert_eq!(audio.mime_type(), "audio/wav");
        assert_eq!(audio.file_name(), "gamer-reaction.wav");
        assert!(audio.bytes().starts_with(b"RIFF"));
        let reader = hound::WavReader::new(Cursor::new(audio.bytes())).unwrap();
        assert_eq!(reader.spec().sample_rate, 24_000);
        assert_eq!(reader.spec().channels, 1);
        let decoded: Vec<i16> = reader.into_samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, vec![0, 1200, -1200, i16::MAX]);
        assert!(audio.data_uri().starts_with("data:audio/wav;base64,UklGR"));
    }

    #[test]
    fn pcm_rate_defaults_when_missing() {
        let payload = general_purpose::STANDARD.encode([0u8, 0, 1, 0]);
        let audio = AudioArtifact::from_base64("audio/pcm", &payload).unwrap();
        let reader = hound::WavReader::new(Cursor::new(audio.bytes())).unwrap();
        assert_eq!(reader.spec().sample_rate, DEFAULT_PCM_SAMPLE_RATE);
    }

    #[test]
    fn container_audio_is_kept() {
        let payload = general_purpose::STANDARD.encode(b"ID3fake-mp3");
        let audio = AudioArtifact::from_base64("audio/mpeg", &payload).unwrap();
        assert_eq!(audio.mime_type(), "audio/mpeg");
        assert_eq!(audio.bytes(), b"ID3fake-mp3");
    }

    #[test]
    fn out_of_range_sample_rates_are_decode_failures() {
        let payload = general_purpose::STANDARD.encode([0u8, 0, 1, 0]);
        for mime in [
            "audio/L16;codec=pcm;rate=4294967295",
            "audio/L16;codec=pcm;rate=384001",
            "audio/L16;codec=pcm;rate=0",
        ] {
            assert!(
                matches!(
                    AudioArtifact::from_base64(mime, &payload),
                    Err(GenerationError::DecodeFailure(_))
                ),
                "{mime} should be rejected"
            );
        }

        let highest = AudioArtifact::from_base64("audio/L16;codec=pcm;rate=384000", &payload).unwrap();
        let reader = hound::WavReader::new(Cursor::new(highest.bytes())).unwrap();
        assert_eq!(reader.spec().sample_rate, MAX_PCM_SAMPLE_RATE);
    }

    #[test]
    fn bad_payloads_are_decode_failures() {
        assert!(matches!(
            AudioArtifact::from_base64("audio/L16;rate=24000", "!!not base64!!"),
            Err(GenerationError::DecodeFailure(_))
        ));
        let odd = general_purpose::STANDARD.encode([1u8, 2, 3]);
        assert!(matches!(
            AudioArtifact::from_base64("audio/L16;rate=24000", &odd),
            Err(GenerationError::DecodeFailure(_))
        ));
    }
}
