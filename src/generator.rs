//! Runs one generation attempt: the image, plus the voiceover when asked for,
//! dispatched together and joined.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::artifact::{AudioArtifact, ImageArtifact};
use crate::error::GenerationError;
use crate::gemini::{ContentBackend, request_image, request_speech};
use crate::prompt::{compose_image_prompt, compose_speech_script, voice_for};
use crate::thumbnail::ThumbnailConfig;

/// Everything one successful attempt produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// The thumbnail.
    pub image: ImageArtifact,
    /// The voiceover, present only when audio was requested.
    pub audio: Option<AudioArtifact>,
    /// When the attempt finished.
    pub generated_at: DateTime<Utc>,
}

impl GenerationOutcome {
    /// Filename offered for the thumbnail download.
    pub fn image_filename(&self) -> String {
        ImageArtifact::download_filename(self.generated_at)
    }
}

/// Composes prompts and drives the backend.
#[derive(Clone, Debug)]
pub struct Generator<B> {
    backend: B,
}

impl<B: ContentBackend> Generator<B> {
    /// Wraps a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The backend requests go through.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generates the thumbnail and, if `include_audio` is set, the voiceover.
    ///
    /// Both calls always run to completion. If either fails the attempt fails
    /// with that call's error; when both fail the image error is reported.
    pub async fn generate(
        &self,
        config: &ThumbnailConfig,
    ) -> Result<GenerationOutcome, GenerationError> {
        let prompt = compose_image_prompt(config);
        debug!(
            "Generating {} thumbnail, theme={} chaos={} audio={}",
            config.aspect_ratio, config.theme, config.chaos_level, config.include_audio
        );
        let image = request_image(&self.backend, &prompt, config.aspect_ratio);

        let (image, audio) = if config.include_audio {
            let script = compose_speech_script(config);
            let speech = request_speech(&self.backend, &script, voice_for(config.theme));
            let (image, audio) = tokio::join!(image, speech);
            (image, Some(audio))
        } else {
            (image.await, None)
        };

        let image = image?;
        let audio = audio.transpose()?;
        info!(
            "Generated {} thumbnail{}",
            image.mime_type(),
            if audio.is_some() { " with voiceover" } else { "" }
        );

        Ok(GenerationOutcome {
            image,
            audio,
            generated_at: Utc::now(),
        })
    }
}
