//! Client for the Gemini `generateContent` endpoint.
//!
//! One request per call, no retries. Responses are unwrapped defensively: the
//! first candidate is inspected and the first part carrying inline data wins.

pub mod types;

use tracing::{debug, error, warn};
use url::Url;

use crate::artifact::{ArtifactKind, AudioArtifact, ImageArtifact};
use crate::constants::{API_KEY_HEADER, IMAGE_MODEL, SPEECH_MODEL};
use crate::error::GenerationError;
use crate::thumbnail::AspectRatio;
use types::{
    ApiErrorBody, FinishReason, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, ImageConfig, InlineData, Modality, PrebuiltVoiceConfig, SpeechConfig,
    VoiceConfig,
};

/// Something that can answer `generateContent` calls.
pub trait ContentBackend: Send + Sync {
    /// Sends one request to `model` and returns its parsed reply.
    fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> impl Future<Output = Result<GenerateContentResponse, GenerationError>> + Send;
}

/// HTTP backend talking to the real service.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl GeminiClient {
    /// Builds a client; `base_url` should end with `/` so model paths join under it.
    pub fn new(api_key: impl Into<String>, base_url: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url,
        }
    }

    /// URL of the `generateContent` call for `model`.
    pub fn endpoint(&self, model: &str) -> Result<Url, GenerationError> {
        Ok(self
            .base_url
            .join(&format!("models/{model}:generateContent"))?)
    }
}

impl ContentBackend for GeminiClient {
    fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> impl Future<Output = Result<GenerateContentResponse, GenerationError>> + Send {
        async move {
            let url = self.endpoint(model)?;
            debug!("POST {}", url);

            let resp = self
                .http
                .post(url)
                .header(API_KEY_HEADER, &self.api_key)
                .json(request)
                .send()
                .await?;
            let status = resp.status();
            let bytes = resp.bytes().await?;

            if !status.is_success() {
                let message = match serde_json::from_slice::<ApiErrorBody>(&bytes) {
                    Ok(body) => match body.error.status {
                        Some(code) => format!("{} ({code})", body.error.message),
                        None => body.error.message,
                    },
                    Err(_) => String::from_utf8_lossy(&bytes).to_string(),
                };
                return Err(GenerationError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            serde_json::from_slice(&bytes)
                .map_err(|err| GenerationError::InvalidResponse(err.to_string()))
        }
    }
}

/// Request body for an image of the given shape.
pub fn image_request(prompt: &str, aspect_ratio: AspectRatio) -> GenerateContentRequest {
    GenerateContentRequest::from_text(
        prompt,
        GenerationConfig {
            image_config: Some(ImageConfig {
                aspect_ratio: aspect_ratio.as_str().to_string(),
            }),
            ..GenerationConfig::default()
        },
    )
}

/// Request body for a spoken line in the given voice.
pub fn speech_request(script: &str, voice: &str) -> GenerateContentRequest {
    GenerateContentRequest::from_text(
        script,
        GenerationConfig {
            response_modalities: Some(vec![Modality::Audio]),
            speech_config: Some(SpeechConfig {
                voice_config: VoiceConfig {
                    prebuilt_voice_config: PrebuiltVoiceConfig {
                        voice_name: voice.to_string(),
                    },
                },
            }),
            ..GenerationConfig::default()
        },
    )
}

/// Finds the first inline-data part of the first candidate.
fn first_inline_data(
    response: GenerateContentResponse,
    kind: ArtifactKind,
) -> Result<InlineData, GenerationError> {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.as_deref())
    {
        warn!("Prompt was blocked with reason: {}", reason);
    }

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(GenerationError::EmptyResponse(kind));
    };

    if let Some(reason) = candidate.finish_reason
        && reason != FinishReason::Stop
    {
        warn!("Generation finished with reason: {:?}", reason);
        if reason.is_safety() {
            return Err(GenerationError::SafetyRejected);
        }
    }

    candidate
        .content
        .into_iter()
        .flat_map(|content| content.parts)
        .find_map(|part| part.inline_data)
        .ok_or(GenerationError::NoArtifactData(kind))
}

/// Turns an image reply into a data-URI-ready artifact.
pub fn extract_image(response: GenerateContentResponse) -> Result<ImageArtifact, GenerationError> {
    let inline = first_inline_data(response, ArtifactKind::Image)?;
    Ok(ImageArtifact::new(inline.mime_type, inline.data))
}

/// Turns a speech reply into a playable artifact.
pub fn extract_audio(response: GenerateContentResponse) -> Result<AudioArtifact, GenerationError> {
    let inline = first_inline_data(response, ArtifactKind::Audio)?;
    AudioArtifact::from_base64(&inline.mime_type, &inline.data)
}

/// Asks the image model for a thumbnail.
pub async fn request_image<B: ContentBackend>(
    backend: &B,
    prompt: &str,
    aspect_ratio: AspectRatio,
) -> Result<ImageArtifact, GenerationError> {
    let request = image_request(prompt, aspect_ratio);
    backend
        .generate_content(IMAGE_MODEL, &request)
        .await
        .and_then(extract_image)
        .inspect_err(|err| error!("Image generation error: {}", err))
}

/// Asks the speech model to perform `script` in `voice`.
pub async fn request_speech<B: ContentBackend>(
    backend: &B,
    script: &str,
    voice: &str,
) -> Result<AudioArtifact, GenerationError> {
    let request = speech_request(script, voice);
    backend
        .generate_content(SPEECH_MODEL, &request)
        .await
        .and_then(extract_audio)
        .inspect_err(|err| error!("Audio generation error: {}", err))
}
