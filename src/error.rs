//! Error handling

use axum::response::{IntoResponse, Response};
use tracing::{error, info};

use crate::artifact::ArtifactKind;

/// Failures of a single call to the generation service.
///
/// The `Display` text is meant to be shown to the user as-is.
#[derive(Debug)]
pub enum GenerationError {
    /// The service returned no candidates at all.
    EmptyResponse(ArtifactKind),
    /// The first candidate was stopped by a content-safety policy.
    SafetyRejected,
    /// A candidate came back, but none of its parts carried binary data.
    NoArtifactData(ArtifactKind),
    /// The payload could not be decoded or wrapped into a playable file.
    DecodeFailure(String),
    /// The service answered with a non-success status.
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the service's error body.
        message: String,
    },
    /// The service answered successfully with something that isn't a response document.
    InvalidResponse(String),
    /// The request never got a response.
    Transport(reqwest::Error),
    /// The endpoint URL couldn't be built from the configured base URL.
    InvalidEndpoint(String),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyResponse(ArtifactKind::Image) => write!(
                f,
                "Image generation failed. The prompt might have triggered safety filters. Try lowering the Chaos Level."
            ),
            Self::EmptyResponse(ArtifactKind::Audio) | Self::NoArtifactData(ArtifactKind::Audio) => {
                write!(f, "No audio data generated")
            }
            Self::SafetyRejected => write!(
                f,
                "Safety filters triggered. Please reduce chaos level or remove aggressive text."
            ),
            Self::NoArtifactData(ArtifactKind::Image) => write!(
                f,
                "No image data found. The model might have returned only text."
            ),
            Self::DecodeFailure(reason) => write!(f, "Failed to decode generated media: {reason}"),
            Self::Api { status, message } => {
                write!(f, "Generation service error {status}: {message}")
            }
            Self::InvalidResponse(reason) => {
                write!(f, "Generation service returned an unreadable response: {reason}")
            }
            Self::Transport(err) => write!(f, "{err}"),
            Self::InvalidEndpoint(reason) => write!(f, "Invalid generation endpoint: {reason}"),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Transport(err)
    }
}

impl From<url::ParseError> for GenerationError {
    fn from(err: url::ParseError) -> Self {
        GenerationError::InvalidEndpoint(err.to_string())
    }
}

impl From<base64::DecodeError> for GenerationError {
    fn from(err: base64::DecodeError) -> Self {
        GenerationError::DecodeFailure(err.to_string())
    }
}

impl From<hound::Error> for GenerationError {
    fn from(err: hound::Error) -> Self {
        GenerationError::DecodeFailure(err.to_string())
    }
}

/// Errors surfaced by the web front-end.
#[derive(Debug)]
pub enum ClashgenError {
    /// The submitted form couldn't be turned into a configuration.
    BadRequest(String),
    /// A generation attempt is already running.
    Conflict,
    /// Nothing to serve at this path right now.
    NotFound(String),
    /// When an internal server error occurs
    InternalServerError(String),
}

impl From<askama::Error> for ClashgenError {
    fn from(err: askama::Error) -> Self {
        ClashgenError::InternalServerError(err.to_string())
    }
}

impl From<axum::http::Error> for ClashgenError {
    fn from(err: axum::http::Error) -> Self {
        ClashgenError::InternalServerError(err.to_string())
    }
}

impl IntoResponse for ClashgenError {
    fn into_response(self) -> Response {
        match self {
            ClashgenError::BadRequest(reason) => {
                info!("Bad request received: {}", reason);
                let mut response =
                    Response::new(axum::body::Body::from(format!("Bad Request: {reason}")));
                *response.status_mut() = axum::http::StatusCode::BAD_REQUEST;
                response
            }
            ClashgenError::Conflict => {
                info!("Rejected overlapping generation attempt");
                let mut response = Response::new(axum::body::Body::from(
                    "A generation is already in progress. Wait for it to finish.",
                ));
                *response.status_mut() = axum::http::StatusCode::CONFLICT;
                response
            }
            ClashgenError::NotFound(what) => {
                info!("404 {what}");
                let mut response = Response::new(axum::body::Body::from("Not Found"));
                *response.status_mut() = axum::http::StatusCode::NOT_FOUND;
                response
            }
            ClashgenError::InternalServerError(message) => {
                error!("Internal server error: {}", message);
                let mut response =
                    Response::new(axum::body::Body::from("Internal server error"));
                *response.status_mut() = axum::http::StatusCode::INTERNAL_SERVER_ERROR;
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_message_is_actionable() {
        let message = GenerationError::SafetyRejected.to_string();
        assert!(message.contains("reduce chaos level"));
    }

    #[test]
    fn messages_depend_on_artifact_kind() {
        assert!(
            GenerationError::NoArtifactData(ArtifactKind::Image)
                .to_string()
                .starts_with("No image data found")
        );
        assert_eq!(
            GenerationError::NoArtifactData(ArtifactKind::Audio).to_string(),
            "No audio data generated"
        );
        assert!(
            GenerationError::EmptyResponse(ArtifactKind::Image)
                .to_string()
                .contains("Try lowering the Chaos Level")
        );
    }

    #[test]
    fn conflict_maps_to_409() {
        let response = ClashgenError::Conflict.into_response();
        assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
    }
}
