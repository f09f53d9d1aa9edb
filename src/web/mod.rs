//! Browser front-end: the loadout form, the preview, and the downloads.

use std::num::NonZeroU16;

use axum::Router;
use axum::body::Body;
use axum::http::header::CONTENT_DISPOSITION;
use axum::response::{Redirect, Response};
use tokio::sync::RwLock;

use crate::generator::Generator;
use crate::state::GenerationTracker;
use crate::thumbnail::{ChaosLevel, Theme, ThumbnailConfig};

mod prelude;
mod views;

use prelude::*;
use views::HomeTemplate;

pub(crate) struct AppState<B> {
    generator: Arc<Generator<B>>,
    tracker: Arc<RwLock<GenerationTracker>>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            generator: self.generator.clone(),
            tracker: self.tracker.clone(),
        }
    }
}

impl<B: ContentBackend> AppState<B> {
    fn new(generator: Generator<B>) -> Self {
        Self {
            generator: Arc::new(generator),
            tracker: Arc::new(RwLock::new(GenerationTracker::new(
                ThumbnailConfig::default(),
            ))),
        }
    }
}

/// Body of the generate form.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub(crate) struct GenerateForm {
    text: String,
    sub_text: String,
    chaos_level: String,
    theme: String,
    aspect_ratio: String,
    include_audio: Option<String>,
}

impl GenerateForm {
    fn into_config(self) -> Result<ThumbnailConfig, ClashgenError> {
        let chaos_level: i64 = self.chaos_level.trim().parse().map_err(|_| {
            ClashgenError::BadRequest(format!("Invalid chaos level: {}", self.chaos_level))
        })?;
        let aspect_ratio = self
            .aspect_ratio
            .parse()
            .map_err(|err: crate::thumbnail::UnknownAspectRatio| {
                ClashgenError::BadRequest(err.to_string())
            })?;

        Ok(ThumbnailConfig {
            text: self.text,
            sub_text: self.sub_text,
            chaos_level: ChaosLevel::new(chaos_level),
            theme: Theme::parse_lossy(&self.theme),
            aspect_ratio,
            include_audio: self.include_audio.is_some(),
        })
    }
}

async fn root_handler<B: ContentBackend + 'static>(
    State(state): State<AppState<B>>,
) -> HomeTemplate {
    let tracker = state.tracker.read().await;
    HomeTemplate::new(tracker.config(), tracker.state())
}

/// Runs one attempt to completion, then sends the browser back to `/`.
///
/// The attempt runs on its own task so that a dropped connection can't leave
/// the tracker stuck in flight.
async fn generate_handler<B: ContentBackend + 'static>(
    State(state): State<AppState<B>>,
    Form(form): Form<GenerateForm>,
) -> Result<Redirect, ClashgenError> {
    let config = form.into_config()?;
    let Some(attempt) = state.tracker.write().await.begin(config.clone()) else {
        return Err(ClashgenError::Conflict);
    };
    info!("Starting generation attempt {}", attempt);

    let generator = state.generator.clone();
    let tracker = state.tracker.clone();
    let task = tokio::spawn(async move {
        let result = generator.generate(&config).await.map_err(|err| {
            error!("Generation attempt {} failed: {}", attempt, err);
            err.to_string()
        });
        tracker.write().await.finish(attempt, result);
    });

    if let Err(err) = task.await {
        state
            .tracker
            .write()
            .await
            .finish(attempt, Err(err.to_string()));
        return Err(ClashgenError::InternalServerError(err.to_string()));
    }
    Ok(Redirect::to("/"))
}

async fn randomize_handler<B: ContentBackend + 'static>(
    State(state): State<AppState<B>>,
) -> Redirect {
    let mut tracker = state.tracker.write().await;
    let rolled = tracker.config().randomized(&mut rand::rng());
    tracker.set_config(rolled);
    Redirect::to("/")
}

async fn audio_handler<B: ContentBackend + 'static>(
    State(state): State<AppState<B>>,
) -> Result<Response, ClashgenError> {
    let outcome = state.tracker.read().await.state().outcome().cloned();
    let Some(audio) = outcome.as_ref().and_then(|outcome| outcome.audio.as_ref()) else {
        return Err(ClashgenError::NotFound("/audio".to_string()));
    };

    let disposition = format!("attachment; filename=\"{}\"", audio.file_name());
    Response::builder()
        .header(CONTENT_TYPE, audio.mime_type())
        .header(CONTENT_DISPOSITION, disposition)
        .body(Body::from(audio.bytes().to_vec()))
        .map_err(ClashgenError::from)
}

async fn image_handler<B: ContentBackend + 'static>(
    State(state): State<AppState<B>>,
) -> Result<Response, ClashgenError> {
    let outcome = state.tracker.read().await.state().outcome().cloned();
    let Some(outcome) = outcome else {
        return Err(ClashgenError::NotFound("/image".to_string()));
    };

    let bytes = outcome
        .image
        .decode()
        .map_err(|err| ClashgenError::InternalServerError(err.to_string()))?;
    let disposition = format!("attachment; filename=\"{}\"", outcome.image_filename());
    Response::builder()
        .header(CONTENT_TYPE, outcome.image.mime_type())
        .header(CONTENT_DISPOSITION, disposition)
        .body(Body::from(bytes))
        .map_err(ClashgenError::from)
}

fn create_router<B: ContentBackend + 'static>() -> Router<AppState<B>> {
    Router::new()
        .route("/", axum::routing::get(root_handler::<B>))
        .route("/static/styles.css", axum::routing::get(styles_handler))
        .route("/generate", axum::routing::post(generate_handler::<B>))
        .route("/randomize", axum::routing::post(randomize_handler::<B>))
        .route("/audio", axum::routing::get(audio_handler::<B>))
        .route("/image", axum::routing::get(image_handler::<B>))
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    (
        [(CONTENT_TYPE, HeaderValue::from_static("text/css"))],
        STYLES,
    )
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

/// Serves the form UI, generating through `backend`.
pub async fn setup_server<B: ContentBackend + 'static>(
    listen_addr: &str,
    port: NonZeroU16,
    backend: B,
) -> Result<(), anyhow::Error> {
    let app = create_router().with_state(AppState::new(Generator::new(backend)));

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", err);
    }
    Ok(())
}
