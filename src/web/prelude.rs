pub(crate) use crate::error::ClashgenError;
pub(crate) use crate::gemini::ContentBackend;
pub(crate) use askama::Template;
pub(crate) use askama_web::WebTemplate;
pub(crate) use axum::extract::{Form, State};
pub(crate) use axum::http::{HeaderValue, header::CONTENT_TYPE};
pub(crate) use axum::response::IntoResponse;
pub(crate) use serde::Deserialize;
pub(crate) use std::sync::Arc;
pub(crate) use tracing::{error, info};
