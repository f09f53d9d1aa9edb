use super::prelude::*;
use crate::constants::IMAGE_MODEL;
use crate::state::GenerationState;
use crate::thumbnail::{AspectRatio, ChaosLevel, Theme, ThumbnailConfig};

#[derive(Clone, Debug)]
pub(crate) struct ChoiceView {
    pub(crate) value: &'static str,
    pub(crate) selected: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub(crate) struct HomeTemplate {
    pub(crate) text: String,
    pub(crate) sub_text: String,
    pub(crate) chaos_level: u8,
    pub(crate) chaos_min: u8,
    pub(crate) chaos_max: u8,
    pub(crate) mood_label: &'static str,
    pub(crate) themes: Vec<ChoiceView>,
    pub(crate) aspect_ratios: Vec<ChoiceView>,
    pub(crate) include_audio: bool,
    pub(crate) palette_class: &'static str,
    pub(crate) aspect_class: &'static str,
    pub(crate) generate_label: &'static str,
    pub(crate) is_loading: bool,
    pub(crate) has_image: bool,
    pub(crate) image_uri: String,
    pub(crate) has_audio: bool,
    pub(crate) audio_uri: String,
    pub(crate) audio_filename: &'static str,
    pub(crate) caption: String,
    pub(crate) has_error: bool,
    pub(crate) error_message: String,
}

fn aspect_class(aspect_ratio: AspectRatio) -> &'static str {
    match aspect_ratio {
        AspectRatio::Portrait => "aspect-portrait",
        AspectRatio::Landscape => "aspect-landscape",
        AspectRatio::Square => "aspect-square",
    }
}

impl HomeTemplate {
    pub(crate) fn new(config: &ThumbnailConfig, state: &GenerationState) -> Self {
        let outcome = state.outcome();
        let audio = outcome.and_then(|outcome| outcome.audio.as_ref());
        let error_message = state.error_message().unwrap_or_default().to_string();

        Self {
            text: config.text.clone(),
            sub_text: config.sub_text.clone(),
            chaos_level: config.chaos_level.value(),
            chaos_min: ChaosLevel::MIN,
            chaos_max: ChaosLevel::MAX,
            mood_label: config.chaos_level.mood_label(),
            themes: Theme::ALL
                .iter()
                .map(|theme| ChoiceView {
                    value: theme.as_str(),
                    selected: *theme == config.theme,
                })
                .collect(),
            aspect_ratios: AspectRatio::ALL
                .iter()
                .map(|ratio| ChoiceView {
                    value: ratio.as_str(),
                    selected: *ratio == config.aspect_ratio,
                })
                .collect(),
            include_audio: config.include_audio,
            palette_class: config.theme.palette_class(),
            aspect_class: aspect_class(config.aspect_ratio),
            generate_label: if config.include_audio {
                "Generate Thumbnail + Audio"
            } else {
                "Generate Thumbnail"
            },
            is_loading: state.is_in_flight(),
            has_image: outcome.is_some(),
            image_uri: outcome
                .map(|outcome| outcome.image.data_uri())
                .unwrap_or_default(),
            has_audio: audio.is_some(),
            audio_uri: audio.map(|audio| audio.data_uri()).unwrap_or_default(),
            audio_filename: crate::constants::AUDIO_DOWNLOAD_FILENAME,
            caption: format!(
                "Model: {IMAGE_MODEL} • {}% CHAOS",
                config.chaos_level.value()
            ),
            has_error: !error_message.is_empty(),
            error_message,
        }
    }
}
