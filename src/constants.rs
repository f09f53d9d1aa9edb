//! Shared constants for the generation service and the web front-end
//!

/// Default Gemini REST endpoint, model paths are joined onto it.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Model used for thumbnail images.
pub const IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Model used for the spoken reaction.
pub const SPEECH_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Voice used for the defeat theme.
pub const VOICE_DEFEAT: &str = "Fenrir";

/// Voice used for every other theme.
pub const VOICE_DEFAULT: &str = "Puck";

/// Sample rate assumed when the speech payload doesn't declare one.
pub const DEFAULT_PCM_SAMPLE_RATE: u32 = 24_000;

/// Highest sample rate accepted from a speech payload.
pub const MAX_PCM_SAMPLE_RATE: u32 = 384_000;

/// MIME type of the audio artifact once wrapped.
pub const AUDIO_WAV_MIME: &str = "audio/wav";

/// Filename offered when downloading the voiceover.
pub const AUDIO_DOWNLOAD_FILENAME: &str = "gamer-reaction.wav";

/// Prefix of the filename offered when downloading the thumbnail.
pub const IMAGE_DOWNLOAD_PREFIX: &str = "clash-royale-thumbnail";

/// Headline of the default loadout.
pub const DEFAULT_HEADLINE: &str = "LOST THE BATTLE...";

/// Secondary text of the default loadout.
pub const DEFAULT_SUBTEXT: &str = "RIP IPAD 💀📱";

/// Headlines picked from when randomizing a loadout.
pub const RANDOM_HEADLINES: [&str; 4] = [
    "HE HE HE HAW",
    "UNINSTALLING...",
    "I BROKE IT",
    "MY MOM IS MAD",
];
