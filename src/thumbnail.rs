//! The thumbnail configuration: everything one generation attempt needs to know.

use std::fmt;
use std::str::FromStr;

use rand::seq::IndexedRandom;
use rand::RngExt;

use crate::constants::{DEFAULT_HEADLINE, DEFAULT_SUBTEXT, RANDOM_HEADLINES};

/// Visual theme of the thumbnail.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Theme {
    /// Epic fail, the broken iPad.
    #[default]
    Defeat,
    /// Three crown glory.
    Victory,
    /// Confused gamer moment.
    Funny,
    /// System crash.
    Glitch,
}

impl Theme {
    /// Every theme, in the order the form offers them.
    pub const ALL: [Theme; 4] = [Theme::Defeat, Theme::Victory, Theme::Funny, Theme::Glitch];

    /// The form/wire value of this theme.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Defeat => "defeat",
            Theme::Victory => "victory",
            Theme::Funny => "funny",
            Theme::Glitch => "glitch",
        }
    }

    /// Parses a theme, falling back to [`Theme::Defeat`] for anything unrecognised.
    pub fn parse_lossy(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "victory" => Theme::Victory,
            "funny" => Theme::Funny,
            "glitch" => Theme::Glitch,
            _ => Theme::Defeat,
        }
    }

    /// CSS class carrying the theme's accent gradient.
    pub fn palette_class(self) -> &'static str {
        match self {
            Theme::Defeat => "palette-defeat",
            Theme::Victory => "palette-victory",
            Theme::Funny => "palette-funny",
            Theme::Glitch => "palette-glitch",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output aspect ratio, passed through to the image model untouched.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum AspectRatio {
    /// Tall, 9:16.
    #[default]
    Portrait,
    /// Wide, 16:9.
    Landscape,
    /// Square, 1:1.
    Square,
}

impl AspectRatio {
    /// Every ratio, in the order the form offers them.
    pub const ALL: [AspectRatio; 3] = [
        AspectRatio::Portrait,
        AspectRatio::Landscape,
        AspectRatio::Square,
    ];

    /// The literal ratio string, e.g. `9:16`.
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Portrait => "9:16",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Square => "1:1",
        }
    }

    /// Platform the thumbnail is pitched at in the prompt.
    pub fn platform_label(self) -> &'static str {
        match self {
            AspectRatio::Portrait => "TikTok",
            AspectRatio::Landscape | AspectRatio::Square => "YouTube",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the supported aspect ratios.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownAspectRatio(pub String);

impl fmt::Display for UnknownAspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported aspect ratio: {}", self.0)
    }
}

impl std::error::Error for UnknownAspectRatio {}

impl FromStr for AspectRatio {
    type Err = UnknownAspectRatio;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "9:16" => Ok(AspectRatio::Portrait),
            "16:9" => Ok(AspectRatio::Landscape),
            "1:1" => Ok(AspectRatio::Square),
            other => Err(UnknownAspectRatio(other.to_string())),
        }
    }
}

/// Chaos intensity, always within `1..=100`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ChaosLevel(u8);

impl ChaosLevel {
    /// Lowest accepted level.
    pub const MIN: u8 = 1;
    /// Highest accepted level.
    pub const MAX: u8 = 100;

    /// Builds a level, clamping out-of-range input into `1..=100`.
    pub fn new(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(clamped as u8)
    }

    /// The raw level.
    pub fn value(self) -> u8 {
        self.0
    }

    /// The prompt intensity tier for this level.
    pub fn tier(self) -> ChaosTier {
        ChaosTier::for_level(self)
    }

    /// Caption shown under the chaos slider.
    pub fn mood_label(self) -> &'static str {
        match self.0 {
            0..30 => "Chill vibes.",
            30..70 => "Getting spicy...",
            _ => "ABSOLUTE DESTRUCTION 🔥",
        }
    }
}

impl Default for ChaosLevel {
    fn default() -> Self {
        Self(85)
    }
}

impl fmt::Display for ChaosLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Intensity tier selected from the chaos level.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ChaosTier {
    /// Level 50 and below.
    Low,
    /// Level 51 to 80.
    Medium,
    /// Level 81 and above.
    High,
}

impl ChaosTier {
    /// `> 80` is high, `> 50` is medium, anything else is low.
    pub fn for_level(level: ChaosLevel) -> Self {
        match level.value() {
            81.. => ChaosTier::High,
            51..=80 => ChaosTier::Medium,
            _ => ChaosTier::Low,
        }
    }

    /// Atmosphere phrase injected into the image prompt.
    pub fn descriptor(self) -> &'static str {
        match self {
            ChaosTier::High => {
                "complete visual overload, comic-style explosion lines, flying debris, intense motion blur, electric arcs, screaming faces"
            }
            ChaosTier::Medium => {
                "dynamic action lines, sweat drops, shaking effect, sparks, heavy impact frames"
            }
            ChaosTier::Low => "dramatic posing, bold outlines, expressive faces, focused lighting",
        }
    }
}

/// One generation request, owned by the caller and never mutated by generation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThumbnailConfig {
    /// Primary headline.
    pub text: String,
    /// Optional secondary line; empty means none.
    pub sub_text: String,
    /// Chaos intensity.
    pub chaos_level: ChaosLevel,
    /// Visual theme.
    pub theme: Theme,
    /// Output aspect ratio.
    pub aspect_ratio: AspectRatio,
    /// Also generate a spoken reaction.
    pub include_audio: bool,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            text: DEFAULT_HEADLINE.to_string(),
            sub_text: DEFAULT_SUBTEXT.to_string(),
            chaos_level: ChaosLevel::default(),
            theme: Theme::default(),
            aspect_ratio: AspectRatio::default(),
            include_audio: false,
        }
    }
}

impl ThumbnailConfig {
    /// Rolls a new headline, theme and chaos level, keeping everything else.
    pub fn randomized<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let text = RANDOM_HEADLINES
            .choose(rng)
            .map(|text| (*text).to_string())
            .unwrap_or_else(|| self.text.clone());
        let theme = Theme::ALL.choose(rng).copied().unwrap_or(self.theme);
        let chaos_level = ChaosLevel(rng.random_range(ChaosLevel::MIN..=ChaosLevel::MAX));

        Self {
            text,
            theme,
            chaos_level,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chaos_level_is_clamped() {
        assert_eq!(ChaosLevel::new(0).value(), 1);
        assert_eq!(ChaosLevel::new(-40).value(), 1);
        assert_eq!(ChaosLevel::new(101).value(), 100);
        assert_eq!(ChaosLevel::new(42).value(), 42);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(ChaosLevel::new(1).tier(), ChaosTier::Low);
        assert_eq!(ChaosLevel::new(50).tier(), ChaosTier::Low);
        assert_eq!(ChaosLevel::new(51).tier(), ChaosTier::Medium);
        assert_eq!(ChaosLevel::new(80).tier(), ChaosTier::Medium);
        assert_eq!(ChaosLevel::new(81).tier(), ChaosTier::High);
        assert_eq!(ChaosLevel::new(100).tier(), ChaosTier::High);
    }

    #[test]
    fn mood_labels() {
        assert_eq!(ChaosLevel::new(29).mood_label(), "Chill vibes.");
        assert_eq!(ChaosLevel::new(30).mood_label(), "Getting spicy...");
        assert_eq!(ChaosLevel::new(69).mood_label(), "Getting spicy...");
        assert_eq!(ChaosLevel::new(70).mood_label(), "ABSOLUTE DESTRUCTION 🔥");
    }

    #[test]
    fn unknown_theme_falls_back_to_defeat() {
        assert_eq!(Theme::parse_lossy("victory"), Theme::Victory);
        assert_eq!(Theme::parse_lossy(" GLITCH "), Theme::Glitch);
        assert_eq!(Theme::parse_lossy("rage-quit"), Theme::Defeat);
        assert_eq!(Theme::parse_lossy(""), Theme::Defeat);
    }

    #[test]
    fn aspect_ratio_parsing() {
        assert_eq!("9:16".parse::<AspectRatio>(), Ok(AspectRatio::Portrait));
        assert_eq!("16:9".parse::<AspectRatio>(), Ok(AspectRatio::Landscape));
        assert_eq!("1:1".parse::<AspectRatio>(), Ok(AspectRatio::Square));
        assert!("4:3".parse::<AspectRatio>().is_err());
        assert_eq!(AspectRatio::Portrait.platform_label(), "TikTok");
        assert_eq!(AspectRatio::Square.platform_label(), "YouTube");
    }

    #[test]
    fn randomized_keeps_layout_and_invariants() {
        let base = ThumbnailConfig {
            sub_text: "0 HP LEFT!?".to_string(),
            aspect_ratio: AspectRatio::Landscape,
            include_audio: true,
            ..ThumbnailConfig::default()
        };
        let mut rng = rand::rng();
        for _ in 0..50 {
            let rolled = base.randomized(&mut rng);
            assert_eq!(rolled.sub_text, base.sub_text);
            assert_eq!(rolled.aspect_ratio, base.aspect_ratio);
            assert!(rolled.include_audio);
            assert!(RANDOM_HEADLINES.contains(&rolled.text.as_str()));
            assert!((1..=100).contains(&rolled.chaos_level.value()));
        }
    }
}
