//! Prompt composition. Everything here is pure: the same configuration always
//! yields the same strings.

use crate::constants::{VOICE_DEFAULT, VOICE_DEFEAT};
use crate::thumbnail::{Theme, ThumbnailConfig};

/// The scenario block for one theme.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ThemeTemplate {
    /// Scenario headline.
    pub scenario: &'static str,
    /// What sits in the middle of the frame.
    pub centerpiece: &'static str,
    /// Cast summary.
    pub characters: &'static str,
    /// Optional per-character direction, one line each.
    pub character_details: &'static [&'static str],
    /// Colour palette.
    pub colors: &'static str,
}

const DEFEAT: ThemeTemplate = ThemeTemplate {
    scenario: "Epic Fail – Clash Royale Chaos",
    centerpiece: "A Broken iPad in the middle with cracks forming a cartoon-style explosion.",
    characters: "Cartoon/comic-style Clash Royale troops with EXAGGERATED expressions interacting with the device.",
    character_details: &[
        "Mega Knight crying dramatically (waterfalls of tears).",
        "Goblin panicking and poking the cracked screen.",
        "Baby Dragon flying away in fear.",
        "King sweating bullets with bulging eyes.",
    ],
    colors: "Neon reds, oranges, and yellows for explosions contrasting with blue/green troops.",
};

const VICTORY: ThemeTemplate = ThemeTemplate {
    scenario: "Epic Win - Three Crown Glory",
    centerpiece: "A glowing, golden iPad showing a \"Victory\" banner. It is pristine and radiating holy light.",
    characters: "Cartoon King laughing hysterically, Mega Knight flexing muscles, Goblins throwing confetti.",
    character_details: &[],
    colors: "Gold, bright blue, cyan, and white. Heavenly, saturated lighting.",
};

const FUNNY: ThemeTemplate = ThemeTemplate {
    scenario: "Confused Gamer Moment",
    centerpiece: "A smoking iPad that looks melted.",
    characters: "King scratching his head confused, Hog Rider looking shocked, a Skeleton shrugging.",
    character_details: &[],
    colors: "Bright yellow, orange, and purple. Wacky, tilted angles.",
};

const GLITCH: ThemeTemplate = ThemeTemplate {
    scenario: "System Crash - Glitch World",
    centerpiece: "An iPad dissolving into digital pixels and matrix code.",
    characters: "Troops glitching out, half-loaded textures, missing eyes, T-posing models.",
    character_details: &[],
    colors: "Neon purple, matrix green, hot pink. CRT monitor scanlines.",
};

/// Template for a theme.
pub fn theme_template(theme: Theme) -> &'static ThemeTemplate {
    match theme {
        Theme::Defeat => &DEFEAT,
        Theme::Victory => &VICTORY,
        Theme::Funny => &FUNNY,
        Theme::Glitch => &GLITCH,
    }
}

impl ThemeTemplate {
    /// Renders the scenario block as it appears in the prompt.
    pub fn render(&self) -> String {
        let mut block = format!(
            "SCENARIO: \"{}\".\nCENTERPIECE: {}\nCHARACTERS: {}\n",
            self.scenario, self.centerpiece, self.characters
        );
        for detail in self.character_details {
            block.push_str("   - ");
            block.push_str(detail);
            block.push('\n');
        }
        block.push_str("COLORS: ");
        block.push_str(self.colors);
        block
    }
}

/// Builds the image-generation prompt for a configuration.
///
/// The aspect ratio itself is sent separately in the image config; here it only
/// picks the platform the thumbnail is pitched at.
pub fn compose_image_prompt(config: &ThumbnailConfig) -> String {
    let scenario = theme_template(config.theme).render();
    let atmosphere = config.chaos_level.tier().descriptor();

    let mut overlay = format!("- Primary Text: \"{}\"\n", config.text);
    if !config.sub_text.is_empty() {
        overlay.push_str(&format!("- Secondary Text: \"{}\"\n", config.sub_text));
    }

    format!(
        r#"Create a high-quality, "Scroll-stopping" {platform} thumbnail.

STYLE GUIDE:
- CARTOON + COMIC BOOK + CHAOTIC HUMOR.
- Thick bold outlines.
- Bright, vibrant, saturated colors.
- Exaggerated facial expressions (anime/comic style).
- NOT realistic. Think stylized promotional art.

{scenario}

BACKGROUND:
- Cartoon battlefield with debris flying, cards in mid-air (Arrows, Fireball).
- Dynamic "impact" lines radiating from the center.

ATMOSPHERE: {atmosphere}

OVERLAY TEXT (Must be integrated into the art, Big Comic Book Font):
{overlay}
COMPOSITION:
- Subject centered.
- Elements popping out towards the viewer (3D pop-out effect).
- Floating emojis in 3D style: 💀, 🔥, 🤣, 📱.
"#,
        platform = config.aspect_ratio.platform_label(),
    )
}

/// Builds the line the voice model acts out.
pub fn compose_speech_script(config: &ThumbnailConfig) -> String {
    let text = &config.text;
    match config.theme {
        Theme::Defeat => format!(
            "Act as a raging cartoon gamer character. Scream dramatically and exaggerate: \"NOOOO! MY SCREEN! THE MEGA KNIGHT JUMPED ON MY IPAD! {text}!\""
        ),
        Theme::Victory => format!(
            "Act as a triumphant cartoon King. Laugh heartily and shout: \"HEE HEE HEE HAW! EASY WIN! {text}!\""
        ),
        Theme::Funny | Theme::Glitch => format!(
            "Act as a confused goblin. Squeaky voice: \"Uh oh. I think I broke it. {text}?\""
        ),
    }
}

/// Prebuilt voice for a theme: defeat gets its own, everything else shares one.
pub fn voice_for(theme: Theme) -> &'static str {
    match theme {
        Theme::Defeat => VOICE_DEFEAT,
        Theme::Victory | Theme::Funny | Theme::Glitch => VOICE_DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thumbnail::{AspectRatio, ChaosLevel, ChaosTier};

    fn config(theme: Theme, chaos: i64, sub_text: &str) -> ThumbnailConfig {
        ThumbnailConfig {
            text: "LOST THE BATTLE...".to_string(),
            sub_text: sub_text.to_string(),
            chaos_level: ChaosLevel::new(chaos),
            theme,
            aspect_ratio: AspectRatio::Portrait,
            include_audio: false,
        }
    }

    #[test]
    fn prompt_is_deterministic() {
        for theme in Theme::ALL {
            let cfg = config(theme, 64, "0 HP LEFT!?");
            assert_eq!(compose_image_prompt(&cfg), compose_image_prompt(&cfg.clone()));
            assert_eq!(compose_speech_script(&cfg), compose_speech_script(&cfg));
        }
    }

    #[test]
    fn empty_subtext_omits_secondary_line() {
        let prompt = compose_image_prompt(&config(Theme::Funny, 10, ""));
        assert!(!prompt.contains("Secondary Text"));
        assert!(prompt.contains("- Primary Text: \"LOST THE BATTLE...\""));
    }

    #[test]
    fn subtext_is_included_verbatim() {
        let prompt = compose_image_prompt(&config(Theme::Funny, 10, "RIP IPAD 💀📱"));
        assert!(prompt.contains("- Secondary Text: \"RIP IPAD 💀📱\""));
    }

    #[test]
    fn atmosphere_follows_tier_boundaries() {
        for (level, tier) in [
            (50, ChaosTier::Low),
            (51, ChaosTier::Medium),
            (80, ChaosTier::Medium),
            (81, ChaosTier::High),
        ] {
            let prompt = compose_image_prompt(&config(Theme::Defeat, level, ""));
            assert!(
                prompt.contains(&format!("ATMOSPHERE: {}", tier.descriptor())),
                "level {level} should use the {tier:?} descriptor"
            );
        }
    }

    #[test]
    fn every_theme_has_its_own_block() {
        let mut scenarios = std::collections::HashSet::new();
        for theme in Theme::ALL {
            let template = theme_template(theme);
            assert!(!template.scenario.is_empty());
            assert!(!template.characters.is_empty());
            assert!(!template.colors.is_empty());
            let prompt = compose_image_prompt(&config(theme, 50, ""));
            assert!(prompt.contains(template.scenario));
            scenarios.insert(template.scenario);
        }
        assert_eq!(scenarios.len(), 4);
    }

    #[test]
    fn unrecognised_theme_renders_defeat_block() {
        let cfg = config(Theme::parse_lossy("speedrun"), 50, "");
        assert!(compose_image_prompt(&cfg).contains("Epic Fail – Clash Royale Chaos"));
    }

    #[test]
    fn platform_label_follows_aspect_ratio() {
        let mut cfg = config(Theme::Victory, 50, "");
        assert!(compose_image_prompt(&cfg).contains("\"Scroll-stopping\" TikTok thumbnail"));
        cfg.aspect_ratio = AspectRatio::Landscape;
        assert!(compose_image_prompt(&cfg).contains("\"Scroll-stopping\" YouTube thumbnail"));
        assert!(!compose_image_prompt(&cfg).contains("16:9"));
    }

    #[test]
    fn speech_scripts_per_theme() {
        assert!(compose_speech_script(&config(Theme::Defeat, 1, ""))
            .contains("THE MEGA KNIGHT JUMPED ON MY IPAD! LOST THE BATTLE...!"));
        assert!(compose_speech_script(&config(Theme::Victory, 1, ""))
            .contains("EASY WIN! LOST THE BATTLE...!"));
        for theme in [Theme::Funny, Theme::Glitch] {
            assert!(compose_speech_script(&config(theme, 1, ""))
                .contains("I think I broke it. LOST THE BATTLE...?"));
        }
    }

    #[test]
    fn voices() {
        assert_eq!(voice_for(Theme::Defeat), "Fenrir");
        assert_eq!(voice_for(Theme::Victory), "Puck");
        assert_eq!(voice_for(Theme::Funny), "Puck");
        assert_eq!(voice_for(Theme::Glitch), "Puck");
    }

    #[test]
    fn default_loadout_scenario() {
        let cfg = ThumbnailConfig {
            sub_text: String::new(),
            ..ThumbnailConfig::default()
        };
        assert_eq!(cfg.chaos_level.value(), 85);
        let prompt = compose_image_prompt(&cfg);
        assert!(prompt.contains("SCENARIO: \"Epic Fail – Clash Royale Chaos\"."));
        assert!(prompt.contains(ChaosTier::High.descriptor()));
        assert!(!prompt.contains("Secondary Text"));
    }
}
