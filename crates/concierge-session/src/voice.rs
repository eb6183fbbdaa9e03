//! Voice selection for spoken bot replies.
//!
//! The surface reports whatever synthesis voices the platform offers; the
//! picker applies a fixed preference order so the widget sounds the same
//! wherever a comparable voice exists.

/// A speech-synthesis voice as reported by the surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceProfile {
    /// Platform voice name, e.g. "Microsoft Zira - English (United States)".
    pub name: String,
    /// BCP-47 language tag, e.g. "en-US".
    pub lang: String,
}

impl VoiceProfile {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }

    fn is_english(&self) -> bool {
        self.lang.starts_with("en")
    }
}

/// Voice names that commonly denote a female English voice on desktop and
/// mobile platforms.
const NAME_HINTS: &[&str] = &[
    "samantha", "zira", "susan", "karen", "moira", "tessa", "victoria",
];

/// Pick a voice by preference order:
/// 1. an explicitly female-labeled English voice that is not a UK variant,
/// 2. any voice whose name carries a known female-name hint,
/// 3. any English voice,
/// 4. none.
pub fn pick_voice(voices: &[VoiceProfile]) -> Option<&VoiceProfile> {
    voices
        .iter()
        .find(|v| {
            let name = v.name.to_lowercase();
            v.is_english() && name.contains("female") && !name.contains("uk")
        })
        .or_else(|| {
            voices.iter().find(|v| {
                let name = v.name.to_lowercase();
                NAME_HINTS.iter().any(|hint| name.contains(hint))
            })
        })
        .or_else(|| voices.iter().find(|v| v.is_english()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(name: &str, lang: &str) -> VoiceProfile {
        VoiceProfile::new(name, lang)
    }

    #[test]
    fn test_prefers_female_english_voice() {
        let voices = vec![
            voice("Daniel", "en-GB"),
            voice("Google US English Female", "en-US"),
            voice("Samantha", "en-US"),
        ];
        let picked = pick_voice(&voices).unwrap();
        assert_eq!(picked.name, "Google US English Female");
    }

    #[test]
    fn test_skips_uk_female_variant() {
        let voices = vec![
            voice("Google UK English Female", "en-GB"),
            voice("Google US English Female", "en-US"),
        ];
        let picked = pick_voice(&voices).unwrap();
        assert_eq!(picked.name, "Google US English Female");
    }

    #[test]
    fn test_uk_female_loses_to_name_hint() {
        // Only a UK female voice and a hinted name: the hint wins because
        // the UK variant is excluded from the first tier.
        let voices = vec![
            voice("Google UK English Female", "en-GB"),
            voice("Microsoft Zira - English (United States)", "en-US"),
        ];
        let picked = pick_voice(&voices).unwrap();
        assert!(picked.name.contains("Zira"));
    }

    #[test]
    fn test_name_hint_fallback() {
        let voices = vec![voice("Daniel", "en-GB"), voice("Karen", "en-AU")];
        let picked = pick_voice(&voices).unwrap();
        assert_eq!(picked.name, "Karen");
    }

    #[test]
    fn test_name_hint_matches_case_insensitively() {
        let voices = vec![voice("SAMANTHA", "en-US")];
        assert_eq!(pick_voice(&voices).unwrap().name, "SAMANTHA");
    }

    #[test]
    fn test_any_english_fallback() {
        let voices = vec![voice("Thomas", "fr-FR"), voice("Daniel", "en-GB")];
        let picked = pick_voice(&voices).unwrap();
        assert_eq!(picked.name, "Daniel");
    }

    #[test]
    fn test_no_english_voice_picks_none() {
        let voices = vec![voice("Thomas", "fr-FR"), voice("Anna", "de-DE")];
        assert!(pick_voice(&voices).is_none());
    }

    #[test]
    fn test_empty_voice_list_picks_none() {
        assert!(pick_voice(&[]).is_none());
    }

    #[test]
    fn test_female_label_requires_english() {
        // A female-labeled non-English voice does not satisfy the first
        // tier; the English voice wins via the last tier.
        let voices = vec![
            voice("Amelie Female", "fr-CA"),
            voice("Daniel", "en-GB"),
        ];
        let picked = pick_voice(&voices).unwrap();
        assert_eq!(picked.name, "Daniel");
    }

    #[test]
    fn test_first_matching_voice_wins_within_tier() {
        let voices = vec![
            voice("Google US English Female", "en-US"),
            voice("Microsoft Eva Female", "en-US"),
        ];
        assert_eq!(pick_voice(&voices).unwrap().name, "Google US English Female");
    }
}
