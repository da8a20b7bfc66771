/*!
 * Language code negotiation between caller-supplied tags and the canonical
 * code set of the Freed translation service.
 *
 * Callers hand the gateway BCP-47-ish tags in whatever shape their platform
 * produces ("zh_CN", "PT", "fr-CA"); the engine only accepts its own
 * canonical list. Resolution normalizes the tag, applies the fixed alias
 * overrides for the generic Chinese/English/Portuguese forms, then falls
 * back from the full tag to its primary subtag.
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Canonical language codes accepted by the Freed translation service
pub const SUPPORTED_LANGUAGE_CODES: &[&str] = &[
    "ace", "af", "am", "an", "ar", "as", "ay", "az", "ba", "be", "bg", "bho",
    "bn", "br", "bs", "ca", "ceb", "ckb", "cs", "cy", "da", "de", "el",
    "en-GB", "en-US", "eo", "es", "es-419", "et", "eu", "fa", "fi", "fr",
    "ga", "gl", "gn", "gom", "gu", "ha", "he", "hi", "hr", "ht", "hu", "hy",
    "id", "ig", "is", "it", "ja", "jv", "ka", "kk", "kmr", "ko", "ky", "la",
    "lb", "lmo", "ln", "lt", "lv", "mai", "mg", "mi", "mk", "ml", "mn", "mr",
    "ms", "mt", "my", "nb", "ne", "nl", "oc", "om", "pa", "pag", "pam", "pl",
    "prs", "ps", "pt-BR", "pt-PT", "qu", "ro", "ru", "sa", "scn", "si", "sk",
    "sl", "sq", "sr", "st", "su", "sv", "sw", "ta", "te", "tg", "th", "tk",
    "tl", "tn", "tr", "ts", "tt", "uk", "ur", "uz", "vi", "wo", "xh", "yi",
    "yue", "zh-Hans", "zh-Hant", "zu",
];

/// Fixed alias overrides applied ahead of the canonical lookup.
///
/// Generic or legacy tags that the engine does not model explicitly map to
/// the variant the service actually serves.
const ALIAS_OVERRIDES: &[(&str, &str)] = &[
    ("zh", "zh-Hans"),
    ("zh-cn", "zh-Hans"),
    ("zh-hans", "zh-Hans"),
    ("zh-tw", "zh-Hant"),
    ("zh-hant", "zh-Hant"),
    ("en", "en-US"),
    ("pt", "pt-PT"),
];

static SHARED_CODEC: Lazy<LanguageCodec> =
    Lazy::new(|| LanguageCodec::new(SUPPORTED_LANGUAGE_CODES));

/// Resolves arbitrary language tags into canonical engine codes
#[derive(Debug)]
pub struct LanguageCodec {
    /// Canonical codes in their advertised order
    canonical: Vec<&'static str>,
    /// Normalized canonical tag -> canonical code
    by_normalized: HashMap<String, &'static str>,
    /// Normalized alias tag -> canonical code; values are always members of
    /// the canonical set
    aliases: HashMap<&'static str, &'static str>,
}

impl LanguageCodec {
    /// Build a codec over the given canonical code set
    pub fn new(codes: &[&'static str]) -> Self {
        let by_normalized: HashMap<String, &'static str> = codes
            .iter()
            .map(|code| (normalize_tag(code), *code))
            .collect();

        // Overrides whose canonical target is absent from the set are
        // dropped so every alias value stays a member of the set.
        let aliases: HashMap<&'static str, &'static str> = ALIAS_OVERRIDES
            .iter()
            .filter(|(_, canonical)| by_normalized.contains_key(&normalize_tag(canonical)))
            .copied()
            .collect();

        Self {
            canonical: codes.to_vec(),
            by_normalized,
            aliases,
        }
    }

    /// The process-wide codec over [`SUPPORTED_LANGUAGE_CODES`]
    pub fn shared() -> &'static LanguageCodec {
        &SHARED_CODEC
    }

    /// Canonical codes in their advertised order
    pub fn canonical_codes(&self) -> &[&'static str] {
        &self.canonical
    }

    /// Resolve a caller-supplied tag to a canonical engine code.
    ///
    /// Returns None for blank tags, for the literal "auto" (auto-detection
    /// is modeled by the caller as the absence of a source code), and for
    /// tags whose base language the engine does not offer.
    pub fn resolve(&self, tag: &str) -> Option<&'static str> {
        if tag.trim().is_empty() {
            return None;
        }

        let normalized = normalize_tag(tag);
        if normalized == "auto" {
            return None;
        }

        if let Some(code) = self.aliases.get(normalized.as_str()) {
            return Some(code);
        }

        if let Some(code) = self.by_normalized.get(normalized.as_str()) {
            return Some(code);
        }

        // Regional and script subtags the engine does not model are dropped;
        // the fallback only consults the canonical set itself, so "fr-CA"
        // lands on "fr" while "en-AU" stays unsupported (no bare "en").
        self.by_normalized.get(primary_subtag(&normalized)).copied()
    }
}

impl Default for LanguageCodec {
    fn default() -> Self {
        Self::new(SUPPORTED_LANGUAGE_CODES)
    }
}

/// Normalize a tag: trim, underscores to hyphens, lowercase
fn normalize_tag(tag: &str) -> String {
    tag.trim().replace('_', "-").to_lowercase()
}

/// The primary language subtag of a normalized tag
fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or(tag)
}
