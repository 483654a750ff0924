// crates/vnet-core/src/language.rs

//! Language key selection for a country.
//!
//! Precedence, for the languages declared in
//! [`LANGUAGES_BY_COUNTRIES`](crate::model::LANGUAGES_BY_COUNTRIES):
//! - none declared: no language
//! - exactly one: that language, whatever the caller passed
//! - several: the caller's language, else the detected primary subtag

use crate::model::{CountryCode, LanguageCode};
use crate::traits::LanguageDetector;

/// Leading language portion of a locale tag: everything before the first `-`.
///
/// No case folding and no `_` handling: `"en-US"` gives `"en"`, `"en_US"`
/// stays `"en_US"`.
#[inline]
pub fn primary_subtag(tag: &str) -> &str {
    tag.split('-').next().unwrap_or_default()
}

/// Value-backed [`LanguageDetector`] for native callers and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLanguageDetector {
    pub document: Option<String>,
    pub navigator: Option<String>,
}

impl StaticLanguageDetector {
    pub fn new(document: Option<&str>, navigator: Option<&str>) -> Self {
        StaticLanguageDetector {
            document: document.map(str::to_owned),
            navigator: navigator.map(str::to_owned),
        }
    }
}

impl LanguageDetector for StaticLanguageDetector {
    fn document_language(&self) -> Option<String> {
        self.document.clone()
    }

    fn navigator_language(&self) -> Option<String> {
        self.navigator.clone()
    }
}

/// Picks the language key to look up for `country`.
///
/// The detector is only consulted for multi-language countries without an
/// explicit (non-empty) language. A chosen key that is not a supported
/// [`LanguageCode`] yields `None`; it is not checked against `available`.
pub fn select_language(
    country: CountryCode,
    explicit: Option<&str>,
    available: &[LanguageCode],
    detector: &impl LanguageDetector,
) -> Option<LanguageCode> {
    match available {
        [] => {
            tracing::debug!(%country, "country declares no languages");
            None
        }
        [only] => Some(*only),
        _ => {
            let chosen = match explicit.filter(|l| !l.is_empty()) {
                Some(language) => language.to_owned(),
                None => {
                    let detected = detector.detect_primary_language_subtag();
                    tracing::debug!(%country, %detected, "using detected language");
                    detected
                }
            };
            chosen.parse().ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_subtag_cuts_at_first_hyphen_only() {
        assert_eq!(primary_subtag("en-US"), "en");
        assert_eq!(primary_subtag("zh-Hant-TW"), "zh");
        assert_eq!(primary_subtag("DE"), "DE");
        assert_eq!(primary_subtag("en_US"), "en_US");
        assert_eq!(primary_subtag(""), "");
    }

    #[test]
    fn document_language_wins_over_navigator() {
        let detector = StaticLanguageDetector::new(Some("de-CH"), Some("fr-FR"));
        assert_eq!(detector.detect_primary_language_subtag(), "de");
    }

    #[test]
    fn navigator_used_when_document_tag_is_empty() {
        let detector = StaticLanguageDetector::new(Some(""), Some("it-CH"));
        assert_eq!(detector.detect_primary_language_subtag(), "it");

        let nothing = StaticLanguageDetector::default();
        assert_eq!(nothing.detect_primary_language_subtag(), "");
    }
}
