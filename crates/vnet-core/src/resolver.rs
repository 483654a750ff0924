// crates/vnet-core/src/resolver.rs

//! # Settings Resolution
//!
//! Turns the full settings tree plus a page context (country, optional
//! language) into the leaf the page script should activate, if any.
//!
//! Order of operations is fixed: legacy country normalization, country
//! lookup, language selection, leaf lookup, then validation. Nothing here
//! fails; every dead end is an [`Unresolved`] value inside the returned
//! [`Resolution`].

use crate::language::select_language;
use crate::model::{available_languages, CountryCode, LanguageSettings, VoucherNetworkSettings};
use crate::traits::LanguageDetector;
use crate::validation::check_usable;
use serde::Serialize;
use thiserror::Error;

/// Why no leaf applies to a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Unresolved {
    #[error("no country was supplied")]
    MissingContext,
    #[error("no settings configured for this country/language")]
    NotConfigured,
    #[error("settings exist but are disabled")]
    Disabled,
    #[error("traffic source/medium number missing or not numeric")]
    Invalid,
}

/// Outcome envelope of one resolution call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// A (non-empty) country was handed over by the shop plugin.
    pub country_code_passed_on: bool,
    pub outcome: Result<LanguageSettings, Unresolved>,
}

impl Resolution {
    fn unresolved(country_code_passed_on: bool, reason: Unresolved) -> Self {
        Resolution {
            country_code_passed_on,
            outcome: Err(reason),
        }
    }

    /// The usable leaf, if one resolved.
    pub fn settings(&self) -> Option<&LanguageSettings> {
        self.outcome.as_ref().ok()
    }

    pub fn into_settings(self) -> Option<LanguageSettings> {
        self.outcome.ok()
    }

    pub fn reason(&self) -> Option<Unresolved> {
        self.outcome.as_ref().err().copied()
    }
}

/// Resolves the effective Voucher Network leaf for a page context.
///
/// - `country`: raw code from the shop; `"UK"` is treated as `"GB"`.
/// - `language`: only honoured for countries declaring several languages;
///   when absent there, `detector` supplies it.
///
/// # Examples
/// ```rust
/// use vnet_core::prelude::*;
///
/// let settings = VoucherNetworkSettings::default().with_leaf(
///     CountryCode::DE,
///     LanguageCode::De,
///     LanguageSettings::new(true, "123", "456"),
/// );
/// let detector = StaticLanguageDetector::default();
///
/// let hit = resolve_voucher_network_settings(&settings, Some("DE"), Some("fr"), &detector);
/// assert_eq!(hit.settings(), Some(&LanguageSettings::new(true, "123", "456")));
///
/// let miss = resolve_voucher_network_settings(&settings, None, None, &detector);
/// assert!(!miss.country_code_passed_on);
/// assert_eq!(miss.reason(), Some(Unresolved::MissingContext));
/// ```
pub fn resolve_voucher_network_settings(
    settings: &VoucherNetworkSettings,
    country: Option<&str>,
    language: Option<&str>,
    detector: &impl LanguageDetector,
) -> Resolution {
    let Some(raw_country) = country.filter(|c| !c.is_empty()) else {
        tracing::debug!("no country context available");
        return Resolution::unresolved(false, Unresolved::MissingContext);
    };

    let Ok(country) = CountryCode::parse_normalized(raw_country) else {
        tracing::debug!(country = raw_country, "country is not supported");
        return Resolution::unresolved(true, Unresolved::NotConfigured);
    };

    let Some(country_settings) = settings.country(country) else {
        tracing::debug!(%country, "country has no settings");
        return Resolution::unresolved(true, Unresolved::NotConfigured);
    };

    let available = available_languages(country);
    let Some(language) = select_language(country, language, &available, detector) else {
        tracing::debug!(%country, "no applicable language");
        return Resolution::unresolved(true, Unresolved::NotConfigured);
    };

    let leaf = country_settings.languages.get(&language).map(|leaf| leaf.as_ref());
    match check_usable(leaf) {
        Ok(usable) => {
            tracing::debug!(%country, %language, "voucher network settings resolved");
            Resolution {
                country_code_passed_on: true,
                outcome: Ok(usable.clone()),
            }
        }
        Err(reason) => {
            tracing::debug!(%country, %language, %reason, "voucher network settings unusable");
            Resolution::unresolved(true, reason)
        }
    }
}
