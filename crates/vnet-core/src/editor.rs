// crates/vnet-core/src/editor.rs

//! # Admin Settings Editor
//!
//! State transitions behind the per-country/per-language admin form. Every
//! operation takes the current tree and returns the next one:
//! - nothing changed: the very same `Arc` comes back (`Arc::ptr_eq` holds),
//!   so repeated identical UI events are free
//! - something changed: a new root, a new node for the edited country and a
//!   new leaf; every other country and leaf is shared with the input tree

use crate::model::{
    languages_of, CountryCode, CountrySettings, LanguageCode, LanguageSettings, TrafficField,
    VoucherNetworkSettings,
};
use crate::validation::is_usable;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// What a failed integer parse is stored as.
///
/// Kept for compatibility with settings written by the browser admin, which
/// stringified `NaN`. A dedicated invalid variant would be the cleaner model.
pub const NAN_SENTINEL: &str = "NaN";

/// Toggles `isEnabled` of one leaf.
///
/// Only acts when the leaf already holds both IDs (non-empty, not
/// necessarily valid) and `checked` differs from the stored flag.
pub fn set_enabled(
    tree: &Arc<VoucherNetworkSettings>,
    country: CountryCode,
    language: LanguageCode,
    checked: bool,
) -> Arc<VoucherNetworkSettings> {
    let Some(leaf) = tree.leaf(country, language) else {
        return Arc::clone(tree);
    };
    if !leaf.has_both_ids() || leaf.is_enabled == checked {
        return Arc::clone(tree);
    }
    let updated = LanguageSettings {
        is_enabled: checked,
        ..leaf.clone()
    };
    replace_leaf(tree, country, language, updated)
}

/// Stores a typed-in ID and recomputes `isEnabled`.
///
/// `raw` goes through [`parse_int_js`]; unparsable input is stored as
/// [`NAN_SENTINEL`]. A missing leaf (or country) is created on first edit.
///
/// The enablement recompute uses [`is_js_number`], which is looser than the
/// digit-only rule of [`crate::validation`]: `""` and `"-5"` count as numbers
/// here. The admin badge still goes through the strict rule, so such a leaf
/// shows as not enabled.
pub fn set_field(
    tree: &Arc<VoucherNetworkSettings>,
    country: CountryCode,
    language: LanguageCode,
    field: TrafficField,
    raw: &str,
) -> Arc<VoucherNetworkSettings> {
    let new_value = parse_int_js(raw).unwrap_or_else(|| NAN_SENTINEL.to_owned());
    let current = tree.leaf(country, language);
    if current.and_then(|leaf| leaf.field(field)) == Some(new_value.as_str()) {
        return Arc::clone(tree);
    }

    let mut leaf = current.cloned().unwrap_or_default();
    leaf.is_enabled =
        is_js_number(leaf.field(field.other())) && is_js_number(Some(new_value.as_str()));
    *leaf.field_mut(field) = Some(new_value);
    replace_leaf(tree, country, language, leaf)
}

/// Rebuilds the path root -> country -> leaf, sharing all siblings.
fn replace_leaf(
    tree: &VoucherNetworkSettings,
    country: CountryCode,
    language: LanguageCode,
    leaf: LanguageSettings,
) -> Arc<VoucherNetworkSettings> {
    let mut root = tree.clone();
    let mut node: CountrySettings = root
        .countries
        .get(&country)
        .map(|node| node.as_ref().clone())
        .unwrap_or_default();
    node.languages.insert(language, Arc::new(leaf));
    root.countries.insert(country, Arc::new(node));
    Arc::new(root)
}

/// JavaScript `parseInt(raw, 10)`, rendered back to its decimal string.
///
/// Leading whitespace and one sign are accepted, then the longest run of
/// ASCII digits; anything after it is dropped. Leading zeros are removed and
/// `-0` renders as `0`. Digits are kept exactly, without the float rounding a
/// browser applies past 2^53.
///
/// ```rust
/// use vnet_core::editor::parse_int_js;
///
/// assert_eq!(parse_int_js("123abc").as_deref(), Some("123"));
/// assert_eq!(parse_int_js("  -007").as_deref(), Some("-7"));
/// assert_eq!(parse_int_js("abc"), None);
/// ```
pub fn parse_int_js(raw: &str) -> Option<String> {
    let s = raw.trim_start_matches(is_js_whitespace);
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = rest[..digits_len].trim_start_matches('0');
    Some(match (digits.is_empty(), negative) {
        (true, _) => "0".to_owned(),
        (false, true) => format!("-{digits}"),
        (false, false) => digits.to_owned(),
    })
}

/// ECMAScript `WhiteSpace` and `LineTerminator` code points, the set
/// `parseInt` and `Number` strip. Differs from [`char::is_whitespace`] on
/// U+FEFF (stripped here) and U+0085 (kept here).
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Whether JavaScript `Number(value)` would produce a number (not `NaN`).
///
/// `None` stands for `undefined` and is not a number; the empty string is
/// (it converts to `0`).
pub fn is_js_number(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let s = value.trim_matches(is_js_whitespace);
    if s.is_empty() {
        return true;
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            return !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix));
        }
    }
    let unsigned = s.strip_prefix(&['+', '-'][..]).unwrap_or(s);
    if unsigned == "Infinity" {
        return true;
    }
    unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') && s.parse::<f64>().is_ok()
}

/// Summary shown next to each country/language row of the admin form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum CountryStatus {
    NotConfigured,
    Disabled,
    Active { source: String, medium: String },
}

impl fmt::Display for CountryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountryStatus::NotConfigured => f.write_str("Not configured"),
            CountryStatus::Disabled => f.write_str("Disabled"),
            CountryStatus::Active { source, medium } => {
                write!(f, "Source: {source}, Medium: {medium}")
            }
        }
    }
}

/// Status of one row. Missing IDs win over the enabled flag.
pub fn country_status(
    tree: &VoucherNetworkSettings,
    country: CountryCode,
    language: LanguageCode,
) -> CountryStatus {
    let Some(leaf) = tree.leaf(country, language) else {
        return CountryStatus::NotConfigured;
    };
    match (leaf.source_number(), leaf.medium_number()) {
        (Some(source), Some(medium)) if leaf.is_enabled => CountryStatus::Active {
            source: source.to_owned(),
            medium: medium.to_owned(),
        },
        (Some(_), Some(_)) => CountryStatus::Disabled,
        _ => CountryStatus::NotConfigured,
    }
}

/// The admin "Enabled" badge / switch position for a leaf.
#[inline]
pub fn is_country_enabled(leaf: Option<&LanguageSettings>) -> bool {
    is_usable(leaf)
}

/// One row of the admin form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorEntry {
    pub country: CountryCode,
    pub language: LanguageCode,
    pub display_name: &'static str,
}

/// Rows for `countries`, one per declared language, in declaration order.
pub fn editor_entries(countries: &[CountryCode]) -> Vec<EditorEntry> {
    countries
        .iter()
        .filter_map(|&country| languages_of(country).map(|langs| (country, langs)))
        .flat_map(|(country, langs)| {
            langs.iter().map(move |(&language, &display_name)| EditorEntry {
                country,
                language,
                display_name,
            })
        })
        .collect()
}
