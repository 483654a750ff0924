// crates/vnet-core/src/validation.rs

//! Usability policy for a resolved leaf.
//!
//! A leaf is *usable* when it is enabled and both routing IDs are non-empty
//! strings of ASCII decimal digits. The page-script read path and the admin
//! "Enabled" badge both go through [`is_usable`], so they cannot disagree.

use crate::model::LanguageSettings;
use crate::resolver::Unresolved;

/// `^\d+$` over ASCII digits. `"0"` is valid, `""` and `"12a"` are not.
#[inline]
pub fn is_digit_only(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// The leaf itself when usable, otherwise why it is not.
///
/// Checks run in a fixed order: presence, enablement, then ID validity.
pub fn check_usable(leaf: Option<&LanguageSettings>) -> Result<&LanguageSettings, Unresolved> {
    let leaf = leaf.ok_or(Unresolved::NotConfigured)?;
    if !leaf.is_enabled {
        return Err(Unresolved::Disabled);
    }
    let ids_valid = [leaf.source_number(), leaf.medium_number()]
        .into_iter()
        .all(|id| id.is_some_and(is_digit_only));
    if !ids_valid {
        return Err(Unresolved::Invalid);
    }
    Ok(leaf)
}

#[inline]
pub fn is_usable(leaf: Option<&LanguageSettings>) -> bool {
    check_usable(leaf).is_ok()
}
