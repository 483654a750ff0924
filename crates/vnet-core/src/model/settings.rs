// crates/vnet-core/src/model/settings.rs

//! # The Settings Tree
//!
//! `VoucherNetworkSettings` -> `CountrySettings` -> `LanguageSettings` (leaf).
//!
//! Countries and leaves sit behind `Arc` so that an edit can rebuild only the
//! path to the touched leaf and share every sibling with the previous tree.
//! Nothing in this module mutates a tree in place.

use super::codes::{CountryCode, LanguageCode, UnknownCode};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::hash::Hash;
use std::str::FromStr;
use std::sync::Arc;

/// Leaf: enablement plus the two partner routing IDs for one country+language.
///
/// The IDs are kept as the strings the admin stored (empty strings included);
/// use [`LanguageSettings::source_number`] / [`LanguageSettings::medium_number`]
/// for the "present" view that treats `""` as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSettings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_enabled: bool,
    #[serde(
        default,
        deserialize_with = "id_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub traffic_source_number: Option<String>,
    #[serde(
        default,
        deserialize_with = "id_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub traffic_medium_number: Option<String>,
}

impl LanguageSettings {
    pub fn new(is_enabled: bool, source: &str, medium: &str) -> Self {
        LanguageSettings {
            is_enabled,
            traffic_source_number: Some(source.to_owned()),
            traffic_medium_number: Some(medium.to_owned()),
        }
    }

    /// Raw stored value of `field`, possibly empty.
    pub fn field(&self, field: TrafficField) -> Option<&str> {
        match field {
            TrafficField::TrafficSourceNumber => self.traffic_source_number.as_deref(),
            TrafficField::TrafficMediumNumber => self.traffic_medium_number.as_deref(),
        }
    }

    pub(crate) fn field_mut(&mut self, field: TrafficField) -> &mut Option<String> {
        match field {
            TrafficField::TrafficSourceNumber => &mut self.traffic_source_number,
            TrafficField::TrafficMediumNumber => &mut self.traffic_medium_number,
        }
    }

    /// Traffic source number, `None` when missing or empty.
    pub fn source_number(&self) -> Option<&str> {
        self.traffic_source_number.as_deref().filter(|s| !s.is_empty())
    }

    /// Traffic medium number, `None` when missing or empty.
    pub fn medium_number(&self) -> Option<&str> {
        self.traffic_medium_number.as_deref().filter(|s| !s.is_empty())
    }

    /// Both routing IDs are present (non-empty). Says nothing about validity.
    pub fn has_both_ids(&self) -> bool {
        self.source_number().is_some() && self.medium_number().is_some()
    }
}

/// One of the two editable ID fields of a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrafficField {
    TrafficSourceNumber,
    TrafficMediumNumber,
}

impl TrafficField {
    /// The field whose validity decides enablement together with this one.
    pub fn other(self) -> Self {
        match self {
            TrafficField::TrafficSourceNumber => TrafficField::TrafficMediumNumber,
            TrafficField::TrafficMediumNumber => TrafficField::TrafficSourceNumber,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrafficField::TrafficSourceNumber => "trafficSourceNumber",
            TrafficField::TrafficMediumNumber => "trafficMediumNumber",
        }
    }
}

impl FromStr for TrafficField {
    type Err = UnknownCode;

    /// Accepts the JSON field names and the short `source` / `medium` forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trafficSourceNumber" | "source" => Ok(TrafficField::TrafficSourceNumber),
            "trafficMediumNumber" | "medium" => Ok(TrafficField::TrafficMediumNumber),
            other => Err(UnknownCode {
                kind: "field",
                code: other.to_owned(),
            }),
        }
    }
}

/// Per-country node: one leaf per configured language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountrySettings {
    #[serde(default, deserialize_with = "known_keys")]
    pub languages: IndexMap<LanguageCode, Arc<LanguageSettings>>,
}

/// Root of the Voucher Network configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherNetworkSettings {
    #[serde(default, deserialize_with = "known_keys")]
    pub countries: IndexMap<CountryCode, Arc<CountrySettings>>,
    /// CSS selector of the element the widget container is appended to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iframe_container_id: Option<String>,
}

impl VoucherNetworkSettings {
    pub fn country(&self, country: CountryCode) -> Option<&CountrySettings> {
        self.countries.get(&country).map(Arc::as_ref)
    }

    pub fn leaf(&self, country: CountryCode, language: LanguageCode) -> Option<&LanguageSettings> {
        self.country(country)?
            .languages
            .get(&language)
            .map(Arc::as_ref)
    }

    /// Every configured leaf, in tree order.
    pub fn leaves(&self) -> impl Iterator<Item = (CountryCode, LanguageCode, &LanguageSettings)> {
        self.countries.iter().flat_map(|(country, settings)| {
            settings
                .languages
                .iter()
                .map(move |(language, leaf)| (*country, *language, leaf.as_ref()))
        })
    }

    /// Builder-style helper used by demos and tests.
    pub fn with_leaf(
        mut self,
        country: CountryCode,
        language: LanguageCode,
        leaf: LanguageSettings,
    ) -> Self {
        let entry = self.countries.entry(country).or_default();
        Arc::make_mut(entry)
            .languages
            .insert(language, Arc::new(leaf));
        self
    }
}

/// Admin UI stored IDs as strings; older exports sometimes hold bare numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

fn id_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(|id| match id {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    }))
}

/// `null` reads as the default value, like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserializes a code-keyed map, dropping keys that are not supported codes
/// and entries whose value is `null`.
pub(crate) fn known_keys<'de, D, K, V>(deserializer: D) -> Result<IndexMap<K, V>, D::Error>
where
    D: Deserializer<'de>,
    K: FromStr<Err = UnknownCode> + Hash + Eq,
    V: Deserialize<'de>,
{
    let raw = Option::<IndexMap<String, Option<V>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| {
            let code = match key.parse::<K>() {
                Ok(code) => code,
                Err(err) => {
                    tracing::warn!(%err, "dropping unsupported settings key");
                    return None;
                }
            };
            let Some(value) = value else {
                tracing::warn!(key = %key, "dropping null settings entry");
                return None;
            };
            Some((code, value))
        })
        .collect())
}
