// crates/vnet-core/src/model/codes.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Legacy country token some shop systems still emit for the United Kingdom.
pub const LEGACY_UK: &str = "UK";

/// Raised when a string is not one of the supported country or language codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported {kind} code: {code:?}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: String,
}

/// Countries the Voucher Network can be configured for.
///
/// Parsing is exact: `"de"` is not `DE`. The legacy `"UK"` token is only
/// accepted through [`normalize_country_code`] / [`CountryCode::parse_normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum CountryCode {
    AT,
    BE,
    CH,
    DE,
    DK,
    ES,
    FR,
    GB,
    IE,
    IT,
    NL,
    NO,
    PL,
    SE,
}

impl CountryCode {
    pub const ALL: [CountryCode; 14] = [
        CountryCode::AT,
        CountryCode::BE,
        CountryCode::CH,
        CountryCode::DE,
        CountryCode::DK,
        CountryCode::ES,
        CountryCode::FR,
        CountryCode::GB,
        CountryCode::IE,
        CountryCode::IT,
        CountryCode::NL,
        CountryCode::NO,
        CountryCode::PL,
        CountryCode::SE,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CountryCode::AT => "AT",
            CountryCode::BE => "BE",
            CountryCode::CH => "CH",
            CountryCode::DE => "DE",
            CountryCode::DK => "DK",
            CountryCode::ES => "ES",
            CountryCode::FR => "FR",
            CountryCode::GB => "GB",
            CountryCode::IE => "IE",
            CountryCode::IT => "IT",
            CountryCode::NL => "NL",
            CountryCode::NO => "NO",
            CountryCode::PL => "PL",
            CountryCode::SE => "SE",
        }
    }

    /// Normalizes the legacy alias first, then parses.
    ///
    /// ```rust
    /// use vnet_core::CountryCode;
    ///
    /// assert_eq!(CountryCode::parse_normalized("UK"), Ok(CountryCode::GB));
    /// assert_eq!(CountryCode::parse_normalized("GB"), Ok(CountryCode::GB));
    /// assert!(CountryCode::parse_normalized("gb").is_err());
    /// ```
    pub fn parse_normalized(raw: &str) -> Result<Self, UnknownCode> {
        normalize_country_code(raw).parse()
    }
}

/// Rewrites the legacy `"UK"` token to `"GB"`; every other value passes through.
pub fn normalize_country_code(raw: &str) -> &str {
    if raw == LEGACY_UK {
        CountryCode::GB.as_str()
    } else {
        raw
    }
}

impl FromStr for CountryCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CountryCode::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCode {
                kind: "country",
                code: s.to_owned(),
            })
    }
}

impl TryFrom<String> for CountryCode {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CountryCode> for &'static str {
    fn from(value: CountryCode) -> Self {
        value.as_str()
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Languages a country entry can be split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum LanguageCode {
    Da,
    De,
    En,
    Es,
    Fr,
    It,
    Nl,
    No,
    Pl,
    Sv,
}

impl LanguageCode {
    pub const ALL: [LanguageCode; 10] = [
        LanguageCode::Da,
        LanguageCode::De,
        LanguageCode::En,
        LanguageCode::Es,
        LanguageCode::Fr,
        LanguageCode::It,
        LanguageCode::Nl,
        LanguageCode::No,
        LanguageCode::Pl,
        LanguageCode::Sv,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::Da => "da",
            LanguageCode::De => "de",
            LanguageCode::En => "en",
            LanguageCode::Es => "es",
            LanguageCode::Fr => "fr",
            LanguageCode::It => "it",
            LanguageCode::Nl => "nl",
            LanguageCode::No => "no",
            LanguageCode::Pl => "pl",
            LanguageCode::Sv => "sv",
        }
    }
}

impl FromStr for LanguageCode {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageCode::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| UnknownCode {
                kind: "language",
                code: s.to_owned(),
            })
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = UnknownCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LanguageCode> for &'static str {
    fn from(value: LanguageCode) -> Self {
        value.as_str()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_uk_is_rewritten_only_when_exact() {
        assert_eq!(normalize_country_code("UK"), "GB");
        assert_eq!(normalize_country_code("uk"), "uk");
        assert_eq!(normalize_country_code("DE"), "DE");
    }

    #[test]
    fn codes_round_trip_through_their_string_form() {
        for c in CountryCode::ALL {
            assert_eq!(c.as_str().parse::<CountryCode>(), Ok(c));
        }
        for l in LanguageCode::ALL {
            assert_eq!(l.to_string().parse::<LanguageCode>(), Ok(l));
        }
    }

    #[test]
    fn unknown_codes_report_their_kind() {
        let err = "XX".parse::<CountryCode>().unwrap_err();
        assert_eq!(err.kind, "country");
        assert_eq!(err.to_string(), "unsupported country code: \"XX\"");
        assert!("EN".parse::<LanguageCode>().is_err());
    }
}
