// crates/vnet-core/src/model/languages.rs
use super::codes::{CountryCode, LanguageCode};
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Languages of one country, in display order, with the admin display name.
pub type CountryLanguages = IndexMap<LanguageCode, &'static str>;

/// Reference table: which languages each country supports.
///
/// The order of the inner map is significant: it is the order the admin UI
/// lists entries in, and a country with a single entry never consults the
/// caller's language.
pub static LANGUAGES_BY_COUNTRIES: Lazy<IndexMap<CountryCode, CountryLanguages>> =
    Lazy::new(|| {
        use CountryCode as C;
        use LanguageCode as L;

        let table: [(CountryCode, &[(LanguageCode, &'static str)]); 14] = [
            (C::AT, &[(L::De, "Austria")]),
            (C::BE, &[(L::Fr, "Belgium (French)"), (L::Nl, "Belgium (Dutch)")]),
            (
                C::CH,
                &[
                    (L::De, "Switzerland (German)"),
                    (L::Fr, "Switzerland (French)"),
                    (L::It, "Switzerland (Italian)"),
                ],
            ),
            (C::DE, &[(L::De, "Germany")]),
            (C::DK, &[(L::Da, "Denmark")]),
            (C::ES, &[(L::Es, "Spain")]),
            (C::FR, &[(L::Fr, "France")]),
            (C::GB, &[(L::En, "United Kingdom")]),
            (C::IE, &[(L::En, "Ireland")]),
            (C::IT, &[(L::It, "Italy")]),
            (C::NL, &[(L::Nl, "Netherlands")]),
            (C::NO, &[(L::No, "Norway")]),
            (C::PL, &[(L::Pl, "Poland")]),
            (C::SE, &[(L::Sv, "Sweden")]),
        ];

        table
            .into_iter()
            .map(|(country, langs)| (country, langs.iter().copied().collect()))
            .collect()
    });

/// Declared languages of `country`, or `None` for a country missing from the table.
pub fn languages_of(country: CountryCode) -> Option<&'static CountryLanguages> {
    LANGUAGES_BY_COUNTRIES.get(&country)
}

/// Ordered language keys declared for `country`; empty when unknown.
pub fn available_languages(country: CountryCode) -> Vec<LanguageCode> {
    languages_of(country)
        .map(|langs| langs.keys().copied().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_country_declares_at_least_one_language() {
        for country in CountryCode::ALL {
            assert!(
                !available_languages(country).is_empty(),
                "{country} has no languages"
            );
        }
    }

    #[test]
    fn multi_language_countries_keep_declaration_order() {
        assert_eq!(
            available_languages(CountryCode::CH),
            vec![LanguageCode::De, LanguageCode::Fr, LanguageCode::It]
        );
        assert_eq!(
            available_languages(CountryCode::BE),
            vec![LanguageCode::Fr, LanguageCode::Nl]
        );
    }
}
