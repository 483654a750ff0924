// crates/vnet-core/src/model/mod.rs
pub mod codes;
pub mod languages;
pub mod settings;

pub use codes::{normalize_country_code, CountryCode, LanguageCode, UnknownCode, LEGACY_UK};
pub use languages::{available_languages, languages_of, CountryLanguages, LANGUAGES_BY_COUNTRIES};
pub use settings::{CountrySettings, LanguageSettings, TrafficField, VoucherNetworkSettings};
