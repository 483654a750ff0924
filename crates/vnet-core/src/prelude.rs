//! vnet-core prelude: bring common types and traits into scope for demos.

#![allow(unused_imports)]

pub use crate::common::SettingsStats;
pub use crate::editor::{country_status, set_enabled, set_field, CountryStatus};
pub use crate::error::{Result, VnetError};
pub use crate::language::{select_language, StaticLanguageDetector};
pub use crate::model::{
    available_languages, CountryCode, CountrySettings, LanguageCode, LanguageSettings,
    TrafficField, VoucherNetworkSettings, LANGUAGES_BY_COUNTRIES,
};
pub use crate::optimize::{OptimizeConversion, OptimizeSettings};
pub use crate::resolver::{resolve_voucher_network_settings, Resolution, Unresolved};
pub use crate::traits::{CookieStore, LanguageDetector, ScriptInjector, ScriptTarget};
pub use crate::validation::is_usable;
