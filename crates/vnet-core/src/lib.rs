// crates/vnet-core/src/lib.rs

//! vnet-core — Voucher Network settings for shop integrations.
//!
//! Holds the per-country/per-language traffic-routing settings tree and the
//! logic around it:
//! - [`resolver`]: which leaf (if any) a thank-you page should activate
//! - [`validation`]: when a leaf counts as usable
//! - [`language`]: which language key a country resolves to
//! - [`editor`]: admin-side, structurally shared tree updates
//! - [`optimize`]: Optimize id selection and its script URLs
//! - [`thankyou`] / [`landing`]: the page flows built on top, talking to the
//!   browser only through the collaborator [`traits`]

pub mod common;
pub mod editor;
pub mod error;
pub mod landing;
pub mod language;
pub mod loader;
pub mod model;
pub mod optimize;
pub mod resolver;
pub mod thankyou;
pub mod traits;
pub mod validation;

pub mod prelude;

// Re-exports
pub use crate::common::SettingsStats;
pub use crate::error::{Result, VnetError};
pub use model::{
    CountryCode, CountrySettings, LanguageCode, LanguageSettings, TrafficField,
    VoucherNetworkSettings, LANGUAGES_BY_COUNTRIES,
};
pub use resolver::{resolve_voucher_network_settings, Resolution, Unresolved};
