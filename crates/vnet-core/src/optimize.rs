// crates/vnet-core/src/optimize.rs

//! # Optimize
//!
//! Which Optimize id applies to a country, and the script URLs built from it:
//! the landing-page tag and the thank-you page conversion call.

use crate::error::Result;
use crate::model::settings::{known_keys, null_as_default};
use crate::model::CountryCode;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use url::Url;

/// Host serving both Optimize scripts.
pub const OPTIMIZE_BASE_URL: &str = "https://www.sovopt.com/";

/// Per-country Optimize entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeCountry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimize_id: Option<String>,
}

/// Optimize block of the app settings: one global id, or one id per country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeSettings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub use_global_id: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub global_enabled: bool,
    #[serde(default, deserialize_with = "known_keys")]
    pub country_specific_ids: IndexMap<CountryCode, OptimizeCountry>,
}

impl OptimizeSettings {
    /// The enabled, non-empty id for `country`.
    ///
    /// With `useGlobalId` the country is irrelevant; otherwise an unknown or
    /// absent country has no id.
    pub fn optimize_id(&self, country: Option<CountryCode>) -> Option<&str> {
        let (enabled, id) = if self.use_global_id {
            (self.global_enabled, self.global_id.as_deref())
        } else {
            let entry = self.country_specific_ids.get(&country?)?;
            (entry.is_enabled, entry.optimize_id.as_deref())
        };
        id.filter(|id| enabled && !id.is_empty())
    }
}

/// Order data reported by the conversion call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OptimizeConversion<'a> {
    pub order_value: Option<f64>,
    pub order_id: Option<&'a str>,
    pub voucher_code: Option<&'a str>,
    pub email: Option<&'a str>,
}

fn optimize_path(optimize_id: &str) -> Result<Url> {
    Ok(Url::parse(OPTIMIZE_BASE_URL)?.join(optimize_id)?)
}

/// Landing-page tag: `https://www.sovopt.com/<id>`.
pub fn landing_script_url(optimize_id: &str) -> Result<Url> {
    optimize_path(optimize_id)
}

/// Thank-you page conversion call.
///
/// Query keys are `ordervalue`, `ordernumber`, `vouchercode`, `email`;
/// absent values are left out and present ones are percent-encoded.
///
/// ```rust
/// use vnet_core::optimize::{conversion_url, OptimizeConversion};
///
/// let url = conversion_url(
///     "1234",
///     OptimizeConversion {
///         order_value: Some(49.9),
///         order_id: Some("A-1"),
///         ..OptimizeConversion::default()
///     },
/// )
/// .unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://www.sovopt.com/1234/conversion/?ordervalue=49.9&ordernumber=A-1"
/// );
/// ```
pub fn conversion_url(optimize_id: &str, order: OptimizeConversion<'_>) -> Result<Url> {
    let mut url = optimize_path(&format!("{optimize_id}/conversion/"))?;
    let order_value = order.order_value.map(|v| v.to_string());
    let pairs = [
        ("ordervalue", order_value.as_deref()),
        ("ordernumber", order.order_id),
        ("vouchercode", order.voucher_code),
        ("email", order.email),
    ];
    if pairs.iter().any(|(_, v)| v.is_some()) {
        let mut query = url.query_pairs_mut();
        for (key, value) in pairs {
            if let Some(value) = value {
                query.append_pair(key, value);
            }
        }
    }
    Ok(url)
}
