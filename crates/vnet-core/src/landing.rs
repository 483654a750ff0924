// crates/vnet-core/src/landing.rs

//! Landing-page URL parameter harvesting.
//!
//! Partner links carry a handful of query parameters that must survive until
//! the order is placed. They are read from the page URL first and from the
//! loader script's own URL second, then written to cookies. When the page
//! config carries an applicable Optimize id, the Optimize tag is loaded too.

use crate::error::Result;
use crate::model::{normalize_country_code, CountryCode};
use crate::optimize::landing_script_url;
use crate::thankyou::AppSettings;
use crate::traits::{CookieStore, ScriptInjector, ScriptTarget};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use url::Url;

/// Query parameters that are harvested, in storage order. Each one is stored
/// under a cookie of the same name.
pub const URL_PARAM_AND_COOKIE_KEYS: [&str; 5] = [
    // only passed on by the Swiss Voucher Network
    "puid",
    "sovCouponCode",
    "sovReqToken",
    "sovReqProductId",
    "sovDebugLevel",
];

/// Harvested cookies live for 30 days.
pub const COOKIE_LIFETIME_DAYS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebugLevel {
    Debug,
    Silent,
}

impl DebugLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "debug" => Some(DebugLevel::Debug),
            "silent" => Some(DebugLevel::Silent),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DebugLevel::Debug => "debug",
            DebugLevel::Silent => "silent",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageUrlParams {
    pub puid: Option<String>,
    pub sov_coupon_code: Option<String>,
    pub sov_req_token: Option<String>,
    pub sov_req_product_id: Option<String>,
    pub sov_debug_level: Option<DebugLevel>,
}

impl PageUrlParams {
    /// Value stored for one of [`URL_PARAM_AND_COOKIE_KEYS`].
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "puid" => self.puid.as_deref(),
            "sovCouponCode" => self.sov_coupon_code.as_deref(),
            "sovReqToken" => self.sov_req_token.as_deref(),
            "sovReqProductId" => self.sov_req_product_id.as_deref(),
            "sovDebugLevel" => self.sov_debug_level.map(DebugLevel::as_str),
            _ => None,
        }
    }

    /// Present values as `(key, value)` pairs in storage order.
    pub fn present(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        URL_PARAM_AND_COOKIE_KEYS
            .into_iter()
            .filter_map(|key| self.get(key).map(|value| (key, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// First non-empty value of `key` in the query of `url`.
fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Collects the partner parameters from the page URL, falling back to the
/// loader script URL per key.
///
/// A malformed page URL is an error; a malformed script URL is ignored.
///
/// ```rust
/// use vnet_core::landing::{harvest_url_params, DebugLevel};
///
/// let params = harvest_url_params(
///     "https://shop.example/?sovCouponCode=SAVE10&sovDebugLevel=loud",
///     Some("https://cdn.example/page.js?puid=77&sovCouponCode=OTHER"),
/// )
/// .unwrap();
/// assert_eq!(params.sov_coupon_code.as_deref(), Some("SAVE10"));
/// assert_eq!(params.puid.as_deref(), Some("77"));
/// assert_eq!(params.sov_debug_level, None::<DebugLevel>);
/// ```
pub fn harvest_url_params(page_url: &str, script_url: Option<&str>) -> Result<PageUrlParams> {
    let page = Url::parse(page_url)?;
    let script = script_url.and_then(|raw| match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::debug!(%err, script_url = raw, "ignoring unparsable script URL");
            None
        }
    });
    let lookup = |key: &str| {
        query_value(&page, key).or_else(|| script.as_ref().and_then(|s| query_value(s, key)))
    };

    Ok(PageUrlParams {
        puid: lookup("puid"),
        sov_coupon_code: lookup("sovCouponCode"),
        sov_req_token: lookup("sovReqToken"),
        sov_req_product_id: lookup("sovReqProductId"),
        sov_debug_level: lookup("sovDebugLevel").and_then(|v| DebugLevel::parse(&v)),
    })
}

/// Writes every harvested value to `cookies`. Returns whether anything was stored.
pub fn store_url_params(params: &PageUrlParams, cookies: &mut impl CookieStore) -> bool {
    let mut stored = false;
    for (key, value) in params.present() {
        cookies.set(key, value);
        stored = true;
    }
    stored
}

/// `document.cookie` assignment persisting `name=value` for the whole domain.
pub fn cookie_assignment(name: &str, value: &str, domain: &str, expires_utc: &str) -> String {
    format!("{name}={value};secure;samesite=strict;expires={expires_utc};domain={domain};path=/")
}

/// `document.cookie` assignment expiring `name` immediately.
pub fn clear_cookie_assignment(name: &str, domain: &str) -> String {
    cookie_assignment(name, "", domain, "Thu, 01 Jan 1970 00:00:00 GMT")
}

/// In-process [`CookieStore`], for native callers and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryCookieStore {
    cookies: HashMap<String, String>,
}

impl MemoryCookieStore {
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, key: &str) -> Option<String> {
        self.cookies.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.cookies.insert(key.to_owned(), value.to_owned());
    }

    fn clear(&mut self, key: &str) {
        self.cookies.remove(key);
    }
}

/// Config object the shop plugin renders into landing pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LandingPageConfig {
    pub settings: AppSettings,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageStatus {
    pub sov_page_config_found: bool,
    pub stored_cookies: bool,
    pub loaded_optimize: bool,
    pub url_data: PageUrlParams,
}

/// Runs the landing page: parameters are harvested and stored even without a
/// page config; the Optimize tag needs one.
pub fn run_landing_page(
    config: Option<&LandingPageConfig>,
    page_url: &str,
    script_url: Option<&str>,
    cookies: &mut impl CookieStore,
    injector: &mut impl ScriptInjector,
) -> Result<LandingPageStatus> {
    let url_data = harvest_url_params(page_url, script_url)?;
    let mut status = LandingPageStatus {
        stored_cookies: store_url_params(&url_data, cookies),
        url_data,
        ..LandingPageStatus::default()
    };

    let Some(config) = config else {
        tracing::error!("sovPageConfig is not defined");
        return Ok(status);
    };
    status.sov_page_config_found = true;

    let country = config
        .country
        .as_deref()
        .map(normalize_country_code)
        .and_then(|code| code.parse::<CountryCode>().ok());
    if let Some(optimize_id) = config.settings.optimize.optimize_id(country) {
        let loaded = landing_script_url(optimize_id)
            .and_then(|url| injector.load_script(url.as_str(), ScriptTarget::Head));
        match loaded {
            Ok(()) => status.loaded_optimize = true,
            Err(err) => tracing::error!(%err, "failed to load optimize"),
        }
    }
    Ok(status)
}
