// crates/vnet-core/src/thankyou.rs

//! # Thank-you Page Flow
//!
//! What the order-confirmation page script does with the settings: resolve
//! the Voucher Network leaf for the consumer's country/language and, when one
//! applies, hand the widget payload to a [`ScriptInjector`]. Independently of
//! that, the Optimize conversion call is loaded when an Optimize id applies.
//! The outcome is reported through the returned [`ThankYouStatus`] instead of
//! page globals.

use crate::model::settings::null_as_default;
use crate::model::{normalize_country_code, CountryCode, VoucherNetworkSettings};
use crate::optimize::{conversion_url, OptimizeConversion, OptimizeSettings};
use crate::resolver::resolve_voucher_network_settings;
use crate::traits::{LanguageDetector, ScriptInjector, ScriptTarget};
use serde::{Deserialize, Serialize};

/// Settings block of the page config as persisted by the admin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub voucher_network: VoucherNetworkSettings,
    #[serde(default, deserialize_with = "null_as_default")]
    pub optimize: OptimizeSettings,
    #[serde(default, deserialize_with = "null_as_default")]
    pub checkout_products: bool,
}

/// Config object the shop plugin renders into the thank-you page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThankYouPageConfig {
    pub settings: AppSettings,
    pub consumer_country: Option<String>,
    pub consumer_language: Option<String>,

    pub order_id: Option<String>,
    pub order_value: Option<f64>,
    pub order_currency: Option<String>,
    pub used_coupon_codes: Vec<String>,
    pub session_id: Option<String>,
    pub timestamp: Option<i64>,
    pub iframe_container_id: Option<String>,
    pub integration_type: Option<String>,

    pub consumer_first_name: Option<String>,
    pub consumer_last_name: Option<String>,
    pub consumer_email: Option<String>,
    pub consumer_street: Option<String>,
    pub consumer_street_number: Option<String>,
    pub consumer_zipcode: Option<String>,
    pub consumer_city: Option<String>,
    pub consumer_phone: Option<String>,
}

/// Order/session payload the partner widget reads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoucherNetworkIframe {
    pub traffic_source_number: String,
    pub traffic_medium_number: String,
    pub session_id: Option<String>,
    pub timestamp: Option<i64>,
    pub order_id: Option<String>,
    pub order_value: Option<f64>,
    pub order_currency: Option<String>,
    pub used_coupon_code: Option<String>,
    pub iframe_container_id: Option<String>,
    pub integration_type: Option<String>,
}

/// Consumer payload the partner widget reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumer {
    pub consumer_first_name: Option<String>,
    pub consumer_last_name: Option<String>,
    pub consumer_email: Option<String>,
    pub consumer_street: Option<String>,
    pub consumer_street_number: Option<String>,
    pub consumer_zipcode: Option<String>,
    pub consumer_city: Option<String>,
    /// Country after legacy normalization (`UK` is sent as `GB`).
    pub consumer_country: Option<String>,
    pub consumer_phone: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThankYouStatus {
    pub sov_thankyou_config_found: bool,
    pub country_code_passed_on_by_plugin: bool,
    pub loaded_voucher_network: bool,
    pub loaded_optimize: bool,
}

impl ThankYouPageConfig {
    /// Consumer country with the legacy `UK` token rewritten.
    pub fn normalized_country(&self) -> Option<&str> {
        self.consumer_country.as_deref().map(normalize_country_code)
    }

    fn conversion(&self) -> OptimizeConversion<'_> {
        OptimizeConversion {
            order_value: self.order_value,
            order_id: self.order_id.as_deref(),
            voucher_code: self.used_coupon_codes.first().map(String::as_str),
            email: self.consumer_email.as_deref(),
        }
    }

    fn iframe(&self, source: &str, medium: &str) -> VoucherNetworkIframe {
        VoucherNetworkIframe {
            traffic_source_number: source.to_owned(),
            traffic_medium_number: medium.to_owned(),
            session_id: self.session_id.clone(),
            timestamp: self.timestamp,
            order_id: self.order_id.clone(),
            order_value: self.order_value,
            order_currency: self.order_currency.clone(),
            used_coupon_code: self.used_coupon_codes.first().cloned(),
            iframe_container_id: self.iframe_container_id.clone(),
            integration_type: self.integration_type.clone(),
        }
    }

    fn consumer(&self) -> Consumer {
        Consumer {
            consumer_first_name: self.consumer_first_name.clone(),
            consumer_last_name: self.consumer_last_name.clone(),
            consumer_email: self.consumer_email.clone(),
            consumer_street: self.consumer_street.clone(),
            consumer_street_number: self.consumer_street_number.clone(),
            consumer_zipcode: self.consumer_zipcode.clone(),
            consumer_city: self.consumer_city.clone(),
            consumer_country: self.normalized_country().map(str::to_owned),
            consumer_phone: self.consumer_phone.clone(),
        }
    }
}

/// Runs the Voucher Network and Optimize parts of the thank-you page.
pub fn run_thank_you_page(
    config: Option<&ThankYouPageConfig>,
    detector: &impl LanguageDetector,
    injector: &mut impl ScriptInjector,
) -> ThankYouStatus {
    let mut status = ThankYouStatus::default();
    let Some(config) = config else {
        tracing::error!("sovThankyouConfig is not defined");
        return status;
    };
    status.sov_thankyou_config_found = true;

    handle_voucher_network(config, detector, injector, &mut status);
    status.loaded_optimize = handle_optimize(config, injector);
    status
}

fn handle_voucher_network(
    config: &ThankYouPageConfig,
    detector: &impl LanguageDetector,
    injector: &mut impl ScriptInjector,
    status: &mut ThankYouStatus,
) {
    let settings = &config.settings.voucher_network;
    let resolution = resolve_voucher_network_settings(
        settings,
        config.normalized_country(),
        config.consumer_language.as_deref(),
        detector,
    );
    status.country_code_passed_on_by_plugin = resolution.country_code_passed_on;

    let Some(leaf) = resolution.settings() else {
        tracing::debug!(reason = ?resolution.reason(), "voucher network not loaded");
        return;
    };
    let (Some(source), Some(medium)) = (leaf.source_number(), leaf.medium_number()) else {
        return;
    };

    let iframe = config.iframe(source, medium);
    let consumer = config.consumer();
    match injector.inject_voucher_network(
        &iframe,
        &consumer,
        settings.iframe_container_id.as_deref(),
    ) {
        Ok(()) => status.loaded_voucher_network = true,
        Err(err) => tracing::error!(%err, "failed to inject voucher network"),
    }
}

fn handle_optimize(config: &ThankYouPageConfig, injector: &mut impl ScriptInjector) -> bool {
    let country = config
        .normalized_country()
        .and_then(|code| code.parse::<CountryCode>().ok());
    let Some(optimize_id) = config.settings.optimize.optimize_id(country) else {
        tracing::debug!(?country, "no optimize id applies");
        return false;
    };
    let loaded = conversion_url(optimize_id, config.conversion())
        .and_then(|url| injector.load_script(url.as_str(), ScriptTarget::Body));
    match loaded {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(%err, "failed to load optimize conversion");
            false
        }
    }
}
