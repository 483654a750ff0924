//! Thank-you and landing page flows against in-memory collaborators.

use rstest::{fixture, rstest};
use vnet_core::landing::{
    harvest_url_params, run_landing_page, store_url_params, DebugLevel, LandingPageConfig,
    MemoryCookieStore,
};
use vnet_core::optimize::OptimizeCountry;
use vnet_core::prelude::*;
use vnet_core::thankyou::{
    run_thank_you_page, AppSettings, Consumer, ThankYouPageConfig, VoucherNetworkIframe,
};

#[derive(Debug, Default)]
struct RecordingInjector {
    calls: Vec<(VoucherNetworkIframe, Consumer, Option<String>)>,
    scripts: Vec<(String, ScriptTarget)>,
    fail: bool,
}

impl ScriptInjector for RecordingInjector {
    fn inject_voucher_network(
        &mut self,
        iframe: &VoucherNetworkIframe,
        consumer: &Consumer,
        container_selector: Option<&str>,
    ) -> Result<()> {
        if self.fail {
            return Err(VnetError::Injection("no document body".into()));
        }
        self.calls.push((
            iframe.clone(),
            consumer.clone(),
            container_selector.map(str::to_owned),
        ));
        Ok(())
    }

    fn load_script(&mut self, src: &str, target: ScriptTarget) -> Result<()> {
        if self.fail {
            return Err(VnetError::Injection("no document head".into()));
        }
        self.scripts.push((src.to_owned(), target));
        Ok(())
    }
}

fn optimize_for(country: CountryCode, id: &str) -> OptimizeSettings {
    OptimizeSettings {
        country_specific_ids: [(
            country,
            OptimizeCountry {
                is_enabled: true,
                optimize_id: Some(id.into()),
            },
        )]
        .into_iter()
        .collect(),
        ..OptimizeSettings::default()
    }
}

#[fixture]
fn config() -> ThankYouPageConfig {
    let voucher_network = VoucherNetworkSettings {
        iframe_container_id: Some("#thanks".into()),
        ..VoucherNetworkSettings::default()
    }
    .with_leaf(
        CountryCode::GB,
        LanguageCode::En,
        LanguageSettings::new(true, "111", "222"),
    );
    ThankYouPageConfig {
        settings: AppSettings {
            voucher_network,
            ..AppSettings::default()
        },
        consumer_country: Some("UK".into()),
        order_id: Some("A-1".into()),
        order_value: Some(49.9),
        order_currency: Some("GBP".into()),
        used_coupon_codes: vec!["FIRST".into(), "SECOND".into()],
        session_id: Some("s-1".into()),
        consumer_email: Some("jane@example.com".into()),
        ..ThankYouPageConfig::default()
    }
}

#[test]
fn missing_config_reports_not_found() {
    let mut injector = RecordingInjector::default();
    let status = run_thank_you_page(None, &StaticLanguageDetector::default(), &mut injector);
    assert!(!status.sov_thankyou_config_found);
    assert!(!status.loaded_voucher_network);
    assert!(injector.calls.is_empty());
}

#[rstest]
fn resolved_leaf_is_injected_with_order_context(config: ThankYouPageConfig) {
    let mut injector = RecordingInjector::default();
    let status = run_thank_you_page(Some(&config), &StaticLanguageDetector::default(), &mut injector);

    assert!(status.sov_thankyou_config_found);
    assert!(status.country_code_passed_on_by_plugin);
    assert!(status.loaded_voucher_network);

    let (iframe, consumer, container) = &injector.calls[0];
    assert_eq!(iframe.traffic_source_number, "111");
    assert_eq!(iframe.traffic_medium_number, "222");
    assert_eq!(iframe.used_coupon_code.as_deref(), Some("FIRST"));
    assert_eq!(iframe.order_id.as_deref(), Some("A-1"));
    assert_eq!(consumer.consumer_country.as_deref(), Some("GB"));
    assert_eq!(consumer.consumer_email.as_deref(), Some("jane@example.com"));
    assert_eq!(container.as_deref(), Some("#thanks"));

    assert!(!status.loaded_optimize);
    assert!(injector.scripts.is_empty());
}

#[rstest]
fn unconfigured_country_loads_nothing(mut config: ThankYouPageConfig) {
    config.consumer_country = Some("DE".into());
    let mut injector = RecordingInjector::default();
    let status = run_thank_you_page(Some(&config), &StaticLanguageDetector::default(), &mut injector);
    assert!(status.country_code_passed_on_by_plugin);
    assert!(!status.loaded_voucher_network);
    assert!(injector.calls.is_empty());
}

#[rstest]
fn missing_country_is_reported(mut config: ThankYouPageConfig) {
    config.consumer_country = None;
    let mut injector = RecordingInjector::default();
    let status = run_thank_you_page(Some(&config), &StaticLanguageDetector::default(), &mut injector);
    assert!(status.sov_thankyou_config_found);
    assert!(!status.country_code_passed_on_by_plugin);
    assert!(!status.loaded_voucher_network);
}

#[rstest]
fn failed_injection_leaves_flag_unset(config: ThankYouPageConfig) {
    let mut injector = RecordingInjector {
        fail: true,
        ..RecordingInjector::default()
    };
    let status = run_thank_you_page(Some(&config), &StaticLanguageDetector::default(), &mut injector);
    assert!(!status.loaded_voucher_network);
}

#[rstest]
fn conversion_loads_even_without_voucher_network(mut config: ThankYouPageConfig) {
    config.consumer_country = Some("DE".into());
    config.settings.optimize = optimize_for(CountryCode::DE, "555");
    let mut injector = RecordingInjector::default();
    let status = run_thank_you_page(Some(&config), &StaticLanguageDetector::default(), &mut injector);

    assert!(!status.loaded_voucher_network);
    assert!(status.loaded_optimize);
    assert_eq!(
        injector.scripts,
        vec![(
            "https://www.sovopt.com/555/conversion/?ordervalue=49.9&ordernumber=A-1&vouchercode=FIRST&email=jane%40example.com".to_owned(),
            ScriptTarget::Body,
        )]
    );
}

#[rstest]
fn conversion_follows_normalized_country(mut config: ThankYouPageConfig) {
    config.settings.optimize = optimize_for(CountryCode::GB, "556");
    let mut injector = RecordingInjector::default();
    let status = run_thank_you_page(Some(&config), &StaticLanguageDetector::default(), &mut injector);

    assert!(status.loaded_voucher_network);
    assert!(status.loaded_optimize);
    assert!(injector.scripts[0].0.starts_with("https://www.sovopt.com/556/conversion/?"));
}

#[rstest]
fn failed_conversion_leaves_flag_unset(mut config: ThankYouPageConfig) {
    config.settings.optimize = optimize_for(CountryCode::GB, "556");
    let mut injector = RecordingInjector {
        fail: true,
        ..RecordingInjector::default()
    };
    let status = run_thank_you_page(Some(&config), &StaticLanguageDetector::default(), &mut injector);
    assert!(status.sov_thankyou_config_found);
    assert!(!status.loaded_optimize);
}

#[cfg(feature = "json")]
#[test]
fn page_config_reads_plugin_json() {
    let config = ThankYouPageConfig::from_json_str(
        r#"{
            "settings": { "voucherNetwork": { "countries": {
                "CH": { "languages": { "fr": { "isEnabled": true, "trafficSourceNumber": "5", "trafficMediumNumber": "6" } } }
            } },
            "optimize": { "useGlobalId": true, "globalId": "900", "globalEnabled": null } },
            "consumerCountry": "CH",
            "consumerLanguage": "fr",
            "orderValue": 12.5,
            "usedCouponCodes": ["X"],
            "somethingElse": true
        }"#,
    )
    .unwrap();
    let mut injector = RecordingInjector::default();
    let status = run_thank_you_page(Some(&config), &StaticLanguageDetector::default(), &mut injector);
    assert!(status.loaded_voucher_network);
    assert_eq!(injector.calls[0].0.order_value, Some(12.5));
    assert!(!config.settings.optimize.global_enabled);
    assert!(!status.loaded_optimize);
}

#[rstest]
#[case("https://shop.example/?sovReqToken=abc", None, Some("abc"))]
#[case("https://shop.example/?sovReqToken=", Some("https://cdn.example/s.js?sovReqToken=def"), Some("def"))]
#[case("https://shop.example/?sovReqToken=abc", Some("https://cdn.example/s.js?sovReqToken=def"), Some("abc"))]
#[case("https://shop.example/", Some("not a url"), None)]
fn page_url_wins_over_script_url(
    #[case] page: &str,
    #[case] script: Option<&str>,
    #[case] expected: Option<&str>,
) {
    let params = harvest_url_params(page, script).unwrap();
    assert_eq!(params.sov_req_token.as_deref(), expected);
}

#[rstest]
#[case("debug", Some(DebugLevel::Debug))]
#[case("silent", Some(DebugLevel::Silent))]
#[case("DEBUG", None)]
#[case("verbose", None)]
fn debug_level_is_restricted(#[case] raw: &str, #[case] expected: Option<DebugLevel>) {
    let params =
        harvest_url_params(&format!("https://shop.example/?sovDebugLevel={raw}"), None).unwrap();
    assert_eq!(params.sov_debug_level, expected);
}

#[test]
fn malformed_page_url_is_an_error() {
    let err = harvest_url_params("/relative/path", None).unwrap_err();
    assert!(matches!(err, VnetError::Url(_)));
}

#[test]
fn harvested_params_are_stored_as_cookies() {
    let params = harvest_url_params(
        "https://shop.example/?puid=42&sovCouponCode=SAVE%2010&sovDebugLevel=silent&utm=x",
        None,
    )
    .unwrap();
    let mut cookies = MemoryCookieStore::default();

    assert!(store_url_params(&params, &mut cookies));
    assert_eq!(cookies.len(), 3);
    assert_eq!(cookies.get("puid").as_deref(), Some("42"));
    assert_eq!(cookies.get("sovCouponCode").as_deref(), Some("SAVE 10"));
    assert_eq!(cookies.get("sovDebugLevel").as_deref(), Some("silent"));
    assert_eq!(cookies.get("utm"), None);

    cookies.clear("puid");
    assert_eq!(cookies.get("puid"), None);
}

#[test]
fn nothing_to_store_reports_false() {
    let params = harvest_url_params("https://shop.example/", None).unwrap();
    let mut cookies = MemoryCookieStore::default();
    assert!(params.is_empty());
    assert!(!store_url_params(&params, &mut cookies));
    assert!(cookies.is_empty());
}

#[test]
fn landing_page_stores_params_and_loads_optimize_tag() {
    let config = LandingPageConfig {
        settings: AppSettings {
            optimize: optimize_for(CountryCode::GB, "42"),
            ..AppSettings::default()
        },
        country: Some("UK".into()),
    };
    let mut cookies = MemoryCookieStore::default();
    let mut injector = RecordingInjector::default();
    let status = run_landing_page(
        Some(&config),
        "https://shop.example/?puid=7",
        None,
        &mut cookies,
        &mut injector,
    )
    .unwrap();

    assert!(status.sov_page_config_found);
    assert!(status.stored_cookies);
    assert!(status.loaded_optimize);
    assert_eq!(status.url_data.puid.as_deref(), Some("7"));
    assert_eq!(cookies.get("puid").as_deref(), Some("7"));
    assert_eq!(
        injector.scripts,
        vec![("https://www.sovopt.com/42".to_owned(), ScriptTarget::Head)]
    );
}

#[test]
fn landing_page_without_config_still_stores_params() {
    let mut cookies = MemoryCookieStore::default();
    let mut injector = RecordingInjector::default();
    let status = run_landing_page(
        None,
        "https://shop.example/?sovCouponCode=X",
        None,
        &mut cookies,
        &mut injector,
    )
    .unwrap();

    assert!(!status.sov_page_config_found);
    assert!(status.stored_cookies);
    assert!(!status.loaded_optimize);
    assert!(injector.scripts.is_empty());
    assert_eq!(cookies.get("sovCouponCode").as_deref(), Some("X"));
}
