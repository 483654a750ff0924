//! Loading the admin-persisted settings JSON.
#![cfg(feature = "json")]

use rstest::rstest;
use std::io::Write;
use vnet_core::prelude::*;

const SETTINGS_JSON: &str = r##"{
    "countries": {
        "DE": { "languages": { "de": { "isEnabled": true, "trafficSourceNumber": "123", "trafficMediumNumber": "456" } } },
        "CH": { "languages": {
            "de": { "isEnabled": false, "trafficSourceNumber": "1", "trafficMediumNumber": "2" },
            "fr": { "isEnabled": true, "trafficSourceNumber": 3, "trafficMediumNumber": "4" },
            "rm": { "isEnabled": true, "trafficSourceNumber": "5", "trafficMediumNumber": "6" }
        } },
        "US": { "languages": { "en": { "isEnabled": true, "trafficSourceNumber": "9", "trafficMediumNumber": "9" } } },
        "AT": {}
    },
    "iframeContainerId": "#sovendus-container"
}"##;

#[test]
fn unknown_keys_are_dropped_not_fatal() {
    let settings = VoucherNetworkSettings::from_json_str(SETTINGS_JSON).unwrap();

    let countries: Vec<_> = settings.countries.keys().copied().collect();
    assert_eq!(countries, vec![CountryCode::DE, CountryCode::CH, CountryCode::AT]);
    assert_eq!(settings.country(CountryCode::CH).unwrap().languages.len(), 2);
    assert!(settings.country(CountryCode::AT).unwrap().languages.is_empty());
    assert_eq!(settings.iframe_container_id.as_deref(), Some("#sovendus-container"));
}

#[test]
fn numeric_ids_are_read_as_strings() {
    let settings = VoucherNetworkSettings::from_json_str(SETTINGS_JSON).unwrap();
    assert_eq!(
        settings.leaf(CountryCode::CH, LanguageCode::Fr),
        Some(&LanguageSettings::new(true, "3", "4"))
    );
}

#[test]
fn stats_count_usable_leaves() {
    let settings = VoucherNetworkSettings::from_json_str(SETTINGS_JSON).unwrap();
    assert_eq!(
        settings.stats(),
        SettingsStats {
            countries: 3,
            leaves: 3,
            usable: 2,
        }
    );
}

#[rstest]
#[case("{}")]
#[case(r#"{ "countries": null }"#)]
#[case(r#"{ "countries": { "DE": { "languages": { "de": {} } } } }"#)]
fn sparse_documents_load(#[case] json: &str) {
    let settings = VoucherNetworkSettings::from_json_str(json).unwrap();
    assert_eq!(settings.stats().usable, 0);
}

#[rstest]
#[case(r#""AT": { "languages": { "de": { "isEnabled": null, "trafficSourceNumber": "1", "trafficMediumNumber": "2" } } }"#, 2)]
#[case(r#""AT": null"#, 1)]
#[case(r#""AT": { "languages": { "de": null } }"#, 2)]
#[case(r#""AT": { "languages": null }"#, 2)]
fn null_entries_do_not_sink_valid_countries(#[case] at_entry: &str, #[case] countries: usize) {
    let json = format!(
        r#"{{ "countries": {{
            "DE": {{ "languages": {{ "de": {{ "isEnabled": true, "trafficSourceNumber": "123", "trafficMediumNumber": "456" }} }} }},
            {at_entry}
        }} }}"#
    );
    let settings = VoucherNetworkSettings::from_json_str(&json).unwrap();

    assert_eq!(settings.countries.len(), countries);
    assert!(is_usable(settings.leaf(CountryCode::DE, LanguageCode::De)));
    assert!(!is_usable(settings.leaf(CountryCode::AT, LanguageCode::De)));
}

#[test]
fn null_enabled_flag_reads_as_disabled() {
    let settings = VoucherNetworkSettings::from_json_str(
        r#"{ "countries": { "AT": { "languages": { "de": { "isEnabled": null, "trafficSourceNumber": "1", "trafficMediumNumber": "2" } } } } }"#,
    )
    .unwrap();
    assert_eq!(
        settings.leaf(CountryCode::AT, LanguageCode::De),
        Some(&LanguageSettings::new(false, "1", "2"))
    );
}

#[test]
fn malformed_json_is_an_error() {
    let err = VoucherNetworkSettings::from_json_str("{ countries: ").unwrap_err();
    assert!(matches!(err, VnetError::Json(_)));
}

#[test]
fn serialization_keeps_camel_case_and_order() {
    let settings = VoucherNetworkSettings::from_json_str(SETTINGS_JSON).unwrap();
    let json = settings.to_json_string_pretty().unwrap();
    assert!(json.contains("\"trafficSourceNumber\": \"123\""));
    assert!(json.find("\"DE\"").unwrap() < json.find("\"CH\"").unwrap());

    let reloaded = VoucherNetworkSettings::from_json_str(&json).unwrap();
    assert_eq!(reloaded, settings);
}

#[test]
fn missing_file_is_not_found() {
    let err = VoucherNetworkSettings::load_from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, VnetError::NotFound(_)));
}

#[test]
fn loads_plain_file_from_disk() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(SETTINGS_JSON.as_bytes()).unwrap();

    let settings = VoucherNetworkSettings::load_from_path(file.path()).unwrap();
    assert_eq!(settings.stats().countries, 3);
}
