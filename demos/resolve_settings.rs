//! Resolution example for vnet-rs
//!
//! This example demonstrates how to:
//! - Build a settings tree in code
//! - Resolve the active leaf for a page context
//! - Read the reason when nothing resolves

use vnet_rs::prelude::*;

fn main() -> Result<()> {
    println!("=== VNet-RS Resolution Example ===\n");

    let settings = VoucherNetworkSettings::default()
        .with_leaf(
            CountryCode::DE,
            LanguageCode::De,
            LanguageSettings::new(true, "123", "456"),
        )
        .with_leaf(
            CountryCode::GB,
            LanguageCode::En,
            LanguageSettings::new(true, "7", "8"),
        )
        .with_leaf(
            CountryCode::CH,
            LanguageCode::Fr,
            LanguageSettings::new(true, "20", "21"),
        )
        .with_leaf(
            CountryCode::AT,
            LanguageCode::De,
            LanguageSettings::new(false, "1", "2"),
        );
    let stats = settings.stats();
    println!(
        "Tree: {} countries, {} leaves, {} usable\n",
        stats.countries, stats.leaves, stats.usable
    );

    // Example 1: single-language countries ignore the language argument
    println!("--- Example 1: Single-language country ---");
    let detector = StaticLanguageDetector::default();
    for language in [None, Some("de"), Some("fr")] {
        let resolution = resolve_voucher_network_settings(&settings, Some("DE"), language, &detector);
        println!("  DE / {language:?}: {:?}", resolution.settings());
    }
    println!();

    // Example 2: the legacy UK code
    println!("--- Example 2: Legacy UK code ---");
    let uk = resolve_voucher_network_settings(&settings, Some("UK"), None, &detector);
    println!("  UK resolves to: {:?}", uk.settings());
    println!();

    // Example 3: multi-language countries fall back to page detection
    println!("--- Example 3: Multi-language country with detection ---");
    let page = StaticLanguageDetector::new(Some("fr-CH"), Some("de-CH"));
    let resolution = resolve_voucher_network_settings(&settings, Some("CH"), None, &page);
    println!("  CH (page fr-CH): {:?}", resolution.settings());
    println!(
        "  CH languages: {:?}",
        available_languages(CountryCode::CH)
    );
    println!();

    // Example 4: dead ends
    println!("--- Example 4: Why nothing resolved ---");
    for (country, language) in [(None, None), (Some("AT"), None), (Some("CH"), Some("it")), (Some("US"), None)] {
        let resolution = resolve_voucher_network_settings(&settings, country, language, &detector);
        match resolution.reason() {
            Some(reason) => println!("  {country:?}/{language:?}: {reason}"),
            None => println!("  {country:?}/{language:?}: resolved"),
        }
    }

    Ok(())
}
