//! Admin editing example for vnet-rs
//!
//! This example demonstrates how the admin form drives the settings tree:
//! - Typed-in IDs are parsed and stored
//! - The enabled switch only moves when both IDs are present
//! - Unchanged edits hand back the very same tree

use std::sync::Arc;
use vnet_rs::editor::editor_entries;
use vnet_rs::prelude::*;

fn print_rows(tree: &VoucherNetworkSettings, countries: &[CountryCode]) {
    for row in editor_entries(countries) {
        println!(
            "  {:<24} {}",
            row.display_name,
            country_status(tree, row.country, row.language)
        );
    }
}

fn main() -> Result<()> {
    println!("=== VNet-RS Admin Editing Example ===\n");
    let countries = [CountryCode::DE, CountryCode::CH];

    let tree = Arc::new(VoucherNetworkSettings::default());
    println!("--- Example 1: Empty tree ---");
    print_rows(&tree, &countries);
    println!();

    // Example 2: IDs typed one at a time; the leaf enables once both are numeric
    println!("--- Example 2: Entering IDs ---");
    let tree = set_field(
        &tree,
        CountryCode::DE,
        LanguageCode::De,
        TrafficField::TrafficSourceNumber,
        "123",
    );
    let tree = set_field(
        &tree,
        CountryCode::DE,
        LanguageCode::De,
        TrafficField::TrafficMediumNumber,
        "456xyz",
    );
    print_rows(&tree, &countries);
    println!();

    // Example 3: garbage input
    println!("--- Example 3: Unparsable input ---");
    let broken = set_field(
        &tree,
        CountryCode::CH,
        LanguageCode::Fr,
        TrafficField::TrafficSourceNumber,
        "abc",
    );
    println!(
        "  CH/fr stored: {:?}",
        broken.leaf(CountryCode::CH, LanguageCode::Fr)
    );
    println!();

    // Example 4: toggling
    println!("--- Example 4: Toggling ---");
    let off = set_enabled(&tree, CountryCode::DE, LanguageCode::De, false);
    print_rows(&off, &[CountryCode::DE]);
    let same = set_enabled(&off, CountryCode::DE, LanguageCode::De, false);
    println!("  repeated toggle returns same tree: {}", Arc::ptr_eq(&off, &same));
    let untouched = Arc::ptr_eq(&tree.countries[&CountryCode::DE], &broken.countries[&CountryCode::DE]);
    println!("  DE node shared after CH edit: {untouched}");

    Ok(())
}
