//! vnet-cli — Command-line interface for vnet-core
//!
//! Inspects a Voucher Network settings file the way the page scripts and the
//! admin form see it: summary statistics, per-row admin status, resolution
//! for a simulated page context, and single edits.
//!
//! Usage examples
//! --------------
//!
//! - Show overall stats
//!   $ vnet --settings settings.json stats
//!
//! - List every country/language row with its status
//!   $ vnet --settings settings.json countries
//!
//! - Resolve for a Swiss page declared as French
//!   $ vnet --settings settings.json resolve CH --document-lang fr-CH
//!
//! - Apply an edit and print the resulting settings JSON
//!   $ vnet --settings settings.json set-field DE de source 123
//!   $ vnet --settings settings.json set-enabled DE de false
//!
//! Edits are printed to stdout; the input file is never modified.
mod args;

use std::sync::Arc;

use crate::args::{CliArgs, Commands};
use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::fmt;
use vnet_core::editor::{self, editor_entries, EditorEntry};
use vnet_core::language::StaticLanguageDetector;
use vnet_core::{
    resolve_voucher_network_settings, CountryCode, LanguageCode, TrafficField,
    VoucherNetworkSettings,
};

fn leaf_key(country: &str, language: &str) -> anyhow::Result<(CountryCode, LanguageCode)> {
    Ok((CountryCode::parse_normalized(country)?, language.parse()?))
}

/// One line of the `countries` listing, e.g. `CH fr (Switzerland (French)): Disabled`.
fn country_row(settings: &VoucherNetworkSettings, row: &EditorEntry) -> String {
    format!(
        "{} {} ({}): {}",
        row.country,
        row.language,
        row.display_name,
        editor::country_status(settings, row.country, row.language)
    )
}

fn print_settings(
    before: &Arc<VoucherNetworkSettings>,
    after: &Arc<VoucherNetworkSettings>,
) -> anyhow::Result<()> {
    if Arc::ptr_eq(before, after) {
        tracing::info!("edit left the settings unchanged");
    }
    println!("{}", after.to_json_string_pretty()?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let max_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    fmt().with_max_level(max_level).init();

    let settings = match args.settings.as_deref() {
        Some(path) => VoucherNetworkSettings::load_from_path(path)
            .with_context(|| format!("loading settings from {path}"))?,
        None => VoucherNetworkSettings::default(),
    };
    let settings = Arc::new(settings);

    match args.command {
        Commands::Stats => {
            let stats = settings.stats();
            println!("Settings statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  Leaves: {}", stats.leaves);
            println!("  Usable: {}", stats.usable);
        }

        Commands::Countries => {
            for row in editor_entries(&CountryCode::ALL) {
                println!("{}", country_row(&settings, &row));
            }
        }

        Commands::Resolve {
            country,
            language,
            document_lang,
            navigator_lang,
        } => {
            let detector =
                StaticLanguageDetector::new(document_lang.as_deref(), navigator_lang.as_deref());
            let resolution = resolve_voucher_network_settings(
                &settings,
                Some(&country),
                language.as_deref(),
                &detector,
            );
            match resolution.outcome {
                Ok(leaf) => println!("{}", serde_json::to_string_pretty(&leaf)?),
                Err(reason) => eprintln!("Not resolved for {country}: {reason}"),
            }
        }

        Commands::SetEnabled {
            country,
            language,
            enabled,
        } => {
            let (country, language) = leaf_key(&country, &language)?;
            let next = editor::set_enabled(&settings, country, language, enabled);
            print_settings(&settings, &next)?;
        }

        Commands::SetField {
            country,
            language,
            field,
            value,
        } => {
            let (country, language) = leaf_key(&country, &language)?;
            let field: TrafficField = field.parse()?;
            let next = editor::set_field(&settings, country, language, field, &value);
            print_settings(&settings, &next)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vnet_core::LanguageSettings;

    #[test]
    fn country_rows_use_plain_ascii_separators() {
        let settings = VoucherNetworkSettings::default().with_leaf(
            CountryCode::DE,
            LanguageCode::De,
            LanguageSettings::new(true, "123", "456"),
        );
        let rows: Vec<_> = editor_entries(&[CountryCode::DE, CountryCode::AT])
            .iter()
            .map(|row| country_row(&settings, row))
            .collect();

        assert_eq!(
            rows,
            vec![
                "DE de (Germany): Source: 123, Medium: 456",
                "AT de (Austria): Not configured",
            ]
        );
        assert!(rows.iter().all(|row| row.is_ascii()));
    }

    #[test]
    fn leaf_key_accepts_legacy_uk() {
        let (country, language) = leaf_key("UK", "en").unwrap();
        assert_eq!((country, language), (CountryCode::GB, LanguageCode::En));
        assert!(leaf_key("gb", "en").is_err());
    }
}
