use clap::{Parser, Subcommand};

/// CLI arguments for vnet-cli
#[derive(Debug, Parser)]
#[command(
    name = "vnet",
    version,
    about = "CLI for inspecting and editing Voucher Network settings"
)]
pub struct CliArgs {
    /// Path to the settings JSON (or .json.gz); an empty tree is used when omitted
    #[arg(short = 's', long = "settings", global = true)]
    pub settings: Option<String>,

    /// Log resolution steps and dropped keys
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the settings tree
    Stats,

    /// List every supported country/language row with its admin status
    Countries,

    /// Resolve the active settings for a page context
    Resolve {
        /// Country code as sent by the shop (e.g. DE, CH, UK)
        country: String,

        /// Explicit language; only used for multi-language countries
        #[arg(short = 'l', long = "language")]
        language: Option<String>,

        /// Simulated `<html lang>` of the page (e.g. fr-CH)
        #[arg(long = "document-lang")]
        document_lang: Option<String>,

        /// Simulated browser language (e.g. de-DE)
        #[arg(long = "navigator-lang")]
        navigator_lang: Option<String>,
    },

    /// Toggle a leaf on or off and print the resulting settings
    SetEnabled {
        country: String,
        language: String,
        #[arg(action = clap::ArgAction::Set)]
        enabled: bool,
    },

    /// Store a traffic source/medium number and print the resulting settings
    SetField {
        country: String,
        language: String,
        /// `source` or `medium`
        field: String,
        /// Raw input; parsed like the admin form does
        value: String,
    },
}
