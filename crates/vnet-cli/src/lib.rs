//! vnet-cli
//! ========
//!
//! Command-line interface for Voucher Network settings files.
//!
//! This crate primarily provides a binary (`vnet-cli`). The library target
//! only exists so the overview below renders as a documentation page.
//!
//! Basic usage:
//!
//! ```text
//! vnet-cli --help
//! vnet-cli --settings settings.json stats
//! vnet-cli --settings settings.json resolve CH --document-lang fr-CH
//! vnet-cli --settings settings.json set-field DE de source 123
//! ```
//!
//! For programmatic access use the [`vnet-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]
