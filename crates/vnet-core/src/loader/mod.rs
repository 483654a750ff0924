// crates/vnet-core/src/loader/mod.rs

//! # Settings Loader
//!
//! Reads the admin-persisted settings JSON (optionally gzipped) into the
//! in-memory tree. Unknown country and language keys are dropped with a
//! warning rather than failing the load.

#![cfg(feature = "json")]

use crate::error::Result;
use crate::model::VoucherNetworkSettings;
use crate::thankyou::ThankYouPageConfig;
use std::io::Read;
use std::path::Path;

mod common_io;

pub use common_io::is_gzip_path;

impl VoucherNetworkSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Loads a `.json` (or, with `compact`, a `.json.gz`) settings file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = common_io::open_stream(path)?;
        let settings = Self::from_reader(reader)?;
        tracing::debug!(
            path = %path.display(),
            countries = settings.countries.len(),
            "loaded voucher network settings"
        );
        Ok(settings)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl ThankYouPageConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
