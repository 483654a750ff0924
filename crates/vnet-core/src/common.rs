// crates/vnet-core/src/common.rs
use crate::model::VoucherNetworkSettings;
use crate::validation::is_usable;
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for a settings tree.
///
/// Returned by [`VoucherNetworkSettings::stats`]; counts reflect the tree
/// after unknown keys were dropped at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsStats {
    pub countries: usize,
    pub leaves: usize,
    pub usable: usize,
}

impl VoucherNetworkSettings {
    pub fn stats(&self) -> SettingsStats {
        let mut stats = SettingsStats {
            countries: self.countries.len(),
            ..SettingsStats::default()
        };
        for (_, _, leaf) in self.leaves() {
            stats.leaves += 1;
            if is_usable(Some(leaf)) {
                stats.usable += 1;
            }
        }
        stats
    }
}
