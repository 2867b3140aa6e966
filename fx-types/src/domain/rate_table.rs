//! Rate table returned by the provider for a base currency.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Ephemeral rate table for one base currency. Constructed from a single
/// provider response, consulted for one rate, then discarded.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    #[serde(default)]
    pub last_update: Option<i64>,
    pub base: String,
    pub rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Looks up the rate for `target`, comparing currency codes
    /// case-insensitively.
    ///
    /// If the table holds several keys that differ only in case, the last one
    /// encountered wins. Map iteration order is unspecified, so duplicate
    /// keys make the result nondeterministic; providers are expected to emit
    /// unique upper-case codes.
    pub fn rate_for(&self, target: &str) -> Option<Decimal> {
        let mut found = None;
        for (code, rate) in &self.rates {
            if code.eq_ignore_ascii_case(target) {
                found = Some(*rate);
            }
        }
        found
    }
}
