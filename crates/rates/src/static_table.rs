//! Fixed in-memory rate source.

use std::collections::HashMap;

use rust_decimal::Decimal;

use splitledger_core::currency::{RateProvider, RateSourceError};

/// A rate source backed by a fixed table for one base currency.
///
/// Used in tests and for offline/dev runs where hitting a live rate API is
/// unwanted. Asking for any other base fails with `UnsupportedBase`, which
/// the engine's resolver degrades into flagged fallback rates.
#[derive(Debug, Clone, Default)]
pub struct StaticRateProvider {
    base: String,
    rates: HashMap<String, Decimal>,
}

impl StaticRateProvider {
    /// Creates an empty table for the given base currency.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            rates: HashMap::new(),
        }
    }

    /// Adds a rate: 1 unit of the base equals `units` of `currency`.
    #[must_use]
    pub fn with_rate(mut self, currency: impl Into<String>, units: Decimal) -> Self {
        self.rates.insert(currency.into(), units);
        self
    }
}

impl RateProvider for StaticRateProvider {
    async fn fetch_table(&self, base: &str) -> Result<HashMap<String, Decimal>, RateSourceError> {
        if base == self.base {
            Ok(self.rates.clone())
        } else {
            Err(RateSourceError::UnsupportedBase(base.to_string()))
        }
    }
}
