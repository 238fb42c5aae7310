//! Exchange rate resolution against a project's rate policy.
//!
//! Resolution is batched: the engine collects the distinct non-reporting
//! currencies of one computation run and resolves them all with at most one
//! external fetch. A rate source outage must never fail a settlement
//! computation, so every unresolvable currency degrades to a flagged
//! fallback rate instead of an error.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::table::cross_rate;

/// Errors from an external exchange rate source.
///
/// These never escape the resolver; they are absorbed into fallback rates
/// and surfaced to callers only as the `stale` flag on the [`RateTable`].
#[derive(Debug, Error)]
pub enum RateSourceError {
    /// The rate service could not be reached.
    #[error("rate source unreachable: {0}")]
    Transport(String),

    /// The rate service responded with something we could not parse.
    #[error("rate source returned an invalid payload: {0}")]
    Decode(String),

    /// The rate service does not publish rates for the requested base.
    #[error("rate source does not support base currency {0}")]
    UnsupportedBase(String),
}

/// Source of exchange rates for one base currency.
///
/// `fetch_table` returns a map of `currency -> units of currency per 1 base`.
pub trait RateProvider {
    /// Fetches the rate table for `base`.
    fn fetch_table(
        &self,
        base: &str,
    ) -> impl Future<Output = Result<HashMap<String, Decimal>, RateSourceError>> + Send;
}

/// Per-project exchange rate policy.
///
/// Custom rates are manual overrides expressed as
/// "1 unit of foreign currency = rate units of reporting currency" and take
/// precedence over live rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatePolicy {
    /// Reporting currency all balances and settlements are expressed in.
    pub currency: String,
    /// Manual rate overrides, keyed by foreign currency code.
    #[serde(default)]
    pub custom_rates: HashMap<String, Decimal>,
    /// Decimal places for reporting-currency amounts.
    #[serde(default = "default_precision")]
    pub precision: u32,
}

fn default_precision() -> u32 {
    2
}

impl RatePolicy {
    /// Creates a policy with no custom rates and the default precision.
    #[must_use]
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            custom_rates: HashMap::new(),
            precision: default_precision(),
        }
    }
}

/// How a resolved rate was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateOrigin {
    /// Same currency as the reporting currency; rate is exactly 1.
    Identity,
    /// Project-level manual override.
    Custom,
    /// Fetched from the external rate source.
    Live,
    /// The source was unavailable or had no entry; rate defaulted to 1.
    Fallback,
}

/// A resolved conversion rate into the reporting currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRate {
    /// 1 unit of the foreign currency equals `rate` units of reporting.
    pub rate: Decimal,
    /// Where the rate came from.
    pub origin: RateOrigin,
}

impl ResolvedRate {
    /// Returns true if this rate is a project-level manual override.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.origin == RateOrigin::Custom
    }

    /// Returns true if this rate is a degraded fallback.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.origin == RateOrigin::Fallback
    }
}

/// Resolved rates for one computation run.
#[derive(Debug, Clone)]
pub struct RateTable {
    reporting: String,
    rates: HashMap<String, ResolvedRate>,
    stale: bool,
}

impl RateTable {
    /// Builds a table directly from resolved rates. Primarily for tests and
    /// callers that already hold rates.
    #[must_use]
    pub fn from_rates(
        reporting: impl Into<String>,
        rates: HashMap<String, ResolvedRate>,
        stale: bool,
    ) -> Self {
        Self {
            reporting: reporting.into(),
            rates,
            stale,
        }
    }

    /// The reporting currency this table converts into.
    #[must_use]
    pub fn reporting(&self) -> &str {
        &self.reporting
    }

    /// Returns the rate for converting `currency` into the reporting
    /// currency.
    ///
    /// The reporting currency itself resolves to the identity rate. A
    /// currency missing from the table resolves to the fallback rate of 1,
    /// so an expense is never dropped for lack of a rate.
    #[must_use]
    pub fn rate_for(&self, currency: &str) -> ResolvedRate {
        if currency == self.reporting {
            return ResolvedRate {
                rate: Decimal::ONE,
                origin: RateOrigin::Identity,
            };
        }
        self.rates.get(currency).copied().unwrap_or(ResolvedRate {
            rate: Decimal::ONE,
            origin: RateOrigin::Fallback,
        })
    }

    /// True when at least one rate could not be resolved live and the
    /// resulting amounts should be presented as approximate.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Iterates over the resolved foreign currencies in sorted order.
    pub fn resolved(&self) -> impl Iterator<Item = (&str, ResolvedRate)> {
        let mut entries: Vec<_> = self.rates.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(c, r)| (c.as_str(), *r))
    }
}

/// Resolves conversion rates for a batch of currencies.
pub struct ExchangeRateResolver<P> {
    provider: P,
    timeout: Duration,
}

impl<P: RateProvider> ExchangeRateResolver<P> {
    /// Creates a resolver over the given provider. `timeout` bounds the
    /// single external fetch per run.
    pub fn new(provider: P, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Resolves every currency in `currencies` into the policy's reporting
    /// currency.
    ///
    /// Custom rates win over live rates. Currencies that still need a live
    /// rate share one provider fetch (a table based on the reporting
    /// currency), composed per currency via [`cross_rate`]. Any failure,
    /// timeout, or missing entry yields a fallback rate of 1 and marks the
    /// table stale; this method is infallible by design.
    pub async fn resolve_all(&self, currencies: &BTreeSet<String>, policy: &RatePolicy) -> RateTable {
        let mut rates = HashMap::new();
        let mut live_needed: Vec<&String> = Vec::new();

        for currency in currencies {
            if *currency == policy.currency {
                continue;
            }
            if let Some(rate) = policy.custom_rates.get(currency) {
                rates.insert(
                    currency.clone(),
                    ResolvedRate {
                        rate: *rate,
                        origin: RateOrigin::Custom,
                    },
                );
            } else {
                live_needed.push(currency);
            }
        }

        let mut stale = false;
        if !live_needed.is_empty() {
            match tokio::time::timeout(self.timeout, self.provider.fetch_table(&policy.currency))
                .await
            {
                Ok(Ok(table)) => {
                    debug!(
                        base = %policy.currency,
                        entries = table.len(),
                        "fetched live rate table"
                    );
                    for currency in live_needed {
                        match cross_rate(&table, &policy.currency, currency, &policy.currency) {
                            Some(rate) => {
                                rates.insert(
                                    currency.clone(),
                                    ResolvedRate {
                                        rate,
                                        origin: RateOrigin::Live,
                                    },
                                );
                            }
                            None => {
                                warn!(%currency, "rate source has no entry, using fallback rate 1");
                                rates.insert(
                                    currency.clone(),
                                    ResolvedRate {
                                        rate: Decimal::ONE,
                                        origin: RateOrigin::Fallback,
                                    },
                                );
                                stale = true;
                            }
                        }
                    }
                }
                Ok(Err(err)) => {
                    warn!(error = %err, "rate source failed, using fallback rates");
                    Self::fill_fallback(&mut rates, &live_needed);
                    stale = true;
                }
                Err(_) => {
                    warn!(timeout_ms = self.timeout.as_millis(), "rate lookup timed out, using fallback rates");
                    Self::fill_fallback(&mut rates, &live_needed);
                    stale = true;
                }
            }
        }

        RateTable {
            reporting: policy.currency.clone(),
            rates,
            stale,
        }
    }

    fn fill_fallback(rates: &mut HashMap<String, ResolvedRate>, currencies: &[&String]) {
        for currency in currencies {
            rates.insert(
                (*currency).clone(),
                ResolvedRate {
                    rate: Decimal::ONE,
                    origin: RateOrigin::Fallback,
                },
            );
        }
    }
}
