//! HTTP client for a Frankfurter-compatible exchange rate API.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use splitledger_core::currency::{RateProvider, RateSourceError};
use splitledger_shared::config::RatesConfig;

/// Live rate source over HTTP.
///
/// Speaks the Frankfurter `GET /latest?base=XXX` shape: a JSON object with
/// a `rates` map of `currency -> units per 1 base`. The engine wraps every
/// call in its own timeout and falls back on failure, so this client stays
/// deliberately thin: no retries, no caching.
pub struct FrankfurterClient {
    http: reqwest::Client,
    base_url: String,
}

/// Response payload of the `latest` endpoint.
#[derive(Debug, Deserialize)]
struct LatestResponse {
    rates: HashMap<String, Decimal>,
}

impl FrankfurterClient {
    /// Creates a client against the given API base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Creates a client from application configuration.
    #[must_use]
    pub fn from_config(config: &RatesConfig) -> Self {
        Self::new(config.base_url.trim_end_matches('/'))
    }

    fn latest_url(&self, base: &str) -> String {
        format!("{}/latest?base={base}", self.base_url)
    }
}

impl RateProvider for FrankfurterClient {
    async fn fetch_table(&self, base: &str) -> Result<HashMap<String, Decimal>, RateSourceError> {
        let url = self.latest_url(base);
        debug!(%url, "fetching rate table");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| RateSourceError::Transport(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RateSourceError::UnsupportedBase(base.to_string()));
        }
        if !status.is_success() {
            return Err(RateSourceError::Transport(format!(
                "rate source returned status {status}"
            )));
        }

        let payload: LatestResponse = response
            .json()
            .await
            .map_err(|err| RateSourceError::Decode(err.to_string()))?;

        Ok(payload.rates)
    }
}
