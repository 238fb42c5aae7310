//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Exchange rate source configuration.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Default decimal precision for reporting-currency amounts.
    #[serde(default = "default_precision")]
    pub default_precision: u32,
}

/// Exchange rate source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Base URL of the exchange rate API.
    #[serde(default = "default_rates_url")]
    pub base_url: String,
    /// Timeout for a rate lookup in milliseconds. On expiry the engine
    /// falls back to stale rates instead of blocking.
    #[serde(default = "default_rates_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            base_url: default_rates_url(),
            timeout_ms: default_rates_timeout_ms(),
        }
    }
}

fn default_rates_url() -> String {
    "https://api.frankfurter.dev/v1".to_string()
}

fn default_rates_timeout_ms() -> u64 {
    3000
}

fn default_precision() -> u32 {
    2
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SPLITLEDGER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
