//! Caller-facing settlement computation.
//!
//! One entry point glues the pipeline together: resolve rates once,
//! aggregate balances, plan transfers, and return a report with enough
//! metadata for the UI to tell live rates from custom and fallback ones.

pub mod error;
pub mod service;
pub mod types;

pub use error::EngineError;
pub use service::SettlementEngine;
pub use types::{CurrencyRate, SettlementReport, SettlementSummary};
