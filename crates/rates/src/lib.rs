//! Exchange rate sources for Splitledger.
//!
//! Implementations of the engine's `RateProvider` seam:
//! - [`FrankfurterClient`] - live rates over HTTP
//! - [`StaticRateProvider`] - fixed in-memory table for tests and offline use

pub mod client;
pub mod static_table;

pub use client::FrankfurterClient;
pub use static_table::StaticRateProvider;
