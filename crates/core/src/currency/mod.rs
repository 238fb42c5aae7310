//! Monetary rounding, exchange rate composition, and rate resolution.

pub mod resolver;
pub mod rounding;
pub mod table;

#[cfg(test)]
mod props;

pub use resolver::{
    ExchangeRateResolver, RateOrigin, RatePolicy, RateProvider, RateSourceError, RateTable,
    ResolvedRate,
};
pub use rounding::{epsilon, is_settled, round_money};
pub use table::cross_rate;
