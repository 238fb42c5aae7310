//! Settlement planning: turning net balances into pairwise transfers.
//!
//! - Transfer domain types
//! - The `GreedyMaxMatch` planning strategy
//! - Error types for settlement planning

pub mod error;
pub mod planner;
pub mod types;

#[cfg(test)]
mod props;

pub use error::SettlementError;
pub use planner::GreedyMaxMatch;
pub use types::Settlement;
